use std::path::PathBuf;
use thiserror::Error;

/// Rejected session settings
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("target reps must be at least 1, got {0}")]
    InvalidTargetReps(u32),

    #[error("detection confidence must be within 0.5..=0.9, got {0}")]
    InvalidConfidence(f64),

    #[error("simulated rep period must be within 0.1..=3600 seconds, got {0}")]
    InvalidSimulateEvery(f64),
}

/// Why the camera could not be opened
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("Camera access denied. Please enable camera permissions. ({reason})")]
    PermissionDenied { reason: String },

    #[error("No camera found at {}", path.display())]
    DeviceMissing { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_messages() {
        assert_eq!(
            SettingsError::InvalidTargetReps(0).to_string(),
            "target reps must be at least 1, got 0"
        );
        assert_eq!(
            SettingsError::InvalidConfidence(0.95).to_string(),
            "detection confidence must be within 0.5..=0.9, got 0.95"
        );
        assert_eq!(
            SettingsError::InvalidSimulateEvery(0.01).to_string(),
            "simulated rep period must be within 0.1..=3600 seconds, got 0.01"
        );
    }

    #[test]
    fn test_camera_error_messages() {
        let denied = CameraError::PermissionDenied {
            reason: "EACCES".into(),
        };
        assert!(denied.to_string().starts_with("Camera access denied."));

        let missing = CameraError::DeviceMissing {
            path: PathBuf::from("/dev/video9"),
        };
        assert_eq!(missing.to_string(), "No camera found at /dev/video9");
    }

    #[test]
    fn test_config_error_wraps_settings() {
        let err: ConfigError = SettingsError::InvalidTargetReps(0).into();
        assert_eq!(err.to_string(), "target reps must be at least 1, got 0");
    }
}
