//! Camera acquisition.
//!
//! The camera is an external collaborator with exactly two outcomes: a
//! stream, or a denial with a reason. Acquisition happens once, off the
//! event loop, and a denial is final for the lifetime of the app.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, info, warn};

use crate::error::CameraError;

pub const DEFAULT_DEVICE: &str = "/dev/video0";

/// An open camera. Dropping it releases the device.
#[derive(Debug)]
pub struct CameraStream {
    label: String,
    handle: Option<File>,
}

impl CameraStream {
    pub fn new(label: impl Into<String>, handle: Option<File>) -> Self {
        Self {
            label: label.into(),
            handle,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn holds_device(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        if self.handle.take().is_some() {
            debug!(device = %self.label, "camera released");
        }
    }
}

/// Something that can hand out a camera stream
pub trait CameraSource: Send + 'static {
    fn acquire(&self) -> Result<CameraStream, CameraError>;
}

/// A V4L2 device node such as `/dev/video0`
#[derive(Debug, Clone)]
pub struct DeviceCamera {
    path: PathBuf,
}

impl DeviceCamera {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for DeviceCamera {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE)
    }
}

impl CameraSource for DeviceCamera {
    fn acquire(&self) -> Result<CameraStream, CameraError> {
        match OpenOptions::new().read(true).open(&self.path) {
            Ok(file) => Ok(CameraStream::new(
                self.path.display().to_string(),
                Some(file),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(CameraError::DeviceMissing {
                path: self.path.clone(),
            }),
            Err(e) => Err(CameraError::PermissionDenied {
                reason: e.to_string(),
            }),
        }
    }
}

/// Always grants a stream that holds no device
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeCamera;

impl CameraSource for FakeCamera {
    fn acquire(&self) -> Result<CameraStream, CameraError> {
        Ok(CameraStream::new("simulated camera", None))
    }
}

/// Always denies
#[derive(Debug, Clone)]
pub struct DeniedCamera {
    reason: String,
}

impl DeniedCamera {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl CameraSource for DeniedCamera {
    fn acquire(&self) -> Result<CameraStream, CameraError> {
        Err(CameraError::PermissionDenied {
            reason: self.reason.clone(),
        })
    }
}

/// What the camera view shows
#[derive(Debug, Clone, PartialEq)]
pub enum CameraStatus {
    Initializing,
    Granted(String),
    Denied(String),
}

impl CameraStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, CameraStatus::Granted(_))
    }
}

/// A pending acquisition running on its own thread. Dropping the request
/// cancels it; a stream that arrives afterwards is released immediately.
#[derive(Debug)]
pub struct CameraRequest {
    rx: Option<Receiver<Result<CameraStream, CameraError>>>,
}

impl CameraRequest {
    pub fn spawn<S: CameraSource>(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(source.acquire());
        });
        Self { rx: Some(rx) }
    }

    /// Non-blocking check; returns the outcome exactly once
    pub fn try_resolve(&mut self) -> Option<Result<CameraStream, CameraError>> {
        let rx = self.rx.as_ref()?;
        match rx.try_recv() {
            Ok(result) => {
                self.rx = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                Some(Err(CameraError::PermissionDenied {
                    reason: "camera request was abandoned".into(),
                }))
            }
        }
    }

    /// Block until the outcome arrives. Used by headless callers.
    pub fn wait(&mut self) -> Option<Result<CameraStream, CameraError>> {
        let rx = self.rx.take()?;
        Some(rx.recv().unwrap_or_else(|_| {
            Err(CameraError::PermissionDenied {
                reason: "camera request was abandoned".into(),
            })
        }))
    }

    pub fn is_pending(&self) -> bool {
        self.rx.is_some()
    }
}

/// Camera ownership for the app: the status to display plus the live
/// stream, if any
#[derive(Debug)]
pub struct Camera {
    status: CameraStatus,
    stream: Option<CameraStream>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            status: CameraStatus::Initializing,
            stream: None,
        }
    }
}

impl Camera {
    pub fn status(&self) -> &CameraStatus {
        &self.status
    }

    pub fn stream(&self) -> Option<&CameraStream> {
        self.stream.as_ref()
    }

    /// Apply an acquisition outcome. Only the first outcome counts.
    pub fn resolve(&mut self, result: Result<CameraStream, CameraError>) {
        if self.status != CameraStatus::Initializing {
            return;
        }
        match result {
            Ok(stream) => {
                info!(device = %stream.label(), "camera granted");
                self.status = CameraStatus::Granted(stream.label().to_string());
                self.stream = Some(stream);
            }
            Err(e) => {
                warn!(error = %e, "camera denied");
                self.status = CameraStatus::Denied(e.to_string());
            }
        }
    }

    /// Stop the stream; the status is left as is
    pub fn release(&mut self) {
        self.stream = None;
    }
}
