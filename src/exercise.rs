use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The exercises a session can track
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Exercise {
    #[default]
    #[strum(serialize = "Push-ups")]
    PushUps,
    #[strum(serialize = "Squats")]
    Squats,
    #[strum(serialize = "Jumping Jacks")]
    JumpingJacks,
    #[strum(serialize = "Sit-ups")]
    SitUps,
    #[strum(serialize = "Lunges")]
    Lunges,
}

impl Exercise {
    pub const ALL: [Exercise; 5] = [
        Exercise::PushUps,
        Exercise::Squats,
        Exercise::JumpingJacks,
        Exercise::SitUps,
        Exercise::Lunges,
    ];

    /// Form cues shown under "Exercise Information"
    pub fn form_cues(&self) -> &'static [&'static str] {
        match self {
            Exercise::PushUps => &[
                "Keep your body straight",
                "Arms shoulder-width apart",
                "Lower until elbows are at 90°",
                "Push back up with controlled movement",
            ],
            Exercise::Squats => &[
                "Feet shoulder-width apart",
                "Keep chest up, back straight",
                "Lower until thighs are parallel to ground",
                "Push through heels to stand",
            ],
            Exercise::JumpingJacks => &[
                "Start with feet together, arms at sides",
                "Jump and spread legs while raising arms",
                "Return to starting position",
                "Maintain rhythm and form",
            ],
            Exercise::SitUps => &[
                "Lie on back, knees bent at 45°",
                "Hands across chest or beside head",
                "Engage core to raise upper body",
                "Lower with control",
            ],
            Exercise::Lunges => &[
                "Stand with feet hip-width apart",
                "Step forward with one leg",
                "Lower until both knees at 90°",
                "Push back to starting position",
                "Alternate legs",
            ],
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|e| e == self).unwrap_or(0)
    }

    /// Next exercise in the list, wrapping around
    pub fn next(&self) -> Exercise {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous exercise in the list, wrapping around
    pub fn previous(&self) -> Exercise {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(Exercise::PushUps.to_string(), "Push-ups");
        assert_eq!(Exercise::Squats.to_string(), "Squats");
        assert_eq!(Exercise::JumpingJacks.to_string(), "Jumping Jacks");
        assert_eq!(Exercise::SitUps.to_string(), "Sit-ups");
        assert_eq!(Exercise::Lunges.to_string(), "Lunges");
    }

    #[test]
    fn test_default_is_push_ups() {
        assert_eq!(Exercise::default(), Exercise::PushUps);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(Exercise::PushUps.next(), Exercise::Squats);
        assert_eq!(Exercise::Lunges.next(), Exercise::PushUps);
        assert_eq!(Exercise::PushUps.previous(), Exercise::Lunges);
        assert_eq!(Exercise::SitUps.previous(), Exercise::JumpingJacks);
    }

    #[test]
    fn test_every_exercise_has_cues() {
        for exercise in Exercise::ALL {
            assert!(!exercise.form_cues().is_empty());
        }
        assert_eq!(Exercise::Lunges.form_cues().len(), 5);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Exercise::JumpingJacks).unwrap();
        assert_eq!(json, "\"jumping-jacks\"");
        let parsed: Exercise = serde_json::from_str("\"sit-ups\"").unwrap();
        assert_eq!(parsed, Exercise::SitUps);
    }

    #[test]
    fn test_value_enum_names() {
        let parsed = Exercise::from_str("push-ups", true).unwrap();
        assert_eq!(parsed, Exercise::PushUps);
        let parsed = Exercise::from_str("jumping-jacks", true).unwrap();
        assert_eq!(parsed, Exercise::JumpingJacks);
    }
}
