//! Placeholder skeleton drawn over the camera view.
//!
//! These coordinates are fixed; nothing here detects a pose.

/// Frame the joint coordinates are expressed in
pub const FRAME_WIDTH: f64 = 640.0;
pub const FRAME_HEIGHT: f64 = 480.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
}

const fn joint(name: &'static str, x: f64, y: f64) -> Joint {
    Joint { name, x, y }
}

pub const JOINTS: [Joint; 15] = [
    joint("head", 320.0, 100.0),
    joint("neck", 320.0, 150.0),
    joint("torso", 320.0, 220.0),
    joint("left shoulder", 280.0, 180.0),
    joint("right shoulder", 360.0, 180.0),
    joint("left elbow", 250.0, 220.0),
    joint("right elbow", 390.0, 220.0),
    joint("left wrist", 230.0, 260.0),
    joint("right wrist", 410.0, 260.0),
    joint("left hip", 300.0, 300.0),
    joint("right hip", 340.0, 300.0),
    joint("left knee", 290.0, 380.0),
    joint("right knee", 350.0, 380.0),
    joint("left ankle", 290.0, 450.0),
    joint("right ankle", 350.0, 450.0),
];

/// Bones as pairs of indices into [`JOINTS`]
pub const CONNECTIONS: [(usize, usize); 14] = [
    (0, 1),
    (1, 2),
    (1, 3),
    (3, 5),
    (5, 7),
    (1, 4),
    (4, 6),
    (6, 8),
    (2, 9),
    (9, 11),
    (11, 13),
    (2, 10),
    (10, 12),
    (12, 14),
];

/// Joint IDs of the full 33-landmark body model, listed in the sidebar
pub const JOINT_REFERENCE: [&str; 6] = [
    "11/12: Shoulders",
    "13/14: Elbows",
    "15/16: Wrists",
    "23/24: Hips",
    "25/26: Knees",
    "27/28: Ankles",
];

/// Label drawn next to a joint when coordinates are shown
pub fn joint_label(index: usize, joint: &Joint) -> String {
    format!("id:{} ({},{})", index, joint.x as i64, joint.y as i64)
}

/// Flip a frame y coordinate (origin top-left) into canvas space (origin
/// bottom-left)
pub fn canvas_y(frame_y: f64) -> f64 {
    FRAME_HEIGHT - frame_y
}
