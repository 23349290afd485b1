// Library surface for the binary, headless drivers, and integration tests.
pub mod app;
pub mod app_dirs;
pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod logging;
pub mod pose;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod timer;
pub mod ui;
pub mod util;

pub use app::App;
pub use session::{RepOutcome, Session, SessionState};
