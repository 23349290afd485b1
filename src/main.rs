use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, warn};

use repcoach::{
    app::App,
    app_dirs::AppDirs,
    camera::{CameraRequest, DeniedCamera, DeviceCamera, FakeCamera, DEFAULT_DEVICE},
    clock::Clock,
    config::{Config, ConfigStore, FileConfigStore},
    exercise::Exercise,
    logging::init_logging,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    scoring::FormScorer,
    session::Session,
};

/// terminal fitness coach with rep tracking, pacing feedback, and session metrics
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal fitness coach: pick an exercise, set a target, and track reps, pace, and form feedback while a placeholder skeleton is drawn over the camera view."
)]
pub struct Cli {
    /// exercise selected at startup
    #[clap(short = 'e', long, value_enum)]
    exercise: Option<Exercise>,

    /// reps that complete a session
    #[clap(short = 'r', long)]
    target_reps: Option<u32>,

    /// pose detection confidence threshold, 0.5 to 0.9
    #[clap(short = 'c', long)]
    confidence: Option<f64>,

    /// count a simulated rep every SECS seconds while a session runs
    #[clap(long, value_name = "SECS")]
    simulate_every: Option<f64>,

    /// hide joint coordinate labels on the skeleton overlay
    #[clap(long)]
    hide_coordinates: bool,

    /// camera device node to open
    #[clap(long, default_value = DEFAULT_DEVICE)]
    camera_device: PathBuf,

    /// run without a camera (the camera view shows the access message)
    #[clap(long, conflicts_with = "fake_camera")]
    no_camera: bool,

    /// pretend a camera was granted
    #[clap(long)]
    fake_camera: bool,

    /// store the resulting settings as the new defaults
    #[clap(long)]
    save_defaults: bool,

    /// increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer command line flags over stored defaults
    fn apply(&self, mut config: Config) -> Config {
        if let Some(exercise) = self.exercise {
            config.exercise = exercise;
        }
        if let Some(reps) = self.target_reps {
            config.target_reps = reps;
        }
        if let Some(confidence) = self.confidence {
            config.detection_confidence = confidence;
        }
        if self.simulate_every.is_some() {
            config.simulate_every_secs = self.simulate_every;
        }
        if self.hide_coordinates {
            config.show_coordinates = false;
        }
        config
    }

    fn camera_request(&self) -> CameraRequest {
        if self.no_camera {
            CameraRequest::spawn(DeniedCamera::new("camera disabled with --no-camera"))
        } else if self.fake_camera {
            CameraRequest::spawn(FakeCamera)
        } else {
            CameraRequest::spawn(DeviceCamera::new(&self.camera_device))
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&AppDirs::log_path(), cli.verbose) {
        eprintln!("warning: file logging disabled: {e}");
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if let Err(e) = config.validate() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::ValueValidation, e).exit();
    }

    if cli.save_defaults {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved defaults");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(Session::with_system_clock(), &config)?;
    app.attach_camera(cli.camera_request());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    let result = start_tui(&mut terminal, &mut app, &runner);
    if let Err(e) = &result {
        warn!(error = %e, "event loop failed");
    }

    app.teardown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B, E, T, C, S>(
    terminal: &mut Terminal<B>,
    app: &mut App<C, S>,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: EventSource,
    T: Ticker,
    C: Clock,
    S: FormScorer,
{
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Key(key) => app.on_key(key),
            AppEvent::Resize => {}
            AppEvent::Tick => app.on_tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
