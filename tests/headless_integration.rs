use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use repcoach::app::App;
use repcoach::camera::{CameraRequest, CameraStatus, DeniedCamera, FakeCamera};
use repcoach::clock::ManualClock;
use repcoach::config::Config;
use repcoach::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use repcoach::scoring::FixedFormScorer;
use repcoach::session::Session;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn dispatch(app: &mut App<ManualClock, FixedFormScorer>, event: AppEvent) {
    match event {
        AppEvent::Key(key) => app.on_key(key),
        AppEvent::Resize => {}
        AppEvent::Tick => app.on_tick(),
    }
}

fn build(config: Config) -> (App<ManualClock, FixedFormScorer>, ManualClock) {
    let clock = ManualClock::default();
    let session = Session::new(clock.clone(), FixedFormScorer(88));
    (App::new(session, &config).unwrap(), clock)
}

// Drives the app headlessly through Runner/TestEventSource: pick an
// exercise, confirm the start, count reps, and let the target stop it.
#[test]
fn headless_session_flow_completes() {
    let (mut app, clock) = build(Config {
        target_reps: 5,
        ..Config::default()
    });
    app.attach_camera(CameraRequest::spawn(FakeCamera));

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    tx.send(key(KeyCode::Down)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Char('y'))).unwrap();
    for _ in 0..3 {
        dispatch(&mut app, runner.step());
    }
    assert!(app.session.state().is_active);

    for _ in 0..5 {
        clock.advance_secs_f64(2.0);
        tx.send(key(KeyCode::Char(' '))).unwrap();
        dispatch(&mut app, runner.step());
    }

    let st = app.session.state();
    assert!(!st.is_active);
    assert_eq!(st.rep_count, 5);
    assert_eq!(st.avg_time_per_rep, 2.0);
    assert_eq!(st.form_score, 88);
    assert_eq!(
        st.feedback_messages.last().unwrap().message,
        "Congratulations! You've completed 5 Squats!"
    );

    // Ticks keep flowing when no input arrives
    for _ in 0..200 {
        dispatch(&mut app, runner.step());
        if app.camera.status().is_granted() {
            break;
        }
    }
    assert!(app.camera.status().is_granted());
}

#[test]
fn headless_pause_and_simulated_reps() {
    let (mut app, clock) = build(Config {
        target_reps: 10,
        simulate_every_secs: Some(2.0),
        ..Config::default()
    });

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );

    app.request_start();
    app.confirm_start();

    // Two periods are due but a single poll counts one rep
    clock.advance_secs_f64(4.0);
    dispatch(&mut app, runner.step());
    assert_eq!(app.session.state().rep_count, 1);
    assert_eq!(app.session.state().elapsed_time, 4);

    tx.send(key(KeyCode::Char('p'))).unwrap();
    dispatch(&mut app, runner.step());
    assert!(app.session.state().is_paused);

    clock.advance_secs_f64(30.0);
    dispatch(&mut app, runner.step());
    assert_eq!(app.session.state().rep_count, 1);

    tx.send(key(KeyCode::Char('p'))).unwrap();
    dispatch(&mut app, runner.step());
    clock.advance_secs_f64(2.0);
    dispatch(&mut app, runner.step());

    let st = app.session.state();
    assert_eq!(st.rep_count, 2);
    assert_eq!(st.elapsed_time, 6);
    assert_eq!(st.total_paused_ms, 30_000);

    tx.send(key(KeyCode::Char('s'))).unwrap();
    dispatch(&mut app, runner.step());
    assert!(!app.session.state().is_active);
    assert!(!app.timers_armed());
}

#[test]
fn headless_denied_camera_is_terminal() {
    let (mut app, _) = build(Config::default());
    app.attach_camera(CameraRequest::spawn(DeniedCamera::new("blocked by policy")));

    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for _ in 0..200 {
        dispatch(&mut app, runner.step());
        if app.camera.status() != &CameraStatus::Initializing {
            break;
        }
    }

    match app.camera.status() {
        CameraStatus::Denied(reason) => assert!(reason.contains("blocked by policy")),
        other => panic!("expected denial, got {other:?}"),
    }
    assert!(app.camera.stream().is_none());
}
