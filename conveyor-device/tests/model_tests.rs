mod utils;

use std::time::Duration;

use conveyor_device::{ConveyorModel, DeviceState, PulseSettings};
use conveyor_types::ConveyorStatus;
use tokio::time::{sleep, Instant};
use utils::observer::{Notification, RecordingObserver};

fn idle(motors: u16) -> DeviceState {
    DeviceState {
        status: ConveyorStatus::Idle,
        motors,
        running_speed: 0.0,
    }
}

#[test]
fn construction_notifies_initial_state() {
    let observer = RecordingObserver::new();
    let model = ConveyorModel::new(4, observer.clone());

    assert_eq!(
        observer.notifications(),
        vec![
            Notification::Motors(4),
            Notification::Speed(0.0),
            Notification::Status(ConveyorStatus::Idle),
        ]
    );
    assert_eq!(model.snapshot(), idle(4));
    assert_eq!(model.active_runs(), 0);
}

#[tokio::test(start_paused = true)]
async fn start_runs_pulse_sequence() {
    let observer = RecordingObserver::new();
    let model = ConveyorModel::new(6, observer.clone());

    let begin = Instant::now();
    model.start().await;

    assert!(begin.elapsed() >= Duration::from_secs(1));
    assert!(begin.elapsed() < Duration::from_millis(1100));
    assert_eq!(
        observer.notifications_after(3),
        vec![
            Notification::Status(ConveyorStatus::Started),
            Notification::Speed(10.0),
            Notification::Speed(0.0),
            Notification::Status(ConveyorStatus::Idle),
        ]
    );
    assert_eq!(model.snapshot(), idle(6));
}

#[tokio::test(start_paused = true)]
async fn start_uses_pulse_settings() {
    let observer = RecordingObserver::new();
    let pulse = PulseSettings {
        speed: 15.0,
        settle: Duration::from_millis(250),
    };
    let model = ConveyorModel::with_pulse(4, observer.clone(), pulse);

    let begin = Instant::now();
    model.start().await;

    assert!(begin.elapsed() >= Duration::from_millis(250));
    assert!(begin.elapsed() < Duration::from_millis(300));
    assert_eq!(observer.speeds(), vec![0.0, 15.0, 0.0]);
}

#[tokio::test(start_paused = true)]
async fn interrupted_start_still_ends_idle() {
    let observer = RecordingObserver::new();
    let model = ConveyorModel::new(4, observer.clone());

    let begin = Instant::now();
    let running = model.clone();
    let task = tokio::spawn(async move { running.start().await });

    sleep(Duration::from_millis(100)).await;
    assert_eq!(model.status(), ConveyorStatus::Started);
    assert_eq!(model.snapshot().running_speed, 10.0);

    model.interrupt();
    task.await.unwrap();

    assert!(begin.elapsed() < Duration::from_secs(1));
    assert_eq!(model.snapshot(), idle(4));
    assert_eq!(
        observer.statuses(),
        vec![ConveyorStatus::Idle, ConveyorStatus::Started, ConveyorStatus::Idle]
    );
}

#[test]
fn overlapping_runs_return_idle_with_last_guard() {
    let observer = RecordingObserver::new();
    let model = ConveyorModel::new(4, observer.clone());

    let first = model.begin_run();
    let second = model.begin_run();
    assert_eq!(model.active_runs(), 2);
    assert!(model.try_begin_run().is_none());

    first.set_speed(8.0);
    second.set_speed(12.0);
    drop(first);
    assert_eq!(model.status(), ConveyorStatus::Started);
    assert_eq!(model.snapshot().running_speed, 12.0);

    drop(second);
    assert_eq!(model.snapshot(), idle(4));
    assert_eq!(
        observer.notifications_after(3),
        vec![
            Notification::Status(ConveyorStatus::Started),
            Notification::Speed(8.0),
            Notification::Speed(12.0),
            Notification::Speed(0.0),
            Notification::Status(ConveyorStatus::Idle),
        ]
    );

    assert!(model.try_begin_run().is_some());
    assert_eq!(model.snapshot(), idle(4));
}

#[tokio::test]
async fn aborted_run_returns_idle() {
    let observer = RecordingObserver::new();
    let model = ConveyorModel::new(4, observer.clone());

    let guard = model.begin_run();
    let task = tokio::spawn(async move {
        guard.set_speed(20.0);
        sleep(Duration::from_secs(3600)).await;
        drop(guard);
    });

    tokio::task::yield_now().await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert_eq!(model.snapshot(), idle(4));
    assert_eq!(model.active_runs(), 0);
}
