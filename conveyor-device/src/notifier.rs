use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use conveyor_namespace::DynEventSink;
use conveyor_types::{
    constants::{DEFAULT_EVENT_SEVERITY, PERIODIC_EVENT_MESSAGE, PERIODIC_EVENT_NAME},
    DeviceEvent, EventError, NodeId,
};
use log::{debug, error, info, warn};
use tokio::{select, sync::Notify, task::JoinHandle, time::sleep};

/// The object periodic events are attributed to
#[derive(Debug, Clone, PartialEq)]
pub struct EventSource {
    pub node_id: NodeId,
    pub name: String,
}

/// Counters of a notifier run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifierReport {
    pub posted: u64,
    pub failed: u64,
}

/// Periodically posts a device event to an event sink.
///
/// One event is posted as soon as the notifier starts and then one every interval.
#[derive(Clone)]
pub struct EventNotifier {
    sink: Arc<DynEventSink>,
    source: EventSource,
    interval: Duration,
    severity: u16,
}

impl EventNotifier {
    pub fn new(sink: Arc<DynEventSink>, source: EventSource, interval: Duration) -> Self {
        Self {
            sink,
            source,
            interval,
            severity: DEFAULT_EVENT_SEVERITY,
        }
    }

    pub fn with_severity(mut self, severity: u16) -> Self {
        self.severity = severity;
        self
    }

    fn build_event(&self) -> Result<DeviceEvent, EventError> {
        DeviceEvent::builder()
            .browse_name(PERIODIC_EVENT_NAME)
            .source(self.source.node_id.clone(), self.source.name.clone())
            .message(PERIODIC_EVENT_MESSAGE)
            .severity(self.severity)
            .build()
    }

    fn notify(&self, report: &mut NotifierReport) {
        let event = match self.build_event() {
            Ok(event) => event,
            Err(e) => {
                warn!("Unable to create periodic event for {}: {e}", self.source.name);
                report.failed += 1;
                return;
            }
        };
        match self.sink.post(event) {
            Ok(()) => {
                debug!("Posted periodic event for {}", self.source.name);
                report.posted += 1;
            }
            Err(e) => {
                warn!("Unable to post periodic event for {}: {e}", self.source.name);
                report.failed += 1;
            }
        }
    }

    /// Spawn the notifier loop
    pub fn start(self) -> NotifierHandle {
        let running = Arc::new(AtomicBool::new(true));
        let wake = Arc::new(Notify::new());
        let task = tokio::spawn(self.run(running.clone(), wake.clone()));
        NotifierHandle {
            running,
            wake,
            task,
        }
    }

    async fn run(self, running: Arc<AtomicBool>, wake: Arc<Notify>) -> NotifierReport {
        info!(
            "Event notifier running. Source = {} interval = {:?}",
            self.source.name, self.interval
        );
        let mut report = NotifierReport::default();
        while running.load(Ordering::SeqCst) {
            self.notify(&mut report);
            select! {
                _ = sleep(self.interval) => (),
                _ = wake.notified() => (),
            }
        }
        info!(
            "Event notifier stopped. Source = {} posted = {} failed = {}",
            self.source.name, report.posted, report.failed
        );
        report
    }
}

/// A handle to a running [EventNotifier]
pub struct NotifierHandle {
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
    task: JoinHandle<NotifierReport>,
}

impl NotifierHandle {
    /// Stop the notifier loop and wait for it to exit.
    ///
    /// No event is posted by this notifier once `stop` has returned.
    pub async fn stop(self) -> NotifierReport {
        self.running.store(false, Ordering::SeqCst);
        self.wake.notify_one();
        match self.task.await {
            Ok(report) => report,
            Err(e) => {
                error!("Event notifier task failed: {e}");
                NotifierReport::default()
            }
        }
    }
}
