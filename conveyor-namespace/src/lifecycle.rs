use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use log::info;
use tokio::sync::Mutex;

use crate::{DynLifecycle, Lifecycle};

/// Runs registered [Lifecycle] hooks in order on startup and in reverse order on shutdown
pub struct LifecycleManager {
    lifecycles: StdMutex<Vec<Arc<DynLifecycle>>>,
    running: Mutex<bool>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        Self {
            lifecycles: StdMutex::new(Vec::new()),
            running: Mutex::new(false),
        }
    }

    /// Add a lifecycle.
    ///
    /// Lifecycles added while the manager is running are only started by the next [LifecycleManager::startup].
    pub fn add_lifecycle<L: Lifecycle + Send + Sync + 'static>(&self, lifecycle: Arc<L>) {
        self.lifecycles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(lifecycle);
    }

    fn snapshot(&self) -> Vec<Arc<DynLifecycle>> {
        self.lifecycles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn is_running(&self) -> bool {
        *self.running.lock().await
    }

    pub async fn startup(&self) {
        let mut running = self.running.lock().await;
        if *running {
            return;
        }
        let lifecycles = self.snapshot();
        info!("Starting {} lifecycle(s)", lifecycles.len());
        for lifecycle in &lifecycles {
            lifecycle.startup().await;
        }
        *running = true;
    }

    pub async fn shutdown(&self) {
        let mut running = self.running.lock().await;
        if !*running {
            return;
        }
        let lifecycles = self.snapshot();
        info!("Stopping {} lifecycle(s)", lifecycles.len());
        for lifecycle in lifecycles.iter().rev() {
            lifecycle.shutdown().await;
        }
        *running = false;
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
