//! Shared utilities for lifecycle integration tests.

use std::any::Any;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use chassis::context::Context;
use chassis::lifecycle::signals::{SignalEvent, SignalSource};
use chassis::module::{Module, ModuleError};

/// Shared, ordered record of hook invocations across all test modules.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Block until the log contains `needle`, or panic after two seconds.
#[allow(dead_code)]
pub async fn wait_for_event(log: &EventLog, needle: &str) {
    let deadline = async {
        loop {
            if events(log).iter().any(|e| e == needle) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };
    tokio::time::timeout(Duration::from_secs(2), deadline)
        .await
        .unwrap_or_else(|_| panic!("event \"{needle}\" never recorded"));
}

/// A scripted module that records its hook invocations.
pub struct RecordingModule {
    name: String,
    log: EventLog,
    fail_load: bool,
    fail_dispose: bool,
    load_delay: Option<Duration>,
}

impl RecordingModule {
    pub fn new(name: &str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: log.clone(),
            fail_load: false,
            fail_dispose: false,
            load_delay: None,
        })
    }

    /// A module whose load hook fails after recording the attempt.
    #[allow(dead_code)]
    pub fn failing_load(name: &str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: log.clone(),
            fail_load: true,
            fail_dispose: false,
            load_delay: None,
        })
    }

    /// A module whose dispose hook fails after recording the attempt.
    #[allow(dead_code)]
    pub fn failing_dispose(name: &str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: log.clone(),
            fail_load: false,
            fail_dispose: true,
            load_delay: None,
        })
    }

    /// A module that sleeps before recording its load, so a signal can
    /// land while the load sweep is in flight.
    #[allow(dead_code)]
    pub fn slow_load(name: &str, log: &EventLog, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_owned(),
            log: log.clone(),
            fail_load: false,
            fail_dispose: false,
            load_delay: Some(delay),
        })
    }

    fn record(&self, phase: &str) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{phase}:{}", self.name));
    }
}

#[async_trait]
impl Module for RecordingModule {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self, _ctx: &Context) -> Result<(), ModuleError> {
        if let Some(delay) = self.load_delay {
            tokio::time::sleep(delay).await;
        }
        self.record("load");
        if self.fail_load {
            return Err(ModuleError::other(format!("{} refused to load", self.name)));
        }
        Ok(())
    }

    async fn dispose(&self) -> Result<(), ModuleError> {
        self.record("dispose");
        if self.fail_dispose {
            return Err(ModuleError::other(format!(
                "{} refused to dispose",
                self.name
            )));
        }
        Ok(())
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Channel-backed fake signal emitter.
///
/// When the sender is dropped without firing, `recv` pends forever,
/// covering the "no signal ever arrives" case.
pub struct FakeSignals {
    rx: mpsc::UnboundedReceiver<SignalEvent>,
}

#[async_trait]
impl SignalSource for FakeSignals {
    async fn recv(&mut self) -> SignalEvent {
        match self.rx.recv().await {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }
}

pub fn fake_signals() -> (mpsc::UnboundedSender<SignalEvent>, FakeSignals) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, FakeSignals { rx })
}
