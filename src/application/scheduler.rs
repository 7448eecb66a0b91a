//! Scheduler - Runs background task plugins

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::application::client::BotClient;
use crate::domain::traits::Logger;
use crate::plugins::trait_def::BackgroundTask;

struct ScheduledTask {
    name: String,
    interval: Option<Duration>,
    in_flight: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Clears the in-flight flag even if the task panics
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns the tokio tasks started for background task plugins.
///
/// Repeating tasks first run one period after scheduling. A tick that fires
/// while the previous run is still in flight is skipped.
pub struct Scheduler {
    tasks: Mutex<Vec<ScheduledTask>>,
    logger: Arc<dyn Logger>,
}

impl Scheduler {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Run `job` every `period`, starting one period from now
    pub fn schedule_repeating(
        &self,
        name: impl Into<String>,
        period: Duration,
        job: Arc<dyn BackgroundTask>,
        client: Weak<BotClient>,
    ) {
        let name = name.into();
        let in_flight = Arc::new(AtomicBool::new(false));
        let flag = in_flight.clone();
        let task_name = name.clone();
        let logger = self.logger.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(client) = client.upgrade() else {
                    logger.debug(&format!("Client dropped, stopping task '{}'", task_name));
                    break;
                };
                if flag.swap(true, Ordering::SeqCst) {
                    logger.debug(&format!("Task '{}' still running, skipping tick", task_name));
                    continue;
                }
                let guard = InFlightGuard(flag.clone());
                let job = job.clone();
                let run_name = task_name.clone();
                let logger = logger.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    if let Err(e) = job.execute(&client).await {
                        logger.error(&format!("Task '{}' failed: {}", run_name, e));
                    }
                });
            }
        });

        self.push(ScheduledTask { name, interval: Some(period), in_flight, handle });
    }

    /// Run `job` once, immediately.
    ///
    /// Returns once the job has started: everything it does before its first
    /// await point has happened by then. The rest runs in the background.
    pub async fn run_once(&self, name: impl Into<String>, job: Arc<dyn BackgroundTask>, client: Weak<BotClient>) {
        let name = name.into();
        let in_flight = Arc::new(AtomicBool::new(true));
        let guard = InFlightGuard(in_flight.clone());
        let task_name = name.clone();
        let logger = self.logger.clone();
        let (started_tx, started_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let _guard = guard;
            let Some(client) = client.upgrade() else {
                return;
            };
            let _ = started_tx.send(());
            if let Err(e) = job.execute(&client).await {
                logger.error(&format!("Task '{}' failed: {}", task_name, e));
            }
        });

        self.push(ScheduledTask { name, interval: None, in_flight, handle });
        // A dropped sender means the client is gone and the job never runs
        let _ = started_rx.await;
    }

    fn push(&self, task: ScheduledTask) {
        match self.tasks.lock() {
            Ok(mut tasks) => tasks.push(task),
            Err(_) => self.logger.error(&format!("Scheduler lock poisoned, task '{}' is untracked", task.name)),
        }
    }

    /// Names of every scheduled task, with their period if repeating
    pub fn tasks(&self) -> Vec<(String, Option<Duration>)> {
        self.tasks.lock()
            .map(|t| t.iter().map(|s| (s.name.clone(), s.interval)).collect())
            .unwrap_or_default()
    }

    /// Whether any run of the named task is currently executing
    pub fn is_running(&self, name: &str) -> bool {
        self.tasks.lock()
            .map(|t| t.iter().any(|s| s.name == name && s.in_flight.load(Ordering::SeqCst)))
            .unwrap_or(false)
    }

    /// Abort every task
    pub fn shutdown(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.handle.abort();
            }
        }
    }
}
