use std::time::Duration as StdDuration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::scheduler::NotificationScheduler;
use super::AlertSink;

/// Cancel handle for a running scheduler loop. Dropping it stops the loop.
pub struct SchedulerHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<NotificationScheduler>>,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop the loop and hand the scheduler back.
    pub async fn shutdown(mut self) -> Option<NotificationScheduler> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let task = self.task.take()?;
        match task.await {
            Ok(scheduler) => Some(scheduler),
            Err(err) => {
                log::error!("Notification scheduler task failed: {}", err);
                None
            }
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Run `scheduler` on the current tokio runtime, scanning immediately and
/// then every `interval`, delivering each alert to `sink`.
pub fn spawn_scheduler<S>(
    mut scheduler: NotificationScheduler,
    sink: S,
    interval: StdDuration,
) -> SchedulerHandle
where
    S: AlertSink + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        log::info!("Notification scheduler started, scanning every {:?}", interval);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    for alert in scheduler.scan() {
                        if let Err(err) = sink.deliver(&alert) {
                            log::warn!("Failed to deliver alert for {}: {:#}", alert.meeting_id, err);
                        }
                    }
                }
            }
        }

        log::info!("Notification scheduler stopped");
        scheduler
    });

    SchedulerHandle {
        shutdown: Some(shutdown_tx),
        task: Some(task),
    }
}
