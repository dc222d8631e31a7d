use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_core::future::BoxFuture;
use teloxide::types::ChatId;
use thiserror::Error;
use tokio::sync::{oneshot, Mutex};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::Error;

pub const MOTION_JOB_NAME: &str = "update_motion";

pub fn photo_job_name(chat_id: ChatId) -> String {
    format!("update_photo_for_{}", chat_id.0)
}

#[derive(Debug, Clone)]
pub struct JobContext {
    pub name: String,
    pub chat_id: ChatId,
}

pub trait JobFn: Send + Sync + 'static {
    fn run(&self, ctx: JobContext) -> BoxFuture<'static, Result<(), Error>>;
}

impl<T, F> JobFn for T
where
    T: Fn(JobContext) -> F + Send + Sync + 'static,
    F: Future<Output = Result<(), Error>> + Send + 'static,
{
    fn run(&self, ctx: JobContext) -> BoxFuture<'static, Result<(), Error>> {
        Box::pin(self(ctx))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("an interval of {0} s is too long to schedule")]
    TooLong(i64),
}

/// Dropping a `Job` closes its stop channel, which ends the loop before its next
/// tick. A firing that is already running is left to finish.
struct Job {
    _stop: oneshot::Sender<()>,
}

/// Recurring jobs addressed by name. At most one job per name is alive;
/// the map is the subscription registry.
#[derive(Clone, Default)]
pub struct JobQueue {
    jobs: Arc<Mutex<HashMap<String, Job>>>,
}

fn remove_job(jobs: &mut HashMap<String, Job>, name: &str) -> bool {
    let removed = jobs.remove(name).is_some();
    if removed {
        log::info!("Cancelled job {name}");
    }
    removed
}

impl JobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn job_exists(&self, name: &str) -> bool {
        self.jobs.lock().await.contains_key(name)
    }

    /// Returns whether a job was removed.
    pub async fn cancel(&self, name: &str) -> bool {
        remove_job(&mut *self.jobs.lock().await, name)
    }

    /// Cancels any job named `name`, then schedules `task` every `interval`
    /// seconds if `interval >= 1`. The first run happens one interval from now.
    /// An interval too long for the clock leaves existing jobs untouched.
    pub async fn replace_or_create(
        &self,
        name: &str,
        interval: i64,
        chat_id: ChatId,
        task: impl JobFn,
    ) -> Result<(), ScheduleError> {
        let secs = match u64::try_from(interval) {
            Ok(secs) if secs > 0 => secs,
            _ => {
                self.cancel(name).await;
                return Ok(());
            }
        };

        let period = Duration::from_secs(secs);
        let start = Instant::now()
            .checked_add(period)
            .ok_or(ScheduleError::TooLong(interval))?;

        let mut jobs = self.jobs.lock().await;
        remove_job(&mut jobs, name);

        let (stop, stopped) = oneshot::channel();
        let ctx = JobContext {
            name: name.to_string(),
            chat_id,
        };
        tokio::spawn(run_job(ctx, start, period, stopped, task));
        jobs.insert(name.to_string(), Job { _stop: stop });

        log::info!("Scheduled job {name} every {secs}s for chat {}", chat_id.0);

        Ok(())
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.jobs.lock().await.len()
    }
}

async fn run_job(
    ctx: JobContext,
    start: Instant,
    period: Duration,
    mut stopped: oneshot::Receiver<()>,
    task: impl JobFn,
) {
    let mut ticks = interval_at(start, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stopped => break,
            _ = ticks.tick() => {}
        }
        log::debug!("Running job {}", ctx.name);
        if let Err(e) = task.run(ctx.clone()).await {
            log::warn!("Job {} failed: {e}", ctx.name);
        }
    }

    log::debug!("Job {} stopped", ctx.name);
}
