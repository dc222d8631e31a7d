use std::sync::Arc;

use teloxide::types::ChatId;
use thiserror::Error;

use crate::config::Config;
use crate::error::Error;
use crate::jobs::{photo_job_name, JobContext, JobQueue, MOTION_JOB_NAME};
use crate::messages;
use crate::messenger::{Attachment, Messenger};
use crate::tasks;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("expected the interval in seconds")]
    Missing,
    #[error("expected one argument, found {0}")]
    TooMany(usize),
    #[error("unbalanced quotes")]
    BadQuoting,
    #[error("{0:?} is not a whole number")]
    NotANumber(String),
}

pub fn parse_interval(arg: &str) -> Result<i64, IntervalError> {
    let split = shlex::split(arg).ok_or(IntervalError::BadQuoting)?;

    match split.as_slice() {
        [] => Err(IntervalError::Missing),
        [token] => token
            .parse()
            .map_err(|_| IntervalError::NotANumber(token.clone())),
        _ => Err(IntervalError::TooMany(split.len())),
    }
}

pub async fn start<M: Messenger>(messenger: &M, chat_id: ChatId) -> Result<(), Error> {
    messenger
        .send_text(chat_id, messages::START.to_string())
        .await
}

pub async fn help<M: Messenger>(
    messenger: &M,
    jobs: &JobQueue,
    chat_id: ChatId,
) -> Result<(), Error> {
    messenger.send_text(chat_id, chat_id.0.to_string()).await?;

    let photo = jobs.job_exists(&photo_job_name(chat_id)).await;
    let motion = jobs.job_exists(MOTION_JOB_NAME).await;
    messenger
        .send_text(chat_id, messages::status(photo, motion))
        .await?;

    messenger
        .send_text(chat_id, messages::USAGE.to_string())
        .await
}

/// Sends the current snapshot, then the current video. Stops at the first
/// file that cannot be read.
pub async fn debug<M: Messenger>(
    messenger: &M,
    config: &Config,
    chat_id: ChatId,
) -> Result<(), Error> {
    let photo = Attachment::read(&config.snapshot_path).await?;
    messenger.send_photo(chat_id, photo).await?;

    let video = Attachment::read(&config.video_path).await?;
    messenger.send_video(chat_id, video).await
}

pub async fn update_photo<M: Messenger>(
    messenger: &M,
    config: &Arc<Config>,
    jobs: &JobQueue,
    chat_id: ChatId,
    arg: &str,
) -> Result<(), Error> {
    let interval = match parse_interval(arg) {
        Ok(interval) => interval,
        Err(e) => {
            return messenger
                .send_text(chat_id, messages::usage_error("update_photo", &e))
                .await
        }
    };

    let task = {
        let messenger = messenger.clone();
        let config = config.clone();
        move |ctx: JobContext| {
            let messenger = messenger.clone();
            let config = config.clone();
            async move { tasks::update_photo(&messenger, &config, ctx.chat_id).await }
        }
    };
    if let Err(e) = jobs
        .replace_or_create(&photo_job_name(chat_id), interval, chat_id, task)
        .await
    {
        return messenger
            .send_text(chat_id, messages::usage_error("update_photo", &e))
            .await;
    }

    let reply = if interval >= 1 {
        messages::photo_enabled(interval)
    } else {
        messages::photo_disabled()
    };
    messenger.send_text(chat_id, reply).await
}

pub async fn global_update_motion<M: Messenger>(
    messenger: &M,
    config: &Arc<Config>,
    jobs: &JobQueue,
    chat_id: ChatId,
    arg: &str,
) -> Result<(), Error> {
    let interval = match parse_interval(arg) {
        Ok(interval) => interval,
        Err(e) => {
            return messenger
                .send_text(chat_id, messages::usage_error("global_update_motion", &e))
                .await
        }
    };

    let task = {
        let messenger = messenger.clone();
        let config = config.clone();
        move |_ctx: JobContext| {
            let messenger = messenger.clone();
            let config = config.clone();
            async move {
                let outcome = tasks::update_motion(&messenger, &config).await?;
                log::debug!("Motion check finished: {outcome:?}");
                Ok::<_, Error>(())
            }
        }
    };
    if let Err(e) = jobs
        .replace_or_create(MOTION_JOB_NAME, interval, chat_id, task)
        .await
    {
        return messenger
            .send_text(chat_id, messages::usage_error("global_update_motion", &e))
            .await;
    }

    if interval >= 1 {
        return messenger
            .send_text(chat_id, messages::motion_enabled(interval))
            .await;
    }

    broadcast(messenger, config, messages::motion_disabled()).await;
    Ok(())
}

async fn broadcast<M: Messenger>(messenger: &M, config: &Config, text: String) {
    for user in &config.authorized_users {
        let target = ChatId::from(*user);
        if let Err(e) = messenger.send_text(target, text.clone()).await {
            log::warn!("Couldn't send message to {target}: {e}");
        }
    }
}
