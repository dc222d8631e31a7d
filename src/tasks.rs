use teloxide::types::ChatId;

use crate::config::Config;
use crate::error::Error;
use crate::messages;
use crate::messenger::{Attachment, Messenger};
use crate::video;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionOutcome {
    Broadcast,
    NoNewVideo,
}

pub async fn update_photo<M: Messenger>(
    messenger: &M,
    config: &Config,
    chat_id: ChatId,
) -> Result<(), Error> {
    let photo = Attachment::read(&config.snapshot_path).await?;
    messenger.send_photo(chat_id, photo).await
}

/// Sends a freshly recorded video to every authorized user and archives it,
/// or tells everyone there is nothing new. Delivery is best effort: a failed
/// recipient is logged and skipped.
pub async fn update_motion<M: Messenger>(
    messenger: &M,
    config: &Config,
) -> Result<MotionOutcome, Error> {
    if !video::is_present(&config.video_path).await? {
        for user in &config.authorized_users {
            let chat_id = ChatId::from(*user);
            if let Err(e) = messenger
                .send_text(chat_id, messages::NO_NEW_VIDEO.to_string())
                .await
            {
                log::warn!("Couldn't notify {chat_id}: {e}");
            }
        }
        return Ok(MotionOutcome::NoNewVideo);
    }

    let clip = Attachment::read(&config.video_path).await?;
    log::info!(
        "Broadcasting {} to {} users",
        config.video_path.display(),
        config.authorized_users.len()
    );

    for user in &config.authorized_users {
        let chat_id = ChatId::from(*user);
        if let Err(e) = messenger.send_video(chat_id, clip.clone()).await {
            log::warn!("Couldn't send video to {chat_id}: {e}");
        }
    }

    video::rotate(&config.video_path).await?;

    Ok(MotionOutcome::Broadcast)
}
