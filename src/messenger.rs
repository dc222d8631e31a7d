use std::path::Path;

use futures_core::future::BoxFuture;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::error::Error;

/// A file read into memory, ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("file"));

        Ok(Self { file_name, data })
    }

    fn into_input_file(self) -> InputFile {
        InputFile::memory(self.data).file_name(self.file_name)
    }
}

/// Outbound side of the bot. Handlers and periodic tasks only talk to chats
/// through this trait.
pub trait Messenger: Clone + Send + Sync + 'static {
    fn send_text(&self, chat_id: ChatId, text: String) -> BoxFuture<'_, Result<(), Error>>;

    fn send_photo(&self, chat_id: ChatId, photo: Attachment) -> BoxFuture<'_, Result<(), Error>>;

    fn send_video(&self, chat_id: ChatId, video: Attachment) -> BoxFuture<'_, Result<(), Error>>;
}

impl Messenger for Bot {
    fn send_text(&self, chat_id: ChatId, text: String) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async move {
            self.send_message(chat_id, text).await?;
            Ok::<_, Error>(())
        })
    }

    fn send_photo(&self, chat_id: ChatId, photo: Attachment) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async move {
            Requester::send_photo(self, chat_id, photo.into_input_file()).await?;
            Ok::<_, Error>(())
        })
    }

    fn send_video(&self, chat_id: ChatId, video: Attachment) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async move {
            Requester::send_video(self, chat_id, video.into_input_file()).await?;
            Ok::<_, Error>(())
        })
    }
}
