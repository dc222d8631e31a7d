use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("telegram request failed: {0}")]
    Request(#[from] teloxide::RequestError),
}
