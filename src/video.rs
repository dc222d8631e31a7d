use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where a broadcast video is kept until the next one replaces it.
pub fn archive_path(video: &Path) -> PathBuf {
    let mut archived = OsString::from(video.as_os_str());
    archived.push(".old");
    PathBuf::from(archived)
}

pub async fn is_present(video: &Path) -> std::io::Result<bool> {
    tokio::fs::try_exists(video).await
}

/// Moves the current video to its archive path, replacing the previous
/// archive. A failed archive removal never stops the rename.
pub async fn rotate(video: &Path) -> std::io::Result<()> {
    let archived = archive_path(video);

    match tokio::fs::remove_file(&archived).await {
        Ok(()) => log::debug!("Removed old archive {}", archived.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => log::warn!("Couldn't remove {}: {e}", archived.display()),
    }

    tokio::fs::rename(video, &archived).await?;
    log::info!("Archived {} to {}", video.display(), archived.display());

    Ok(())
}
