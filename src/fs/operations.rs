use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use fs4::tokio::AsyncFileExt;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{debug, warn};

/// Reads the whole file under a shared lock. A missing file reads as `None`.
pub async fn read_locked(path: &Path) -> Result<Option<String>, io::Error> {
    let lock = open_lock(path).await?;
    lock.lock_shared()?;
    let result = read_if_exists(path).await;
    lock.unlock_async().await?;

    result
}

/// Replaces `path` with `contents` so that readers see either the old file or the new one,
/// never a partially written one. Data goes to a sibling temp file first which is then renamed
/// over the target, all of it under the exclusive lock readers share.
pub async fn replace_file_atomically(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    let lock = open_lock(path).await?;
    lock.lock_exclusive()?;
    let result = write_through_temp(path, contents).await;
    lock.unlock_async().await?;

    result
}

/// Removes a file, treating an already missing one as success.
pub async fn remove_if_exists(path: &Path) -> Result<(), io::Error> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

async fn read_if_exists(path: &Path) -> Result<Option<String>, io::Error> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

async fn write_through_temp(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    let temp_path = sibling(path, "tmp");
    debug!("Writing {} bytes to {temp_path:?}", contents.len());

    let result = async {
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .await?;
        file.write_all(contents).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&temp_path, path).await
    }
    .await;

    if result.is_err() {
        if let Err(e) = remove_if_exists(&temp_path).await {
            warn!("Failed to clean up {temp_path:?}: {e}");
        }
    }
    result
}

/// The lock file outlives every rename of the data file, so readers and writers always meet on it.
async fn open_lock(path: &Path) -> Result<File, io::Error> {
    File::options()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(sibling(path, "lock"))
        .await
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}
