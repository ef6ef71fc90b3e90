/**
 * Image File Storage
 *
 * Uploaded bytes are stored flat under one directory, one file per image,
 * named by the image id. The database row is the source of truth; a file
 * without a row is unreachable and a row without a file reads as 404.
 */
use std::io;
use std::path::{Path, PathBuf};

/// Directory-backed store for image bytes
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
}

impl ImageStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if needed
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Location of the bytes for `image_id`
    pub fn path_for(&self, image_id: i64) -> PathBuf {
        self.root.join(image_id.to_string())
    }

    /// Write the bytes for `image_id`, replacing any previous file
    pub async fn save(&self, image_id: i64, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(self.path_for(image_id), bytes).await
    }

    /// Read the bytes for `image_id`
    pub async fn load(&self, image_id: i64) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(image_id)).await
    }

    /// Delete the file for `image_id`. A file that is already gone is not
    /// an error.
    pub async fn remove(&self, image_id: i64) -> io::Result<()> {
        match tokio::fs::remove_file(self.path_for(image_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Best-effort removal of several files; failures are logged, not
    /// returned, because the rows they belonged to are already gone.
    pub async fn remove_all(&self, image_ids: impl IntoIterator<Item = i64>) {
        for image_id in image_ids {
            if let Err(e) = self.remove(image_id).await {
                tracing::error!("Failed to remove image file {}: {:?}", image_id, e);
            }
        }
    }
}
