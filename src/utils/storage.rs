use async_trait::async_trait;
use bytes::Bytes;
use std::{io::ErrorKind, path::PathBuf};
use tokio::{fs, io::AsyncWriteExt};

#[derive(Debug, PartialEq)]
pub enum Error {
    UploadFailed,
    DeleteFailed,
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Writes `contents` under `file_name`. Returns once the bytes are on disk.
    async fn put(&self, file_name: &str, contents: Bytes) -> Result<(), Error>;

    async fn remove(&self, file_name: &str) -> Result<(), Error>;
}

/// Stores files in a directory on the local filesystem.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, file_name: &str) -> Result<PathBuf, Error> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.')
        {
            tracing::error!("Refusing to store a file named {:?}", file_name);
            return Err(Error::UploadFailed);
        }

        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(&self, file_name: &str, contents: Bytes) -> Result<(), Error> {
        let path = self.path_of(file_name)?;

        fs::create_dir_all(&self.root).await.map_err(|err| {
            tracing::error!("Failed to create directory {:?}: {:?}", self.root, err);
            Error::UploadFailed
        })?;

        let mut file = fs::File::create(&path).await.map_err(|err| {
            tracing::error!("Failed to create file {:?}: {:?}", path, err);
            Error::UploadFailed
        })?;

        file.write_all(&contents).await.map_err(|err| {
            tracing::error!("Failed to write file {:?}: {:?}", path, err);
            Error::UploadFailed
        })?;

        file.sync_all().await.map_err(|err| {
            tracing::error!("Failed to flush file {:?}: {:?}", path, err);
            Error::UploadFailed
        })?;

        tracing::debug!("Stored {} bytes at {:?}", contents.len(), path);

        Ok(())
    }

    async fn remove(&self, file_name: &str) -> Result<(), Error> {
        let path = self.path_of(file_name).map_err(|_| Error::DeleteFailed)?;

        match fs::remove_file(&path).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                tracing::error!("Failed to delete file {:?}: {:?}", path, err);
                Err(Error::DeleteFailed)
            }
        }
    }
}
