use async_trait::async_trait;
use crm_core_api::{CrmError, CrmResult};
use std::path::{Component, Path, PathBuf};

/// Persists uploaded bytes under a relative path. Callers record the same
/// relative path in the database.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, relative_path: &str, bytes: &[u8]) -> CrmResult<()>;
}

/// Stores files below a root directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute target for `relative_path`; anything that could leave the
    /// root is rejected.
    fn resolve(&self, relative_path: &str) -> CrmResult<PathBuf> {
        let relative = Path::new(relative_path);
        let escapes = relative_path.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(CrmError::Storage(format!(
                "refusing to store outside the upload root: '{relative_path}'"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, relative_path: &str, bytes: &[u8]) -> CrmResult<()> {
        let target = self.resolve(relative_path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CrmError::Storage(format!("{}: {e}", parent.display())))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| CrmError::Storage(format!("{}: {e}", target.display())))?;
        tracing::debug!(path = %target.display(), size = bytes.len(), "stored file");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Keeps files in memory, or fails every write when built with `failing()`.
    #[derive(Default)]
    pub struct MemoryFileStore {
        pub files: Mutex<HashMap<String, Vec<u8>>>,
        fail: bool,
    }

    impl MemoryFileStore {
        pub fn failing() -> Self {
            Self {
                files: Mutex::default(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl FileStore for MemoryFileStore {
        async fn store(&self, relative_path: &str, bytes: &[u8]) -> CrmResult<()> {
            if self.fail {
                return Err(CrmError::Storage("disk full".to_string()));
            }
            self.files
                .lock()
                .unwrap()
                .insert(relative_path.to_string(), bytes.to_vec());
            Ok(())
        }
    }
}
