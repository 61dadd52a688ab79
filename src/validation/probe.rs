use std::path::Path;

use async_trait::async_trait;
use log::debug;

/// Asynchronous "does anything exist at this path" check
#[async_trait]
pub trait PathProbe: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
///
/// A failed lookup (permissions, broken mount) counts as "not there".
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

#[async_trait]
impl PathProbe for FsProbe {
    async fn exists(&self, path: &Path) -> bool {
        match tokio::fs::try_exists(path).await {
            Ok(found) => found,
            Err(e) => {
                debug!("Existence check for {} failed: {}", path.display(), e);
                false
            }
        }
    }
}
