use std::path::Path;

use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Raw unified diff of the staged changes under `root`.
    async fn staged_diff(&self, root: &Path) -> AppResult<String>;
}
