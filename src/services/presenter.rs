use async_trait::async_trait;

use crate::domain::notice::Notice;
use crate::domain::summary::VirtualDocument;
use crate::error::AppResult;

#[async_trait]
pub trait Presenter: Send + Sync {
    async fn open_document(&self, document: &VirtualDocument) -> AppResult<()>;
    async fn notify(&self, notice: &Notice) -> AppResult<()>;
}
