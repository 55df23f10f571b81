use async_trait::async_trait;

use crate::domain::credential::Credential;
use crate::domain::diff::DiffText;
use crate::domain::summary::SummaryText;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn summarize_diff(
        &self,
        diff: &DiffText,
        credential: &Credential,
    ) -> AppResult<SummaryText>;
}
