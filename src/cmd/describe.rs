use crate::context::AppContext;
use crate::domain::notice::Severity;
use crate::domain::workspace::WorkspaceFolders;
use crate::error::AppResult;
use crate::workflow::describe::describe_staged_changes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescribeStatus {
    Presented,
    Halted(Severity),
}

impl DescribeStatus {
    pub fn is_failure(self) -> bool {
        self == DescribeStatus::Halted(Severity::Error)
    }
}

/// Runs the flow and shows either the summary document or a single notice.
pub async fn run(ctx: &AppContext, folders: &WorkspaceFolders) -> AppResult<DescribeStatus> {
    match describe_staged_changes(ctx, folders).await {
        Ok(document) => {
            ctx.presenter.open_document(&document).await?;
            Ok(DescribeStatus::Presented)
        }
        Err(err) => {
            let notice = err.to_notice();
            ctx.presenter.notify(&notice).await?;
            Ok(DescribeStatus::Halted(notice.severity))
        }
    }
}
