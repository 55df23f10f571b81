use thiserror::Error;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::credential::Credential;
use crate::domain::diff::DiffText;
use crate::domain::notice::{Notice, Severity};
use crate::domain::summary::VirtualDocument;
use crate::domain::workspace::WorkspaceFolders;
use crate::error::AppError;

/// Reasons a describe invocation stops before a summary is shown.
/// `Display` is the exact text shown to the user.
#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("No workspace folder is open.")]
    NoWorkspace,
    #[error("No staged changes found. Please run `git add .`")]
    NoDiff,
    #[error("Please Set your OpenAI API key!")]
    MissingCredential,
    #[error("Failed to generate summary: {}", .0.detail())]
    RequestFailure(#[source] AppError),
}

impl DescribeError {
    pub fn severity(&self) -> Severity {
        match self {
            DescribeError::NoDiff => Severity::Info,
            DescribeError::NoWorkspace
            | DescribeError::MissingCredential
            | DescribeError::RequestFailure(_) => Severity::Error,
        }
    }

    pub fn to_notice(&self) -> Notice {
        match self.severity() {
            Severity::Info => Notice::info(self.to_string()),
            Severity::Error => Notice::error(self.to_string()),
        }
    }
}

pub async fn describe_staged_changes(
    ctx: &AppContext,
    folders: &WorkspaceFolders,
) -> Result<VirtualDocument, DescribeError> {
    let root = folders.project_root().ok_or(DescribeError::NoWorkspace)?;
    let ignored = folders
        .iter()
        .skip(1)
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>();
    if !ignored.is_empty() {
        warn!(
            root = %root.as_path().display(),
            ?ignored,
            "multiple workspace folders open; using the first"
        );
    }

    let diff = match ctx.version_control.staged_diff(root.as_path()).await {
        Ok(output) => DiffText::from_output(output),
        Err(err) => {
            debug!(error = %err, "staged diff unavailable");
            None
        }
    }
    .ok_or(DescribeError::NoDiff)?;

    let credential =
        Credential::validate(&ctx.config.api_key).ok_or(DescribeError::MissingCredential)?;

    let summary = ctx
        .language_model
        .summarize_diff(&diff, &credential)
        .await
        .map_err(DescribeError::RequestFailure)?;

    Ok(VirtualDocument::change_summary(&summary))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::summary::SummaryText;
    use crate::error::AppResult;
    use crate::infra::openai::OpenAiClient;
    use crate::infra::terminal::TerminalPresenter;
    use crate::services::{LanguageModelService, VersionControlService};

    struct FakeGit {
        output: AppResult<String>,
        calls: AtomicUsize,
        roots: Mutex<Vec<PathBuf>>,
    }

    impl FakeGit {
        fn returning(output: &str) -> Self {
            Self::with(Ok(output.to_string()))
        }

        fn failing() -> Self {
            Self::with(Err(AppError::VersionControl("not a repository".to_string())))
        }

        fn with(output: AppResult<String>) -> Self {
            Self {
                output,
                calls: AtomicUsize::new(0),
                roots: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VersionControlService for FakeGit {
        async fn staged_diff(&self, root: &Path) -> AppResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.roots.lock().unwrap().push(root.to_path_buf());
            match &self.output {
                Ok(output) => Ok(output.clone()),
                Err(err) => Err(AppError::VersionControl(err.to_string())),
            }
        }
    }

    struct FakeModel {
        reply: Result<&'static str, &'static str>,
        calls: AtomicUsize,
        diffs: Mutex<Vec<String>>,
    }

    impl FakeModel {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Ok(reply),
                calls: AtomicUsize::new(0),
                diffs: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                reply: Err(message),
                calls: AtomicUsize::new(0),
                diffs: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LanguageModelService for FakeModel {
        async fn summarize_diff(
            &self,
            diff: &DiffText,
            _credential: &Credential,
        ) -> AppResult<SummaryText> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.diffs.lock().unwrap().push(diff.as_str().to_string());
            match self.reply {
                Ok(text) => Ok(SummaryText::new(text)),
                Err(message) => Err(AppError::LanguageModel(message.to_string())),
            }
        }
    }

    fn context(
        api_key: &str,
        git: Arc<FakeGit>,
        model: Arc<dyn LanguageModelService>,
    ) -> AppContext {
        AppContext::new(
            AppConfig {
                api_key: api_key.to_string(),
            },
            git,
            model,
            Arc::new(TerminalPresenter::with_writers(Vec::new(), Vec::new())),
        )
    }

    fn repo() -> WorkspaceFolders {
        WorkspaceFolders::new(vec![PathBuf::from("/repo")])
    }

    #[tokio::test]
    async fn no_workspace_halts_before_git_and_network() {
        let git = Arc::new(FakeGit::returning("+line"));
        let model = Arc::new(FakeModel::replying("unused"));
        let ctx = context("sk-test", git.clone(), model.clone());

        let err = describe_staged_changes(&ctx, &WorkspaceFolders::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DescribeError::NoWorkspace));
        assert_eq!(err.to_string(), "No workspace folder is open.");
        assert_eq!(err.severity(), Severity::Error);
        assert_eq!(git.calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_diff_halts_before_network() {
        for output in ["", "   ", "\n\n", " \t\r\n"] {
            let git = Arc::new(FakeGit::returning(output));
            let model = Arc::new(FakeModel::replying("unused"));
            let ctx = context("sk-test", git.clone(), model.clone());

            let err = describe_staged_changes(&ctx, &repo()).await.unwrap_err();

            assert!(matches!(err, DescribeError::NoDiff));
            assert_eq!(err.severity(), Severity::Info);
            assert_eq!(git.calls.load(Ordering::SeqCst), 1);
            assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn failed_git_is_reported_as_no_diff() {
        let git = Arc::new(FakeGit::failing());
        let model = Arc::new(FakeModel::replying("unused"));
        let ctx = context("sk-test", git, model.clone());

        let err = describe_staged_changes(&ctx, &repo()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "No staged changes found. Please run `git add .`"
        );
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unusable_credential_halts_before_network() {
        for api_key in ["", "api_REPLACE_ME", "api_REPLACE_anything"] {
            let git = Arc::new(FakeGit::returning("+line"));
            let model = Arc::new(FakeModel::replying("unused"));
            let ctx = context(api_key, git, model.clone());

            let err = describe_staged_changes(&ctx, &repo()).await.unwrap_err();

            assert!(matches!(err, DescribeError::MissingCredential));
            assert_eq!(err.to_string(), "Please Set your OpenAI API key!");
            assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn summarizer_failure_keeps_its_message() {
        let git = Arc::new(FakeGit::returning("+line"));
        let model = Arc::new(FakeModel::failing("OpenAI responded with 500"));
        let ctx = context("sk-test", git, model);

        let err = describe_staged_changes(&ctx, &repo()).await.unwrap_err();

        assert!(matches!(err, DescribeError::RequestFailure(_)));
        assert_eq!(
            err.to_notice(),
            Notice::error("Failed to generate summary: OpenAI responded with 500")
        );
    }

    #[tokio::test]
    async fn uses_first_of_several_folders() {
        let git = Arc::new(FakeGit::returning("+line"));
        let model = Arc::new(FakeModel::replying("Added a line."));
        let ctx = context("sk-test", git.clone(), model.clone());
        let folders =
            WorkspaceFolders::new(vec![PathBuf::from("/first"), PathBuf::from("/second")]);

        describe_staged_changes(&ctx, &folders).await.unwrap();

        assert_eq!(*git.roots.lock().unwrap(), vec![PathBuf::from("/first")]);
        assert_eq!(*model.diffs.lock().unwrap(), vec!["+line".to_string()]);
    }

    #[tokio::test]
    async fn end_to_end_against_mock_completion_api() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_string_contains("diff --git a/f b/f\\n+line"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Added a line to f."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let git = Arc::new(FakeGit::returning("diff --git a/f b/f\n+line"));
        let ctx = context(
            "sk-test",
            git.clone(),
            Arc::new(OpenAiClient::with_base_url(server.uri())),
        );

        let document = describe_staged_changes(&ctx, &repo()).await.unwrap();

        assert_eq!(document.content, "Change Summary\n\nAdded a line to f.");
        assert_eq!(document.language, "markdown");
        assert_eq!(*git.roots.lock().unwrap(), vec![PathBuf::from("/repo")]);
    }

    #[tokio::test]
    async fn end_to_end_missing_choices_is_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "error"})))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = context(
            "sk-test",
            Arc::new(FakeGit::returning("+line")),
            Arc::new(OpenAiClient::with_base_url(server.uri())),
        );

        let err = describe_staged_changes(&ctx, &repo()).await.unwrap_err();

        assert!(matches!(err, DescribeError::RequestFailure(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to generate summary:"));
        assert!(message.contains("missing field `choices`"));
    }
}
