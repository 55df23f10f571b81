use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{LanguageModelService, Presenter, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub presenter: Arc<dyn Presenter>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            config,
            version_control,
            language_model,
            presenter,
        }
    }
}
