pub mod language_model;
pub mod presenter;
pub mod version_control;

pub use language_model::LanguageModelService;
pub use presenter::Presenter;
pub use version_control::VersionControlService;
