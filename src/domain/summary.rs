const DOCUMENT_HEADING: &str = "Change Summary\n\n";
const DOCUMENT_LANGUAGE: &str = "markdown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryText(String);

impl SummaryText {
    /// Surrounding whitespace from the model is dropped.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An unsaved, read-only document handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualDocument {
    pub content: String,
    pub language: &'static str,
}

impl VirtualDocument {
    pub fn change_summary(summary: &SummaryText) -> Self {
        Self {
            content: format!("{DOCUMENT_HEADING}{}", summary.as_str()),
            language: DOCUMENT_LANGUAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_model_output() {
        assert_eq!(SummaryText::new("  Added X.  \n").as_str(), "Added X.");
    }

    #[test]
    fn builds_markdown_document() {
        let document = VirtualDocument::change_summary(&SummaryText::new("Added a line to f."));
        assert_eq!(document.content, "Change Summary\n\nAdded a line to f.");
        assert_eq!(document.language, "markdown");
    }
}
