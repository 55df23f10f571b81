/// Output of the staged diff command. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffText(String);

impl DiffText {
    pub fn from_output(output: String) -> Option<Self> {
        if output.trim().is_empty() {
            None
        } else {
            Some(Self(output))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
