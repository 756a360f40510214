use std::fmt;

/// The API key field. Stores the trimmed value only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialHolder {
    value: String,
}

impl CredentialHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &str {
        &self.value
    }

    pub fn is_present(&self) -> bool {
        !self.value.is_empty()
    }

    /// Stores `raw` trimmed. Returns `true` if the stored value changed.
    pub fn set(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed == self.value {
            return false;
        }
        self.value = trimmed.to_string();
        true
    }

    /// Short form safe for log lines.
    pub fn masked(&self) -> String {
        if self.value.is_empty() {
            return "<empty>".to_string();
        }
        let head: String = self.value.chars().take(4).collect();
        format!("{}****", head)
    }
}

impl fmt::Debug for CredentialHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHolder")
            .field("value", &self.masked())
            .finish()
    }
}
