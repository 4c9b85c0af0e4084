//! Form field value objects

/// A single text input with its static presentation
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub placeholder: &'static str,
    /// Message shown below the field while its error flag is set
    pub error_text: &'static str,
    pub value: String,
    /// Render the value as bullets (password inputs)
    pub is_masked: bool,
}

impl FormField {
    /// Create a new empty text field
    pub fn text(
        label: &'static str,
        placeholder: &'static str,
        error_text: &'static str,
    ) -> Self {
        Self {
            label,
            placeholder,
            error_text,
            value: String::new(),
            is_masked: false,
        }
    }

    /// Create a new empty field whose value is masked on screen
    pub fn masked(
        label: &'static str,
        placeholder: &'static str,
        error_text: &'static str,
    ) -> Self {
        Self {
            is_masked: true,
            ..Self::text(label, placeholder, error_text)
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.value.push_str(text);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if self.is_masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}
