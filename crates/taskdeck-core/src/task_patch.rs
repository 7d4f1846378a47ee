use crate::task::Priority;

/// Maximum task text length after trimming.
pub const MAX_TEXT_LEN: usize = 500;
/// Maximum category length after trimming.
pub const MAX_CATEGORY_LEN: usize = 50;

/// Validation failures detected before any network call is made.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Task text is empty or whitespace-only.
    #[error("task text must not be empty")]
    EmptyText,
    /// Task text exceeds the allowed length.
    #[error("task text must be at most {MAX_TEXT_LEN} characters, got {len}")]
    TextTooLong {
        /// Trimmed text length.
        len: usize,
    },
    /// Category exceeds the allowed length.
    #[error("category must be at most {MAX_CATEGORY_LEN} characters, got {len}")]
    CategoryTooLong {
        /// Trimmed category length.
        len: usize,
    },
}

fn normalize_text(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let len = trimmed.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ValidationError::TextTooLong { len });
    }
    Ok(trimmed.to_owned())
}

fn normalize_category(raw: &str) -> Result<Option<String>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let len = trimmed.chars().count();
    if len > MAX_CATEGORY_LEN {
        return Err(ValidationError::CategoryTooLong { len });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Payload for creating a task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    /// Task text; trimmed and validated before sending.
    pub text: String,
    /// Urgency level (backend defaults to medium when absent).
    pub priority: Option<Priority>,
    /// Optional grouping label; blank values are dropped.
    pub category: Option<String>,
}

impl TaskDraft {
    /// Build a draft from raw text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: None,
            category: None,
        }
    }

    /// Trim and validate the draft fields in place.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when the text is blank or a field exceeds
    /// its length limit. The draft is left partially normalized on error.
    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        self.text = normalize_text(&self.text)?;
        if let Some(category) = self.category.take() {
            self.category = normalize_category(&category)?;
        }
        Ok(())
    }
}

/// Patch applied to the category field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPatch {
    /// Replace the category with a new value.
    Set {
        /// New category label.
        category: String,
    },
    /// Remove the category entirely.
    Clear,
}

/// Partial update payload for an existing task.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// Replacement task text (trimmed, must stay non-empty).
    pub text: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
    /// New urgency level.
    pub priority: Option<Priority>,
    /// Category change (set or clear).
    pub category: Option<CategoryPatch>,
}

impl TaskPatch {
    /// Patch toggling only the completion flag.
    #[must_use]
    pub const fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
            priority: None,
            category: None,
        }
    }

    /// Returns true when the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
            && self.category.is_none()
    }

    /// Trim and validate the patch fields in place.
    ///
    /// A `Set` category that trims to blank degrades to `Clear`, so the
    /// backend receives an explicit null instead of an empty string.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when the replacement text is blank or a
    /// field exceeds its length limit.
    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        if let Some(text) = self.text.take() {
            self.text = Some(normalize_text(&text)?);
        }
        match self.category.take() {
            Some(CategoryPatch::Set { category }) => {
                self.category = Some(normalize_category(&category)?.map_or(
                    CategoryPatch::Clear,
                    |category| CategoryPatch::Set { category },
                ));
            }
            other => self.category = other,
        }
        Ok(())
    }
}
