use serde::{Deserialize, Serialize};

use crate::error::{PlumeError, Result};

/// Requested length of a generated article. The word bands are
/// advisory; only the remote generator interprets them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GenLength {
    Short,
    Medium,
    Long,
}

impl GenLength {
    /// Wire value expected by the generation endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenLength::Short => "short",
            GenLength::Medium => "medium",
            GenLength::Long => "long",
        }
    }

    /// Target word-count band shown in the length selector.
    pub fn word_band(&self) -> &'static str {
        match self {
            GenLength::Short => "300-500 words",
            GenLength::Medium => "700-1000 words",
            GenLength::Long => "1500-2000 words",
        }
    }

    /// All admissible values for UI display.
    pub fn all() -> &'static [GenLength] {
        &[GenLength::Short, GenLength::Medium, GenLength::Long]
    }

    /// Cycle to the next length (for keyboard navigation).
    pub fn next(&self) -> GenLength {
        match self {
            GenLength::Short => GenLength::Medium,
            GenLength::Medium => GenLength::Long,
            GenLength::Long => GenLength::Short,
        }
    }

    /// Cycle to the previous length.
    pub fn prev(&self) -> GenLength {
        match self {
            GenLength::Short => GenLength::Long,
            GenLength::Medium => GenLength::Short,
            GenLength::Long => GenLength::Medium,
        }
    }
}

impl std::fmt::Display for GenLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenLength::Short => write!(f, "Short"),
            GenLength::Medium => write!(f, "Medium"),
            GenLength::Long => write!(f, "Long"),
        }
    }
}

/// One generated artifact and its edit-mode flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArticle {
    pub text: String,
    pub editable: bool,
}

/// Lifecycle of the current generated article: creation by a
/// successful generation, optional in-place editing, export. The
/// artifact is only ever destroyed by being overwritten with the next
/// generation result.
#[derive(Debug, Default, Clone)]
pub struct GenerationSession {
    current: Option<GeneratedArticle>,
    /// Topic of the generation that produced the current article;
    /// drives the suggested download filename.
    topic: String,
}

impl GenerationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&GeneratedArticle> {
        self.current.as_ref()
    }

    pub fn has_article(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_editable(&self) -> bool {
        self.current.as_ref().is_some_and(|a| a.editable)
    }

    pub fn text(&self) -> &str {
        self.current.as_ref().map(|a| a.text.as_str()).unwrap_or("")
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Install a freshly generated article, unconditionally replacing
    /// any prior one. New articles open in edit mode.
    pub fn replace(&mut self, text: String, topic: String) {
        self.current = Some(GeneratedArticle {
            text,
            editable: true,
        });
        self.topic = topic;
    }

    /// Flip the edit-mode flag. The text is untouched.
    pub fn toggle_edit(&mut self) {
        if let Some(article) = self.current.as_mut() {
            article.editable = !article.editable;
        }
    }

    /// Overwrite the article text. Local-only; permitted only while
    /// the article is in edit mode.
    pub fn set_text(&mut self, new_text: String) -> Result<()> {
        match self.current.as_mut() {
            Some(article) if article.editable => {
                article.text = new_text;
                Ok(())
            }
            Some(_) => Err(PlumeError::Precondition(
                "The article is not in edit mode".into(),
            )),
            None => Err(PlumeError::Precondition(
                "No generated article to edit".into(),
            )),
        }
    }

    /// Suggested download filename for the current article, derived
    /// from the topic with whitespace runs collapsed to underscores.
    pub fn suggested_filename(&self) -> String {
        crate::export::suggested_filename(&self.topic)
    }
}
