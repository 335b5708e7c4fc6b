use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many characters of content the article list shows.
const PREVIEW_CHARS: usize = 100;

/// A training article, owned by the server.
///
/// The client never invents ids; they arrive from the server and are
/// treated as opaque strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// Server-assigned unique identifier.
    pub id: String,

    /// Article title.
    pub title: String,

    /// Full article text.
    pub content: String,

    /// Creation timestamp, assigned server-side.
    pub date: DateTime<Utc>,
}

impl Article {
    /// First chunk of the content for list display, with an ellipsis
    /// when truncated. Truncation is on a char boundary.
    pub fn preview(&self) -> String {
        let mut chars = self.content.char_indices();
        match chars.nth(PREVIEW_CHARS) {
            Some((idx, _)) => format!("{}...", &self.content[..idx]),
            None => self.content.clone(),
        }
    }

    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(content: &str) -> Article {
        Article {
            id: "20240101120000".into(),
            title: "T".into(),
            content: content.into(),
            date: Utc::now(),
        }
    }

    #[test]
    fn short_content_is_not_truncated() {
        assert_eq!(article("lorem ipsum").preview(), "lorem ipsum");
    }

    #[test]
    fn long_content_gets_ellipsis() {
        let long = "x".repeat(300);
        let preview = article(&long).preview();
        assert_eq!(preview.len(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let long = "é".repeat(150);
        let preview = article(&long).preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 103);
    }

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(article("lorem ipsum").word_count(), 2);
        assert_eq!(article("  lorem\n\tipsum  dolor ").word_count(), 3);
        assert_eq!(article("").word_count(), 0);
    }
}
