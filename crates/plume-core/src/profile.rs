use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate statistics summarizing the corpus's writing style,
/// produced by the remote analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StyleProfile {
    /// Number of articles analyzed.
    pub total_articles: u64,

    /// Total word count across the corpus at analysis time.
    pub total_words: u64,

    /// Average sentence length in words.
    pub avg_sentence_length: f64,

    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

/// Holds the most recent style profile, or nothing.
///
/// A successful analysis replaces the held profile wholesale — there is
/// never a merge and never an intermediate empty state. Any failure
/// leaves the holder exactly as it was.
#[derive(Debug, Default, Clone)]
pub struct ProfileHolder {
    current: Option<StyleProfile>,
}

impl ProfileHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&StyleProfile> {
        self.current.as_ref()
    }

    /// Atomically replace the held profile.
    pub fn replace(&mut self, profile: StyleProfile) {
        self.current = Some(profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(total_articles: u64) -> StyleProfile {
        StyleProfile {
            total_articles,
            total_words: 100,
            avg_sentence_length: 12.5,
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn absent_until_first_replace() {
        let mut holder = ProfileHolder::new();
        assert!(!holder.is_present());

        holder.replace(profile(3));
        assert!(holder.is_present());
        assert_eq!(holder.current().unwrap().total_articles, 3);
    }

    #[test]
    fn replace_is_wholesale() {
        let mut holder = ProfileHolder::new();
        holder.replace(profile(3));
        holder.replace(profile(7));
        assert_eq!(holder.current().unwrap().total_articles, 7);
    }
}
