use crate::article::Article;

/// Read-through cache of the user's training corpus.
///
/// The server owns the articles; this store only mirrors them. Every
/// successful mutation on the server is followed by a full refresh
/// rather than a local patch, so the cache never drifts from server
/// truth. A failed refresh leaves the previous contents intact
/// (stale-but-available).
#[derive(Debug, Default, Clone)]
pub struct CorpusStore {
    articles: Vec<Article>,
}

impl CorpusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire cache with a fresh server listing.
    pub fn replace_all(&mut self, articles: Vec<Article>) {
        self.articles = articles;
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(id: &str, title: &str) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
            content: "body".into(),
            date: Utc::now(),
        }
    }

    #[test]
    fn replace_all_is_wholesale() {
        let mut store = CorpusStore::new();
        store.replace_all(vec![article("1", "A"), article("2", "B")]);
        assert_eq!(store.len(), 2);

        store.replace_all(vec![article("3", "C")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().title, "C");
    }

    #[test]
    fn starts_empty() {
        assert!(CorpusStore::new().is_empty());
    }
}
