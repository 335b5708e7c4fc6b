//! End-to-end workflow test against an in-memory service stub.
//!
//! The stub mirrors the remote service's observable contract: it owns
//! the articles, assigns ids, and computes the basic style statistics
//! (whitespace word split, '.'-separated sentence count) that the real
//! analysis endpoint reports.

use std::sync::Mutex;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;

use plume_core::article::Article;
use plume_core::error::{PlumeError, Result};
use plume_core::profile::StyleProfile;
use plume_core::session::GenLength;
use plume_core::workflow::Workflow;
use plume_core::ServiceGateway;

#[derive(Default)]
struct StubService {
    articles: Mutex<Vec<Article>>,
    profile: Mutex<Option<StyleProfile>>,
}

impl StubService {
    fn compute_profile(articles: &[Article]) -> StyleProfile {
        let total_words: u64 = articles
            .iter()
            .map(|a| a.content.split_whitespace().count() as u64)
            .sum();
        let total_sentences: u64 = articles
            .iter()
            .flat_map(|a| a.content.split('.'))
            .filter(|s| !s.trim().is_empty())
            .count() as u64;
        StyleProfile {
            total_articles: articles.len() as u64,
            total_words,
            avg_sentence_length: total_words as f64 / total_sentences.max(1) as f64,
            analyzed_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ServiceGateway for StubService {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(self.articles.lock().unwrap().clone())
    }

    async fn add_article(&self, title: &str, content: &str) -> Result<Article> {
        let mut articles = self.articles.lock().unwrap();
        let article = Article {
            id: format!("{}", articles.len() + 1),
            title: title.to_string(),
            content: content.to_string(),
            date: Utc::now(),
        };
        articles.push(article.clone());
        Ok(article)
    }

    async fn delete_article(&self, id: &str) -> Result<()> {
        self.articles.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn upload_article(&self, file_name: &str, bytes: Vec<u8>) -> Result<Article> {
        let content = String::from_utf8(bytes)
            .map_err(|_| PlumeError::Transport("file is not valid UTF-8".into()))?;
        let title = file_name
            .trim_end_matches(".txt")
            .trim_end_matches(".md")
            .to_string();
        self.add_article(&title, &content).await
    }

    async fn style_profile(&self) -> Result<Option<StyleProfile>> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn analyze_style(&self) -> Result<StyleProfile> {
        let profile = Self::compute_profile(&self.articles.lock().unwrap());
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(profile)
    }

    async fn generate_article(&self, topic: &str, length: GenLength) -> Result<String> {
        if self.profile.lock().unwrap().is_none() {
            return Err(PlumeError::Generation {
                detail: Some("No style profile available".into()),
            });
        }
        Ok(format!("A {length} piece about {topic}."))
    }
}

#[tokio::test]
async fn train_analyze_generate_download_scenario() {
    let service = StubService::default();
    let mut wf = Workflow::new();
    let now = Instant::now();

    // Add one article, then resync the cache.
    let token = wf.begin_add("A", "lorem ipsum").unwrap();
    let result = service.add_article("A", "lorem ipsum").await;
    assert!(wf.complete_add(token, result, now));

    let token = wf.begin_refresh().unwrap();
    wf.complete_refresh(token, service.list_articles().await, now);
    assert_eq!(wf.corpus().len(), 1);
    assert_eq!(wf.corpus().get(0).unwrap().title, "A");

    // Analyze: one article, two words, one sentence.
    let token = wf.begin_analyze().unwrap();
    wf.complete_analyze(token, service.analyze_style().await, now);
    let profile = wf.profile().current().unwrap();
    assert_eq!(profile.total_articles, 1);
    assert_eq!(profile.total_words, 2);
    assert_eq!(profile.avg_sentence_length, 2.0);

    // Generate: the fresh article opens editable.
    let token = wf.begin_generate("travel", GenLength::Short).unwrap();
    wf.complete_generate(token, service.generate_article("travel", GenLength::Short).await, now);
    assert!(wf.session().is_editable());
    assert!(wf.session().text().contains("travel"));

    // Download: the suggested name derives from the topic.
    assert_eq!(wf.session().suggested_filename(), "article_travel.txt");
    let dir = tempfile::tempdir().unwrap();
    let path =
        plume_core::export::save_article(dir.path(), wf.session().topic(), wf.session().text())
            .unwrap();
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        wf.session().text()
    );
}

#[tokio::test]
async fn analyze_profile_reflects_corpus_size_at_analysis_time() {
    let service = StubService::default();
    let mut wf = Workflow::new();
    let now = Instant::now();

    for (title, content) in [("A", "one two three."), ("B", "four five. six seven.")] {
        let token = wf.begin_add(title, content).unwrap();
        assert!(wf.complete_add(token, service.add_article(title, content).await, now));
        let token = wf.begin_refresh().unwrap();
        wf.complete_refresh(token, service.list_articles().await, now);
    }
    assert_eq!(wf.corpus().len(), 2);

    let token = wf.begin_analyze().unwrap();
    wf.complete_analyze(token, service.analyze_style().await, now);
    assert_eq!(wf.profile().current().unwrap().total_articles, 2);
    assert_eq!(wf.profile().current().unwrap().total_words, 7);
}

#[tokio::test]
async fn delete_then_refresh_shrinks_the_cache() {
    let service = StubService::default();
    let mut wf = Workflow::new();
    let now = Instant::now();

    service.add_article("A", "x").await.unwrap();
    service.add_article("B", "y").await.unwrap();
    let token = wf.begin_refresh().unwrap();
    wf.complete_refresh(token, service.list_articles().await, now);
    assert_eq!(wf.corpus().len(), 2);

    let id = wf.corpus().get(0).unwrap().id.clone();
    let token = wf.begin_delete(&id).unwrap();
    assert!(wf.complete_delete(token, service.delete_article(&id).await, now));
    let token = wf.begin_refresh().unwrap();
    wf.complete_refresh(token, service.list_articles().await, now);
    assert_eq!(wf.corpus().len(), 1);
    assert_eq!(wf.corpus().get(0).unwrap().title, "B");
}

#[tokio::test]
async fn upload_derives_title_from_file_name() {
    let service = StubService::default();
    let mut wf = Workflow::new();
    let now = Instant::now();

    let token = wf.begin_upload("notes.md").unwrap();
    let result = service
        .upload_article("notes.md", b"some markdown text".to_vec())
        .await;
    assert!(wf.complete_upload(token, result, now));

    let token = wf.begin_refresh().unwrap();
    wf.complete_refresh(token, service.list_articles().await, now);
    assert_eq!(wf.corpus().get(0).unwrap().title, "notes");
}
