//! Wire types for the writing-assistant HTTP API.
//!
//! The server's response shapes are loosely typed, so every payload is
//! deserialized into an explicit wire struct here and then converted
//! into a validated domain type. A shape mismatch becomes a
//! `Transport` error at this boundary instead of an undefined field
//! deeper in the data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use plume_core::article::Article;
use plume_core::error::PlumeError;
use plume_core::profile::StyleProfile;
use plume_core::session::GenLength;

fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, PlumeError> {
    // The backend emits naive ISO 8601 local timestamps without an
    // offset; accept both those and proper RFC 3339.
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<chrono::NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|_| PlumeError::Transport(format!("invalid {field} timestamp: {raw:?}")))
}

// ── Articles ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ArticleWire {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: String,
}

impl TryFrom<ArticleWire> for Article {
    type Error = PlumeError;

    fn try_from(wire: ArticleWire) -> Result<Article, PlumeError> {
        if wire.id.is_empty() {
            return Err(PlumeError::Transport("article is missing an id".into()));
        }
        let date = parse_timestamp(&wire.date, "article date")?;
        Ok(Article {
            id: wire.id,
            title: wire.title,
            content: wire.content,
            date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListArticlesResponse {
    pub articles: Vec<ArticleWire>,
    #[allow(dead_code)]
    pub count: Option<usize>,
}

/// `POST /api/articles` and `POST /api/upload-article` both answer
/// with a message plus the created article.
#[derive(Debug, Deserialize)]
pub struct MutationResponse {
    #[allow(dead_code)]
    pub message: Option<String>,
    pub article: ArticleWire,
}

#[derive(Debug, Serialize)]
pub struct AddArticleRequest<'a> {
    pub title: &'a str,
    pub content: &'a str,
}

// ── Style profile ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StyleProfileWire {
    pub total_articles: u64,
    pub total_words: u64,
    pub avg_sentence_length: f64,
    pub analyzed_at: String,
}

impl TryFrom<StyleProfileWire> for StyleProfile {
    type Error = PlumeError;

    fn try_from(wire: StyleProfileWire) -> Result<StyleProfile, PlumeError> {
        if wire.avg_sentence_length < 0.0 {
            return Err(PlumeError::Transport(
                "negative average sentence length".into(),
            ));
        }
        let analyzed_at = parse_timestamp(&wire.analyzed_at, "analyzed_at")?;
        Ok(StyleProfile {
            total_articles: wire.total_articles,
            total_words: wire.total_words,
            avg_sentence_length: wire.avg_sentence_length,
            analyzed_at,
        })
    }
}

/// `GET /api/style-profile` answers `{profile: ...}` when one exists
/// and `{message: "..."}` when none does.
#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub profile: Option<StyleProfileWire>,
    #[allow(dead_code)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    #[allow(dead_code)]
    pub message: Option<String>,
    pub profile: StyleProfileWire,
}

// ── Generation ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub topic: &'a str,
    pub length: GenLength,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub article: String,
    #[allow(dead_code)]
    pub topic: Option<String>,
    #[allow(dead_code)]
    pub generated_at: Option<String>,
}

/// FastAPI error body. The detail, when present, is shown verbatim for
/// generation failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_article_listing() {
        let raw = r#"{
            "articles": [
                {"id": "20240101120000", "title": "A", "content": "lorem ipsum", "date": "2024-01-01T12:00:00"}
            ],
            "count": 1
        }"#;
        let parsed: ListArticlesResponse = serde_json::from_str(raw).unwrap();
        let article: Article = parsed.articles.into_iter().next().unwrap().try_into().unwrap();
        assert_eq!(article.id, "20240101120000");
        assert_eq!(article.content, "lorem ipsum");
    }

    #[test]
    fn article_without_id_is_a_transport_error() {
        let wire = ArticleWire {
            id: String::new(),
            title: "A".into(),
            content: "x".into(),
            date: "2024-01-01T12:00:00".into(),
        };
        assert!(matches!(
            Article::try_from(wire),
            Err(PlumeError::Transport(_))
        ));
    }

    #[test]
    fn malformed_date_is_a_transport_error() {
        let wire = ArticleWire {
            id: "1".into(),
            title: "A".into(),
            content: "x".into(),
            date: "yesterday".into(),
        };
        assert!(matches!(
            Article::try_from(wire),
            Err(PlumeError::Transport(_))
        ));
    }

    #[test]
    fn accepts_rfc3339_timestamps_too() {
        let wire = StyleProfileWire {
            total_articles: 1,
            total_words: 2,
            avg_sentence_length: 2.0,
            analyzed_at: "2024-01-01T12:00:00Z".into(),
        };
        let profile = StyleProfile::try_from(wire).unwrap();
        assert_eq!(profile.total_words, 2);
    }

    #[test]
    fn absent_profile_envelope_parses_to_none() {
        let raw = r#"{"message": "No style profile available. Analyze your articles first."}"#;
        let envelope: ProfileEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.profile.is_none());
    }

    #[test]
    fn error_body_detail_is_optional() {
        let with: ErrorBody = serde_json::from_str(r#"{"detail": "no key"}"#).unwrap();
        assert_eq!(with.detail.as_deref(), Some("no key"));
        let without: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();
        assert!(without.detail.is_none());
    }

    #[test]
    fn generate_request_serializes_length_lowercase() {
        let req = GenerateRequest {
            topic: "travel",
            length: GenLength::Short,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["length"], "short");
        assert_eq!(json["topic"], "travel");
    }
}
