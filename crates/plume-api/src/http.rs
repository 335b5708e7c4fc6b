//! HTTP implementation of the service gateway.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use plume_core::article::Article;
use plume_core::error::{PlumeError, Result};
use plume_core::profile::StyleProfile;
use plume_core::session::GenLength;
use plume_core::ServiceGateway;

use crate::protocol::*;

/// Gateway to the remote writing-assistant API.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success response into a `Transport` error, keeping
    /// the server's detail message when it sent one.
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let detail = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        Err(PlumeError::Transport(match detail {
            Some(detail) => detail,
            None => format!("HTTP {status}"),
        }))
    }

    async fn parse<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
        resp.json::<T>()
            .await
            .map_err(|e| PlumeError::Transport(format!("unexpected response shape: {e}")))
    }

    fn transport(e: reqwest::Error) -> PlumeError {
        PlumeError::Transport(e.to_string())
    }
}

#[async_trait]
impl ServiceGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let resp = self
            .client
            .get(self.url("/api/articles"))
            .send()
            .await
            .map_err(Self::transport)?;
        let listing: ListArticlesResponse = Self::parse(Self::check(resp).await?).await?;
        let articles: Vec<Article> = listing
            .articles
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<_>>()?;
        debug!("listed {} articles", articles.len());
        Ok(articles)
    }

    #[instrument(skip(self, content))]
    async fn add_article(&self, title: &str, content: &str) -> Result<Article> {
        let resp = self
            .client
            .post(self.url("/api/articles"))
            .json(&AddArticleRequest { title, content })
            .send()
            .await
            .map_err(Self::transport)?;
        let created: MutationResponse = Self::parse(Self::check(resp).await?).await?;
        created.article.try_into()
    }

    #[instrument(skip(self))]
    async fn delete_article(&self, id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/articles/{id}")))
            .send()
            .await
            .map_err(Self::transport)?;
        Self::check(resp).await?;
        Ok(())
    }

    #[instrument(skip(self, bytes))]
    async fn upload_article(&self, file_name: &str, bytes: Vec<u8>) -> Result<Article> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("text/plain")
            .map_err(|e| PlumeError::Transport(e.to_string()))?;
        let form = Form::new().part("file", part);
        let resp = self
            .client
            .post(self.url("/api/upload-article"))
            .multipart(form)
            .send()
            .await
            .map_err(Self::transport)?;
        let created: MutationResponse = Self::parse(Self::check(resp).await?).await?;
        created.article.try_into()
    }

    #[instrument(skip(self))]
    async fn style_profile(&self) -> Result<Option<StyleProfile>> {
        let resp = self
            .client
            .get(self.url("/api/style-profile"))
            .send()
            .await
            .map_err(Self::transport)?;
        let envelope: ProfileEnvelope = Self::parse(Self::check(resp).await?).await?;
        envelope.profile.map(StyleProfile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn analyze_style(&self) -> Result<StyleProfile> {
        let resp = self
            .client
            .post(self.url("/api/analyze-style"))
            .send()
            .await
            .map_err(Self::transport)?;
        let analyzed: AnalyzeResponse = Self::parse(Self::check(resp).await?).await?;
        let profile: StyleProfile = analyzed.profile.try_into()?;
        debug!(
            articles = profile.total_articles,
            words = profile.total_words,
            "style analysis complete"
        );
        Ok(profile)
    }

    #[instrument(skip(self))]
    async fn generate_article(&self, topic: &str, length: GenLength) -> Result<String> {
        let resp = self
            .client
            .post(self.url("/api/generate"))
            .json(&GenerateRequest { topic, length })
            .send()
            .await
            .map_err(|e| {
                debug!("generate request failed to send: {e}");
                PlumeError::Generation { detail: None }
            })?;

        if !resp.status().is_success() {
            // Only a detail the server actually sent is shown verbatim;
            // everything else falls back to the generic message.
            let detail = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(PlumeError::Generation { detail });
        }

        let generated: GenerateResponse = Self::parse(resp).await?;
        Ok(generated.article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn base_url_is_normalized() {
        let gateway = HttpGateway::new(
            "http://localhost:8000/".into(),
            std::time::Duration::from_secs(5),
        );
        assert_eq!(gateway.url("/api/articles"), "http://localhost:8000/api/articles");
    }

    /// Serve a single canned response and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn generation_error_without_server_detail_is_generic() {
        let base = serve_once("503 Service Unavailable", "{}").await;
        let gateway = HttpGateway::new(base, Duration::from_secs(5));
        let err = gateway.generate_article("rust", GenLength::Medium).await.unwrap_err();
        assert_eq!(err, PlumeError::Generation { detail: None });
        assert_eq!(err.to_string(), "Article generation failed");
    }

    #[tokio::test]
    async fn generation_error_shows_server_detail_verbatim() {
        let base = serve_once(
            "500 Internal Server Error",
            r#"{"detail": "ANTHROPIC_API_KEY not configured"}"#,
        )
        .await;
        let gateway = HttpGateway::new(base, Duration::from_secs(5));
        let err = gateway.generate_article("rust", GenLength::Medium).await.unwrap_err();
        assert_eq!(err.to_string(), "ANTHROPIC_API_KEY not configured");
    }

    #[tokio::test]
    async fn generation_send_failure_is_generic_too() {
        // Bind and immediately drop so the port refuses connections.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let gateway = HttpGateway::new(
            format!("http://127.0.0.1:{port}"),
            Duration::from_secs(5),
        );
        let err = gateway.generate_article("rust", GenLength::Medium).await.unwrap_err();
        assert_eq!(err, PlumeError::Generation { detail: None });
    }
}
