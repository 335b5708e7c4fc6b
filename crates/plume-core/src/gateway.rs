//! The narrow seam to the remote style-mimicry service.
//!
//! Everything the client knows about the server goes through this
//! trait: transport, encoding, and the analysis/generation algorithms
//! behind it are all someone else's problem. The workflow controller
//! only ever sees domain types or a `PlumeError`.

use async_trait::async_trait;

use crate::article::Article;
use crate::error::Result;
use crate::profile::StyleProfile;
use crate::session::GenLength;

#[async_trait]
pub trait ServiceGateway: Send + Sync {
    /// Fetch the full article listing.
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Create an article from a title and content.
    async fn add_article(&self, title: &str, content: &str) -> Result<Article>;

    /// Delete an article by its server-assigned id.
    async fn delete_article(&self, id: &str) -> Result<()>;

    /// Create an article from an uploaded file. The server derives the
    /// title from the file name.
    async fn upload_article(&self, file_name: &str, bytes: Vec<u8>) -> Result<Article>;

    /// Fetch the current style profile, if the server has one.
    async fn style_profile(&self) -> Result<Option<StyleProfile>>;

    /// Run a style analysis over the server-side corpus.
    async fn analyze_style(&self) -> Result<StyleProfile>;

    /// Generate article text for a topic in the learned style.
    async fn generate_article(&self, topic: &str, length: GenLength) -> Result<String>;
}
