//! Export helpers for generated articles: filename derivation and
//! plain-text file downloads.

use std::path::{Path, PathBuf};

use crate::error::{PlumeError, Result};

/// Derive the download filename from a generation topic: whitespace
/// runs become single underscores, `article_` prefix, `.txt` extension.
/// Repeated downloads of the same topic overwrite the previous file.
pub fn suggested_filename(topic: &str) -> String {
    let slug = topic.split_whitespace().collect::<Vec<_>>().join("_");
    format!("article_{slug}.txt")
}

/// Write `text` into `dir` under the suggested filename for `topic`.
/// Empty or whitespace-only text produces an empty artifact — that is
/// not an error.
pub fn save_article(dir: &Path, topic: &str, text: &str) -> Result<PathBuf> {
    let path = dir.join(suggested_filename(topic));
    std::fs::write(&path, text)
        .map_err(|e| PlumeError::Io(format!("Could not save {}: {e}", path.display())))?;
    Ok(path)
}

/// Directory downloads land in: the configured override if any, else
/// the platform downloads directory, else the current directory.
pub fn download_dir(configured: Option<&Path>) -> PathBuf {
    if let Some(dir) = configured {
        return dir.to_path_buf();
    }
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_whitespace_runs_with_underscores() {
        assert_eq!(suggested_filename("travel"), "article_travel.txt");
        assert_eq!(
            suggested_filename("the  benefits\tof meditation"),
            "article_the_benefits_of_meditation.txt"
        );
    }

    #[test]
    fn filename_for_empty_topic() {
        assert_eq!(suggested_filename(""), "article_.txt");
        assert_eq!(suggested_filename("   "), "article_.txt");
    }

    #[test]
    fn save_writes_the_exact_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_article(dir.path(), "travel", "lorem ipsum").unwrap();
        assert_eq!(path.file_name().unwrap(), "article_travel.txt");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "lorem ipsum");
    }

    #[test]
    fn empty_text_yields_an_empty_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_article(dir.path(), "t", "").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn repeated_saves_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        save_article(dir.path(), "t", "first").unwrap();
        let path = save_article(dir.path(), "t", "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
