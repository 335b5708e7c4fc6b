//! The client-side workflow controller.
//!
//! `Workflow` is an explicit state record owned by one coordinator:
//! the corpus cache, the style-profile holder, the generation session,
//! the live notice, and the busy flag. Every mutation goes through a
//! named transition so the serialization invariant stays auditable.
//!
//! Remote operations are bracketed by a `begin_*` / `complete_*` pair.
//! `begin_*` runs all client-side validation without touching the
//! network, then marks the controller busy and hands back a
//! [`RequestToken`]. The async driver performs the remote call and
//! feeds the result to the matching `complete_*`, which only applies
//! it if the token is still the outstanding one — a late echo of a
//! superseded request is discarded without touching any state.

use std::time::Instant;

use tracing::{debug, warn};

use crate::article::Article;
use crate::corpus::CorpusStore;
use crate::error::{PlumeError, Result};
use crate::notify::{Notice, NoticeKind};
use crate::profile::{ProfileHolder, StyleProfile};
use crate::session::{GenLength, GenerationSession};

/// The two modal views. Switching tabs has no side effects on data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Train,
    Generate,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Train, Tab::Generate]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Train => "1.Train",
            Tab::Generate => "2.Generate",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Train => 0,
            Tab::Generate => 1,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Train => Tab::Generate,
            Tab::Generate => Tab::Train,
        }
    }

    pub fn prev(&self) -> Tab {
        self.next()
    }
}

/// Kind of remote operation a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Refresh,
    Add,
    Upload,
    Delete,
    LoadProfile,
    Analyze,
    Generate,
}

/// Identifies one issued remote request. Completions carrying a token
/// that is no longer outstanding are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    kind: RequestKind,
    seq: u64,
}

impl RequestToken {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

#[derive(Debug, Default)]
pub struct Workflow {
    corpus: CorpusStore,
    profile: ProfileHolder,
    session: GenerationSession,
    notice: Option<Notice>,
    active_tab: Tab,
    busy: bool,
    seq: u64,
    outstanding: Option<RequestToken>,
    /// Topic of the in-flight generation; becomes the session topic on
    /// successful completion (it drives the download filename).
    pending_topic: Option<String>,
}

impl Default for Tab {
    fn default() -> Self {
        Tab::Train
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Read access ─────────────────────────────────────────

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn profile(&self) -> &ProfileHolder {
        &self.profile
    }

    pub fn session(&self) -> &GenerationSession {
        &self.session
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    // ── Tab selection (pure UI state) ───────────────────────

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    // ── Token bookkeeping ───────────────────────────────────

    fn ensure_idle(&self) -> Result<()> {
        if self.busy {
            Err(PlumeError::Busy)
        } else {
            Ok(())
        }
    }

    fn issue(&mut self, kind: RequestKind) -> RequestToken {
        self.seq += 1;
        let token = RequestToken { kind, seq: self.seq };
        self.busy = true;
        self.outstanding = Some(token);
        token
    }

    /// Clear the busy flag if `token` is the outstanding request.
    /// Returns false for stale completions, which must not be applied.
    fn settle(&mut self, token: RequestToken) -> bool {
        if self.outstanding == Some(token) {
            self.outstanding = None;
            self.busy = false;
            true
        } else {
            debug!(?token, "discarding stale completion");
            false
        }
    }

    // ── Corpus operations ───────────────────────────────────

    /// Start a full corpus refresh (fetch-and-replace).
    pub fn begin_refresh(&mut self) -> Result<RequestToken> {
        self.ensure_idle()?;
        Ok(self.issue(RequestKind::Refresh))
    }

    /// Apply a refresh result. Success replaces the cache wholesale and
    /// is silent (refreshes run as sub-steps of other actions); failure
    /// leaves the previous cache intact.
    pub fn complete_refresh(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Article>>,
        now: Instant,
    ) {
        if !self.settle(token) {
            return;
        }
        match result {
            Ok(articles) => self.corpus.replace_all(articles),
            Err(e) => self.post(Notice::error(e.to_string(), now)),
        }
    }

    /// Start adding an article. Both fields are required; validation
    /// failures never reach the network.
    pub fn begin_add(&mut self, title: &str, content: &str) -> Result<RequestToken> {
        self.ensure_idle()?;
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(PlumeError::Validation(
                "Please fill in the title and content".into(),
            ));
        }
        Ok(self.issue(RequestKind::Add))
    }

    /// Apply an add result. Returns true when the caller should chain
    /// a corpus refresh to resync the cache with server truth.
    pub fn complete_add(
        &mut self,
        token: RequestToken,
        result: Result<Article>,
        now: Instant,
    ) -> bool {
        if !self.settle(token) {
            return false;
        }
        match result {
            Ok(_) => {
                self.post(Notice::success("Article added successfully", now));
                true
            }
            Err(e) => {
                self.post(Notice::error(e.to_string(), now));
                false
            }
        }
    }

    /// Start a file upload. Accepted file kinds are advisory only; the
    /// controller merely requires that a file was chosen.
    pub fn begin_upload(&mut self, file_name: &str) -> Result<RequestToken> {
        self.ensure_idle()?;
        if file_name.trim().is_empty() {
            return Err(PlumeError::Validation("Choose a file to upload".into()));
        }
        Ok(self.issue(RequestKind::Upload))
    }

    /// Apply an upload result. Returns true when a refresh should be
    /// chained.
    pub fn complete_upload(
        &mut self,
        token: RequestToken,
        result: Result<Article>,
        now: Instant,
    ) -> bool {
        if !self.settle(token) {
            return false;
        }
        match result {
            Ok(_) => {
                self.post(Notice::success("File uploaded successfully", now));
                true
            }
            Err(e) => {
                self.post(Notice::error(e.to_string(), now));
                false
            }
        }
    }

    /// Start deleting an article. Interactive confirmation is the UI's
    /// job and must already have happened.
    pub fn begin_delete(&mut self, _id: &str) -> Result<RequestToken> {
        self.ensure_idle()?;
        Ok(self.issue(RequestKind::Delete))
    }

    /// Apply a delete result. Returns true when a refresh should be
    /// chained.
    pub fn complete_delete(
        &mut self,
        token: RequestToken,
        result: Result<()>,
        now: Instant,
    ) -> bool {
        if !self.settle(token) {
            return false;
        }
        match result {
            Ok(()) => {
                self.post(Notice::success("Article deleted", now));
                true
            }
            Err(e) => {
                self.post(Notice::error(e.to_string(), now));
                false
            }
        }
    }

    // ── Style profile operations ────────────────────────────

    /// Start fetching the server-side profile (startup probe).
    pub fn begin_load_profile(&mut self) -> Result<RequestToken> {
        self.ensure_idle()?;
        Ok(self.issue(RequestKind::LoadProfile))
    }

    /// Apply a profile-load result. "No profile yet" and a failed probe
    /// both leave the holder at its previous value; neither posts a
    /// notice.
    pub fn complete_load_profile(
        &mut self,
        token: RequestToken,
        result: Result<Option<StyleProfile>>,
    ) {
        if !self.settle(token) {
            return;
        }
        match result {
            Ok(Some(profile)) => self.profile.replace(profile),
            Ok(None) => {}
            Err(e) => warn!("style profile load failed: {e}"),
        }
    }

    /// Start a style analysis. The corpus must be non-empty.
    pub fn begin_analyze(&mut self) -> Result<RequestToken> {
        self.ensure_idle()?;
        if self.corpus.is_empty() {
            return Err(PlumeError::Precondition(
                "Add at least one article before analyzing".into(),
            ));
        }
        Ok(self.issue(RequestKind::Analyze))
    }

    /// Apply an analysis result. Success replaces the held profile
    /// atomically; failure leaves it unchanged.
    pub fn complete_analyze(
        &mut self,
        token: RequestToken,
        result: Result<StyleProfile>,
        now: Instant,
    ) {
        if !self.settle(token) {
            return;
        }
        match result {
            Ok(profile) => {
                self.profile.replace(profile);
                self.post(Notice::success("Style analysis complete", now));
            }
            Err(e) => self.post(Notice::error(e.to_string(), now)),
        }
    }

    // ── Generation ──────────────────────────────────────────

    /// Start generating an article. Checked in order: the topic must be
    /// non-empty, then a style profile must be present. Neither check
    /// touches the network.
    pub fn begin_generate(&mut self, topic: &str, _length: GenLength) -> Result<RequestToken> {
        self.ensure_idle()?;
        if topic.trim().is_empty() {
            return Err(PlumeError::Validation("Please enter a topic".into()));
        }
        if !self.profile.is_present() {
            return Err(PlumeError::Precondition(
                "Analyze your writing style first".into(),
            ));
        }
        self.pending_topic = Some(topic.to_string());
        Ok(self.issue(RequestKind::Generate))
    }

    /// Apply a generation result. Success replaces any prior generated
    /// article unconditionally and opens it in edit mode; failure
    /// leaves the session unchanged.
    pub fn complete_generate(&mut self, token: RequestToken, result: Result<String>, now: Instant) {
        if !self.settle(token) {
            return;
        }
        let topic = self.pending_topic.take().unwrap_or_default();
        match result {
            Ok(text) => {
                self.session.replace(text, topic);
                self.post(Notice::success("Article generated successfully", now));
            }
            Err(e) => self.post(Notice::error(e.to_string(), now)),
        }
    }

    // ── Local session transitions ───────────────────────────

    pub fn toggle_edit(&mut self) {
        self.session.toggle_edit();
    }

    pub fn set_generated_text(&mut self, text: String) -> Result<()> {
        self.session.set_text(text)
    }

    // ── Notices ─────────────────────────────────────────────

    fn post(&mut self, notice: Notice) {
        // Newest replaces oldest; the old expiry timer dies with it.
        self.notice = Some(notice);
    }

    /// Action-boundary conversion: any workflow error becomes an error
    /// notice. Errors never propagate past here.
    pub fn show_error(&mut self, err: &PlumeError, now: Instant) {
        self.post(Notice::error(err.to_string(), now));
    }

    /// Post a success notice for a local side effect (copy, download).
    pub fn show_success(&mut self, text: impl Into<String>, now: Instant) {
        self.post(Notice::success(text, now));
    }

    /// Expire the live notice once its TTL has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NOTICE_TTL;
    use chrono::Utc;

    fn now() -> Instant {
        Instant::now()
    }

    fn article(id: &str, title: &str, content: &str) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            date: Utc::now(),
        }
    }

    fn profile() -> StyleProfile {
        StyleProfile {
            total_articles: 1,
            total_words: 2,
            avg_sentence_length: 2.0,
            analyzed_at: Utc::now(),
        }
    }

    fn workflow_with_corpus() -> Workflow {
        let mut wf = Workflow::new();
        let token = wf.begin_refresh().unwrap();
        wf.complete_refresh(token, Ok(vec![article("1", "A", "lorem ipsum")]), now());
        wf
    }

    #[test]
    fn analyze_on_empty_corpus_is_rejected_locally() {
        let mut wf = Workflow::new();
        let err = wf.begin_analyze().unwrap_err();
        assert!(matches!(err, PlumeError::Precondition(_)));
        assert!(!wf.profile().is_present());
        assert!(!wf.is_busy());
        assert!(wf.notice().is_none());
    }

    #[test]
    fn generate_without_profile_is_rejected_locally() {
        let mut wf = workflow_with_corpus();
        let err = wf.begin_generate("travel", GenLength::Short).unwrap_err();
        assert!(matches!(err, PlumeError::Precondition(_)));
        assert!(!wf.session().has_article());
        assert!(!wf.is_busy());
    }

    #[test]
    fn generate_with_empty_topic_fails_regardless_of_profile() {
        let mut wf = workflow_with_corpus();
        assert!(matches!(
            wf.begin_generate("", GenLength::Short),
            Err(PlumeError::Validation(_))
        ));

        let token = wf.begin_analyze().unwrap();
        wf.complete_analyze(token, Ok(profile()), now());
        assert!(matches!(
            wf.begin_generate("   ", GenLength::Short),
            Err(PlumeError::Validation(_))
        ));
    }

    #[test]
    fn add_with_empty_field_never_issues_a_token() {
        let mut wf = Workflow::new();
        assert!(matches!(
            wf.begin_add("", "content"),
            Err(PlumeError::Validation(_))
        ));
        assert!(matches!(
            wf.begin_add("title", "  "),
            Err(PlumeError::Validation(_))
        ));
        assert!(!wf.is_busy());
    }

    #[test]
    fn busy_flag_serializes_initiation() {
        let mut wf = Workflow::new();
        let token = wf.begin_refresh().unwrap();
        assert!(wf.is_busy());
        assert!(matches!(wf.begin_refresh(), Err(PlumeError::Busy)));
        assert!(matches!(
            wf.begin_add("t", "c"),
            Err(PlumeError::Busy)
        ));

        wf.complete_refresh(token, Ok(vec![]), now());
        assert!(!wf.is_busy());
        assert!(wf.begin_refresh().is_ok());
    }

    #[test]
    fn busy_clears_on_failure_too() {
        let mut wf = Workflow::new();
        let token = wf.begin_refresh().unwrap();
        wf.complete_refresh(token, Err(PlumeError::Transport("boom".into())), now());
        assert!(!wf.is_busy());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut wf = Workflow::new();
        let stale = wf.begin_refresh().unwrap();
        wf.complete_refresh(stale, Ok(vec![article("1", "A", "x")]), now());
        assert_eq!(wf.corpus().len(), 1);

        // A second echo of the same token arrives after it was settled:
        // it must not touch the cache or the busy flag.
        let fresh = wf.begin_refresh().unwrap();
        wf.complete_refresh(stale, Ok(vec![]), now());
        assert_eq!(wf.corpus().len(), 1);
        assert!(wf.is_busy());

        wf.complete_refresh(fresh, Ok(vec![]), now());
        assert!(wf.corpus().is_empty());
        assert!(!wf.is_busy());
    }

    #[test]
    fn failed_refresh_keeps_stale_cache_available() {
        let mut wf = workflow_with_corpus();
        let token = wf.begin_refresh().unwrap();
        wf.complete_refresh(token, Err(PlumeError::Transport("down".into())), now());
        assert_eq!(wf.corpus().len(), 1);
        assert_eq!(wf.notice().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn successful_add_requests_a_resync() {
        let mut wf = Workflow::new();
        let token = wf.begin_add("T", "C").unwrap();
        let refresh = wf.complete_add(token, Ok(article("9", "T", "C")), now());
        assert!(refresh);
        assert_eq!(wf.notice().unwrap().kind, NoticeKind::Success);

        // The cache itself only changes on the chained refresh.
        assert!(wf.corpus().is_empty());
        let token = wf.begin_refresh().unwrap();
        wf.complete_refresh(token, Ok(vec![article("9", "T", "C")]), now());
        let stored = wf.corpus().get(0).unwrap();
        assert_eq!(stored.title, "T");
        assert_eq!(stored.content, "C");
    }

    #[test]
    fn failed_add_does_not_request_a_resync() {
        let mut wf = Workflow::new();
        let token = wf.begin_add("T", "C").unwrap();
        let refresh = wf.complete_add(token, Err(PlumeError::Transport("500".into())), now());
        assert!(!refresh);
        assert_eq!(wf.notice().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn analyze_failure_leaves_holder_unchanged() {
        let mut wf = workflow_with_corpus();
        let token = wf.begin_analyze().unwrap();
        wf.complete_analyze(token, Ok(profile()), now());
        let held = wf.profile().current().cloned().unwrap();

        let token = wf.begin_analyze().unwrap();
        wf.complete_analyze(token, Err(PlumeError::Transport("down".into())), now());
        assert_eq!(wf.profile().current(), Some(&held));
    }

    #[test]
    fn profile_load_failure_keeps_previous_value_silently() {
        let mut wf = workflow_with_corpus();
        let token = wf.begin_analyze().unwrap();
        wf.complete_analyze(token, Ok(profile()), now());
        wf.tick(now() + NOTICE_TTL);

        let token = wf.begin_load_profile().unwrap();
        wf.complete_load_profile(token, Err(PlumeError::Transport("down".into())));
        assert!(wf.profile().is_present());
        assert!(wf.notice().is_none());
    }

    #[test]
    fn generation_failure_retains_previous_article() {
        let mut wf = workflow_with_corpus();
        let token = wf.begin_analyze().unwrap();
        wf.complete_analyze(token, Ok(profile()), now());

        let token = wf.begin_generate("travel", GenLength::Short).unwrap();
        wf.complete_generate(token, Ok("first draft".into()), now());
        assert_eq!(wf.session().text(), "first draft");

        let token = wf.begin_generate("food", GenLength::Long).unwrap();
        wf.complete_generate(
            token,
            Err(PlumeError::Generation {
                detail: Some("model overloaded".into()),
            }),
            now(),
        );
        assert_eq!(wf.session().text(), "first draft");
        assert_eq!(wf.session().topic(), "travel");
        assert_eq!(wf.notice().unwrap().text, "model overloaded");
    }

    #[test]
    fn second_generation_replaces_the_first_entirely() {
        let mut wf = workflow_with_corpus();
        let token = wf.begin_analyze().unwrap();
        wf.complete_analyze(token, Ok(profile()), now());

        let token = wf.begin_generate("travel", GenLength::Short).unwrap();
        wf.complete_generate(token, Ok("about travel".into()), now());
        let token = wf.begin_generate("cooking", GenLength::Short).unwrap();
        wf.complete_generate(token, Ok("about cooking".into()), now());

        assert_eq!(wf.session().text(), "about cooking");
        assert_eq!(wf.session().suggested_filename(), "article_cooking.txt");
        assert!(wf.session().is_editable());
    }

    #[test]
    fn notice_expires_after_ttl_and_newer_preempts() {
        let start = now();
        let mut wf = Workflow::new();
        let token = wf.begin_add("T", "C").unwrap();
        wf.complete_add(token, Ok(article("1", "T", "C")), start);
        assert!(wf.notice().is_some());

        wf.tick(start + NOTICE_TTL - std::time::Duration::from_millis(1));
        assert!(wf.notice().is_some());

        // A newer notice posted late in the first one's life restarts
        // the clock.
        let later = start + std::time::Duration::from_secs(4);
        wf.show_error(&PlumeError::Busy, later);
        wf.tick(start + NOTICE_TTL);
        assert!(wf.notice().is_some());
        wf.tick(later + NOTICE_TTL);
        assert!(wf.notice().is_none());
    }

    #[test]
    fn tab_switching_touches_no_data() {
        let mut wf = workflow_with_corpus();
        assert_eq!(wf.active_tab(), Tab::Train);
        wf.next_tab();
        assert_eq!(wf.active_tab(), Tab::Generate);
        wf.select_tab(Tab::Train);
        assert_eq!(wf.corpus().len(), 1);
        assert!(!wf.is_busy());
    }
}
