//! Main application state and render loop.

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Tabs;
use ratatui::Terminal;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use plume_core::error::PlumeError;
use plume_core::workflow::{Tab, Workflow};
use plume_core::{export, PlumeConfig, ServiceGateway};

use crate::action::{Action, InputMode};
use crate::clipboard;
use crate::components::article_form::ArticleFormComponent;
use crate::components::article_list::ArticleListComponent;
use crate::components::confirm_dialog::ConfirmDialogComponent;
use crate::components::generate_panel::GeneratePanelComponent;
use crate::components::help::HelpComponent;
use crate::components::status_bar::StatusBarComponent;
use crate::components::style_panel::StylePanelComponent;
use crate::components::Component;
use crate::event::{self, EventHandler, InputModeFlag};
use crate::theme::Theme;

/// Main application state.
pub struct App {
    /// The workflow controller. Owns the corpus cache, profile holder,
    /// generation session, notice, and the busy flag.
    workflow: Workflow,
    /// Shared client for server calls, cloned into async tasks.
    gateway: Arc<dyn ServiceGateway>,
    config: PlumeConfig,
    /// Whether the app should exit.
    should_quit: bool,
    /// Shared flag to tell the EventHandler which key-mapping to use.
    input_mode_flag: InputModeFlag,
    /// The startup profile probe runs once, after the first refresh.
    profile_probed: bool,

    // Components
    article_form: ArticleFormComponent,
    article_list: ArticleListComponent,
    style_panel: StylePanelComponent,
    generate_panel: GeneratePanelComponent,
    confirm_dialog: ConfirmDialogComponent,
    status_bar: StatusBarComponent,
    help: HelpComponent,
}

impl App {
    pub fn new(gateway: Arc<dyn ServiceGateway>, config: PlumeConfig) -> Self {
        Self {
            workflow: Workflow::new(),
            gateway,
            config,
            should_quit: false,
            input_mode_flag: event::new_input_mode_flag(),
            profile_probed: false,
            article_form: ArticleFormComponent::new(),
            article_list: ArticleListComponent::new(),
            style_panel: StylePanelComponent::new(),
            generate_panel: GeneratePanelComponent::new(),
            confirm_dialog: ConfirmDialogComponent::new(),
            status_bar: StatusBarComponent::new(),
            help: HelpComponent::new(),
        }
    }

    /// Run the TUI application.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Create the action channel.
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        // Start the event handler with the shared input mode flag.
        let event_tx = tx.clone();
        let mode_flag = self.input_mode_flag.clone();
        let event_handler = EventHandler::new(event_tx, Duration::from_millis(100), mode_flag);
        tokio::spawn(async move {
            event_handler.run().await;
        });

        // Startup: fetch the corpus, then (chained off its completion)
        // probe for an existing style profile.
        let _ = tx.send(Action::RefreshCorpus);

        self.sync_input_mode();

        // Main loop.
        loop {
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if let Some(action) = rx.recv().await {
                self.handle_action(&action, &tx);

                if self.should_quit {
                    break;
                }
            }
        }

        // Restore terminal.
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;

        Ok(())
    }

    /// Determine and set the correct input mode based on the active tab
    /// and component state. Called after every action.
    fn sync_input_mode(&self) {
        let mode = self.current_input_mode();
        event::set_input_mode(&self.input_mode_flag, mode);
    }

    /// What input mode should be active right now?
    fn current_input_mode(&self) -> InputMode {
        // Overlays take key priority and use the normal-mode mapping.
        if self.help.visible || self.confirm_dialog.visible {
            return InputMode::Normal;
        }

        let editing = match self.workflow.active_tab() {
            Tab::Train => self.article_form.wants_input(),
            Tab::Generate => self.generate_panel.wants_input(),
        };
        if editing {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    /// Dispatch an action to the workflow and all relevant components.
    fn handle_action(&mut self, action: &Action, tx: &mpsc::UnboundedSender<Action>) {
        let now = Instant::now();

        // Global actions first.
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Tick => {
                self.workflow.tick(now);
            }
            Action::SelectTab(tab) => {
                self.workflow.select_tab(*tab);
            }
            Action::NextTab => {
                self.workflow.next_tab();
            }
            Action::PrevTab => {
                self.workflow.prev_tab();
            }
            Action::FocusInput => match self.workflow.active_tab() {
                Tab::Train => self.article_form.focus_entry(),
                Tab::Generate => self.generate_panel.focus_topic(),
            },
            Action::FocusUpload => {
                if self.workflow.active_tab() == Tab::Train {
                    self.article_form.focus_upload();
                }
            }
            Action::Confirm => {
                if self.confirm_dialog.visible {
                    let id = self.confirm_dialog.article_id().to_string();
                    self.confirm_dialog.close();
                    self.spawn_delete(&id, now, tx);
                }
            }

            // ── Remote operation triggers ────────────────────
            Action::RefreshCorpus => self.spawn_refresh(now, tx),
            Action::SubmitArticle { title, content } => {
                self.spawn_add(title, content, now, tx);
            }
            Action::UploadFile { path } => self.spawn_upload(path, now, tx),
            Action::RequestDelete => {
                if self.workflow.active_tab() == Tab::Train {
                    match self.article_list.selected_article() {
                        Some(article) => {
                            self.confirm_dialog.open(&article.id, &article.title);
                        }
                        None => self.workflow.show_error(
                            &PlumeError::Precondition("Select an article first".into()),
                            now,
                        ),
                    }
                }
            }
            Action::LoadProfile => self.spawn_load_profile(tx),
            Action::AnalyzeStyle => {
                if self.workflow.active_tab() == Tab::Train {
                    self.spawn_analyze(now, tx);
                }
            }
            Action::SubmitGenerate => self.spawn_generate(now, tx),

            // ── Remote operation completions ─────────────────
            Action::CorpusRefreshed { token, result } => {
                self.workflow.complete_refresh(*token, result.clone(), now);
                if !self.profile_probed {
                    self.profile_probed = true;
                    let _ = tx.send(Action::LoadProfile);
                }
            }
            Action::ArticleAdded { token, result } => {
                if self.workflow.complete_add(*token, result.clone(), now) {
                    self.article_form.clear_entry();
                    self.article_form.unfocus();
                    let _ = tx.send(Action::RefreshCorpus);
                }
            }
            Action::FileUploaded { token, result } => {
                if self.workflow.complete_upload(*token, result.clone(), now) {
                    self.article_form.clear_upload();
                    self.article_form.unfocus();
                    let _ = tx.send(Action::RefreshCorpus);
                }
            }
            Action::ArticleDeleted { token, result } => {
                if self.workflow.complete_delete(*token, result.clone(), now) {
                    let _ = tx.send(Action::RefreshCorpus);
                }
            }
            Action::ProfileLoaded { token, result } => {
                self.workflow.complete_load_profile(*token, result.clone());
            }
            Action::StyleAnalyzed { token, result } => {
                self.workflow.complete_analyze(*token, result.clone(), now);
            }
            Action::ArticleGenerated { token, result } => {
                self.workflow.complete_generate(*token, result.clone(), now);
            }

            // ── Local session transitions ────────────────────
            Action::ToggleEditArticle => {
                if self.workflow.session().has_article() {
                    self.workflow.toggle_edit();
                }
            }
            Action::SetGeneratedText(text) => {
                if let Err(e) = self.workflow.set_generated_text(text.clone()) {
                    self.workflow.show_error(&e, now);
                }
            }
            Action::CopyArticle => self.copy_article(now),
            Action::DownloadArticle => self.download_article(now),

            _ => {}
        }

        // Forward to the active tab's components. While the form is
        // focused it owns navigation keys; they must not fall through
        // and move the article list selection.
        let chained = match self.workflow.active_tab() {
            Tab::Train => {
                if self.article_form.wants_input() {
                    self.article_form.handle_action(action)
                } else {
                    self.article_list.handle_action(action)
                }
            }
            Tab::Generate => self.generate_panel.handle_action(action),
        };

        // Always forward to overlays and the status bar.
        self.confirm_dialog.handle_action(action);
        self.help.handle_action(action);
        self.status_bar.handle_action(action);

        // Handle chained actions from components.
        if let Some(chained) = chained {
            self.handle_action(&chained, tx);
        }

        // Resync display copies and the input mode after every action.
        self.sync_views();
        self.sync_input_mode();
    }

    /// Push workflow state into the components' display copies.
    fn sync_views(&mut self) {
        self.article_list
            .set_articles(self.workflow.corpus().articles().to_vec());
        self.style_panel.profile = self.workflow.profile().current().cloned();
        self.style_panel.corpus_empty = self.workflow.corpus().is_empty();

        let session = self.workflow.session();
        self.generate_panel.profile_present = self.workflow.profile().is_present();
        self.generate_panel
            .set_session_view(session.text(), session.is_editable(), session.has_article());

        self.status_bar.notice = self.workflow.notice().cloned();
        self.status_bar.busy = self.workflow.is_busy();
        self.status_bar.current_tab = self.workflow.active_tab();
    }

    // ── Local side effects ──────────────────────────────────────

    fn copy_article(&mut self, now: Instant) {
        if !self.workflow.session().has_article() {
            self.workflow
                .show_error(&PlumeError::Precondition("No generated article yet".into()), now);
            return;
        }
        match clipboard::copy(self.workflow.session().text()) {
            Ok(()) => self.workflow.show_success("Copied to clipboard", now),
            Err(e) => self
                .workflow
                .show_error(&PlumeError::Io(format!("Clipboard write failed: {e}")), now),
        }
    }

    fn download_article(&mut self, now: Instant) {
        let session = self.workflow.session();
        if !session.has_article() {
            self.workflow
                .show_error(&PlumeError::Precondition("No generated article yet".into()), now);
            return;
        }
        let dir = export::download_dir(self.config.export.download_dir.as_deref());
        match export::save_article(&dir, session.topic(), session.text()) {
            Ok(path) => {
                info!(path = %path.display(), "article saved");
                self.workflow
                    .show_success(format!("Saved {}", path.display()), now);
            }
            Err(e) => self.workflow.show_error(&e, now),
        }
    }

    // ── Async task spawners ─────────────────────────────────────
    //
    // Each spawner runs the local `begin_*` validation; a validation
    // error becomes a notice without any task being spawned. On
    // success the gateway call runs in a task and reports back with a
    // completion action carrying the request token.

    fn spawn_refresh(&mut self, now: Instant, tx: &mpsc::UnboundedSender<Action>) {
        let token = match self.workflow.begin_refresh() {
            Ok(token) => token,
            Err(e) => return self.workflow.show_error(&e, now),
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = gateway.list_articles().await;
            if let Err(ref e) = result {
                warn!("corpus refresh failed: {e}");
            }
            let _ = tx.send(Action::CorpusRefreshed { token, result });
        });
    }

    fn spawn_add(&mut self, title: &str, content: &str, now: Instant, tx: &mpsc::UnboundedSender<Action>) {
        let token = match self.workflow.begin_add(title, content) {
            Ok(token) => token,
            Err(e) => return self.workflow.show_error(&e, now),
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        let title = title.to_string();
        let content = content.to_string();
        tokio::spawn(async move {
            let result = gateway.add_article(&title, &content).await;
            if let Err(ref e) = result {
                error!("add article failed: {e}");
            }
            let _ = tx.send(Action::ArticleAdded { token, result });
        });
    }

    fn spawn_upload(&mut self, path: &str, now: Instant, tx: &mpsc::UnboundedSender<Action>) {
        let file_name = Path::new(path.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        let token = match self.workflow.begin_upload(&file_name) {
            Ok(token) => token,
            Err(e) => return self.workflow.show_error(&e, now),
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        let path = path.trim().to_string();
        tokio::spawn(async move {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => gateway.upload_article(&file_name, bytes).await,
                Err(e) => Err(PlumeError::Io(format!("Could not read {path}: {e}"))),
            };
            if let Err(ref e) = result {
                error!("upload failed: {e}");
            }
            let _ = tx.send(Action::FileUploaded { token, result });
        });
    }

    fn spawn_delete(&mut self, id: &str, now: Instant, tx: &mpsc::UnboundedSender<Action>) {
        let token = match self.workflow.begin_delete(id) {
            Ok(token) => token,
            Err(e) => return self.workflow.show_error(&e, now),
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            let result = gateway.delete_article(&id).await;
            if let Err(ref e) = result {
                error!("delete failed: {e}");
            }
            let _ = tx.send(Action::ArticleDeleted { token, result });
        });
    }

    fn spawn_load_profile(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        // The probe is silent on failure, so a Busy rejection here is
        // logged rather than shown.
        let token = match self.workflow.begin_load_profile() {
            Ok(token) => token,
            Err(e) => {
                warn!("profile probe skipped: {e}");
                return;
            }
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = gateway.style_profile().await;
            let _ = tx.send(Action::ProfileLoaded { token, result });
        });
    }

    fn spawn_analyze(&mut self, now: Instant, tx: &mpsc::UnboundedSender<Action>) {
        let token = match self.workflow.begin_analyze() {
            Ok(token) => token,
            Err(e) => return self.workflow.show_error(&e, now),
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = gateway.analyze_style().await;
            match &result {
                Ok(profile) => info!(
                    articles = profile.total_articles,
                    words = profile.total_words,
                    "style analysis complete"
                ),
                Err(e) => error!("style analysis failed: {e}"),
            }
            let _ = tx.send(Action::StyleAnalyzed { token, result });
        });
    }

    fn spawn_generate(&mut self, now: Instant, tx: &mpsc::UnboundedSender<Action>) {
        let topic = self.generate_panel.topic_input.clone();
        let length = self.generate_panel.length;
        let token = match self.workflow.begin_generate(&topic, length) {
            Ok(token) => token,
            Err(e) => return self.workflow.show_error(&e, now),
        };
        let gateway = self.gateway.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = gateway.generate_article(topic.trim(), length).await;
            if let Err(ref e) = result {
                error!("generation failed: {e}");
            }
            let _ = tx.send(Action::ArticleGenerated { token, result });
        });
    }

    /// Render the full UI.
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Tab bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.render_tabs(frame, chunks[0]);

        match self.workflow.active_tab() {
            Tab::Train => {
                let halves =
                    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(chunks[1]);
                self.article_form.render(frame, halves[0]);

                let right = Layout::vertical([Constraint::Length(8), Constraint::Min(5)])
                    .split(halves[1]);
                self.style_panel.render(frame, right[0]);
                self.article_list.render(frame, right[1]);
            }
            Tab::Generate => self.generate_panel.render(frame, chunks[1]),
        }

        self.status_bar.render(frame, chunks[2]);

        // Overlays (rendered on top)
        self.confirm_dialog.render(frame, area);
        self.help.render(frame, area);
    }

    /// Render the tab bar.
    fn render_tabs(&self, frame: &mut ratatui::Frame, area: Rect) {
        let titles: Vec<Line> = Tab::all()
            .iter()
            .map(|tab| {
                let style = if *tab == self.workflow.active_tab() {
                    Theme::tab_active()
                } else {
                    Theme::tab_inactive()
                };
                Line::from(Span::styled(tab.label(), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .select(self.workflow.active_tab().index())
            .divider(Span::styled(" | ", Theme::dim()))
            .highlight_style(Theme::tab_active());

        frame.render_widget(tabs, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use plume_core::article::Article;
    use plume_core::error::{PlumeError, Result};
    use plume_core::profile::StyleProfile;
    use plume_core::session::GenLength;

    struct NullGateway;

    #[async_trait]
    impl ServiceGateway for NullGateway {
        async fn list_articles(&self) -> Result<Vec<Article>> {
            Ok(Vec::new())
        }
        async fn add_article(&self, _title: &str, _content: &str) -> Result<Article> {
            Err(PlumeError::Transport("unavailable".into()))
        }
        async fn delete_article(&self, _id: &str) -> Result<()> {
            Err(PlumeError::Transport("unavailable".into()))
        }
        async fn upload_article(&self, _file_name: &str, _bytes: Vec<u8>) -> Result<Article> {
            Err(PlumeError::Transport("unavailable".into()))
        }
        async fn style_profile(&self) -> Result<Option<StyleProfile>> {
            Ok(None)
        }
        async fn analyze_style(&self) -> Result<StyleProfile> {
            Err(PlumeError::Transport("unavailable".into()))
        }
        async fn generate_article(&self, _topic: &str, _length: GenLength) -> Result<String> {
            Err(PlumeError::Transport("unavailable".into()))
        }
    }

    fn article(id: &str, title: &str) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
            content: "body".into(),
            date: Utc::now(),
        }
    }

    fn app_with_two_articles() -> App {
        let mut app = App::new(Arc::new(NullGateway), PlumeConfig::default());
        let token = app.workflow.begin_refresh().unwrap();
        app.workflow.complete_refresh(
            token,
            Ok(vec![article("1", "A"), article("2", "B")]),
            Instant::now(),
        );
        app.sync_views();
        app
    }

    #[test]
    fn focused_form_keeps_arrow_keys_from_the_list() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app_with_two_articles();

        // Arrow keys while the form is focused scroll the form; the
        // list selection must not move underneath it.
        app.article_form.focus_entry();
        app.handle_action(&Action::SelectNext, &tx);
        assert_eq!(app.article_list.selected, 0);

        // After leaving the form the same key drives the selection.
        app.handle_action(&Action::Cancel, &tx);
        app.handle_action(&Action::SelectNext, &tx);
        assert_eq!(app.article_list.selected, 1);
    }
}
