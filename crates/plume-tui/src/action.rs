//! Action enum — the central message bus for the TUI.
//! All user interactions and async results flow through here.

use plume_core::article::Article;
use plume_core::error::Result;
use plume_core::profile::StyleProfile;
use plume_core::workflow::{RequestToken, Tab};

/// Every possible action that can occur in the application.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Navigation ──────────────────────────────────────────
    /// Switch to a specific tab.
    SelectTab(Tab),
    /// Move to the next tab.
    NextTab,
    /// Move to the previous tab.
    PrevTab,

    // ── Global ──────────────────────────────────────────────
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// A tick event for notice expiry and redraws.
    Tick,
    /// Generic confirm (Enter / y) — interpreted contextually.
    Confirm,
    /// Close the open overlay, or leave the focused input.
    Cancel,

    // ── Text input (sent only in editing mode) ──────────────
    CharInput(char),
    BackspaceInput,
    /// Delete word (Ctrl+W).
    DeleteWord,
    /// Enter in a text field (newline or field-specific submit).
    NewlineInput,
    /// Switch focus between input fields (Tab in editing mode).
    SwitchInputField,
    /// Submit the focused form (Ctrl+S / Ctrl+Enter).
    SubmitForm,
    /// Bulk paste from bracketed paste mode.
    PasteBulk(String),

    // ── Selection ───────────────────────────────────────────
    SelectNext,
    SelectPrev,

    // ── Focus ───────────────────────────────────────────────
    /// Focus the tab's primary input (add form / topic field).
    FocusInput,
    /// Focus the upload-path field (train tab).
    FocusUpload,

    // ── Corpus ──────────────────────────────────────────────
    /// Resync the article cache from the server.
    RefreshCorpus,
    CorpusRefreshed {
        token: RequestToken,
        result: Result<Vec<Article>>,
    },
    /// User submitted the add-article form.
    SubmitArticle {
        title: String,
        content: String,
    },
    ArticleAdded {
        token: RequestToken,
        result: Result<Article>,
    },
    /// User submitted a file path for upload.
    UploadFile {
        path: String,
    },
    FileUploaded {
        token: RequestToken,
        result: Result<Article>,
    },
    /// Ask to delete the selected article (opens confirmation).
    RequestDelete,
    ArticleDeleted {
        token: RequestToken,
        result: Result<()>,
    },

    // ── Style profile ───────────────────────────────────────
    /// Fetch the server-side profile (startup probe).
    LoadProfile,
    ProfileLoaded {
        token: RequestToken,
        result: Result<Option<StyleProfile>>,
    },
    /// Run a style analysis over the corpus.
    AnalyzeStyle,
    StyleAnalyzed {
        token: RequestToken,
        result: Result<StyleProfile>,
    },

    // ── Generation ──────────────────────────────────────────
    /// Cycle the length selector.
    CycleLength,
    /// Submit the generate form with its current topic and length.
    SubmitGenerate,
    ArticleGenerated {
        token: RequestToken,
        result: Result<String>,
    },
    /// Flip the generated article's edit mode.
    ToggleEditArticle,
    /// The edit buffer changed; push it into the session.
    SetGeneratedText(String),
    /// Copy the generated text to the clipboard (best-effort).
    CopyArticle,
    /// Save the generated text to the download directory.
    DownloadArticle,
}

/// Whether the app is in a text-input mode where raw keys should
/// be forwarded to the focused component instead of interpreted as
/// global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal mode — keys are global shortcuts.
    Normal,
    /// Text input mode — keys go to the focused text field.
    Editing,
}
