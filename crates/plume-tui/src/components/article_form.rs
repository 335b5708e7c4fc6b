//! Train tab: add-article form and file-upload field.
//!
//! Features:
//! - Title field: single-line; Enter moves on to the content
//! - Content field: multi-line text area with a scroll viewport
//! - Upload field: single-line path to a .txt/.md file; Enter submits
//! - Tab switches fields, Ctrl+S submits the form

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Which input field is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputField {
    Title,
    Content,
    UploadPath,
}

pub struct ArticleFormComponent {
    /// Current title input.
    pub title_input: String,
    /// Current content input (may contain newlines).
    pub content_input: String,
    /// Current upload path input.
    pub upload_input: String,
    /// Which field is focused, if any.
    focused: Option<InputField>,
    /// Cursor position (byte offset) within the focused field.
    cursor: usize,
    /// Scroll offset of the content viewport.
    content_scroll: usize,
}

impl ArticleFormComponent {
    pub fn new() -> Self {
        Self {
            title_input: String::new(),
            content_input: String::new(),
            upload_input: String::new(),
            focused: None,
            cursor: 0,
            content_scroll: 0,
        }
    }

    /// Whether this component wants to capture raw key input.
    pub fn wants_input(&self) -> bool {
        self.focused.is_some()
    }

    /// Focus the title field (entry point for 'i').
    pub fn focus_entry(&mut self) {
        self.focused = Some(InputField::Title);
        self.cursor = self.title_input.len();
    }

    /// Focus the upload path field (entry point for 'u').
    pub fn focus_upload(&mut self) {
        self.focused = Some(InputField::UploadPath);
        self.cursor = self.upload_input.len();
    }

    pub fn unfocus(&mut self) {
        self.focused = None;
    }

    /// Clear title and content after a successful add.
    pub fn clear_entry(&mut self) {
        self.title_input.clear();
        self.content_input.clear();
        self.content_scroll = 0;
        if matches!(self.focused, Some(InputField::Title | InputField::Content)) {
            self.focused = Some(InputField::Title);
            self.cursor = 0;
        }
    }

    /// Clear the upload path after a successful upload.
    pub fn clear_upload(&mut self) {
        self.upload_input.clear();
        if self.focused == Some(InputField::UploadPath) {
            self.cursor = 0;
        }
    }

    fn focused_input(&self) -> &str {
        match self.focused {
            Some(InputField::Title) => &self.title_input,
            Some(InputField::Content) => &self.content_input,
            Some(InputField::UploadPath) => &self.upload_input,
            None => "",
        }
    }

    fn focused_input_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            Some(InputField::Title) => Some(&mut self.title_input),
            Some(InputField::Content) => Some(&mut self.content_input),
            Some(InputField::UploadPath) => Some(&mut self.upload_input),
            None => None,
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.focused_input().len();
        if self.cursor > len {
            self.cursor = len;
        }
    }

    fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(input) = self.focused_input_mut() {
            input.insert(cursor, c);
            self.cursor += c.len_utf8();
        }
    }

    /// Insert a string at the cursor position (for paste).
    fn insert_str(&mut self, text: &str) {
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(input) = self.focused_input_mut() {
            input.insert_str(cursor, text);
            self.cursor += text.len();
        }
    }

    fn delete_char(&mut self) {
        self.clamp_cursor();
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(input) = self.focused_input_mut() {
            let prev = input[..cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev);
            self.cursor = prev;
        }
    }

    fn delete_word(&mut self) {
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(input) = self.focused_input_mut() {
            let before = &input[..cursor];
            let trimmed = before.trim_end();
            let start = trimmed.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
            input.replace_range(start..cursor, "");
            self.cursor = start;
        }
    }

    fn switch_field(&mut self) {
        self.focused = match self.focused {
            Some(InputField::Title) => Some(InputField::Content),
            Some(InputField::Content) => Some(InputField::UploadPath),
            Some(InputField::UploadPath) => Some(InputField::Title),
            None => Some(InputField::Title),
        };
        self.cursor = self.focused_input().len();
    }

    fn submit(&self) -> Option<Action> {
        match self.focused {
            Some(InputField::UploadPath) => Some(Action::UploadFile {
                path: self.upload_input.clone(),
            }),
            Some(_) => Some(Action::SubmitArticle {
                title: self.title_input.clone(),
                content: self.content_input.clone(),
            }),
            None => None,
        }
    }

    fn field_block(&self, title: &'static str, field: InputField) -> Block<'static> {
        let style = if self.focused == Some(field) {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(style)
    }
}

impl Component for ArticleFormComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CharInput(c) => {
                self.insert_char(*c);
                None
            }
            Action::BackspaceInput => {
                self.delete_char();
                None
            }
            Action::DeleteWord => {
                self.delete_word();
                None
            }
            Action::PasteBulk(text) => {
                if self.focused.is_some() {
                    let to_paste = if self.focused == Some(InputField::Content) {
                        text.clone()
                    } else {
                        text.replace('\n', " ")
                    };
                    self.insert_str(&to_paste);
                }
                None
            }
            Action::SwitchInputField => {
                self.switch_field();
                None
            }
            Action::NewlineInput => match self.focused {
                // Enter in the title hops to the content field.
                Some(InputField::Title) => {
                    self.focused = Some(InputField::Content);
                    self.cursor = self.content_input.len();
                    None
                }
                Some(InputField::Content) => {
                    self.insert_char('\n');
                    None
                }
                // Enter in the upload path submits it.
                Some(InputField::UploadPath) => self.submit(),
                None => None,
            },
            Action::SubmitForm => self.submit(),
            Action::Cancel => {
                self.unfocus();
                None
            }
            Action::SelectPrev => {
                if self.focused == Some(InputField::Content) {
                    self.content_scroll = self.content_scroll.saturating_sub(1);
                }
                None
            }
            Action::SelectNext => {
                if self.focused == Some(InputField::Content) {
                    self.content_scroll = self.content_scroll.saturating_add(1);
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Add an article ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Content
            Constraint::Length(3), // Upload path
            Constraint::Length(1), // Hint
        ])
        .split(inner);

        let title = Paragraph::new(self.title_input.as_str())
            .style(Theme::normal())
            .block(self.field_block(" Title ", InputField::Title));
        frame.render_widget(title, chunks[0]);

        let visible_content: String = self
            .content_input
            .lines()
            .skip(self.content_scroll)
            .collect::<Vec<_>>()
            .join("\n");
        let content = Paragraph::new(visible_content)
            .style(Theme::normal())
            .wrap(Wrap { trim: false })
            .block(self.field_block(" Content ", InputField::Content));
        frame.render_widget(content, chunks[1]);

        let upload = Paragraph::new(self.upload_input.as_str())
            .style(Theme::normal())
            .block(self.field_block(" Upload a file (.txt, .md) ", InputField::UploadPath));
        frame.render_widget(upload, chunks[2]);

        let hint = if self.wants_input() {
            "Tab switch field · Ctrl+S submit · Esc leave"
        } else {
            "i edit form · u upload file"
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(hint, Theme::dim()))),
            chunks[3],
        );
    }
}
