//! Generate tab: topic input, length selector, and the generated
//! article with its edit/export controls.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use plume_core::session::GenLength;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Which input surface currently captures keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    None,
    Topic,
    Article,
}

pub struct GeneratePanelComponent {
    /// Current topic input.
    pub topic_input: String,
    /// Selected length.
    pub length: GenLength,
    /// Whether a style profile exists (drives the warning banner).
    pub profile_present: bool,

    // ── Generated article view ───────────────────────────────
    /// Display/edit copy of the session text.
    pub article_text: String,
    pub article_editable: bool,
    pub has_article: bool,

    focus: Focus,
    /// Cursor position (byte offset) within the focused text.
    cursor: usize,
    /// Scroll offset of the article viewport.
    scroll: usize,
}

impl GeneratePanelComponent {
    pub fn new() -> Self {
        Self {
            topic_input: String::new(),
            length: GenLength::Medium,
            profile_present: false,
            article_text: String::new(),
            article_editable: false,
            has_article: false,
            focus: Focus::None,
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn wants_input(&self) -> bool {
        self.focus != Focus::None
    }

    pub fn focus_topic(&mut self) {
        self.focus = Focus::Topic;
        self.cursor = self.topic_input.len();
    }

    /// Sync the display copy from the generation session. Entering
    /// edit mode moves the key focus into the article text.
    pub fn set_session_view(&mut self, text: &str, editable: bool, has_article: bool) {
        if self.article_text != text {
            self.article_text = text.to_string();
            self.scroll = 0;
        }
        self.has_article = has_article;
        match (self.article_editable, editable) {
            (false, true) => {
                self.focus = Focus::Article;
                self.cursor = self.article_text.len();
            }
            (true, false) => {
                if self.focus == Focus::Article {
                    self.focus = Focus::None;
                }
            }
            _ => {}
        }
        self.article_editable = editable;
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Topic => Some(&mut self.topic_input),
            Focus::Article => Some(&mut self.article_text),
            Focus::None => None,
        }
    }

    fn focused_text(&self) -> &str {
        match self.focus {
            Focus::Topic => &self.topic_input,
            Focus::Article => &self.article_text,
            Focus::None => "",
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.focused_text().len();
        if self.cursor > len {
            self.cursor = len;
        }
    }

    /// After any edit of the article buffer, push it into the session.
    fn edited(&self) -> Option<Action> {
        if self.focus == Focus::Article {
            Some(Action::SetGeneratedText(self.article_text.clone()))
        } else {
            None
        }
    }

    fn insert_char(&mut self, c: char) -> Option<Action> {
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            text.insert(cursor, c);
            self.cursor += c.len_utf8();
        }
        self.edited()
    }

    fn insert_str(&mut self, s: &str) -> Option<Action> {
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            text.insert_str(cursor, s);
            self.cursor += s.len();
        }
        self.edited()
    }

    fn delete_char(&mut self) -> Option<Action> {
        self.clamp_cursor();
        if self.cursor == 0 {
            return None;
        }
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let prev = text[..cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            text.remove(prev);
            self.cursor = prev;
        }
        self.edited()
    }

    fn delete_word(&mut self) -> Option<Action> {
        self.clamp_cursor();
        let cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            let before = &text[..cursor];
            let trimmed = before.trim_end();
            let start = trimmed.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
            text.replace_range(start..cursor, "");
            self.cursor = start;
        }
        self.edited()
    }
}

impl Component for GeneratePanelComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::CharInput(c) => self.insert_char(*c),
            Action::BackspaceInput => self.delete_char(),
            Action::DeleteWord => self.delete_word(),
            Action::PasteBulk(text) => {
                if self.focus == Focus::Topic {
                    let flat = text.replace('\n', " ");
                    self.insert_str(&flat)
                } else if self.focus == Focus::Article {
                    self.insert_str(text)
                } else {
                    None
                }
            }
            Action::NewlineInput => match self.focus {
                // Enter in the topic field submits the form.
                Focus::Topic => Some(Action::SubmitGenerate),
                Focus::Article => self.insert_char('\n'),
                Focus::None => None,
            },
            Action::SubmitForm => {
                if self.focus == Focus::Topic {
                    Some(Action::SubmitGenerate)
                } else {
                    None
                }
            }
            Action::Cancel => match self.focus {
                Focus::Topic => {
                    self.focus = Focus::None;
                    None
                }
                // Esc while editing the article ends the edit.
                Focus::Article => Some(Action::ToggleEditArticle),
                Focus::None => None,
            },
            Action::CycleLength => {
                self.length = self.length.next();
                None
            }
            Action::SelectPrev => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::SelectNext => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Generate an article ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(3), // Topic
            Constraint::Length(2), // Length selector
            Constraint::Length(1), // Warning / trigger hint
            Constraint::Min(5),    // Generated article
            Constraint::Length(1), // Hints
        ])
        .split(inner);

        let topic_border = if self.focus == Focus::Topic {
            Theme::border_focused()
        } else {
            Theme::border()
        };
        let topic = Paragraph::new(self.topic_input.as_str())
            .style(Theme::normal())
            .block(
                Block::default()
                    .title(" Topic ")
                    .borders(Borders::ALL)
                    .border_style(topic_border),
            );
        frame.render_widget(topic, chunks[0]);

        // Length selector: all three values, selected one highlighted.
        let mut spans = vec![Span::styled("Length: ", Theme::muted())];
        for (i, length) in GenLength::all().iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Theme::dim()));
            }
            let style = if *length == self.length {
                Theme::selected()
            } else {
                Theme::dim()
            };
            spans.push(Span::styled(
                format!("{length} ({})", length.word_band()),
                style,
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

        let banner = if !self.profile_present {
            Span::styled(
                "Add articles and analyze your style in the Train tab first.",
                Theme::notice(plume_core::notify::NoticeKind::Error),
            )
        } else {
            Span::styled("Press g to generate.", Theme::key_hint())
        };
        frame.render_widget(Paragraph::new(Line::from(banner)), chunks[2]);

        // Generated article view.
        if self.has_article {
            let title = if self.article_editable {
                " Generated article (editing) "
            } else {
                " Generated article "
            };
            let border = if self.focus == Focus::Article {
                Theme::border_focused()
            } else {
                Theme::border()
            };
            let visible: String = self
                .article_text
                .lines()
                .skip(self.scroll)
                .collect::<Vec<_>>()
                .join("\n");
            let article = Paragraph::new(visible)
                .style(Theme::normal())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(border),
                );
            frame.render_widget(article, chunks[3]);
        }

        let hint = match self.focus {
            Focus::Article => "Esc finish editing · edits are saved as you type",
            Focus::Topic => "Enter generate · Esc leave",
            Focus::None if self.has_article => {
                "i topic · l length · g generate · e edit · c copy · s save"
            }
            Focus::None => "i topic · l length · g generate",
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(hint, Theme::dim()))),
            chunks[4],
        );
    }
}
