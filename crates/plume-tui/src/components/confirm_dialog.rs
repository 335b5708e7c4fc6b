//! Confirmation overlay for destructive actions (article deletion).

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct ConfirmDialogComponent {
    /// Whether the dialog is visible.
    pub visible: bool,
    /// Id of the article pending deletion.
    article_id: String,
    /// Title shown in the prompt.
    article_title: String,
}

impl ConfirmDialogComponent {
    pub fn new() -> Self {
        Self {
            visible: false,
            article_id: String::new(),
            article_title: String::new(),
        }
    }

    pub fn open(&mut self, id: &str, title: &str) {
        self.visible = true;
        self.article_id = id.to_string();
        self.article_title = title.to_string();
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Id of the article the user is being asked about.
    pub fn article_id(&self) -> &str {
        &self.article_id
    }

    /// Center a rectangle inside another.
    fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let vertical = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(area);

        let horizontal = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .flex(Flex::Center)
        .split(vertical[1]);

        horizontal[1]
    }
}

impl Component for ConfirmDialogComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if !self.visible {
            return None;
        }
        if matches!(action, Action::Cancel) {
            self.visible = false;
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog_area = Self::centered_rect(area, 50, 7);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(" Delete article ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::vertical([
            Constraint::Min(2),    // Prompt
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Keys
        ])
        .split(inner);

        let prompt = Paragraph::new(Line::from(vec![
            Span::styled("Delete \"", Theme::normal()),
            Span::styled(self.article_title.clone(), Theme::selected()),
            Span::styled("\" from your corpus?", Theme::normal()),
        ]))
        .wrap(Wrap { trim: true });
        frame.render_widget(prompt, chunks[0]);

        let keys = Paragraph::new(Line::from(vec![
            Span::styled("[Enter/y]", Theme::selected()),
            Span::styled(" delete  ", Theme::dim()),
            Span::styled("[Esc/n]", Theme::selected()),
            Span::styled(" keep", Theme::dim()),
        ]));
        frame.render_widget(keys, chunks[2]);
    }
}
