//! Help overlay with the keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }

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

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::ToggleHelp => {
                self.visible = !self.visible;
                None
            }
            // Timer ticks and async completions are not keypresses and
            // must not dismiss the overlay.
            Action::Tick
            | Action::CorpusRefreshed { .. }
            | Action::ArticleAdded { .. }
            | Action::FileUploaded { .. }
            | Action::ArticleDeleted { .. }
            | Action::ProfileLoaded { .. }
            | Action::StyleAnalyzed { .. }
            | Action::ArticleGenerated { .. } => None,
            _ if self.visible => {
                // Any key closes help.
                self.visible = false;
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let dialog = Self::centered_rect(area, 55, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help — Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("?", "Toggle this help"),
            key_line("1-2", "Jump to tab"),
            key_line("Tab / Shift+Tab", "Next / previous tab"),
            key_line("Up / Down / j / k", "Select article / scroll"),
            key_line("Esc", "Close dialog / leave input"),
            Line::from(""),
            Line::from(Span::styled("── Train ──", Theme::header())),
            Line::from(""),
            key_line("i", "Write a new article"),
            key_line("u", "Upload a text file by path"),
            key_line("Ctrl+S", "Submit the form"),
            key_line("d", "Delete the selected article"),
            key_line("a", "Analyze writing style"),
            key_line("r", "Refresh the article list"),
            Line::from(""),
            Line::from(Span::styled("── Generate ──", Theme::header())),
            Line::from(""),
            key_line("i", "Enter a topic"),
            key_line("l", "Cycle article length"),
            key_line("g", "Generate an article"),
            key_line("e", "Edit the generated article"),
            key_line("c / s", "Copy / save the article"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}
