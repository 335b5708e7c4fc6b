//! Status bar at the bottom of the TUI.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use plume_core::notify::{Notice, NoticeKind};
use plume_core::workflow::Tab;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Current notice, if one is showing.
    pub notice: Option<Notice>,
    /// Whether a server request is in flight.
    pub busy: bool,
    /// Current active tab.
    pub current_tab: Tab,
}

impl StatusBarComponent {
    pub fn new() -> Self {
        Self {
            notice: None,
            busy: false,
            current_tab: Tab::Train,
        }
    }

    /// Short tab name for the pill badge.
    fn tab_badge(&self) -> &'static str {
        match self.current_tab {
            Tab::Train => "Train",
            Tab::Generate => "Generate",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        if let Action::SelectTab(tab) = action {
            self.current_tab = *tab;
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;

        // Right side: compact key hints
        let hints = "q·?·1-2·Tab";
        let hints_len = hints.chars().count() + 1;

        let badge = self.tab_badge();
        let badge_len = badge.len() + 2;

        let (msg, msg_style) = match &self.notice {
            Some(notice) => (notice.text.clone(), Theme::notice(notice.kind)),
            None if self.busy => ("Working...".to_string(), Theme::busy()),
            None => (String::new(), Theme::dim()),
        };

        let msg_budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let msg: String = if msg.chars().count() > msg_budget {
            if msg_budget > 3 {
                let cut: String = msg.chars().take(msg_budget - 3).collect();
                format!("{cut}...")
            } else {
                String::new()
            }
        } else {
            msg
        };

        // Pad to push hints to the right edge
        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {} ", badge), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, msg_style),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
