//! Train tab: style-profile summary and analyze trigger.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use plume_core::profile::StyleProfile;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct StylePanelComponent {
    /// Display copy of the held profile, synced after loads/analyses.
    pub profile: Option<StyleProfile>,
    /// Whether the corpus has any articles (drives the hint text).
    pub corpus_empty: bool,
}

impl StylePanelComponent {
    pub fn new() -> Self {
        Self {
            profile: None,
            corpus_empty: true,
        }
    }
}

impl Component for StylePanelComponent {
    fn handle_action(&mut self, _action: &Action) -> Option<Action> {
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Style profile ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = Vec::new();
        match &self.profile {
            Some(profile) => {
                lines.push(stat_line(
                    "Articles analyzed",
                    profile.total_articles.to_string(),
                ));
                lines.push(stat_line("Total words", profile.total_words.to_string()));
                lines.push(stat_line(
                    "Avg sentence length",
                    format!("{:.1} words", profile.avg_sentence_length),
                ));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!(
                        "Last analyzed {}",
                        profile.analyzed_at.format("%Y-%m-%d %H:%M")
                    ),
                    Theme::dim(),
                )));
            }
            None => {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "No profile yet. Analyze your articles to get started.",
                    Theme::dim(),
                )));
            }
        }

        lines.push(Line::from(""));
        let hint = if self.corpus_empty {
            Span::styled("Add an article before analyzing.", Theme::dim())
        } else {
            Span::styled("Press a to analyze your style.", Theme::key_hint())
        };
        lines.push(Line::from(hint));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Theme::muted()),
        Span::styled(value, Theme::header()),
    ])
}
