//! Train tab: the corpus listing with per-item delete.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use plume_core::article::Article;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct ArticleListComponent {
    /// Display copy of the corpus cache, synced after every refresh.
    pub articles: Vec<Article>,
    /// Currently selected article index.
    pub selected: usize,
}

impl ArticleListComponent {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            selected: 0,
        }
    }

    /// Replace the display copy and keep the selection in range.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        if self.selected >= self.articles.len() {
            self.selected = self.articles.len().saturating_sub(1);
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected)
    }
}

impl Component for ArticleListComponent {
    fn handle_action(&mut self, action: &Action) -> Option<Action> {
        match action {
            Action::SelectPrev => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
                None
            }
            Action::SelectNext => {
                if self.selected + 1 < self.articles.len() {
                    self.selected += 1;
                }
                None
            }
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" My articles ({}) ", self.articles.len()))
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.articles.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No articles yet. Add one to get started.",
                    Theme::dim(),
                )),
            ]);
            frame.render_widget(empty, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let style = if i == self.selected {
                    Theme::selection()
                } else {
                    Theme::normal()
                };
                ListItem::new(vec![
                    Line::from(Span::styled(article.title.clone(), Theme::header())),
                    Line::from(Span::styled(article.preview(), Theme::muted())),
                    Line::from(Span::styled(
                        article.date.format("%Y-%m-%d").to_string(),
                        Theme::dim(),
                    )),
                ])
                .style(style)
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }
}
