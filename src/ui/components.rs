//! Navigation bar and footer
//!
//! Both are render-only. The navigation bar shows where the user is; the
//! host decides what a destination means.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::Destination;
use crate::theme::Theme;

pub struct NavigationBar<'a> {
    current: Destination,
    theme: &'a Theme,
}

impl<'a> NavigationBar<'a> {
    pub fn new(current: Destination, theme: &'a Theme) -> Self {
        Self { current, theme }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Destination::ALL
            .iter()
            .map(|d| Line::from(format!(" {} {} ", d.icon(), d.title())))
            .collect();

        let selected = Destination::ALL
            .iter()
            .position(|d| *d == self.current)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(self.theme.text_dim))
            .highlight_style(
                Style::default()
                    .fg(self.theme.on_accent)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .divider(Span::styled("│", Style::default().fg(self.theme.inactive)))
            .block(
                Block::default()
                    .title(Span::styled(
                        " 🐱 Tango ",
                        Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(self.theme.inactive)),
            );

        f.render_widget(tabs, area);
    }
}

pub struct Footer;

impl Footer {
    pub const TEXT: &'static str = "© Tango · Học tiếng Nhật mỗi ngày 🌸";

    pub fn render(f: &mut Frame, area: Rect, theme: &Theme) {
        let footer = Paragraph::new(Line::from(Span::styled(
            Self::TEXT,
            Style::default().fg(theme.text_dim),
        )))
        .alignment(Alignment::Center);

        f.render_widget(footer, area);
    }
}
