mod components;

use std::time::Duration;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Destination, Popup};
use crate::page::VocabularyPage;
use crate::theme::Theme;
use crate::vocabulary::VocabularyEntry;

pub use components::{Footer, NavigationBar};

/// Rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 9;

pub const TITLE: &str = "Học Từ Vựng Tiếng Nhật 📚";
pub const SUBTITLE: &str = "Nhấn vào nút loa để nghe phát âm nhé! 🔊";
pub const ENCOURAGEMENT: &str = "Tuyệt vời! Tiếp tục học thêm nhé! 💪✨";

const PRONOUNCE: &str = "Phát âm";

/// Floating decorations and their animation delay
const DECORATIONS: [(&str, Duration); 3] = [
    ("🌸", Duration::from_millis(0)),
    ("⭐", Duration::from_millis(300)),
    ("🎀", Duration::from_millis(600)),
];
const FLOAT_PERIOD: Duration = Duration::from_millis(3000);
const SHAKE_DURATION: Duration = Duration::from_millis(300);
const WIGGLE_PERIOD: Duration = Duration::from_millis(500);

/// Cards per row for a terminal width (one, two, or three columns)
pub fn grid_columns(width: u16) -> usize {
    if width >= 120 {
        3
    } else if width >= 80 {
        2
    } else {
        1
    }
}

/// Visual state of a single card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub selected: bool,
    pub announcing: bool,
    /// Horizontal nudge of the pronounce button (-1, 0, 1)
    pub shake: i8,
    /// Paw tilt for the selected card
    pub wiggle: bool,
}

/// Trailing emoji and icon of the pronounce button
pub fn pronounce_icons(announcing: bool) -> (&'static str, &'static str) {
    if announcing {
        ("🔊", "😸")
    } else {
        ("🔈", "🔊")
    }
}

/// Button shake offset at `since` into an announcement
pub fn shake_offset(since: Duration) -> i8 {
    if since >= SHAKE_DURATION {
        return 0;
    }
    // 0% -> 0, 25% -> left, 50% -> 0, 75% -> right
    let quarter = SHAKE_DURATION.as_millis() / 4;
    match (since.as_millis() / quarter.max(1)) % 4 {
        1 => -1,
        3 => 1,
        _ => 0,
    }
}

/// Whether a floating decoration is in the raised half of its cycle
pub fn float_is_up(elapsed: Duration, delay: Duration) -> bool {
    let Some(t) = elapsed.checked_sub(delay) else {
        return false;
    };
    let phase = t.as_millis() % FLOAT_PERIOD.as_millis();
    phase >= FLOAT_PERIOD.as_millis() / 4 && phase < FLOAT_PERIOD.as_millis() * 3 / 4
}

/// Text lines inside one card
pub fn card_lines<'a>(entry: &'a VocabularyEntry, state: CardState, theme: &Theme) -> Vec<Line<'a>> {
    let badge = Span::styled(
        format!(" {} ", entry.category),
        Style::default().fg(theme.on_accent).bg(theme.accent_soft),
    );
    let paw = if state.wiggle { " 🐾" } else { "🐾 " };

    let (icon, trailing) = pronounce_icons(state.announcing);
    let label = format!(" {} {} {} ", icon, PRONOUNCE, trailing);
    let label = match state.shake {
        -1 => format!("{}  ", label),
        1 => format!("  {}", label),
        _ => format!(" {} ", label),
    };
    let button_style = if state.announcing {
        Style::default()
            .fg(theme.on_accent)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).add_modifier(Modifier::DIM)
    };

    vec![
        Line::from(vec![badge, Span::raw("  "), Span::raw(paw)]),
        Line::from(Span::styled(
            entry.source_script.as_str(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            entry.transliteration.as_str(),
            Style::default().fg(theme.text_dim),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} ", entry.translation),
            Style::default().fg(theme.on_accent).bg(theme.cream),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(label, button_style)).alignment(Alignment::Center),
    ]
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // Navigation
            Constraint::Length(3),  // Title + subtitle
            Constraint::Min(CARD_HEIGHT),  // Cards
            Constraint::Length(3),  // Decorations
            Constraint::Length(1),  // Info line
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    NavigationBar::new(app.current, &app.theme).render(f, chunks[0]);

    match (&app.page, app.current) {
        (Some(page), Destination::Vocabulary) if page.is_mounted() => {
            draw_header(f, &app.theme, chunks[1]);
            draw_cards(f, app, page, chunks[2]);
            draw_decorations(f, app, chunks[3]);
        }
        (_, destination) => draw_placeholder(f, &app.theme, destination, chunks[2]),
    }

    draw_info_line(f, app, chunks[4]);
    Footer::render(f, chunks[5], &app.theme);

    if app.popup == Popup::Help {
        draw_help_popup(f, &app.theme);
    }
}

fn draw_header(f: &mut Frame, theme: &Theme, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(TITLE, Style::default().fg(theme.text).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(theme.text_dim))),
    ])
    .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn draw_cards(f: &mut Frame, app: &App, page: &VocabularyPage, area: Rect) {
    let columns = grid_columns(area.width);
    let entries = page.entries();
    if entries.is_empty() {
        return;
    }

    let total_rows = entries.len().div_ceil(columns);
    let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
    let selected_row = page.selected() / columns;
    let first_row = if selected_row >= visible_rows {
        selected_row + 1 - visible_rows
    } else {
        0
    };
    let last_row = (first_row + visible_rows).min(total_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); last_row - first_row])
        .split(area);

    let shake = page
        .announcement()
        .map(|a| {
            let started = a.deadline.checked_sub(page.window()).unwrap_or(a.deadline);
            shake_offset(app.now.saturating_duration_since(started))
        })
        .unwrap_or(0);
    let wiggle = (app.elapsed().as_millis() / WIGGLE_PERIOD.as_millis()) % 2 == 1;

    for (slot, row) in (first_row..last_row).enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_areas[slot]);

        for (col, cell) in cells.iter().enumerate() {
            let index = row * columns + col;
            let Some(entry) = entries.get(index) else {
                break;
            };
            let announcing = page.is_announcing(index);
            let state = CardState {
                selected: index == page.selected(),
                announcing,
                shake: if announcing { shake } else { 0 },
                wiggle: index == page.selected() && wiggle,
            };
            draw_card(f, &app.theme, index, entry, state, *cell);
        }
    }
}

fn draw_card(f: &mut Frame, theme: &Theme, index: usize, entry: &VocabularyEntry, state: CardState, area: Rect) {
    let border_color = if state.announcing {
        theme.accent
    } else if state.selected {
        theme.accent_soft
    } else {
        theme.inactive
    };

    let number = if index < 9 {
        format!(" {} ", index + 1)
    } else {
        String::new()
    };

    let block = Block::default()
        .title(Span::styled(number, Style::default().fg(theme.text_dim)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    let card = Paragraph::new(card_lines(entry, state, theme)).block(block);
    f.render_widget(card, area);
}

fn draw_decorations(f: &mut Frame, app: &App, area: Rect) {
    let elapsed = app.elapsed();
    let mut raised = Vec::new();
    let mut lowered = Vec::new();

    for (emoji, delay) in DECORATIONS {
        let (up, down) = if float_is_up(elapsed, delay) {
            (emoji, "  ")
        } else {
            ("  ", emoji)
        };
        raised.push(Span::raw(format!(" {} ", up)));
        lowered.push(Span::raw(format!(" {} ", down)));
    }

    let decorations = Paragraph::new(vec![
        Line::from(raised),
        Line::from(lowered),
        Line::from(Span::styled(ENCOURAGEMENT, Style::default().fg(app.theme.mint))),
    ])
    .alignment(Alignment::Center);

    f.render_widget(decorations, area);
}

fn draw_placeholder(f: &mut Frame, theme: &Theme, destination: Destination, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} {}", destination.icon(), destination.title()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("🚧 Coming soon", Style::default().fg(theme.text_dim))),
        Line::from(vec![
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" back to vocabulary", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let placeholder = Paragraph::new(text).alignment(Alignment::Center);
    f.render_widget(placeholder, area);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status.as_str(), Style::default().fg(app.theme.accent)))
    } else {
        let key = |k: &'static str| Span::styled(k, Style::default().fg(app.theme.accent));
        let hint = |h: &'static str| Span::styled(h, Style::default().fg(app.theme.text_dim));
        Line::from(vec![
            key("←↑↓→"), hint(" select  "),
            key("Space"), hint(" pronounce  "),
            key("Tab"), hint(" pages  "),
            key("?"), hint(" help  "),
            key("q"), hint(" quit"),
        ])
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(60, 60, f.area());

    f.render_widget(Clear, popup_area);

    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().fg(theme.accent_soft).add_modifier(Modifier::BOLD)))
    };
    let binding = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), Style::default().fg(theme.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        heading("═══ Cards ═══"),
        binding("←/→ h/l", "Previous / next card"),
        binding("↑/↓ k/j", "Card above / below"),
        binding("Space/Enter", "Pronounce selected card"),
        binding("1-9", "Pronounce card by number"),
        Line::from(""),
        heading("═══ Pages ═══"),
        binding("Tab", "Next page"),
        binding("Shift+Tab", "Previous page"),
        binding("Esc", "Back to vocabulary"),
        Line::from(""),
        binding("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("?", Style::default().fg(theme.accent)),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Tango Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
