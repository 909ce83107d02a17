use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::page::VocabularyPage;
use crate::theme::Theme;
use crate::vocabulary::Deck;

/// How long a status message stays in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Views the navigation bar can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Vocabulary,
    Games,
    About,
}

impl Destination {
    pub const ALL: [Destination; 4] = [
        Destination::Home,
        Destination::Vocabulary,
        Destination::Games,
        Destination::About,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Destination::Home => "home",
            Destination::Vocabulary => "vocabulary",
            Destination::Games => "games",
            Destination::About => "about",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.id() == id)
    }

    pub fn title(self) -> &'static str {
        match self {
            Destination::Home => "Trang chủ",
            Destination::Vocabulary => "Từ vựng",
            Destination::Games => "Trò chơi",
            Destination::About => "Giới thiệu",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Destination::Home => "🏠",
            Destination::Vocabulary => "📚",
            Destination::Games => "🎮",
            Destination::About => "💌",
        }
    }

    fn offset(self, step: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let pos = Self::ALL.iter().position(|d| *d == self).unwrap_or(0) as isize;
        Self::ALL[(pos + step).rem_euclid(len) as usize]
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

/// Host shell around the vocabulary page
pub struct App {
    pub current: Destination,
    pub popup: Popup,

    // Mounted only while the vocabulary destination is shown
    pub page: Option<VocabularyPage>,
    deck: Deck,
    window: Duration,

    // Navigation requests from the page callback
    nav_tx: UnboundedSender<String>,
    nav_rx: UnboundedReceiver<String>,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub theme: Theme,

    // Frame clock for animations
    pub started: Instant,
    pub now: Instant,

    // Cards per grid row at the last known terminal width
    pub columns: usize,
}

impl App {
    pub fn new(deck: Deck, window: Duration, theme: Theme) -> Self {
        let (nav_tx, nav_rx) = mpsc::unbounded_channel();
        let now = Instant::now();

        let mut app = Self {
            current: Destination::Vocabulary,
            popup: Popup::None,
            page: None,
            deck,
            window,
            nav_tx,
            nav_rx,
            status_message: None,
            status_message_time: None,
            theme,
            started: now,
            now,
            columns: 1,
        };
        app.mount_page();
        app
    }

    fn mount_page(&mut self) {
        let tx = self.nav_tx.clone();
        let on_navigate = Box::new(move |destination: &str| {
            if tx.send(destination.to_string()).is_err() {
                tracing::warn!("Navigation channel closed, dropping {}", destination);
            }
        });
        self.page = Some(VocabularyPage::with_deck(self.deck.clone(), self.window, on_navigate));
        tracing::debug!("Mounted vocabulary page ({} entries)", self.deck.len());
    }

    fn unmount_page(&mut self) {
        if let Some(mut page) = self.page.take() {
            page.unmount();
            tracing::debug!("Unmounted vocabulary page");
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(self.now);
    }

    /// Ask the host to show `destination`.
    /// While the page is mounted the request goes through its callback.
    pub fn request_navigation(&mut self, destination: &str) {
        match self.page.as_mut() {
            Some(page) => page.navigate(destination),
            None => {
                if self.nav_tx.send(destination.to_string()).is_err() {
                    tracing::warn!("Navigation channel closed, dropping {}", destination);
                }
            }
        }
    }

    fn apply_navigation(&mut self, id: &str) {
        let Some(destination) = Destination::from_id(id) else {
            tracing::warn!("Unknown destination: {}", id);
            self.set_status(format!("Unknown page: {}", id));
            return;
        };

        if destination == self.current {
            return;
        }

        tracing::info!("Navigating {} -> {}", self.current.id(), destination.id());

        if self.current == Destination::Vocabulary {
            self.unmount_page();
        }
        self.current = destination;
        if destination == Destination::Vocabulary {
            self.mount_page();
        }
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.columns = crate::ui::grid_columns(width);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')) {
                self.popup = Popup::None;
            }
            return;
        }

        match key.code {
            KeyCode::Tab => {
                let next = self.current.next();
                self.request_navigation(next.id());
            }
            KeyCode::BackTab => {
                let prev = self.current.prev();
                self.request_navigation(prev.id());
            }
            KeyCode::Char('?') => self.popup = Popup::Help,
            KeyCode::Esc if self.current != Destination::Vocabulary => {
                self.request_navigation(Destination::Vocabulary.id());
            }
            _ => self.handle_page_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        let now = self.now;
        let columns = self.columns;
        let Some(page) = self.page.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Right | KeyCode::Char('l') => page.select_next(),
            KeyCode::Left | KeyCode::Char('h') => page.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => page.select_row_down(columns),
            KeyCode::Up | KeyCode::Char('k') => page.select_row_up(columns),
            KeyCode::Home => page.select(0),
            KeyCode::End => page.select(page.entries().len().saturating_sub(1)),
            KeyCode::Char(' ') | KeyCode::Enter => page.trigger_selected(now),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                page.trigger(index, now);
            }
            _ => {}
        }
    }

    /// Advance the clock: expire announcements, apply navigation, clear stale status
    pub fn tick(&mut self, now: Instant) {
        self.now = now;

        if let Some(page) = self.page.as_mut() {
            page.tick(now);
        }

        while let Ok(destination) = self.nav_rx.try_recv() {
            self.apply_navigation(&destination);
        }

        if let Some(set_at) = self.status_message_time {
            if now.duration_since(set_at) >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.now.duration_since(self.started)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.unmount_page();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        App::new(Deck::default(), Duration::from_millis(500), Theme::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_destination_ids_round_trip() {
        for d in Destination::ALL {
            assert_eq!(Destination::from_id(d.id()), Some(d));
        }
        assert_eq!(Destination::from_id("settings"), None);
        assert_eq!(Destination::About.next(), Destination::Home);
        assert_eq!(Destination::Home.prev(), Destination::About);
    }

    #[test]
    fn test_space_announces_selected_card() {
        let mut app = app();
        let t0 = app.now;
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.page.as_ref().unwrap().announcing(), Some(1));

        app.tick(t0 + Duration::from_millis(500));
        assert_eq!(app.page.as_ref().unwrap().announcing(), None);
    }

    #[test]
    fn test_digit_shortcut() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.page.as_ref().unwrap().announcing(), Some(2));
    }

    #[test]
    fn test_navigation_unmounts_and_remounts_page() {
        let mut app = app();
        let t0 = app.now;
        press(&mut app, KeyCode::Char('1'));

        // Request is routed through the page callback, applied on tick
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current, Destination::Vocabulary);
        app.tick(t0 + Duration::from_millis(10));
        assert_eq!(app.current, Destination::Games);
        assert!(app.page.is_none());

        // Page keys do nothing while away
        press(&mut app, KeyCode::Char('2'));
        app.tick(t0 + Duration::from_millis(600));

        press(&mut app, KeyCode::Esc);
        app.tick(t0 + Duration::from_millis(700));
        assert_eq!(app.current, Destination::Vocabulary);
        let page = app.page.as_ref().unwrap();
        assert!(page.is_mounted());
        assert_eq!(page.announcing(), None);
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn test_unknown_destination_sets_status() {
        let mut app = app();
        let t0 = app.now;
        app.request_navigation("settings");
        app.tick(t0);
        assert_eq!(app.current, Destination::Vocabulary);
        assert!(app.status_message.as_deref().unwrap().contains("settings"));

        app.tick(t0 + STATUS_TIMEOUT);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_help_popup_swallows_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.popup, Popup::Help);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.page.as_ref().unwrap().announcing(), None);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
    }

    #[test]
    fn test_row_navigation_uses_columns() {
        let mut app = app();
        app.set_viewport_width(200);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.page.as_ref().unwrap().selected(), 3);

        app.set_viewport_width(40);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.page.as_ref().unwrap().selected(), 4);
    }
}
