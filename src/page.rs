use std::time::{Duration, Instant};

use crate::vocabulary::{Deck, VocabularyEntry};

/// How long a card stays in its announcing state after a trigger
pub const ANNOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Callback used to hand navigation requests to the host shell
pub type NavigateFn = Box<dyn FnMut(&str) + Send>;

/// The card currently showing pronunciation feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    pub index: usize,
    pub deadline: Instant,
}

/// Flashcard page: renders a deck and owns the single announcing flag.
///
/// The only mutable state that matters is `announcing`. A trigger replaces
/// any pending deadline, so an older deadline can never clear a newer card.
pub struct VocabularyPage {
    deck: Deck,
    window: Duration,
    announcing: Option<Announcement>,
    selected: usize,
    mounted: bool,
    on_navigate: NavigateFn,
}

impl VocabularyPage {
    /// Page over the reference deck with the default window
    #[allow(dead_code)] // The shell always mounts with its configured deck
    pub fn new(on_navigate: NavigateFn) -> Self {
        Self::with_deck(Deck::default(), ANNOUNCE_WINDOW, on_navigate)
    }

    pub fn with_deck(deck: Deck, window: Duration, on_navigate: NavigateFn) -> Self {
        Self {
            deck,
            window,
            announcing: None,
            selected: 0,
            mounted: true,
            on_navigate,
        }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        self.deck.entries()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn announcing(&self) -> Option<usize> {
        self.announcing.map(|a| a.index)
    }

    pub fn announcement(&self) -> Option<Announcement> {
        self.announcing
    }

    pub fn is_announcing(&self, index: usize) -> bool {
        self.announcing() == Some(index)
    }

    /// Start pronunciation feedback for the entry at `index`.
    /// Out-of-range indices and unmounted pages are ignored.
    pub fn trigger(&mut self, index: usize, now: Instant) {
        if !self.mounted {
            tracing::debug!("Ignoring trigger({}) on unmounted page", index);
            return;
        }
        let Some(entry) = self.deck.get(index) else {
            tracing::debug!("Ignoring trigger({}), deck has {} entries", index, self.deck.len());
            return;
        };
        tracing::debug!("Announcing entry {} ({})", index, entry.transliteration);

        if let Some(prev) = self.announcing {
            if prev.index != index {
                tracing::debug!("Announcement {} superseded by {}", prev.index, index);
            }
        }

        self.announcing = Some(Announcement {
            index,
            deadline: now + self.window,
        });
        self.selected = index;
    }

    pub fn trigger_selected(&mut self, now: Instant) {
        self.trigger(self.selected, now);
    }

    /// Clear the announcing state once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        if let Some(announcement) = self.announcing {
            if now >= announcement.deadline {
                tracing::debug!("Announcement {} finished", announcement.index);
                self.announcing = None;
            }
        }
    }

    /// Forward a destination to the host unchanged
    pub fn navigate(&mut self, destination: &str) {
        (self.on_navigate)(destination);
    }

    /// Release the pending deadline; the page ignores everything afterwards
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        if let Some(announcement) = self.announcing.take() {
            tracing::debug!("Cancelled pending announcement {} on unmount", announcement.index);
        }
        self.mounted = false;
    }

    pub fn select(&mut self, index: usize) {
        if index < self.deck.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.deck.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move down one grid row of `columns` cards, stopping on the last row
    pub fn select_row_down(&mut self, columns: usize) {
        let columns = columns.max(1);
        if self.selected + columns < self.deck.len() {
            self.selected += columns;
        }
    }

    pub fn select_row_up(&mut self, columns: usize) {
        let columns = columns.max(1);
        if self.selected >= columns {
            self.selected -= columns;
        }
    }
}

impl Drop for VocabularyPage {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn page() -> VocabularyPage {
        VocabularyPage::new(Box::new(|_: &str| {}))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_starts_idle() {
        let page = page();
        assert_eq!(page.announcing(), None);
        assert_eq!(page.entries().len(), 12);
    }

    #[test]
    fn test_trigger_sets_index_immediately() {
        let t0 = Instant::now();
        for i in 0..12 {
            let mut page = page();
            page.trigger(i, t0);
            assert_eq!(page.announcing(), Some(i));
            for j in (0..12).filter(|&j| j != i) {
                assert!(!page.is_announcing(j));
            }
        }
    }

    #[test]
    fn test_returns_to_idle_after_window() {
        let t0 = Instant::now();
        let mut page = page();
        page.trigger(0, t0);

        page.tick(t0 + ms(499));
        assert_eq!(page.announcing(), Some(0));

        page.tick(t0 + ms(500));
        assert_eq!(page.announcing(), None);
    }

    #[test]
    fn test_newer_trigger_survives_older_deadline() {
        let t0 = Instant::now();
        let mut page = page();
        page.trigger(2, t0);
        page.trigger(5, t0 + ms(200));
        assert_eq!(page.announcing(), Some(5));

        // First trigger's deadline passes without clearing the second
        page.tick(t0 + ms(500));
        assert_eq!(page.announcing(), Some(5));

        page.tick(t0 + ms(699));
        assert_eq!(page.announcing(), Some(5));

        page.tick(t0 + ms(700));
        assert_eq!(page.announcing(), None);
    }

    #[test]
    fn test_retrigger_same_entry_extends_window() {
        let t0 = Instant::now();
        let mut page = page();
        page.trigger(3, t0);
        page.trigger(3, t0 + ms(400));

        page.tick(t0 + ms(600));
        assert_eq!(page.announcing(), Some(3));
        page.tick(t0 + ms(900));
        assert_eq!(page.announcing(), None);
    }

    #[test]
    fn test_out_of_range_trigger_is_ignored() {
        let t0 = Instant::now();
        let mut page = page();
        page.trigger(12, t0);
        assert_eq!(page.announcing(), None);

        page.trigger(1, t0);
        page.trigger(usize::MAX, t0 + ms(100));
        assert_eq!(page.announcing(), Some(1));
    }

    #[test]
    fn test_unmount_cancels_pending_clear() {
        let t0 = Instant::now();
        let mut page = page();
        page.trigger(4, t0);
        page.unmount();
        assert!(!page.is_mounted());
        assert_eq!(page.announcement(), None);

        page.tick(t0 + ms(1000));
        page.trigger(1, t0 + ms(1000));
        assert_eq!(page.announcing(), None);

        // Second unmount and drop are harmless
        page.unmount();
        drop(page);
    }

    #[test]
    fn test_custom_deck_and_window() {
        let deck = Deck::new(vec![
            VocabularyEntry::new("水", "mizu", "Nước", "自然"),
            VocabularyEntry::new("山", "yama", "Núi", "自然"),
        ])
        .unwrap();
        let t0 = Instant::now();
        let mut page = VocabularyPage::with_deck(deck, ms(100), Box::new(|_: &str| {}));
        assert_eq!(page.entries().len(), 2);

        page.trigger(1, t0);
        page.tick(t0 + ms(100));
        assert_eq!(page.announcing(), None);

        page.trigger(2, t0);
        assert_eq!(page.announcing(), None);
    }

    #[test]
    fn test_navigate_forwards_destination() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut page = VocabularyPage::new(Box::new(move |dest: &str| {
            sink.lock().unwrap().push(dest.to_string());
        }));

        page.navigate("home");
        page.navigate("games");
        assert_eq!(*seen.lock().unwrap(), vec!["home", "games"]);
        // Navigation alone never touches the announcing state
        assert_eq!(page.announcing(), None);
    }

    #[test]
    fn test_grid_selection() {
        let mut page = page();
        page.select_row_down(3);
        assert_eq!(page.selected(), 3);
        page.select_next();
        assert_eq!(page.selected(), 4);
        page.select_row_up(3);
        assert_eq!(page.selected(), 1);
        page.select_row_up(3);
        assert_eq!(page.selected(), 1);

        page.select(11);
        page.select_next();
        page.select_row_down(3);
        assert_eq!(page.selected(), 11);

        page.select(0);
        page.select_prev();
        assert_eq!(page.selected(), 0);
    }

    #[test]
    fn test_trigger_selected_follows_selection() {
        let t0 = Instant::now();
        let mut page = page();
        page.select(7);
        page.trigger_selected(t0);
        assert_eq!(page.announcing(), Some(7));
    }
}
