//! Flashcard browsing

use crate::session::Progress;
use crate::types::Flashcard;

/// Clamped navigation over a deck with a per-view flip flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardRunner {
    cards: Vec<Flashcard>,
    current: usize,
    flipped: bool,
}

impl FlashcardRunner {
    /// Start browsing; `None` if the deck is empty
    pub fn new(cards: Vec<Flashcard>) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }

        Some(Self {
            cards,
            current: 0,
            flipped: false,
        })
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn total(&self) -> usize {
        self.cards.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_card(&self) -> &Flashcard {
        &self.cards[self.current]
    }

    /// Whether the back of the current card is showing
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Text on the visible side
    pub fn visible_text(&self) -> &str {
        let card = self.current_card();
        if self.flipped {
            &card.back
        } else {
            &card.front
        }
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.cards.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current += 1;
        self.flipped = false;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current -= 1;
        self.flipped = false;
        true
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn progress(&self) -> Progress {
        Progress::new(self.current + 1, self.total(), self.current + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(count: usize) -> FlashcardRunner {
        let cards = (0..count)
            .map(|i| Flashcard {
                front: format!("front {}", i),
                back: format!("back {}", i),
            })
            .collect();
        FlashcardRunner::new(cards).unwrap()
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut cards = deck(3);
        assert!(!cards.previous());
        assert_eq!(cards.current_index(), 0);

        assert!(cards.next());
        assert!(cards.next());
        assert!(!cards.next());
        assert_eq!(cards.current_index(), 2);
    }

    #[test]
    fn test_flip_resets_when_index_changes() {
        let mut cards = deck(2);
        cards.flip();
        assert_eq!(cards.visible_text(), "back 0");

        cards.next();
        assert!(!cards.is_flipped());
        assert_eq!(cards.visible_text(), "front 1");
    }

    #[test]
    fn test_blocked_navigation_keeps_flip() {
        let mut cards = deck(1);
        cards.flip();
        cards.next();
        assert!(cards.is_flipped());
    }

    #[test]
    fn test_progress_includes_current_card() {
        let mut cards = deck(4);
        assert_eq!(cards.progress().percent, 25);
        cards.next();
        cards.next();
        cards.next();
        assert_eq!(cards.progress().percent, 100);
    }
}
