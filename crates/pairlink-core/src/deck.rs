//! Deck construction and validation.
//!
//! A deck is a fixed 16-card multiset: two copies each of eight distinct
//! symbols, in shuffled board order. The multiset composition never changes
//! after creation; only reveal/match status does, and the whole deck is
//! replaced wholesale on peer sync or import. Any deck arriving from
//! outside (peer message, save file) goes through [`Deck::from_symbols`] so
//! a hostile or corrupt source cannot smuggle in a malformed board.

use pairlink_proto::{CardIndex, Symbol};
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

use crate::{env::Environment, error::DeckError};

/// Number of distinct symbols (pairs) in a deck.
pub const PAIR_COUNT: usize = 8;

/// Total number of cards in a deck.
pub const DECK_SIZE: usize = PAIR_COUNT * 2;

/// The fixed symbol set, two copies of each per deck.
pub const SYMBOLS: [Symbol; PAIR_COUNT] = [
    Symbol::new('🍎'),
    Symbol::new('🍌'),
    Symbol::new('🍇'),
    Symbol::new('🍒'),
    Symbol::new('🥝'),
    Symbol::new('🍍'),
    Symbol::new('🥥'),
    Symbol::new('🍉'),
];

/// A validated 16-card board.
///
/// # Invariants
///
/// - Length is exactly [`DECK_SIZE`].
/// - Contains exactly two occurrences of each symbol in [`SYMBOLS`].
///
/// Both invariants hold by construction: [`Deck::deal`] builds from the
/// fixed multiset, and [`Deck::from_symbols`] rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Symbol>);

impl Deck {
    /// Deal a uniformly shuffled deck.
    ///
    /// Fisher–Yates via `SliceRandom`, seeded from the environment so
    /// simulation decks are reproducible. Production draws a fresh OS seed
    /// per deal; there is no date-derived seed even for the daily mode
    /// (see [`crate::GameMode::Daily`]).
    pub fn deal<E: Environment>(env: &E) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for symbol in SYMBOLS {
            cards.push(symbol);
            cards.push(symbol);
        }

        let mut seed = [0u8; 32];
        env.random_bytes(&mut seed);
        let mut rng = ChaCha8Rng::from_seed(seed);
        cards.shuffle(&mut rng);

        Self(cards)
    }

    /// Validate an untrusted symbol sequence into a deck.
    ///
    /// # Errors
    ///
    /// - [`DeckError::WrongSize`] if the sequence is not 16 cards
    /// - [`DeckError::UnknownSymbol`] if a symbol is outside the fixed set
    /// - [`DeckError::WrongMultiplicity`] if any symbol does not appear
    ///   exactly twice
    pub fn from_symbols(cards: Vec<Symbol>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize { actual: cards.len() });
        }

        for &card in &cards {
            if !SYMBOLS.contains(&card) {
                return Err(DeckError::UnknownSymbol { symbol: card });
            }
        }

        for symbol in SYMBOLS {
            let count = cards.iter().filter(|&&c| c == symbol).count();
            if count != 2 {
                return Err(DeckError::WrongMultiplicity { symbol, count });
            }
        }

        Ok(Self(cards))
    }

    /// Symbol at the given board index. `None` if out of range.
    pub fn symbol(&self, index: CardIndex) -> Option<Symbol> {
        self.0.get(usize::from(index)).copied()
    }

    /// Number of cards (always [`DECK_SIZE`]).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All symbols in board order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    /// Whether `index` addresses a card on this board.
    pub fn contains_index(&self, index: CardIndex) -> bool {
        usize::from(index) < self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Clone)]
    struct FixedEnv(u8);

    impl Environment for FixedEnv {
        type Instant = std::time::Instant;

        fn now(&self) -> Self::Instant {
            std::time::Instant::now()
        }

        fn sleep(&self, _: std::time::Duration) -> impl std::future::Future<Output = ()> + Send {
            std::future::ready(())
        }

        fn random_bytes(&self, buffer: &mut [u8]) {
            buffer.fill(self.0);
        }
    }

    #[test]
    fn dealt_deck_has_eight_pairs() {
        let deck = Deck::deal(&FixedEnv(7));

        assert_eq!(deck.len(), DECK_SIZE);

        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for &symbol in deck.symbols() {
            *counts.entry(symbol).or_default() += 1;
        }

        assert_eq!(counts.len(), PAIR_COUNT);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn deal_is_deterministic_under_fixed_seed() {
        let a = Deck::deal(&FixedEnv(3));
        let b = Deck::deal(&FixedEnv(3));
        assert_eq!(a, b);

        let c = Deck::deal(&FixedEnv(4));
        assert_ne!(a, c, "different seeds should shuffle differently");
    }

    #[test]
    fn from_symbols_accepts_dealt_deck() {
        let deck = Deck::deal(&FixedEnv(1));
        let rebuilt = Deck::from_symbols(deck.symbols().to_vec()).unwrap();
        assert_eq!(deck, rebuilt);
    }

    #[test]
    fn from_symbols_rejects_short_deck() {
        let result = Deck::from_symbols(vec![Symbol::new('🍎'); 4]);
        assert!(matches!(result, Err(DeckError::WrongSize { actual: 4 })));
    }

    #[test]
    fn from_symbols_rejects_unknown_symbol() {
        let mut cards = Deck::deal(&FixedEnv(1)).symbols().to_vec();
        cards[0] = Symbol::new('💀');
        let result = Deck::from_symbols(cards);
        assert!(matches!(result, Err(DeckError::UnknownSymbol { .. })));
    }

    #[test]
    fn from_symbols_rejects_triple() {
        // Replace one 🍌 with a third 🍎
        let mut cards = Vec::new();
        for symbol in SYMBOLS {
            cards.push(symbol);
            cards.push(symbol);
        }
        cards[2] = Symbol::new('🍎');
        let result = Deck::from_symbols(cards);
        assert!(matches!(result, Err(DeckError::WrongMultiplicity { .. })));
    }
}
