//! Standard game invariants.

use std::collections::HashMap;

use pairlink_core::DECK_SIZE;

use super::{PairInvariant, SessionInvariant, SessionSnapshot, Violation};

fn violation(invariant: &'static str, message: impl Into<String>) -> Violation {
    Violation { invariant, message: message.into() }
}

/// At most two cards are ever face-up pending resolution.
pub struct RevealBound;

impl SessionInvariant for RevealBound {
    fn name(&self) -> &'static str {
        "reveal-bound"
    }

    fn check(&self, _prev: &SessionSnapshot, next: &SessionSnapshot) -> Result<(), Violation> {
        if next.revealed.len() > 2 {
            return Err(violation(
                self.name(),
                format!("{} cards revealed at once", next.revealed.len()),
            ));
        }
        Ok(())
    }
}

/// Within one game, the matched set only grows, two at a time.
pub struct MatchedMonotonic;

impl SessionInvariant for MatchedMonotonic {
    fn name(&self) -> &'static str {
        "matched-monotonic"
    }

    fn check(&self, prev: &SessionSnapshot, next: &SessionSnapshot) -> Result<(), Violation> {
        if !next.same_game(prev) {
            return Ok(());
        }
        if !next.matched.is_superset(&prev.matched) {
            return Err(violation(self.name(), "matched set lost an index"));
        }
        let grown = next.matched.len() - prev.matched.len();
        if grown % 2 != 0 {
            return Err(violation(self.name(), format!("matched set grew by {grown}")));
        }
        Ok(())
    }
}

/// Matched indices always form symbol-equal pairs on the local deck.
pub struct MatchedPairsEven;

impl SessionInvariant for MatchedPairsEven {
    fn name(&self) -> &'static str {
        "matched-pairs-even"
    }

    fn check(&self, _prev: &SessionSnapshot, next: &SessionSnapshot) -> Result<(), Violation> {
        let Some(deck) = &next.deck else {
            if next.matched.is_empty() {
                return Ok(());
            }
            return Err(violation(self.name(), "matched indices without a deck"));
        };

        let mut per_symbol: HashMap<char, usize> = HashMap::new();
        for &index in &next.matched {
            let Some(symbol) = deck.get(usize::from(index)) else {
                return Err(violation(self.name(), format!("matched index {index} off the board")));
            };
            *per_symbol.entry(symbol.as_char()).or_insert(0) += 1;
        }

        for (symbol, count) in per_symbol {
            if count % 2 != 0 {
                return Err(violation(
                    self.name(),
                    format!("{count} matched copies of {symbol}"),
                ));
            }
        }
        Ok(())
    }
}

/// A cleared board has every card matched, and vice versa.
pub struct ClearedMeansFull;

impl SessionInvariant for ClearedMeansFull {
    fn name(&self) -> &'static str {
        "cleared-means-full"
    }

    fn check(&self, _prev: &SessionSnapshot, next: &SessionSnapshot) -> Result<(), Violation> {
        if next.cleared && next.matched.len() != DECK_SIZE {
            return Err(violation(
                self.name(),
                format!("cleared with {} of {DECK_SIZE} matched", next.matched.len()),
            ));
        }
        if !next.cleared && next.deck.is_some() && next.matched.len() == DECK_SIZE {
            return Err(violation(self.name(), "full board not marked cleared"));
        }
        Ok(())
    }
}

/// Both sides of a peer game play the same board.
pub struct DeckAgreement;

impl PairInvariant for DeckAgreement {
    fn name(&self) -> &'static str {
        "deck-agreement"
    }

    fn check(&self, host: &SessionSnapshot, guest: &SessionSnapshot) -> Result<(), Violation> {
        match (&host.deck, &guest.deck) {
            (Some(h), Some(g)) if h != g => {
                Err(violation(self.name(), "host and guest decks diverged"))
            },
            _ => Ok(()),
        }
    }
}

/// The turn never belongs to both sides at once.
///
/// Both sides may be waiting while a no-match handoff is in flight; both
/// acting at once is the split-brain the protocol must prevent.
pub struct SingleTurnOwner;

impl PairInvariant for SingleTurnOwner {
    fn name(&self) -> &'static str {
        "single-turn-owner"
    }

    fn check(&self, host: &SessionSnapshot, guest: &SessionSnapshot) -> Result<(), Violation> {
        if host.our_turn && guest.our_turn {
            return Err(violation(self.name(), "both sides believe it is their turn"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pairlink_core::SYMBOLS;

    use super::*;

    fn snapshot_with_deck() -> SessionSnapshot {
        let mut deck = Vec::new();
        for symbol in SYMBOLS {
            deck.push(symbol);
            deck.push(symbol);
        }
        SessionSnapshot { deck: Some(deck), ..SessionSnapshot::empty() }
    }

    #[test]
    fn reveal_bound_catches_triple() {
        let mut next = snapshot_with_deck();
        next.revealed = vec![0, 1, 2];
        assert!(RevealBound.check(&SessionSnapshot::empty(), &next).is_err());
    }

    #[test]
    fn monotonic_ignores_new_games() {
        let mut prev = snapshot_with_deck();
        prev.matched = [0u8, 1].into_iter().collect();

        // Same indices vanish, but the deck changed: a new game, not a bug.
        let mut next = prev.clone();
        next.deck = None;
        next.matched = BTreeSet::new();
        assert!(MatchedMonotonic.check(&prev, &next).is_ok());

        // Same deck, shrinking set: violation.
        let mut bad = prev.clone();
        bad.matched = BTreeSet::new();
        assert!(MatchedMonotonic.check(&prev, &bad).is_err());
    }

    #[test]
    fn pairs_even_catches_odd_symbol_count() {
        let mut next = snapshot_with_deck();
        // Indices 0 and 2 hold different symbols on the ordered deck.
        next.matched = [0u8, 2].into_iter().collect();
        assert!(MatchedPairsEven.check(&SessionSnapshot::empty(), &next).is_err());

        next.matched = [0u8, 1].into_iter().collect();
        assert!(MatchedPairsEven.check(&SessionSnapshot::empty(), &next).is_ok());
    }

    #[test]
    fn cleared_requires_full_board() {
        let mut next = snapshot_with_deck();
        next.cleared = true;
        next.matched = [0u8, 1].into_iter().collect();
        assert!(ClearedMeansFull.check(&SessionSnapshot::empty(), &next).is_err());

        next.matched = (0u8..16).collect();
        assert!(ClearedMeansFull.check(&SessionSnapshot::empty(), &next).is_ok());
    }

    #[test]
    fn turn_exclusivity() {
        let mut host = snapshot_with_deck();
        let mut guest = snapshot_with_deck();
        host.our_turn = true;
        guest.our_turn = false;
        assert!(SingleTurnOwner.check(&host, &guest).is_ok());

        guest.our_turn = true;
        assert!(SingleTurnOwner.check(&host, &guest).is_err());
    }
}
