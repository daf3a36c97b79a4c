//! Fuzz target for save-file import.
//!
//! Imports come from user-edited files; parsing must never panic, and an
//! accepted save must satisfy every deck and range invariant.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pairlink_core::{DECK_SIZE, savefile};

fuzz_target!(|data: &str| {
    let Ok(snapshot) = savefile::from_json(data) else {
        return;
    };

    // An accepted save is fully validated.
    assert_eq!(snapshot.deck.len(), DECK_SIZE);
    for index in &snapshot.matched {
        assert!(usize::from(*index) < DECK_SIZE);
    }

    // And it round-trips through export.
    let json = savefile::to_json(&snapshot).expect("valid snapshot exports");
    let again = savefile::from_json(&json).expect("exported save re-imports");
    assert_eq!(again.matched, snapshot.matched);
});
