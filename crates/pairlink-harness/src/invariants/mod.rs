//! Invariant checking for simulated games.
//!
//! Invariants express WHAT must hold over every execution path, not a
//! specific scenario. Tests capture a [`SessionSnapshot`] per side after
//! each simulation step and run the [`InvariantRegistry`] against
//! consecutive snapshots.

mod checks;
mod snapshot;

pub use checks::{
    ClearedMeansFull, DeckAgreement, MatchedMonotonic, MatchedPairsEven, RevealBound,
    SingleTurnOwner,
};
pub use snapshot::SessionSnapshot;

/// A failed invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// What went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

/// Invariant over one session's consecutive snapshots.
pub trait SessionInvariant {
    /// Invariant name for violation reports.
    fn name(&self) -> &'static str;

    /// Check the step from `prev` to `next`.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] describing the failed check.
    fn check(&self, prev: &SessionSnapshot, next: &SessionSnapshot) -> Result<(), Violation>;
}

/// Invariant over the two sides of one game.
pub trait PairInvariant {
    /// Invariant name for violation reports.
    fn name(&self) -> &'static str;

    /// Check one host/guest snapshot pair.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] describing the failed check.
    fn check(&self, host: &SessionSnapshot, guest: &SessionSnapshot) -> Result<(), Violation>;
}

/// Collection of invariants run together after each simulation step.
#[derive(Default)]
pub struct InvariantRegistry {
    session: Vec<Box<dyn SessionInvariant>>,
    pair: Vec<Box<dyn PairInvariant>>,
}

impl InvariantRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard game invariants.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add_session(Box::new(RevealBound));
        registry.add_session(Box::new(MatchedMonotonic));
        registry.add_session(Box::new(MatchedPairsEven));
        registry.add_session(Box::new(ClearedMeansFull));
        registry.add_pair(Box::new(DeckAgreement));
        registry.add_pair(Box::new(SingleTurnOwner));
        registry
    }

    /// Add a per-session invariant.
    pub fn add_session(&mut self, invariant: Box<dyn SessionInvariant>) {
        self.session.push(invariant);
    }

    /// Add a host/guest pair invariant.
    pub fn add_pair(&mut self, invariant: Box<dyn PairInvariant>) {
        self.pair.push(invariant);
    }

    /// Run every invariant against one simulation step.
    ///
    /// `prev` and `next` are (host, guest) pairs captured before and after
    /// the step. Returns all violations found.
    #[must_use]
    pub fn check_step(
        &self,
        prev: &(SessionSnapshot, SessionSnapshot),
        next: &(SessionSnapshot, SessionSnapshot),
    ) -> Vec<Violation> {
        let mut violations = Vec::new();

        for invariant in &self.session {
            if let Err(v) = invariant.check(&prev.0, &next.0) {
                violations.push(v);
            }
            if let Err(v) = invariant.check(&prev.1, &next.1) {
                violations.push(v);
            }
        }
        for invariant in &self.pair {
            if let Err(v) = invariant.check(&next.0, &next.1) {
                violations.push(v);
            }
        }

        violations
    }
}
