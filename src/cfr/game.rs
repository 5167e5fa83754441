//! Game trait definitions for the CFR engine.
//!
//! Any sequential imperfect-information game that implements the `Game` trait
//! can be solved by the engine. The trait is the single seam between the
//! algorithm and concrete games.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;

/// Trait for actions that can be taken in a game.
///
/// Actions must be cloneable, comparable, and hashable so they can key
/// strategy maps.
pub trait Action: Clone + Eq + Hash + Debug {
    /// Human-readable label for display and reports.
    fn label(&self) -> String;
}

/// Trait for information states (what a player knows at a decision point).
///
/// Two game states that look identical to a player (same private cards, same
/// public action history, same round) must produce the same information state.
pub trait InfoState: Clone + Eq + Hash + Debug {
    /// Unique string key for this information state, used to index the
    /// info set store.
    fn key(&self) -> String;
}

/// Marker trait for game states.
///
/// A game state contains all information about the current node, including
/// private information individual players cannot see.
pub trait GameState: Clone + Debug {}

/// The interface a game must provide to the CFR engine.
///
/// # Contract
///
/// `legal_actions` returns a non-empty, stably-ordered set exactly when
/// `is_terminal` is false, and an empty set exactly when it is true. The
/// engine's termination guarantee depends on this and it is checked fail-fast
/// during traversal.
pub trait Game: Clone {
    /// The type representing a complete game state.
    type State: GameState;

    /// The type representing an action a player can take.
    type Action: Action;

    /// The type representing what a player knows at a decision point.
    type InfoState: InfoState;

    /// Total number of players.
    fn num_players(&self) -> usize;

    /// Perform the single chance move: shuffle, deal, post forced bets.
    ///
    /// Non-deterministic on every call; the solver passes its own seeded RNG
    /// so training runs are reproducible.
    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State;

    /// Whether the state is terminal: at most one active player remains, or
    /// all active players hold equal bets at the final round.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Utility for `player` at a terminal state.
    ///
    /// Single-survivor case: pot minus own contribution for the survivor,
    /// negative contribution for everyone else. Showdown case: hand strengths
    /// are compared and the same pot split applies.
    ///
    /// # Panics
    /// Panics if called on a non-terminal state.
    fn utility(&self, state: &Self::State, player: usize) -> f64;

    /// Index of the player to act. Only meaningful on non-terminal states.
    fn current_player(&self, state: &Self::State) -> usize;

    /// Legal actions at the state, in stable order. Fold, when legal, is
    /// always first. Empty exactly when the state is terminal.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply an action, returning a fresh state. Never mutates the input.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// The information state of `state` from `player`'s viewpoint.
    fn info_state(&self, state: &Self::State, player: usize) -> Self::InfoState;
}
