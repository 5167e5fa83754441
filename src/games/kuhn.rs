//! 3-card Kuhn poker.
//!
//! The classic CFR validation game: three cards (J, Q, K), two players, each
//! antes one chip and receives one card. One betting round with a fixed
//! one-chip bet and no raising; the higher card wins at showdown.
//!
//! ## Known equilibrium properties
//!
//! - First player with Jack bets (bluffs) with probability about 1/3.
//! - First player with Queen checks.
//! - First player with King bets far more often than with Jack.
//! - Second player facing a bet folds Jack, calls King, and calls Queen
//!   about 1/3 of the time.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cfr::game::Game;
use crate::games::card::{Card, RANK_J, RANK_K, RANK_Q};
use crate::games::table::{PokerAction, TableInfoState, TableState};

const ANTE: u32 = 1;
const BET_SIZE: u32 = 1;
const NUM_ROUNDS: u8 = 1;

/// Kuhn poker game definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a new Kuhn poker game.
    pub fn new() -> Self {
        Self
    }

    /// The three-card deck.
    pub fn deck() -> [Card; 3] {
        [
            Card::new(RANK_J, 0),
            Card::new(RANK_Q, 0),
            Card::new(RANK_K, 0),
        ]
    }

    fn strengths(state: &TableState) -> Vec<u32> {
        state.hole.iter().map(|h| h[0].rank as u32).collect()
    }
}

impl Game for KuhnPoker {
    type State = TableState;
    type Action = PokerAction;
    type InfoState = TableInfoState;

    fn num_players(&self) -> usize {
        2
    }

    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State {
        let mut deck = Self::deck();
        deck.shuffle(rng);
        TableState::new(vec![vec![deck[0]], vec![deck[1]]], vec![], ANTE)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.is_terminal(NUM_ROUNDS)
    }

    fn utility(&self, state: &Self::State, player: usize) -> f64 {
        assert!(self.is_terminal(state), "utility on non-terminal state");
        state.utility(player, &Self::strengths(state))
    }

    fn current_player(&self, state: &Self::State) -> usize {
        state.to_act
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if self.is_terminal(state) {
            return vec![];
        }
        state.legal_actions(BET_SIZE, false)
    }

    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        state.apply_action(action, NUM_ROUNDS)
    }

    fn info_state(&self, state: &Self::State, player: usize) -> Self::InfoState {
        TableInfoState::observe(state, player)
    }
}
