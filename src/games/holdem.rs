//! Simplified heads-up hold'em.
//!
//! A deliberately tiny hold'em abstraction: a reduced 20-card deck (ranks
//! T-A, four suits), two hole cards per player, a three-card board dealt up
//! front and revealed for the second betting round, fixed bet sizes per
//! round, and at most one raise per round.
//!
//! The showdown comparator is the sum of card ranks across hole and board,
//! not real poker hand ranking. That simplification is part of the game
//! definition, kept as is rather than generalized to flush/straight/pair
//! detection.

use rand::Rng;

use crate::cfr::game::Game;
use crate::games::card::Deck;
use crate::games::table::{PokerAction, TableInfoState, TableState};

const ANTE: u32 = 1;
const NUM_ROUNDS: u8 = 2;
const HOLE_CARDS: usize = 2;
const BOARD_CARDS: usize = 3;
const MAX_RAISES_PER_ROUND: usize = 1;

/// Fixed bet size for each round.
const BET_SIZES: [u32; NUM_ROUNDS as usize] = [2, 4];

/// Simplified heads-up hold'em game definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifiedHoldem;

impl SimplifiedHoldem {
    /// Create a new simplified hold'em game.
    pub fn new() -> Self {
        Self
    }

    /// Sum of card ranks, hole plus board.
    fn strengths(state: &TableState) -> Vec<u32> {
        let board_sum: u32 = state.board.iter().map(|c| c.rank as u32).sum();
        state
            .hole
            .iter()
            .map(|h| board_sum + h.iter().map(|c| c.rank as u32).sum::<u32>())
            .collect()
    }

    fn bet_size(round: u8) -> u32 {
        BET_SIZES[round as usize]
    }
}

impl Game for SimplifiedHoldem {
    type State = TableState;
    type Action = PokerAction;
    type InfoState = TableInfoState;

    fn num_players(&self) -> usize {
        2
    }

    fn initial_state<R: Rng>(&self, rng: &mut R) -> Self::State {
        let mut deck = Deck::reduced();
        deck.shuffle(rng);
        let hole = vec![deck.deal_n(HOLE_CARDS), deck.deal_n(HOLE_CARDS)];
        let board = deck.deal_n(BOARD_CARDS);
        TableState::new(hole, board, ANTE)
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
        let allow_raise = state.raises_this_round() < MAX_RAISES_PER_ROUND;
        state.legal_actions(Self::bet_size(state.round), allow_raise)
    }

    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        state.apply_action(action, NUM_ROUNDS)
    }

    fn info_state(&self, state: &Self::State, player: usize) -> Self::InfoState {
        TableInfoState::observe(state, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::game::InfoState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initial_deal_shape() {
        let game = SimplifiedHoldem::new();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let state = game.initial_state(&mut rng);
            assert_eq!(state.hole[0].len(), 2);
            assert_eq!(state.hole[1].len(), 2);
            assert_eq!(state.board.len(), 3);
            assert_eq!(state.pot, 2);
            assert_eq!(state.bets, vec![1, 1]);
            assert_eq!(state.round, 0);

            // All seven cards distinct
            let mut all = state.hole[0].clone();
            all.extend(&state.hole[1]);
            all.extend(&state.board);
            all.sort();
            all.dedup();
            assert_eq!(all.len(), 7);
        }
    }

    #[test]
    fn test_two_betting_rounds() {
        let game = SimplifiedHoldem::new();
        let mut rng = StdRng::seed_from_u64(12);
        let root = game.initial_state(&mut rng);

        // Round 0: check it through
        let s = game.apply(&root, &PokerAction::Check);
        let s = game.apply(&s, &PokerAction::Check);
        assert!(!game.is_terminal(&s));
        assert_eq!(s.round, 1);

        // Round 1 opens with the bigger fixed bet
        let actions = game.legal_actions(&s);
        assert_eq!(actions, vec![PokerAction::Check, PokerAction::Bet(4)]);

        // Bet / call closes the final round
        let s = game.apply(&s, &PokerAction::Bet(4));
        let s = game.apply(&s, &PokerAction::Call);
        assert!(game.is_terminal(&s));
        assert_eq!(s.pot, 10);
    }

    #[test]
    fn test_raise_cap() {
        let game = SimplifiedHoldem::new();
        let mut rng = StdRng::seed_from_u64(13);
        let root = game.initial_state(&mut rng);

        let s = game.apply(&root, &PokerAction::Bet(2));
        let actions = game.legal_actions(&s);
        assert_eq!(
            actions,
            vec![
                PokerAction::Fold,
                PokerAction::Call,
                PokerAction::Raise(2)
            ]
        );

        // After one raise the cap is reached: fold or call only
        let s = game.apply(&s, &PokerAction::Raise(2));
        let actions = game.legal_actions(&s);
        assert_eq!(actions, vec![PokerAction::Fold, PokerAction::Call]);
    }

    #[test]
    fn test_sum_of_ranks_showdown() {
        let game = SimplifiedHoldem::new();
        let mut rng = StdRng::seed_from_u64(14);
        let root = game.initial_state(&mut rng);

        // Check the hand down to showdown
        let s = game.apply(&root, &PokerAction::Check);
        let s = game.apply(&s, &PokerAction::Check);
        let s = game.apply(&s, &PokerAction::Check);
        let s = game.apply(&s, &PokerAction::Check);
        assert!(game.is_terminal(&s));

        let hole_sum = |p: usize| -> u32 {
            s.hole[p].iter().map(|c| c.rank as u32).sum()
        };
        let expected_winner = match hole_sum(0).cmp(&hole_sum(1)) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        };

        match expected_winner {
            Some(w) => {
                assert_eq!(game.utility(&s, w), 1.0);
                assert_eq!(game.utility(&s, 1 - w), -1.0);
            }
            None => {
                assert_eq!(game.utility(&s, 0), 0.0);
                assert_eq!(game.utility(&s, 1), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_sum_at_sampled_terminals() {
        let game = SimplifiedHoldem::new();
        let mut rng = StdRng::seed_from_u64(15);

        fn walk(game: &SimplifiedHoldem, state: &TableState, count: &mut usize) {
            if game.is_terminal(state) {
                let sum = game.utility(state, 0) + game.utility(state, 1);
                assert!(sum.abs() < 1e-12, "non-zero-sum terminal: {}", state);
                *count += 1;
                return;
            }
            for action in game.legal_actions(state) {
                walk(game, &game.apply(state, &action), count);
            }
        }

        let mut terminals = 0;
        for _ in 0..3 {
            let root = game.initial_state(&mut rng);
            walk(&game, &root, &mut terminals);
        }
        assert!(terminals > 0);
    }

    #[test]
    fn test_info_key_carries_round() {
        let game = SimplifiedHoldem::new();
        let mut rng = StdRng::seed_from_u64(16);
        let root = game.initial_state(&mut rng);

        let info = game.info_state(&root, 0);
        assert!(info.key().ends_with(":0"));

        let s = game.apply(&root, &PokerAction::Check);
        let s = game.apply(&s, &PokerAction::Check);
        let info = game.info_state(&s, 0);
        assert_eq!(info.round, 1);
        assert!(info.key().ends_with(":kk/:1"));
    }
}
