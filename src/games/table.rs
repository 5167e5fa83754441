//! Shared table state and betting mechanics for the poker variants.
//!
//! Both games use the same node shape: private hole cards, public board,
//! pot, per-player contributions and active flags, the player to act, the
//! betting round, and a compact action history (`/` separates rounds). The
//! games differ only in dealing, bet sizing, raise caps, and hand strength.

use std::fmt;

use crate::cfr::game::{Action, GameState, InfoState};
use crate::games::card::Card;

/// An action at a poker decision point. Bet and raise carry their size so
/// `legal_actions` stays the single source of truth for amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokerAction {
    /// Give up the hand. Legal only when facing a bet, and always listed
    /// first when legal.
    Fold,
    /// Stay in without adding chips. Legal only when nothing is owed.
    Check,
    /// Match the outstanding bet.
    Call,
    /// Open the betting for the given amount.
    Bet(u32),
    /// Match the outstanding bet and add the given amount on top.
    Raise(u32),
}

impl PokerAction {
    /// One-character history encoding.
    pub fn code(&self) -> char {
        match self {
            PokerAction::Fold => 'f',
            PokerAction::Check => 'k',
            PokerAction::Call => 'c',
            PokerAction::Bet(_) => 'b',
            PokerAction::Raise(_) => 'r',
        }
    }
}

impl Action for PokerAction {
    fn label(&self) -> String {
        match self {
            PokerAction::Fold => "Fold".to_string(),
            PokerAction::Check => "Check".to_string(),
            PokerAction::Call => "Call".to_string(),
            PokerAction::Bet(x) => format!("Bet {}", x),
            PokerAction::Raise(x) => format!("Raise {}", x),
        }
    }
}

impl fmt::Display for PokerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One game-tree node.
///
/// Produced only by a game's `initial_state` (the chance move) and by
/// `apply_action`, which always returns a fresh value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Private cards per player.
    pub hole: Vec<Vec<Card>>,
    /// Shared board cards (dealt up front, publicly visible from round 1).
    pub board: Vec<Card>,
    /// Total chips in the pot.
    pub pot: u32,
    /// Each player's total contribution to the pot.
    pub bets: Vec<u32>,
    /// Whether each player is still in the hand.
    pub active: Vec<bool>,
    /// Index of the player to act. Not meaningful on terminal states.
    pub to_act: usize,
    /// Betting round, 0-based.
    pub round: u8,
    /// Encoded action history, `/` between rounds.
    pub history: String,
}

impl GameState for TableState {}

impl TableState {
    /// Create the post-deal state: antes posted, player 0 to act.
    pub fn new(hole: Vec<Vec<Card>>, board: Vec<Card>, ante: u32) -> Self {
        let num_players = hole.len();
        Self {
            hole,
            board,
            pot: ante * num_players as u32,
            bets: vec![ante; num_players],
            active: vec![true; num_players],
            to_act: 0,
            round: 0,
            history: String::new(),
        }
    }

    /// Number of seats.
    pub fn num_players(&self) -> usize {
        self.active.len()
    }

    /// Number of players still in the hand.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Largest contribution at the table.
    pub fn max_bet(&self) -> u32 {
        self.bets.iter().copied().max().unwrap_or(0)
    }

    /// Chips `player` must add to match the outstanding bet.
    pub fn owed(&self, player: usize) -> u32 {
        self.max_bet() - self.bets[player]
    }

    /// Actions taken so far in the current round.
    pub fn actions_this_round(&self) -> usize {
        self.current_segment().len()
    }

    /// Raises made so far in the current round.
    pub fn raises_this_round(&self) -> usize {
        self.current_segment().chars().filter(|&c| c == 'r').count()
    }

    fn current_segment(&self) -> &str {
        match self.history.rfind('/') {
            Some(idx) => &self.history[idx + 1..],
            None => &self.history,
        }
    }

    /// Whether the current betting round is closed: every active player has
    /// acted this round and all active bets match.
    fn round_closed(&self) -> bool {
        self.actions_this_round() >= self.active_count() && self.active_bets_equal()
    }

    fn active_bets_equal(&self) -> bool {
        let max = self.max_bet();
        self.active
            .iter()
            .zip(self.bets.iter())
            .all(|(&a, &b)| !a || b == max)
    }

    /// Terminal predicate: at most one active player remains, or the final
    /// round's betting is closed.
    pub fn is_terminal(&self, num_rounds: u8) -> bool {
        self.active_count() <= 1
            || (self.round == num_rounds - 1 && self.round_closed())
    }

    /// Legal actions for the player to act, fold first when legal.
    ///
    /// Callers must not invoke this on terminal states; games return the
    /// empty set there before delegating here.
    pub fn legal_actions(&self, bet_size: u32, allow_raise: bool) -> Vec<PokerAction> {
        if self.owed(self.to_act) > 0 {
            let mut actions = vec![PokerAction::Fold, PokerAction::Call];
            if allow_raise {
                actions.push(PokerAction::Raise(bet_size));
            }
            actions
        } else {
            vec![PokerAction::Check, PokerAction::Bet(bet_size)]
        }
    }

    /// Apply an action, returning a fresh state with the action appended to
    /// the history, pot and bets updated, the active flag cleared on fold,
    /// and the round and player to act advanced once all active bets match.
    ///
    /// # Panics
    /// Panics when the action is inconsistent with the betting state; that
    /// is a programmer error in the caller, not a recoverable condition.
    pub fn apply_action(&self, action: &PokerAction, num_rounds: u8) -> TableState {
        let mut next = self.clone();
        let player = self.to_act;
        let owed = self.owed(player);

        match *action {
            PokerAction::Fold => {
                assert!(owed > 0, "fold with nothing owed");
                next.active[player] = false;
            }
            PokerAction::Check => {
                assert_eq!(owed, 0, "check while facing a bet");
            }
            PokerAction::Call => {
                assert!(owed > 0, "call with nothing owed");
                next.bets[player] += owed;
                next.pot += owed;
            }
            PokerAction::Bet(amount) => {
                assert_eq!(owed, 0, "bet while facing a bet");
                next.bets[player] += amount;
                next.pot += amount;
            }
            PokerAction::Raise(amount) => {
                assert!(owed > 0, "raise with nothing owed");
                let total = owed + amount;
                next.bets[player] += total;
                next.pot += total;
            }
        }
        next.history.push(action.code());

        if next.active_count() <= 1 {
            return next;
        }

        if next.round_closed() {
            if next.round < num_rounds - 1 {
                next.round += 1;
                next.history.push('/');
                next.to_act = next.first_active();
            }
            // Final round closed: terminal, to_act is left as is
        } else {
            next.to_act = next.next_active(player);
        }

        next
    }

    fn first_active(&self) -> usize {
        self.active
            .iter()
            .position(|&a| a)
            .expect("no active players")
    }

    fn next_active(&self, from: usize) -> usize {
        let n = self.num_players();
        let mut i = (from + 1) % n;
        while !self.active[i] {
            i = (i + 1) % n;
        }
        i
    }

    /// Terminal utility for `player` given each player's showdown strength.
    ///
    /// A lone survivor takes the pot; otherwise the strongest active hands
    /// split it. Everyone pays their own contribution.
    pub fn utility(&self, player: usize, strengths: &[u32]) -> f64 {
        let contribution = self.bets[player] as f64;

        if self.active_count() == 1 {
            return if self.active[player] {
                self.pot as f64 - contribution
            } else {
                -contribution
            };
        }

        if !self.active[player] {
            return -contribution;
        }

        let best = self
            .active
            .iter()
            .zip(strengths.iter())
            .filter(|(&a, _)| a)
            .map(|(_, &s)| s)
            .max()
            .expect("showdown with no active players");
        let winners = self
            .active
            .iter()
            .zip(strengths.iter())
            .filter(|(&a, &s)| a && s == best)
            .count();

        if strengths[player] == best {
            self.pot as f64 / winners as f64 - contribution
        } else {
            -contribution
        }
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pot:{} round:{} [{}]", self.pot, self.round, self.history)?;
        for (i, cards) in self.hole.iter().enumerate() {
            write!(f, " P{}:", i)?;
            for c in cards {
                write!(f, "{}", c)?;
            }
            if !self.active[i] {
                write!(f, "(folded)")?;
            }
        }
        if !self.board.is_empty() {
            write!(f, " board:")?;
            for c in &self.board {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// A player's view of a decision point: sorted private ranks, the public
/// action history, and the round. An exact abstraction, no bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableInfoState {
    /// Observing player.
    pub player: usize,
    /// That player's private card ranks, sorted ascending.
    pub ranks: Vec<u8>,
    /// Encoded public action history.
    pub history: String,
    /// Betting round.
    pub round: u8,
}

impl TableInfoState {
    /// Build the view of `state` from `player`'s seat.
    pub fn observe(state: &TableState, player: usize) -> Self {
        let mut ranks: Vec<u8> = state.hole[player].iter().map(|c| c.rank).collect();
        ranks.sort_unstable();
        Self {
            player,
            ranks,
            history: state.history.clone(),
            round: state.round,
        }
    }
}

impl InfoState for TableInfoState {
    fn key(&self) -> String {
        let cards: String = self
            .ranks
            .iter()
            .map(|&r| Card::new(r, 0).rank_char())
            .collect();
        format!("{}:{}:{}:{}", self.player, cards, self.history, self.round)
    }
}

impl fmt::Display for TableInfoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::card::{RANK_J, RANK_Q};

    fn two_player_state() -> TableState {
        TableState::new(
            vec![vec![Card::new(RANK_Q, 0)], vec![Card::new(RANK_J, 0)]],
            vec![],
            1,
        )
    }

    #[test]
    fn test_antes_posted() {
        let state = two_player_state();
        assert_eq!(state.pot, 2);
        assert_eq!(state.bets, vec![1, 1]);
        assert_eq!(state.active, vec![true, true]);
        assert_eq!(state.to_act, 0);
        assert!(!state.is_terminal(1));
    }

    #[test]
    fn test_check_check_closes_final_round() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Check, 1);
        assert!(!state.is_terminal(1), "one check does not close the round");
        assert_eq!(state.to_act, 1);

        let state = state.apply_action(&PokerAction::Check, 1);
        assert!(state.is_terminal(1));
        assert_eq!(state.history, "kk");
    }

    #[test]
    fn test_fold_clears_active_flag_and_ends_hand() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Bet(1), 1);
        assert_eq!(state.owed(1), 1);

        let state = state.apply_action(&PokerAction::Fold, 1);
        assert!(!state.active[1]);
        assert_eq!(state.active_count(), 1);
        assert!(state.is_terminal(1));
    }

    #[test]
    fn test_bet_call_updates_pot() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Bet(1), 1);
        assert_eq!(state.pot, 3);
        assert_eq!(state.bets, vec![2, 1]);

        let state = state.apply_action(&PokerAction::Call, 1);
        assert_eq!(state.pot, 4);
        assert_eq!(state.bets, vec![2, 2]);
        assert!(state.is_terminal(1));
    }

    #[test]
    fn test_round_advance_resets_segment() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Check, 2);
        let state = state.apply_action(&PokerAction::Check, 2);
        assert!(!state.is_terminal(2));
        assert_eq!(state.round, 1);
        assert_eq!(state.history, "kk/");
        assert_eq!(state.actions_this_round(), 0);
        assert_eq!(state.to_act, 0);
    }

    #[test]
    fn test_fold_first_when_facing_bet() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Bet(1), 1);
        let actions = state.legal_actions(1, false);
        assert_eq!(actions[0], PokerAction::Fold);
        assert_eq!(actions, vec![PokerAction::Fold, PokerAction::Call]);

        let open = two_player_state().legal_actions(1, false);
        assert_eq!(open, vec![PokerAction::Check, PokerAction::Bet(1)]);
    }

    #[test]
    fn test_utility_zero_sum_on_fold_and_showdown() {
        // Fold line: P0 bets, P1 folds
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Bet(1), 1);
        let state = state.apply_action(&PokerAction::Fold, 1);
        let strengths = [12, 11];
        assert_eq!(state.utility(0, &strengths), 1.0);
        assert_eq!(state.utility(1, &strengths), -1.0);

        // Showdown line: bet, call; Q beats J
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Bet(1), 1);
        let state = state.apply_action(&PokerAction::Call, 1);
        assert_eq!(state.utility(0, &strengths), 2.0);
        assert_eq!(state.utility(1, &strengths), -2.0);
    }

    #[test]
    fn test_tied_showdown_splits_pot() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Check, 1);
        let state = state.apply_action(&PokerAction::Check, 1);
        let strengths = [10, 10];
        assert_eq!(state.utility(0, &strengths), 0.0);
        assert_eq!(state.utility(1, &strengths), 0.0);
    }

    #[test]
    fn test_info_state_key_shape() {
        let state = two_player_state();
        let info = TableInfoState::observe(&state, 0);
        assert_eq!(info.key(), "0:Q::0");

        let state = state.apply_action(&PokerAction::Bet(1), 1);
        let info = TableInfoState::observe(&state, 1);
        assert_eq!(info.key(), "1:J:b:0");
    }

    #[test]
    #[should_panic(expected = "check while facing a bet")]
    fn test_illegal_check_fails_fast() {
        let state = two_player_state();
        let state = state.apply_action(&PokerAction::Bet(1), 1);
        state.apply_action(&PokerAction::Check, 1);
    }
}
