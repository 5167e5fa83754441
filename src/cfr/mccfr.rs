//! Monte Carlo CFR traversals.
//!
//! Two sampling variants share the vanilla engine's read path (regret
//! matching, average strategy) but differ in how much of the tree they
//! enumerate per visit:
//!
//! - **External sampling** keeps the traverser's nodes fully enumerated and
//!   samples a single action at opponent nodes. Sampling from the opponent's
//!   own strategy is an unbiased estimate of their expectation, so no
//!   importance weighting is needed.
//! - **Outcome sampling** walks a single path through the whole tree and
//!   importance-weights the traverser's regret update by the sampled action's
//!   probability. Cheapest per iteration, highest per-sample variance.

use rand::Rng;

use crate::cfr::game::{Game, InfoState};
use crate::cfr::solver::CfrSolver;

impl<G: Game> CfrSolver<G> {
    /// External-sampling traversal.
    pub(crate) fn traverse_external(&mut self, state: &G::State, traverser: usize) -> f64 {
        if self.game.is_terminal(state) {
            return self.game.utility(state, traverser);
        }

        let actions = self.legal_actions_checked(state);
        let player = self.game.current_player(state);
        let info_key = self.game.info_state(state, player).key();
        let strategy = self.store.current_strategy(&info_key, actions.len());

        if player == traverser {
            // Traverser: full enumeration and regret update, as in vanilla
            let mut action_values = vec![0.0; actions.len()];
            for (i, action) in actions.iter().enumerate() {
                let next = self.game.apply(state, action);
                action_values[i] = self.traverse_external(&next, traverser);
            }

            let node_value: f64 = strategy
                .iter()
                .zip(action_values.iter())
                .map(|(&s, &v)| s * v)
                .sum();

            for (i, &value) in action_values.iter().enumerate() {
                self.store.update_regret(&info_key, i, value - node_value);
            }

            node_value
        } else {
            // Opponent: sample one action from the current strategy
            let sampled = self.sample_index(&strategy);
            let next = self.game.apply(state, &actions[sampled]);
            self.traverse_external(&next, traverser)
        }
    }

    /// Outcome-sampling traversal: one sampled action at every node.
    pub(crate) fn traverse_outcome(&mut self, state: &G::State, traverser: usize) -> f64 {
        if self.game.is_terminal(state) {
            return self.game.utility(state, traverser);
        }

        let actions = self.legal_actions_checked(state);
        let player = self.game.current_player(state);
        let info_key = self.game.info_state(state, player).key();
        let strategy = self.store.current_strategy(&info_key, actions.len());

        let sampled = self.sample_index(&strategy);
        let next = self.game.apply(state, &actions[sampled]);
        let value = self.traverse_outcome(&next, traverser);

        if player == traverser {
            // Importance-weighted update. The sampled probability is positive
            // by construction: regret matching always yields a full
            // distribution and sampling never lands on a zero-mass action.
            let p = strategy[sampled];
            self.store
                .update_regret(&info_key, sampled, value * (1.0 - p) / p);
            for i in 0..actions.len() {
                if i != sampled {
                    self.store.update_regret(&info_key, i, -value);
                }
            }
        }

        value
    }

    /// Sample an action index from a probability distribution.
    pub(crate) fn sample_index(&mut self, strategy: &[f64]) -> usize {
        let r: f64 = self.rng.gen();
        let mut cumsum = 0.0;

        for (i, &prob) in strategy.iter().enumerate() {
            cumsum += prob;
            if r < cumsum {
                return i;
            }
        }

        // Floating-point shortfall in the cumulative sum: take the last
        // action that actually carries probability mass.
        strategy
            .iter()
            .rposition(|&p| p > 0.0)
            .unwrap_or(strategy.len() - 1)
    }
}
