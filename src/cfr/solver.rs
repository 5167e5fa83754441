//! The CFR solver: training driver, vanilla traversal, strategy queries.
//!
//! The solver is generic over any game implementing the [`Game`] trait. It
//! owns the info set store, a monotonically increasing iteration counter and
//! a seeded RNG; nothing is shared process-wide, so independent solves over
//! different games compose side by side.

use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cfr::config::{SamplingScheme, SolverConfig, TrainingStats};
use crate::cfr::game::{Game, InfoState};
use crate::cfr::storage::{InfoSetRecord, InfoSetStore};

/// Self-play equilibrium solver for one game.
///
/// # Example
/// ```ignore
/// use toy_cfr_solver::cfr::{CfrSolver, SolverConfig};
///
/// let game = KuhnPoker::new();
/// let mut solver = CfrSolver::new(game, SolverConfig::default().with_seed(42));
/// solver.train(10_000);
/// let strategy = solver.strategy_for(&some_state, 0);
/// ```
pub struct CfrSolver<G: Game> {
    /// The game being solved.
    pub(crate) game: G,

    /// Solver configuration.
    config: SolverConfig,

    /// Accumulated regrets and strategy weights.
    pub(crate) store: InfoSetStore,

    /// Completed iteration count.
    iteration: u64,

    /// Training diagnostics.
    stats: TrainingStats,

    /// Process-local RNG for dealing and sampling.
    pub(crate) rng: StdRng,
}

impl<G: Game> CfrSolver<G> {
    /// Create a new solver for the given game.
    pub fn new(game: G, config: SolverConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            game,
            config,
            store: InfoSetStore::new(),
            iteration: 0,
            stats: TrainingStats::new(),
            rng,
        }
    }

    /// Create a solver with pre-allocated store capacity.
    pub fn with_capacity(game: G, config: SolverConfig, capacity: usize) -> Self {
        let mut solver = Self::new(game, config);
        solver.store = InfoSetStore::with_capacity(capacity);
        solver
    }

    /// Run a single self-play iteration.
    ///
    /// Draws one initial state (the chance move) and traverses it once per
    /// player as the regret-updating traverser, then increments the
    /// iteration counter once for the full sweep.
    pub fn run_iteration(&mut self) {
        let initial = self.game.initial_state(&mut self.rng);

        for traverser in 0..self.game.num_players() {
            let reach = vec![1.0; self.game.num_players()];
            match self.config.scheme {
                SamplingScheme::Vanilla => {
                    self.traverse_vanilla(&initial, traverser, reach);
                }
                SamplingScheme::ExternalSampling => {
                    self.traverse_external(&initial, traverser);
                }
                SamplingScheme::OutcomeSampling => {
                    self.traverse_outcome(&initial, traverser);
                }
            }
        }

        self.iteration += 1;
    }

    /// Train for a fixed number of iterations.
    ///
    /// Returns diagnostics only (iteration count, info set count, timing);
    /// strategic output comes from [`strategy_for`](Self::strategy_for).
    pub fn train(&mut self, iterations: u64) -> &TrainingStats {
        let start = Instant::now();

        for _ in 0..iterations {
            self.run_iteration();
        }

        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.store.len();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        self.stats.update_rate();

        info!(
            "trained {} iterations ({} scheme), {} info sets, {:.1} it/s",
            iterations,
            self.config.scheme.name(),
            self.stats.info_sets,
            self.stats.iterations_per_second
        );

        &self.stats
    }

    /// Train with a progress callback invoked every `callback_interval`
    /// iterations.
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &TrainingStats
    where
        F: FnMut(&TrainingStats),
    {
        let start = Instant::now();

        for i in 0..iterations {
            self.run_iteration();

            if (i + 1) % callback_interval == 0 {
                self.stats.iterations = self.iteration;
                self.stats.info_sets = self.store.len();
                self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
                self.stats.update_rate();
                callback(&self.stats);
            }
        }

        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.store.len();
        self.stats.elapsed_seconds = start.elapsed().as_secs_f64();
        self.stats.update_rate();

        &self.stats
    }

    /// Vanilla CFR traversal: full enumeration at every decision node.
    ///
    /// `reach` holds each player's probability of having played to this node
    /// under the current joint strategy. Regret updates at the traverser's
    /// nodes are weighted by the opponents' combined reach.
    fn traverse_vanilla(&mut self, state: &G::State, traverser: usize, reach: Vec<f64>) -> f64 {
        if self.game.is_terminal(state) {
            return self.game.utility(state, traverser);
        }

        let actions = self.legal_actions_checked(state);
        let player = self.game.current_player(state);
        let info_key = self.game.info_state(state, player).key();
        let strategy = self.store.current_strategy(&info_key, actions.len());

        if player == traverser {
            // Traverser: explore every action, compute counterfactual values
            let mut action_values = vec![0.0; actions.len()];
            for (i, action) in actions.iter().enumerate() {
                let next = self.game.apply(state, action);
                let mut next_reach = reach.clone();
                next_reach[traverser] *= strategy[i];
                action_values[i] = self.traverse_vanilla(&next, traverser, next_reach);
            }

            let node_value: f64 = strategy
                .iter()
                .zip(action_values.iter())
                .map(|(&s, &v)| s * v)
                .sum();

            let opponent_reach: f64 = reach
                .iter()
                .enumerate()
                .filter(|&(p, _)| p != traverser)
                .map(|(_, &r)| r)
                .product();

            for (i, &value) in action_values.iter().enumerate() {
                self.store
                    .update_regret(&info_key, i, opponent_reach * (value - node_value));
            }

            node_value
        } else {
            // Opponent: weighted sum over the strategy, no regret write
            let mut node_value = 0.0;
            for (i, action) in actions.iter().enumerate() {
                let next = self.game.apply(state, action);
                let mut next_reach = reach.clone();
                next_reach[player] *= strategy[i];
                node_value += strategy[i] * self.traverse_vanilla(&next, traverser, next_reach);
            }
            node_value
        }
    }

    /// Average strategy at a decision point, keyed by action.
    ///
    /// Creates the record on miss, so before any training this returns the
    /// uniform distribution over the legal actions, a designed cold-start
    /// property rather than an error. On a terminal state the map is empty and the
    /// caller must treat it as "stop recursion".
    pub fn strategy_for(&mut self, state: &G::State, player: usize) -> FxHashMap<G::Action, f64> {
        let actions = self.game.legal_actions(state);
        if actions.is_empty() {
            return FxHashMap::default();
        }

        let info_key = self.game.info_state(state, player).key();
        self.store.get_or_create(&info_key, actions.len());
        let probs = self.store.average_strategy(&info_key, actions.len());

        actions.into_iter().zip(probs).collect()
    }

    /// Average-strategy probability of one action at a decision point.
    ///
    /// # Panics
    /// Panics if `action` is not in the legal action set for `state`; asking
    /// about an illegal action is a caller error, not a zero.
    pub fn action_probability(
        &mut self,
        state: &G::State,
        player: usize,
        action: &G::Action,
    ) -> f64 {
        let strategy = self.strategy_for(state, player);
        match strategy.get(action) {
            Some(&p) => p,
            None => panic!("action {:?} is not legal in the queried state", action),
        }
    }

    /// Fetch legal actions and fail fast on a malformed game definition.
    pub(crate) fn legal_actions_checked(&self, state: &G::State) -> Vec<G::Action> {
        let actions = self.game.legal_actions(state);
        assert!(
            !actions.is_empty(),
            "game returned no legal actions for a non-terminal state"
        );
        actions
    }

    /// Completed iteration count.
    pub fn iteration_count(&self) -> u64 {
        self.iteration
    }

    /// Number of information sets discovered so far.
    pub fn infoset_count(&self) -> usize {
        self.store.len()
    }

    /// Latest training diagnostics.
    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Reference to the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Read access to the info set store.
    pub fn store(&self) -> &InfoSetStore {
        &self.store
    }

    /// Export solver state as plain serializable data.
    pub fn export_state(&self) -> SolverSnapshot {
        SolverSnapshot {
            iteration: self.iteration,
            records: self.store.export(),
            stats: self.stats.clone(),
        }
    }

    /// Restore solver state from a snapshot.
    pub fn import_state(&mut self, snapshot: SolverSnapshot) {
        debug!(
            "importing snapshot: {} iterations, {} info sets",
            snapshot.iteration,
            snapshot.records.len()
        );
        self.iteration = snapshot.iteration;
        self.store.import(snapshot.records);
        self.stats = snapshot.stats;
    }

    /// Discard all accumulated state.
    pub fn reset(&mut self) {
        self.store.clear();
        self.iteration = 0;
        self.stats = TrainingStats::new();
    }
}

/// Serializable solver state: iteration counter plus store records. Carries
/// no live resources, so persistence stays an external concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverSnapshot {
    /// Completed iteration count.
    pub iteration: u64,
    /// Info set records keyed by info state.
    pub records: FxHashMap<String, InfoSetRecord>,
    /// Diagnostics at export time.
    pub stats: TrainingStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnPoker;
    use crate::games::table::PokerAction;
    use rand::rngs::StdRng;

    fn dealt_root() -> (KuhnPoker, crate::games::table::TableState) {
        let game = KuhnPoker::new();
        let mut rng = StdRng::seed_from_u64(8);
        let root = game.initial_state(&mut rng);
        (game, root)
    }

    #[test]
    fn test_untrained_query_is_uniform() {
        let (game, root) = dealt_root();
        let mut solver = CfrSolver::new(game, SolverConfig::default().with_seed(0));

        let strategy = solver.strategy_for(&root, 0);
        assert_eq!(strategy.len(), 2);
        for (_, p) in strategy {
            assert!((p - 0.5).abs() < 1e-12);
        }
        // The query itself registers the decision point
        assert_eq!(solver.infoset_count(), 1);
    }

    #[test]
    fn test_terminal_query_is_empty_not_a_fault() {
        let (game, root) = dealt_root();
        let mut solver = CfrSolver::new(game.clone(), SolverConfig::default().with_seed(0));

        let s = game.apply(&root, &PokerAction::Bet(1));
        let s = game.apply(&s, &PokerAction::Fold);
        assert!(game.is_terminal(&s));
        assert!(solver.strategy_for(&s, 0).is_empty());
    }

    #[test]
    #[should_panic(expected = "not legal")]
    fn test_illegal_action_query_fails_fast() {
        let (game, root) = dealt_root();
        let mut solver = CfrSolver::new(game, SolverConfig::default().with_seed(0));
        // Fold is not legal at the opening decision point
        solver.action_probability(&root, 0, &PokerAction::Fold);
    }

    #[test]
    fn test_reset_discards_all_state() {
        let (game, _) = dealt_root();
        let mut solver = CfrSolver::new(game, SolverConfig::default().with_seed(3));
        solver.train(100);
        assert!(solver.infoset_count() > 0);

        solver.reset();
        assert_eq!(solver.iteration_count(), 0);
        assert_eq!(solver.infoset_count(), 0);
    }
}
