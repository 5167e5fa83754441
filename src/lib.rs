//! # toy-cfr-solver
//!
//! A self-play equilibrium-finding engine for small imperfect-information
//! poker variants, implementing vanilla Counterfactual Regret Minimization
//! and two Monte Carlo CFR sampling variants.
//!
//! ## Quick start
//!
//! ```
//! use toy_cfr_solver::cfr::{CfrSolver, SolverConfig};
//! use toy_cfr_solver::games::kuhn::KuhnPoker;
//!
//! let mut solver = CfrSolver::new(KuhnPoker::new(), SolverConfig::default().with_seed(42));
//! solver.train(1_000);
//! assert!(solver.infoset_count() > 0);
//! ```
//!
//! ## Modules
//!
//! - [`cfr`]: the generic engine: game traits, info set store, regret
//!   matching, vanilla CFR and the MCCFR traversals.
//! - [`games`]: Kuhn poker and a simplified heads-up hold'em.

#![warn(missing_docs)]

pub mod cfr;
pub mod games;

pub use cfr::{
    Action, CfrSolver, Game, GameState, InfoSetStore, InfoState, SamplingScheme, SolverConfig,
    SolverSnapshot, TrainingStats,
};
