//! Counterfactual Regret Minimization engine.
//!
//! Generic implementation of the CFR algorithm family for computing Nash
//! equilibrium strategies in two-player zero-sum imperfect-information games.
//!
//! # Overview
//!
//! CFR is an iterative self-play algorithm:
//!
//! 1. Walk the game tree computing counterfactual values at every decision
//!    point the traversing player owns.
//! 2. Accumulate per-action regret and update the current strategy by regret
//!    matching.
//! 3. Average the per-visit strategies over time; the time average converges
//!    to equilibrium as O(1/sqrt(T)).
//!
//! # Supported traversal schemes
//!
//! - **Vanilla CFR**: full enumeration at every decision node.
//! - **External-sampling MCCFR**: samples opponent actions, enumerates the
//!   traverser's.
//! - **Outcome-sampling MCCFR**: samples a single path per visit with
//!   importance-weighted updates.
//!
//! # Usage
//!
//! Implement the [`Game`] trait for your game, create a [`CfrSolver`], call
//! [`CfrSolver::train`], then read strategies with
//! [`CfrSolver::strategy_for`].
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete
//!   Information" (2007)
//! - Lanctot, M., et al. "Monte Carlo Sampling for Regret Minimization in
//!   Extensive Games" (2009)

pub mod config;
pub mod game;
pub mod mccfr;
pub mod solver;
pub mod storage;

pub use config::{SamplingScheme, SolverConfig, TrainingStats};
pub use game::{Action, Game, GameState, InfoState};
pub use solver::{CfrSolver, SolverSnapshot};
pub use storage::{InfoSetRecord, InfoSetStore};
