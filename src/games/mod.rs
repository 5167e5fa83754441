//! Game implementations for the CFR engine.
//!
//! Both games share the [`table`] betting mechanics and the exact
//! information-state abstraction; they differ in dealing, bet sizing and
//! showdown strength.
//!
//! - [`kuhn`]: 3-card Kuhn poker, the standard CFR validation game with a
//!   known equilibrium.
//! - [`holdem`]: simplified heads-up hold'em with a reduced 20-card deck,
//!   two betting rounds and fixed bet sizes.

pub mod card;
pub mod holdem;
pub mod kuhn;
pub mod table;
