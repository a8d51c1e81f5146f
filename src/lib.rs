//! Generation engine for buffer-based commutator memorization drills.
//!
//! A *scheme* labels every sticker of a puzzle with a unique letter, grouped
//! into blocks of one physical piece each. Given a scheme and a distinguished
//! *buffer* letter, this crate synthesizes either a five-cycle drill (three
//! commutators that leave exactly one 5-cycle through the buffer, plus two
//! cleanup commutators) or an open-ended letter chain with no two consecutive
//! letters on the same piece.
//!
//! All generation is synchronous and stateless across calls; randomness is
//! injected through [`rng::RandomSource`] so searches can be driven
//! deterministically in tests.

#![warn(clippy::pedantic)]
#![allow(clippy::similar_names)]

pub mod chain;
pub mod five_cycle;
pub mod pairs;
pub mod presets;
pub mod rng;
pub mod scheme;
pub mod state;
pub mod tracer;

pub use chain::{ChainError, generate_piece_letters};
pub use five_cycle::{FiveCycle, FiveCycleError, FiveCycleRequest, generate_five_cycle};
pub use pairs::{PairError, ensure_pair, parse_required_pairs, validate_chain_pair};
pub use rng::RandomSource;
pub use scheme::{Scheme, SchemeError};
pub use state::{State, StateError};

/// An ordered letter pair, read as "shoot the sticker labeled `.0` to the
/// position of `.1`, through the buffer".
pub type Comm = (char, char);
