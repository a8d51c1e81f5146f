//! Randomized synthesis of a three-commutator five-cycle drill.
//!
//! Each attempt draws four usable pieces, commits a random non-buffer target
//! sticker to each, stitches the two resulting commutators together with a
//! third, and keeps the draw only if simulating all three from a solved
//! state leaves a clean 5-cycle through the buffer. Two deterministic
//! cleanup commutators read off the trace then close the drill: applying
//! all five returns the state to the buffer fixed point, and any cyclic
//! rotation of the sequence preserves that (rotations are conjugates of the
//! identity), so the presentation offset is chosen at random.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::Comm;
use crate::rng::{self, RandomSource};
use crate::scheme::{Scheme, SchemeError};
use crate::state::{State, StateError};
use crate::tracer::{self, DEFAULT_MAX_STEPS};

pub const DEFAULT_MAX_ATTEMPTS: usize = 5000;

#[derive(Clone, Debug)]
pub struct FiveCycleRequest<'a> {
    pub scheme: &'a str,
    pub buffer: char,
    pub max_attempts: usize,
    pub randomize_orientation: bool,
    pub forced_pair: Option<Comm>,
}

impl<'a> FiveCycleRequest<'a> {
    #[must_use]
    pub fn new(scheme: &'a str, buffer: char) -> Self {
        Self {
            scheme,
            buffer,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            randomize_orientation: true,
            forced_pair: None,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// When disabled, the third commutator reuses the target stickers
    /// already committed to its two pieces, keeping orientations consistent
    /// across the stitched commutators.
    #[must_use]
    pub fn with_randomize_orientation(mut self, randomize_orientation: bool) -> Self {
        self.randomize_orientation = randomize_orientation;
        self
    }

    /// Guarantee that this letter pair appears as one of the three synthesis
    /// commutators.
    #[must_use]
    pub fn with_forced_pair(mut self, pair: Comm) -> Self {
        self.forced_pair = Some(pair);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiveCycle {
    /// The four selected pieces, as their scheme block strings.
    pub selected_pieces: Vec<String>,
    /// Three synthesis commutators, two cleanup commutators, cyclically
    /// rotated by a random presentation offset.
    pub comm_sequence: Vec<Comm>,
    /// The accepted buffer trace after the three synthesis commutators.
    pub trace: Vec<char>,
}

/// What a rejected attempt looked like, kept for the exhaustion error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptDiagnostic {
    pub selected_pieces: Vec<String>,
    pub comms: [Comm; 3],
    pub trace: Vec<char>,
}

impl fmt::Display for AttemptDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pieces={} comms=", self.selected_pieces.join(","))?;
        for (i, (a, b)) in self.comms.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{a}{b}")?;
        }
        write!(f, " trace=")?;
        for (i, letter) in self.trace.iter().enumerate() {
            if i > 0 {
                write!(f, "->")?;
            }
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FiveCycleError {
    #[error(transparent)]
    Scheme(#[from] SchemeError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Forced pair letters must be distinct")]
    ForcedPairNotDistinct,
    #[error("Forced pair letter {0} not present in the scheme")]
    ForcedPairLetterMissing(char),
    #[error("Forced pair letter {0} must be strictly after the buffer piece")]
    ForcedPairBeforeBuffer(char),
    #[error("Need at least four usable pieces after the buffer, found {0}")]
    NotEnoughPieces(usize),
    #[error("Not enough non-forced usable pieces remain, found {0}")]
    InsufficientPieces(usize),
    #[error("No usable target stickers remain in block {0}")]
    NoTargetStickers(String),
    #[error("Failed to leave a five-cycle after {attempts} attempts; last attempt: {last}")]
    SynthesisFailed {
        attempts: usize,
        last: AttemptDiagnostic,
    },
}

/// Synthesize a five-cycle drill: three synthesis commutators, two cleanup
/// commutators, randomly rotated for presentation.
///
/// # Errors
///
/// Validation and structural-insufficiency errors are reported before any
/// search; `SynthesisFailed` only once `max_attempts` is exhausted.
pub fn generate_five_cycle(
    request: &FiveCycleRequest,
    rng: &mut dyn RandomSource,
) -> Result<FiveCycle, FiveCycleError> {
    let mut result = synthesize(request, rng)?;
    let offset = rng::index(result.comm_sequence.len(), rng);
    result.comm_sequence.rotate_left(offset);
    Ok(result)
}

/// Like [`generate_five_cycle`] but without the random presentation
/// rotation: the three synthesis commutators come first, in order.
///
/// # Errors
///
/// See [`generate_five_cycle`].
pub fn synthesize(
    request: &FiveCycleRequest,
    rng: &mut dyn RandomSource,
) -> Result<FiveCycle, FiveCycleError> {
    let scheme = Scheme::parse(request.scheme)?;
    scheme.uniform_block_len()?;
    let buffer = request.buffer;
    let buffer_index = scheme.buffer_block_index(buffer)?;
    let usable = scheme.usable_indices(buffer_index)?;

    if usable.len() < 4 {
        return Err(FiveCycleError::NotEnoughPieces(usable.len()));
    }

    // Forced pair letters resolve to their pieces up front; the non-forced
    // pool is fixed across attempts, so its size is a precondition, not a
    // per-attempt outcome.
    let forced = match request.forced_pair {
        Some((a, b)) => {
            if a == b {
                return Err(FiveCycleError::ForcedPairNotDistinct);
            }
            let mut blocks = [0; 2];
            for (letter, slot) in [(a, 0), (b, 1)] {
                let meta = scheme
                    .letter_meta(letter, buffer_index)
                    .ok_or(FiveCycleError::ForcedPairLetterMissing(letter))?;
                if !meta.usable {
                    return Err(FiveCycleError::ForcedPairBeforeBuffer(letter));
                }
                blocks[slot] = meta.block;
            }
            let pool: Vec<usize> = usable
                .iter()
                .copied()
                .filter(|&piece| piece != blocks[0] && piece != blocks[1])
                .collect();
            if pool.len() < 2 {
                return Err(FiveCycleError::InsufficientPieces(pool.len()));
            }
            Some(((a, b), blocks, pool))
        }
        None => None,
    };

    let attempts = request.max_attempts.max(1);
    let mut last = None;

    for attempt in 1..=attempts {
        let mut committed: HashMap<usize, char> = HashMap::new();
        let commit = |committed: &mut HashMap<usize, char>, pieces: (usize, usize), pair: Comm| {
            committed.insert(pieces.0, pair.0);
            committed.insert(pieces.1, pair.1);
            pair
        };

        let (piece_i, piece_j, piece_k, piece_l, comm1, comm2) = match &forced {
            Some((pair, blocks, pool)) => {
                let extras = rng::sample(pool, 2, rng);
                if rng::coin_flip(rng) {
                    let comm1 = commit(&mut committed, (blocks[0], blocks[1]), *pair);
                    let comm2 = commit(
                        &mut committed,
                        (extras[0], extras[1]),
                        random_pair(&scheme, extras[0], extras[1], buffer, rng)?,
                    );
                    (blocks[0], blocks[1], extras[0], extras[1], comm1, comm2)
                } else {
                    let comm1 = commit(
                        &mut committed,
                        (extras[0], extras[1]),
                        random_pair(&scheme, extras[0], extras[1], buffer, rng)?,
                    );
                    let comm2 = commit(&mut committed, (blocks[0], blocks[1]), *pair);
                    (extras[0], extras[1], blocks[0], blocks[1], comm1, comm2)
                }
            }
            None => {
                let selected = rng::sample(&usable, 4, rng);
                let comm1 = commit(
                    &mut committed,
                    (selected[0], selected[1]),
                    random_pair(&scheme, selected[0], selected[1], buffer, rng)?,
                );
                let comm2 = commit(
                    &mut committed,
                    (selected[2], selected[3]),
                    random_pair(&scheme, selected[2], selected[3], buffer, rng)?,
                );
                (
                    selected[0], selected[1], selected[2], selected[3], comm1, comm2,
                )
            }
        };

        // Third commutator links J with either K or L.
        let third_pieces = if rng::coin_flip(rng) {
            (piece_j, piece_k)
        } else {
            (piece_j, piece_l)
        };
        let comm3 = if request.randomize_orientation {
            random_pair(&scheme, third_pieces.0, third_pieces.1, buffer, rng)?
        } else {
            match (
                committed.get(&third_pieces.0),
                committed.get(&third_pieces.1),
            ) {
                (Some(&a), Some(&b)) => (a, b),
                _ => random_pair(&scheme, third_pieces.0, third_pieces.1, buffer, rng)?,
            }
        };

        let comms = [comm1, comm2, comm3];
        let selected_pieces: Vec<String> = [piece_i, piece_j, piece_k, piece_l]
            .iter()
            .map(|&piece| scheme.block_string(piece))
            .collect();

        let mut state = State::solved(&scheme)?;
        for comm in comms {
            state.apply_comm(buffer, comm)?;
        }
        let trace = tracer::trace_from_buffer(&state, buffer, DEFAULT_MAX_STEPS)?;

        if tracer::is_buffer_five_cycle(&trace, buffer) {
            let cleanup = [(trace[4], trace[3]), (trace[2], trace[1])];
            return Ok(FiveCycle {
                selected_pieces,
                comm_sequence: comms.into_iter().chain(cleanup).collect(),
                trace,
            });
        }

        let diagnostic = AttemptDiagnostic {
            selected_pieces,
            comms,
            trace,
        };
        debug!("attempt {attempt}/{attempts} rejected: {diagnostic}");
        last = Some(diagnostic);
    }

    Err(FiveCycleError::SynthesisFailed {
        attempts,
        last: last.expect("at least one attempt to have run"),
    })
}

/// A random non-buffer target sticker for each of two pieces.
fn random_pair(
    scheme: &Scheme,
    block_a: usize,
    block_b: usize,
    buffer: char,
    rng: &mut dyn RandomSource,
) -> Result<Comm, FiveCycleError> {
    Ok((
        random_target(scheme, block_a, buffer, rng)?,
        random_target(scheme, block_b, buffer, rng)?,
    ))
}

fn random_target(
    scheme: &Scheme,
    block: usize,
    buffer: char,
    rng: &mut dyn RandomSource,
) -> Result<char, FiveCycleError> {
    let candidates: Vec<char> = scheme.blocks()[block]
        .iter()
        .copied()
        .filter(|&letter| letter != buffer)
        .collect();
    rng::choose(&candidates, rng)
        .copied()
        .ok_or_else(|| FiveCycleError::NoTargetStickers(scheme.block_string(block)))
}
