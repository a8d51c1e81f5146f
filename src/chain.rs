//! Randomized letter chains with block-spacing constraints.
//!
//! A chain is assembled from randomized full passes ("cycles") over the
//! usable blocks: each pass consumes every remaining letter of every block,
//! never picking the same block twice in a row. Passes are rotated so their
//! seams do not create same-block adjacencies, concatenated until the
//! requested count is reached, and the whole result must close into a loop
//! (first and last letters on different blocks) for repeated drilling.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::rng::{self, RandomSource};
use crate::scheme::{Scheme, SchemeError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Requested count must be non-negative, got {0}")]
    InvalidCount(i64),
    #[error(transparent)]
    Scheme(#[from] SchemeError),
    #[error("No usable letters remain after applying the buffer")]
    NoUsableLetters,
    #[error("Not enough distinct blocks to satisfy spacing constraints")]
    InsufficientBlocks,
    #[error("Unable to satisfy block spacing constraints after {0} attempts")]
    SynthesisFailed(usize),
}

type Pick = (usize, char);

/// Generate `count` letters such that consecutive letters never share a
/// block, and (for `count > 1`) the first and last letters differ in block.
///
/// # Errors
///
/// Validation and structural-insufficiency errors before any search;
/// `SynthesisFailed` only once `max_attempts` is exhausted.
pub fn generate_piece_letters(
    count: i64,
    scheme_text: &str,
    buffer: char,
    max_attempts: usize,
    rng: &mut dyn RandomSource,
) -> Result<Vec<char>, ChainError> {
    if count < 0 {
        return Err(ChainError::InvalidCount(count));
    }
    if count == 0 {
        return Ok(vec![]);
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as usize;

    let scheme = Scheme::parse(scheme_text)?;
    let buffer_index = scheme.buffer_block_index(buffer)?;
    let usable = scheme.usable_blocks(buffer_index)?;

    // Candidate letters per usable block, with the buffer letter dropped.
    let templates: Vec<Vec<char>> = usable
        .iter()
        .map(|block| block.iter().copied().filter(|&l| l != buffer).collect())
        .filter(|letters: &Vec<char>| !letters.is_empty())
        .collect();
    if templates.is_empty() {
        return Err(ChainError::NoUsableLetters);
    }
    if count > 1 && templates.len() <= 1 {
        return Err(ChainError::InsufficientBlocks);
    }

    let letter_to_block: HashMap<char, usize> = templates
        .iter()
        .enumerate()
        .flat_map(|(idx, letters)| letters.iter().map(move |&l| (l, idx)))
        .collect();
    let letters_per_pass: usize = templates.iter().map(Vec::len).sum();

    let attempt_limit = max_attempts.max(1);

    for attempt in 1..=attempt_limit {
        let mut result: Vec<char> = Vec::with_capacity(count);
        let mut prev_block = None;
        let mut failed = false;

        'assemble: while result.len() < count {
            let mut cycle = None;
            for _ in 0..attempt_limit {
                let Some(candidate) = build_cycle(&templates, letters_per_pass, attempt_limit, rng)
                else {
                    continue;
                };
                let Some(adjusted) = rotate_for_previous(candidate, prev_block, rng) else {
                    continue;
                };
                cycle = Some(adjusted);
                break;
            }
            let Some(cycle) = cycle else {
                failed = true;
                break;
            };

            for (block, letter) in cycle {
                if result.len() == count {
                    break;
                }
                if prev_block == Some(block) {
                    failed = true;
                    break 'assemble;
                }
                result.push(letter);
                prev_block = Some(block);
            }
        }

        if failed || result.len() < count {
            debug!("chain attempt {attempt}/{attempt_limit} abandoned");
            continue;
        }

        if result.len() > 1 {
            let first = letter_to_block.get(&result[0]);
            let last = letter_to_block.get(&result[result.len() - 1]);
            match (first, last) {
                (Some(first), Some(last)) if first != last => {}
                _ => {
                    debug!("chain attempt {attempt}/{attempt_limit} failed to close the loop");
                    continue;
                }
            }
        }

        return Ok(result);
    }

    Err(ChainError::SynthesisFailed(attempt_limit))
}

/// One randomized full pass: one pick per remaining letter of every block,
/// no two consecutive picks on the same block. When the pass ends and its
/// endpoints share a block (a wraparound violation once passes are
/// concatenated), random internal rotations are tried to separate them.
fn build_cycle(
    templates: &[Vec<char>],
    letters_per_pass: usize,
    attempt_limit: usize,
    rng: &mut dyn RandomSource,
) -> Option<Vec<Pick>> {
    for _ in 0..attempt_limit {
        let mut working: Vec<Vec<char>> = templates.to_vec();
        for letters in &mut working {
            rng::shuffle(letters, rng);
        }

        let mut cycle: Vec<Pick> = Vec::with_capacity(letters_per_pass);
        let mut last_idx = None;
        let mut remaining = letters_per_pass;

        while remaining > 0 {
            let candidates: Vec<usize> = working
                .iter()
                .enumerate()
                .filter(|(idx, letters)| !letters.is_empty() && Some(*idx) != last_idx)
                .map(|(idx, _)| idx)
                .collect();
            let Some(&idx) = rng::choose(&candidates, rng) else {
                break;
            };
            let Some(letter) = working[idx].pop() else {
                break;
            };
            cycle.push((idx, letter));
            last_idx = Some(idx);
            remaining -= 1;
        }

        if remaining != 0 {
            continue;
        }

        if cycle.len() > 1 && cycle[0].0 == cycle[cycle.len() - 1].0 {
            let mut shifts: Vec<usize> = (1..cycle.len() - 1).collect();
            rng::shuffle(&mut shifts, rng);
            match shifts.into_iter().map(|shift| rotated(&cycle, shift)).find(
                |candidate| candidate[0].0 != candidate[candidate.len() - 1].0,
            ) {
                Some(adjusted) => return Some(adjusted),
                None => continue,
            }
        }

        return Some(cycle);
    }
    None
}

/// Rotate `cycle` so its first block differs from the previous pass's last
/// block while keeping its own endpoints apart.
fn rotate_for_previous(
    cycle: Vec<Pick>,
    prev_block: Option<usize>,
    rng: &mut dyn RandomSource,
) -> Option<Vec<Pick>> {
    let Some(prev_block) = prev_block else {
        return Some(cycle);
    };
    if cycle.len() == 1 {
        return if cycle[0].0 == prev_block {
            None
        } else {
            Some(cycle)
        };
    }

    let mut shifts: Vec<usize> = (0..cycle.len()).collect();
    rng::shuffle(&mut shifts, rng);
    shifts
        .into_iter()
        .map(|shift| rotated(&cycle, shift))
        .find(|candidate| {
            candidate[0].0 != prev_block && candidate[0].0 != candidate[candidate.len() - 1].0
        })
}

fn rotated(cycle: &[Pick], shift: usize) -> Vec<Pick> {
    let mut out = cycle.to_vec();
    out.rotate_left(shift);
    out
}
