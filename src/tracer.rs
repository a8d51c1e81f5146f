//! Cycle tracing over a simulated state.

use itertools::Itertools;

use crate::state::{State, StateError};

pub const DEFAULT_MAX_STEPS: usize = 200;

/// Follow the induced successor mapping from `buffer` until the buffer
/// reappears or `max_steps` is exhausted.
///
/// A closed trace ends with the buffer (`[buffer, x1, .., buffer]`); a trace
/// cut off by `max_steps` does not, which callers treat as "not a clean
/// cycle" rather than a fatal condition.
///
/// # Errors
///
/// `LetterNotFound` if tracing walks off the scheme, which indicates an
/// inconsistently built state.
pub fn trace_from_buffer(
    state: &State,
    buffer: char,
    max_steps: usize,
) -> Result<Vec<char>, StateError> {
    let mut cycle = vec![buffer];
    let mut current = buffer;
    for _ in 0..max_steps {
        let next = state.letter_at_home(current)?;
        cycle.push(next);
        if next == buffer {
            break;
        }
        current = next;
    }
    Ok(cycle)
}

/// True iff `trace` is a genuine 5-cycle through the buffer: exactly 6
/// entries, buffer at both ends, and 5 pairwise distinct interior letters.
#[must_use]
pub fn is_buffer_five_cycle(trace: &[char], buffer: char) -> bool {
    trace.len() == 6
        && trace[0] == buffer
        && trace[5] == buffer
        && trace[1..5].iter().all_unique()
}

/// Decompose the whole sticker permutation into disjoint cycles relative to
/// the solved reference, in scheme order. Fixed stickers are omitted; each
/// returned cycle is closed (`first == last`), matching the trace form.
///
/// # Errors
///
/// `LetterNotFound` on an inconsistently built state.
pub fn disjoint_cycles(state: &State) -> Result<Vec<Vec<char>>, StateError> {
    let mut seen = std::collections::HashSet::new();
    let mut cycles = vec![];

    for block in state.scheme().blocks() {
        for &start in block {
            if seen.contains(&start) {
                continue;
            }
            let mut cycle = vec![start];
            let mut current = start;
            loop {
                let next = state.letter_at_home(current)?;
                cycle.push(next);
                seen.insert(current);
                if next == start {
                    break;
                }
                current = next;
            }
            if cycle.len() > 2 {
                cycles.push(cycle);
            }
        }
    }

    Ok(cycles)
}
