//! Required-pair validation and best-effort injection into chains.
//!
//! The five-cycle engine injects its forced pair during search (see
//! [`crate::five_cycle`]); chains instead get a post-processing adjustment
//! after generation. Both paths validate the requested pair before any
//! search runs.

use thiserror::Error;

use crate::Comm;
use crate::scheme::{Scheme, SchemeError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("Pair \"{0}\" must contain exactly two letters")]
    MalformedToken(String),
    #[error("Pair cannot repeat the same letter: {0}")]
    SameLetter(char),
    #[error("Pair letter {0} is not in the scheme")]
    LetterMissing(char),
    #[error("Pair letter {0} must be after the buffer piece")]
    NotUsable(char),
    #[error("Pair letters {0} and {1} cannot be on the same piece")]
    SameBlock(char, char),
    #[error(transparent)]
    Scheme(#[from] SchemeError),
}

/// Validate a pair for chain injection: distinct letters, both strictly
/// after the buffer, on different blocks.
///
/// # Errors
///
/// The violated rule, as a [`PairError`].
pub fn validate_chain_pair(scheme: &Scheme, buffer: char, pair: Comm) -> Result<(), PairError> {
    let (a, b) = pair;
    if a == b {
        return Err(PairError::SameLetter(a));
    }
    let buffer_index = scheme.buffer_block_index(buffer)?;
    let mut blocks = [0; 2];
    for (letter, slot) in [(a, 0), (b, 1)] {
        let meta = scheme
            .letter_meta(letter, buffer_index)
            .ok_or(PairError::LetterMissing(letter))?;
        if !meta.usable {
            return Err(PairError::NotUsable(letter));
        }
        blocks[slot] = meta.block;
    }
    if blocks[0] == blocks[1] {
        return Err(PairError::SameBlock(a, b));
    }
    Ok(())
}

/// Parse whitespace-separated two-letter pair tokens, validating each
/// against the chain rules and optionally expanding every pair with its
/// inverse.
///
/// # Errors
///
/// `MalformedToken` for tokens that are not exactly two letters, plus any
/// [`validate_chain_pair`] failure.
pub fn parse_required_pairs(
    text: &str,
    scheme: &Scheme,
    buffer: char,
    include_inverses: bool,
) -> Result<Vec<Comm>, PairError> {
    let mut pairs = vec![];
    for token in text.split_whitespace() {
        let letters: Vec<char> = token.chars().collect();
        let [a, b] = letters.as_slice() else {
            return Err(PairError::MalformedToken(token.to_string()));
        };
        validate_chain_pair(scheme, buffer, (*a, *b))?;
        pairs.push((*a, *b));
        if include_inverses {
            pairs.push((*b, *a));
        }
    }
    Ok(pairs)
}

/// Best-effort adjustment making the ordered pair adjacent in a generated
/// chain.
///
/// If the pair already occurs as cyclically adjacent elements the chain is
/// rotated to start at it. Otherwise the pair is spliced to the front, every
/// other occurrence of its letters is dropped, and the chain is truncated to
/// its original length. The splice path does not re-check block spacing
/// around the seam; it is a presentation guarantee, not a search constraint.
#[must_use]
pub fn ensure_pair(mut letters: Vec<char>, pair: Comm) -> Vec<char> {
    let (a, b) = pair;
    if letters.len() < 2 {
        return letters;
    }

    let adjacency = (0..letters.len())
        .find(|&idx| letters[idx] == a && letters[(idx + 1) % letters.len()] == b);
    if let Some(idx) = adjacency {
        letters.rotate_left(idx);
        return letters;
    }

    let original_len = letters.len();
    let mut adjusted = vec![a, b];
    adjusted.extend(letters.iter().copied().filter(|&l| l != a && l != b));
    adjusted.truncate(original_len);
    adjusted
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDGES: &str = "UV OI EZ AY KN JG WP BH SM DL CT RF";

    fn edges() -> Scheme {
        Scheme::parse(EDGES).unwrap()
    }

    #[test]
    fn validates_the_chain_pair_rules() {
        let scheme = edges();
        assert_eq!(validate_chain_pair(&scheme, 'U', ('O', 'E')), Ok(()));
        assert_eq!(
            validate_chain_pair(&scheme, 'U', ('O', 'O')),
            Err(PairError::SameLetter('O'))
        );
        assert_eq!(
            validate_chain_pair(&scheme, 'U', ('Q', 'E')),
            Err(PairError::LetterMissing('Q'))
        );
        assert_eq!(
            validate_chain_pair(&scheme, 'U', ('V', 'E')),
            Err(PairError::NotUsable('V'))
        );
        assert_eq!(
            validate_chain_pair(&scheme, 'U', ('O', 'I')),
            Err(PairError::SameBlock('O', 'I'))
        );
        assert_eq!(
            validate_chain_pair(&scheme, 'Q', ('O', 'E')),
            Err(PairError::Scheme(SchemeError::BufferNotFound('Q')))
        );
    }

    #[test]
    fn parses_pair_tokens_with_inverses() {
        let scheme = edges();
        let pairs = parse_required_pairs("OE AK", &scheme, 'U', true).unwrap();
        assert_eq!(
            pairs,
            vec![('O', 'E'), ('E', 'O'), ('A', 'K'), ('K', 'A')]
        );
        let pairs = parse_required_pairs("OE", &scheme, 'U', false).unwrap();
        assert_eq!(pairs, vec![('O', 'E')]);
        assert_eq!(
            parse_required_pairs("OEA", &scheme, 'U', false),
            Err(PairError::MalformedToken("OEA".to_string()))
        );
    }

    #[test]
    fn rotates_when_the_pair_is_already_cyclically_adjacent() {
        assert_eq!(
            ensure_pair(vec!['X', 'A', 'B', 'Y'], ('A', 'B')),
            vec!['A', 'B', 'Y', 'X']
        );
        // Wraparound adjacency counts.
        assert_eq!(
            ensure_pair(vec!['B', 'X', 'Y', 'A'], ('A', 'B')),
            vec!['A', 'B', 'X', 'Y']
        );
    }

    #[test]
    fn splices_and_truncates_when_the_pair_is_absent() {
        assert_eq!(
            ensure_pair(vec!['X', 'A', 'Y', 'Z'], ('A', 'B')),
            vec!['A', 'B', 'X', 'Y']
        );
        assert_eq!(
            ensure_pair(vec!['X'], ('A', 'B')),
            vec!['X']
        );
    }
}
