//! Letter scheme parsing and lookups.
//!
//! A scheme is an ordered sequence of blocks, one block per physical piece,
//! one letter per orientation of that piece. Letters are globally unique.
//! Both synthesizers share this model so their validation rules cannot
//! diverge.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    #[error("The scheme must include at least one block")]
    EmptyScheme,
    #[error("Blocks cannot be empty")]
    EmptyBlock,
    #[error("Duplicate letter in scheme: {0}")]
    DuplicateLetter(char),
    #[error("All blocks must share one length, expected {expected} letters but block {block} has {actual}")]
    InconsistentBlockLength {
        block: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Buffer letter {0} not found in the scheme")]
    BufferNotFound(char),
    #[error("No pieces remain after trimming with the buffer")]
    NoUsablePieces,
}

/// The fixed home position of a letter, assigned at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterRef {
    pub block: usize,
    pub slot: usize,
}

/// Letter metadata relative to a chosen buffer block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterMeta {
    pub block: usize,
    pub usable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scheme {
    blocks: Vec<Vec<char>>,
    refs: HashMap<char, LetterRef>,
}

impl Scheme {
    /// Parse scheme text in either space-grouped block notation (`"UV OI EZ"`)
    /// or flat single-token notation (`"UVOIEZ"`, split into one-letter
    /// blocks).
    ///
    /// # Errors
    ///
    /// If the text produces no blocks or a letter recurs across blocks.
    pub fn parse(text: &str) -> Result<Self, SchemeError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let blocks: Vec<Vec<char>> = if let [token] = tokens.as_slice()
            && token.chars().count() > 1
        {
            token.chars().map(|ch| vec![ch]).collect()
        } else {
            tokens.iter().map(|token| token.chars().collect()).collect()
        };

        Self::from_blocks(blocks)
    }

    /// Build a scheme from pre-split blocks.
    ///
    /// # Errors
    ///
    /// If there are no blocks, a block is empty, or a letter recurs.
    pub fn from_blocks(blocks: Vec<Vec<char>>) -> Result<Self, SchemeError> {
        if blocks.is_empty() {
            return Err(SchemeError::EmptyScheme);
        }

        let mut refs = HashMap::new();
        for (block, letters) in blocks.iter().enumerate() {
            if letters.is_empty() {
                return Err(SchemeError::EmptyBlock);
            }
            for (slot, &letter) in letters.iter().enumerate() {
                if refs.insert(letter, LetterRef { block, slot }).is_some() {
                    return Err(SchemeError::DuplicateLetter(letter));
                }
            }
        }

        Ok(Self { blocks, refs })
    }

    #[must_use]
    pub fn blocks(&self) -> &[Vec<char>] {
        &self.blocks
    }

    /// The common block length, required by the five-cycle engine.
    ///
    /// # Errors
    ///
    /// If block lengths differ.
    pub fn uniform_block_len(&self) -> Result<usize, SchemeError> {
        let expected = self.blocks[0].len();
        for (block, letters) in self.blocks.iter().enumerate() {
            if letters.len() != expected {
                return Err(SchemeError::InconsistentBlockLength {
                    block,
                    expected,
                    actual: letters.len(),
                });
            }
        }
        Ok(expected)
    }

    #[must_use]
    pub fn letter_ref(&self, letter: char) -> Option<LetterRef> {
        self.refs.get(&letter).copied()
    }

    /// Index of the block containing `letter`.
    ///
    /// # Errors
    ///
    /// `BufferNotFound` if the letter is not part of the scheme.
    pub fn buffer_block_index(&self, letter: char) -> Result<usize, SchemeError> {
        self.letter_ref(letter)
            .map(|r| r.block)
            .ok_or(SchemeError::BufferNotFound(letter))
    }

    /// Blocks strictly after the buffer's block, the only ones that
    /// participate in generation.
    ///
    /// # Errors
    ///
    /// `NoUsablePieces` if nothing remains after the buffer.
    pub fn usable_blocks(&self, buffer_index: usize) -> Result<&[Vec<char>], SchemeError> {
        let trimmed = self.blocks.get(buffer_index + 1..).unwrap_or(&[]);
        if trimmed.is_empty() {
            return Err(SchemeError::NoUsablePieces);
        }
        Ok(trimmed)
    }

    /// Global indices of the usable blocks.
    ///
    /// # Errors
    ///
    /// `NoUsablePieces` if nothing remains after the buffer.
    pub fn usable_indices(&self, buffer_index: usize) -> Result<Vec<usize>, SchemeError> {
        self.usable_blocks(buffer_index)
            .map(|trimmed| (buffer_index + 1..buffer_index + 1 + trimmed.len()).collect())
    }

    /// Where `letter` lives and whether it sits strictly after the buffer.
    #[must_use]
    pub fn letter_meta(&self, letter: char, buffer_index: usize) -> Option<LetterMeta> {
        self.letter_ref(letter).map(|r| LetterMeta {
            block: r.block,
            usable: r.block > buffer_index,
        })
    }

    /// Render a block back to its scheme text form.
    #[must_use]
    pub fn block_string(&self, block: usize) -> String {
        self.blocks[block].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_grouped_blocks() {
        let scheme = Scheme::parse("UV OI EZ").unwrap();
        assert_eq!(scheme.blocks().len(), 3);
        assert_eq!(scheme.letter_ref('Z'), Some(LetterRef { block: 2, slot: 1 }));
    }

    #[test]
    fn parses_flat_notation_into_singleton_blocks() {
        let scheme = Scheme::parse("OABC").unwrap();
        assert_eq!(scheme.blocks().len(), 4);
        assert!(scheme.blocks().iter().all(|block| block.len() == 1));
        assert_eq!(scheme.uniform_block_len().unwrap(), 1);
    }

    #[test]
    fn rejects_empty_and_duplicate_schemes() {
        assert_eq!(Scheme::parse("   "), Err(SchemeError::EmptyScheme));
        assert_eq!(
            Scheme::parse("AB CA"),
            Err(SchemeError::DuplicateLetter('A'))
        );
    }

    #[test]
    fn rejects_mixed_block_lengths_only_when_uniformity_is_required() {
        let scheme = Scheme::parse("AB C DE").unwrap();
        assert_eq!(
            scheme.uniform_block_len(),
            Err(SchemeError::InconsistentBlockLength {
                block: 1,
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn usable_blocks_exclude_the_buffer_and_everything_before_it() {
        let scheme = Scheme::parse("UV OI EZ AY").unwrap();
        let buffer_index = scheme.buffer_block_index('O').unwrap();
        let usable = scheme.usable_blocks(buffer_index).unwrap();
        assert_eq!(usable.len(), scheme.blocks().len() - buffer_index - 1);
        assert_eq!(scheme.usable_indices(buffer_index).unwrap(), vec![2, 3]);
        assert_eq!(
            scheme.usable_blocks(3),
            Err(SchemeError::NoUsablePieces)
        );
    }

    #[test]
    fn letter_meta_tracks_usability() {
        let scheme = Scheme::parse("UV OI EZ").unwrap();
        assert_eq!(
            scheme.letter_meta('Z', 0),
            Some(LetterMeta {
                block: 2,
                usable: true
            })
        );
        assert_eq!(
            scheme.letter_meta('U', 0),
            Some(LetterMeta {
                block: 0,
                usable: false
            })
        );
        assert_eq!(scheme.letter_meta('Q', 0), None);
    }
}
