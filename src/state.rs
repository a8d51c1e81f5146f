//! Simulated arrangement of pieces across block positions.
//!
//! `pieces[pos]` is the home block index of the piece currently occupying
//! position `pos` (always a bijection), and `oris[pos]` is the cyclic
//! rotation of that piece's stickers relative to its home labeling, kept in
//! `[0, block_len)`. A piece at `pos` with orientation `o` shows its home
//! side `(slot - o) mod block_len` at `slot`.

use thiserror::Error;

use crate::Comm;
use crate::scheme::{Scheme, SchemeError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The state holds no sticker with this label. Cannot happen for letters
    /// of a consistently constructed scheme; raised means a bug.
    #[error("Letter {0} not found in the current state")]
    LetterNotFound(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State<'s> {
    scheme: &'s Scheme,
    block_len: usize,
    pieces: Vec<usize>,
    oris: Vec<usize>,
}

impl<'s> State<'s> {
    /// The solved state: identity permutation, zero orientation everywhere.
    ///
    /// # Errors
    ///
    /// If the scheme's blocks do not share one length.
    pub fn solved(scheme: &'s Scheme) -> Result<Self, SchemeError> {
        let block_len = scheme.uniform_block_len()?;
        let n = scheme.blocks().len();
        Ok(Self {
            scheme,
            block_len,
            pieces: (0..n).collect(),
            oris: vec![0; n],
        })
    }

    #[must_use]
    pub fn scheme(&self) -> &'s Scheme {
        self.scheme
    }

    #[must_use]
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// The letter currently showing at `(pos, slot)`.
    #[must_use]
    pub fn letter_at_slot(&self, pos: usize, slot: usize) -> char {
        let piece = self.pieces[pos];
        let side = (slot + self.block_len - self.oris[pos]) % self.block_len;
        self.scheme.blocks()[piece][side]
    }

    /// Linear scan for the slot currently displaying `letter`.
    ///
    /// # Errors
    ///
    /// `LetterNotFound` if no slot shows the letter.
    pub fn locate(&self, letter: char) -> Result<(usize, usize), StateError> {
        for pos in 0..self.pieces.len() {
            for slot in 0..self.block_len {
                if self.letter_at_slot(pos, slot) == letter {
                    return Ok((pos, slot));
                }
            }
        }
        Err(StateError::LetterNotFound(letter))
    }

    /// Exchange the pieces occupying the current slots of `a` and `b`,
    /// recomputing both orientations so each sticker is addressable at its
    /// new slot. Self-inverse.
    ///
    /// # Errors
    ///
    /// `LetterNotFound` if either letter is not displayed anywhere.
    pub fn swap(&mut self, a: char, b: char) -> Result<(), StateError> {
        let (pos_a, slot_a) = self.locate(a)?;
        let (pos_b, slot_b) = self.locate(b)?;

        let piece_a = self.pieces[pos_a];
        let piece_b = self.pieces[pos_b];
        let len = self.block_len;
        let side_a = (slot_a + len - self.oris[pos_a]) % len;
        let side_b = (slot_b + len - self.oris[pos_b]) % len;

        self.pieces[pos_a] = piece_b;
        self.pieces[pos_b] = piece_a;
        self.oris[pos_a] = (slot_a + len - side_b) % len;
        self.oris[pos_b] = (slot_b + len - side_a) % len;
        Ok(())
    }

    /// Two-swap decomposition of one commutator targeting the buffer:
    /// `swap(y, x)` then `swap(buffer, y)`. Order matters.
    ///
    /// # Errors
    ///
    /// `LetterNotFound` if any involved letter is not displayed.
    pub fn apply_three_cycle(&mut self, buffer: char, x: char, y: char) -> Result<(), StateError> {
        self.swap(y, x)?;
        self.swap(buffer, y)
    }

    /// Apply the commutator `(a, b)` through the buffer: shoot the sticker
    /// labeled `a` to the position of `b`.
    ///
    /// # Errors
    ///
    /// `LetterNotFound` if any involved letter is not displayed.
    pub fn apply_comm(&mut self, buffer: char, comm: Comm) -> Result<(), StateError> {
        self.apply_three_cycle(buffer, comm.1, comm.0)
    }

    /// The letter currently occupying `letter`'s home slot: the induced
    /// successor mapping used by the tracer.
    ///
    /// # Errors
    ///
    /// `LetterNotFound` if the letter is not part of the scheme.
    pub fn letter_at_home(&self, letter: char) -> Result<char, StateError> {
        let home = self
            .scheme
            .letter_ref(letter)
            .ok_or(StateError::LetterNotFound(letter))?;
        Ok(self.letter_at_slot(home.block, home.slot))
    }
}
