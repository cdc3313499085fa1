//! The plugboard (Steckerbrett).

use crate::config::PlugboardConnection;
use crate::error::ConfigurationError;
use crate::wiring::{ALPHABET_SIZE, index_letter, letter_index};

/// A symmetric partial permutation of the alphabet.
///
/// Unplugged letters map to themselves, so a swap applied twice is always the
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugboard {
    map: [u8; 26],
}

impl Default for Plugboard {
    fn default() -> Self {
        let mut map = [0u8; 26];
        for (i, slot) in (0..ALPHABET_SIZE).zip(map.iter_mut()) {
            *slot = i;
        }
        Self { map }
    }
}

impl Plugboard {
    /// Expands connections into a two-way lookup.
    ///
    /// Listing the same pair twice is harmless; wiring a letter to a second,
    /// different partner is not.
    ///
    /// # Errors
    ///
    /// Fails on non-letters, self-connections and letters connected twice.
    pub fn from_connections(connections: &[PlugboardConnection]) -> Result<Self, ConfigurationError> {
        let mut board = Self::default();
        for conn in connections {
            let a = plug_index(conn.from)?;
            let b = plug_index(conn.to)?;
            if a == b {
                return Err(ConfigurationError::SelfConnection(index_letter(a)));
            }
            board.connect(a, b)?;
            board.connect(b, a)?;
        }
        Ok(board)
    }

    fn connect(&mut self, letter: u8, partner: u8) -> Result<(), ConfigurationError> {
        let existing = self.map[usize::from(letter)];
        if existing != letter && existing != partner {
            return Err(ConfigurationError::LetterAlreadyConnected {
                letter: index_letter(letter),
                existing: index_letter(existing),
                requested: index_letter(partner),
            });
        }
        self.map[usize::from(letter)] = partner;
        Ok(())
    }

    /// Partner of the letter at `index`, or `index` itself when unplugged.
    #[must_use]
    pub const fn swap(&self, index: u8) -> u8 {
        self.map[index as usize]
    }

    /// Letter-level [`swap`](Self::swap); non-letters pass through.
    #[must_use]
    pub fn swap_letter(&self, letter: char) -> char {
        letter_index(letter).map_or(letter, |i| index_letter(self.swap(i)))
    }

    /// Each connected pair once, earlier letter first, sorted by `from`.
    #[must_use]
    pub fn connections(&self) -> Vec<PlugboardConnection> {
        (0..ALPHABET_SIZE)
            .filter(|&i| self.swap(i) > i)
            .map(|i| PlugboardConnection {
                from: index_letter(i),
                to: index_letter(self.swap(i)),
            })
            .collect()
    }

    /// Number of plug leads in use.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections().len()
    }

    /// Whether no plug leads are in use.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..ALPHABET_SIZE).all(|i| self.swap(i) == i)
    }
}

fn plug_index(letter: char) -> Result<u8, ConfigurationError> {
    letter_index(letter.to_ascii_uppercase()).ok_or(ConfigurationError::InvalidPlugLetter(letter))
}
