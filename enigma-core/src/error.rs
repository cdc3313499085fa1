// File:    error.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Error types raised while building machines, talking to engines and reading key files.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Error types for the Enigma engine.

use thiserror::Error;

/// A machine configuration that cannot be turned into a working machine.
///
/// These are raised when a machine is built; a machine that was built
/// successfully never fails while encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A plug letter is already wired to a different partner.
    #[error("plugboard letter {letter} is already connected to {existing}, cannot also connect it to {requested}")]
    LetterAlreadyConnected {
        /// The letter that appears in two connections.
        letter: char,
        /// The partner it was connected to first.
        existing: char,
        /// The partner the rejected connection asked for.
        requested: char,
    },
    /// A plug lead would connect a letter to itself.
    #[error("plugboard letter {0} cannot be connected to itself")]
    SelfConnection(char),
    /// A plug lead uses something other than A-Z.
    #[error("'{0}' is not a plugboard letter (expected A-Z)")]
    InvalidPlugLetter(char),
    /// A plug combination string is not exactly two letters.
    #[error("invalid plug combination '{0}' (expected two letters such as \"AB\")")]
    InvalidPlugPair(String),
    /// A rotor position is outside `0..=25`.
    #[error("rotor {slot} position {value} is outside 0..=25")]
    PositionOutOfRange {
        /// Rotor slot, counted from the rightmost rotor.
        slot: usize,
        /// The rejected value.
        value: u8,
    },
    /// A rotor ring setting is outside `0..=25`.
    #[error("rotor {slot} ring setting {value} is outside 0..=25")]
    RingSettingOutOfRange {
        /// Rotor slot, counted from the rightmost rotor.
        slot: usize,
        /// The rejected value.
        value: u8,
    },
    /// A ring number in operator notation is outside `1..=26`.
    #[error("ring setting {value} for rotor {slot} is outside 1..=26")]
    RingNumberOutOfRange {
        /// Rotor slot, counted from the leftmost rotor as the operator reads them.
        slot: usize,
        /// The rejected value.
        value: u8,
    },
    /// A rotor name that is not one of I to V.
    #[error("unsupported rotor type '{0}'")]
    UnknownRotor(String),
    /// A reflector name other than B.
    #[error("unsupported reflector type '{0}'")]
    UnknownReflector(String),
    /// A start position that is not a letter.
    #[error("'{0}' is not a rotor position letter (expected A-Z)")]
    InvalidPositionLetter(char),
    /// The per-rotor lists of a settings sheet disagree on the rotor count.
    #[error("{rotors} rotors were given with {rings} ring settings and {positions} start positions")]
    SettingsMismatch {
        /// Number of rotor names.
        rotors: usize,
        /// Number of ring settings.
        rings: usize,
        /// Number of start position letters.
        positions: usize,
    },
    /// More plug pairs were requested than the plugboard can hold.
    #[error("cannot place {0} plug pairs, the plugboard holds at most 13")]
    TooManyPlugPairs(usize),
}

/// Errors surfaced by a [`CipherEngine`](crate::engine::CipherEngine).
///
/// The local engine only ever produces `Configuration`; the other variants
/// belong to engines that live behind a network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine could not be configured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The engine could not be reached at all.
    #[error("remote engine unavailable: {0}")]
    Unavailable(String),
    /// The engine answered, but refused the request.
    #[error("remote engine rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status of the answer.
        status: u16,
        /// Message reported by the engine.
        message: String,
    },
}

/// Errors raised while reading or writing key and metadata files.
#[derive(Debug, Error)]
pub enum KeyFileError {
    /// The file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid JSON for the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The file parsed, but describes an unusable machine.
    #[error("invalid machine key: {0}")]
    Invalid(#[from] ConfigurationError),
}
