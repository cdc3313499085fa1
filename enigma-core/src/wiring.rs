// File:    wiring.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Fixed wiring tables for the five Enigma I rotors and reflector B.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Rotor and reflector wiring.

use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of letters on every wheel.
pub const ALPHABET_SIZE: u8 = 26;

/// A fixed permutation of the alphabet, stored in both directions.
#[derive(Debug)]
pub struct Wiring {
    forward: [u8; 26],
    backward: [u8; 26],
}

impl Wiring {
    #[allow(clippy::cast_possible_truncation)]
    const fn from_table(table: &[u8; 26]) -> Self {
        let mut forward = [0u8; 26];
        let mut backward = [0u8; 26];
        let mut i = 0;
        while i < 26 {
            let out = table[i] - b'A';
            forward[i] = out;
            backward[out as usize] = i as u8;
            i += 1;
        }
        Self { forward, backward }
    }

    /// Contact reached when current enters at `index` from the entry side.
    #[must_use]
    pub const fn forward(&self, index: u8) -> u8 {
        self.forward[index as usize]
    }

    /// Contact reached when current enters at `index` from the reflector side.
    #[must_use]
    pub const fn backward(&self, index: u8) -> u8 {
        self.backward[index as usize]
    }
}

static ROTOR_I: Wiring = Wiring::from_table(b"EKMFLGDQVZNTOWYHXUSPAIBRCJ");
static ROTOR_II: Wiring = Wiring::from_table(b"AJDKSIRUXBLHWTMCQGZNPYFVOE");
static ROTOR_III: Wiring = Wiring::from_table(b"BDFHJLCPRTXVZNYEIWGAKMUSQO");
static ROTOR_IV: Wiring = Wiring::from_table(b"ESOVPZJAYQUIRHXLNFTGKDCMWB");
static ROTOR_V: Wiring = Wiring::from_table(b"VZBRGITYUPSDNHLXAWMJQOFECK");
static REFLECTOR_B: Wiring = Wiring::from_table(b"YRUHQSLDPXNGOKMIEBFZCWVJAT");

/// The five rotors issued with the Enigma I.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotorType {
    /// Rotor I, notch at Q.
    I,
    /// Rotor II, notch at E.
    II,
    /// Rotor III, notch at V.
    III,
    /// Rotor IV, notch at J.
    IV,
    /// Rotor V, notch at Z.
    V,
}

impl RotorType {
    /// Every rotor type, in catalogue order.
    pub const ALL: [Self; 5] = [Self::I, Self::II, Self::III, Self::IV, Self::V];

    /// The rotor's internal wiring.
    #[must_use]
    pub fn wiring(self) -> &'static Wiring {
        match self {
            Self::I => &ROTOR_I,
            Self::II => &ROTOR_II,
            Self::III => &ROTOR_III,
            Self::IV => &ROTOR_IV,
            Self::V => &ROTOR_V,
        }
    }

    /// Window letter at which this rotor carries the next rotor along.
    #[must_use]
    pub const fn notch(self) -> char {
        match self {
            Self::I => 'Q',
            Self::II => 'E',
            Self::III => 'V',
            Self::IV => 'J',
            Self::V => 'Z',
        }
    }

    /// [`notch`](Self::notch) as a position index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn notch_position(self) -> u8 {
        self.notch() as u8 - b'A'
    }

    /// Roman numeral name, as printed on the wheel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
        }
    }
}

impl fmt::Display for RotorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RotorType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|rotor| rotor.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigurationError::UnknownRotor(s.to_string()))
    }
}

/// Reflectors (Umkehrwalze) supported by the machine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReflectorType {
    /// Reflector B, the wartime standard.
    #[default]
    #[serde(alias = "UKW_B")]
    B,
}

impl ReflectorType {
    /// The reflector's wiring. Always an involution without fixed points.
    #[must_use]
    pub fn wiring(self) -> &'static Wiring {
        match self {
            Self::B => &REFLECTOR_B,
        }
    }

    /// Short name used in settings sheets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::B => "B",
        }
    }
}

impl fmt::Display for ReflectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReflectorType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "B" | "UKW_B" | "UKW-B" => Ok(Self::B),
            _ => Err(ConfigurationError::UnknownReflector(s.to_string())),
        }
    }
}

/// Index of an upper-case ASCII letter, `None` for anything else.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn letter_index(letter: char) -> Option<u8> {
    if letter.is_ascii_uppercase() {
        Some(letter as u8 - b'A')
    } else {
        None
    }
}

/// Letter at `index`, which must be below [`ALPHABET_SIZE`].
#[must_use]
pub const fn index_letter(index: u8) -> char {
    (b'A' + index % ALPHABET_SIZE) as char
}
