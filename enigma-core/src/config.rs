//! Machine configuration and key files.

use crate::error::{ConfigurationError, KeyFileError};
use crate::wiring::{ALPHABET_SIZE, ReflectorType, RotorType, index_letter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Setup and current position of one rotor slot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RotorConfig {
    /// Which wheel sits in this slot.
    #[serde(rename = "type")]
    pub rotor_type: RotorType,
    /// Current rotation, 0 = A.
    pub position: u8,
    /// Offset between the wiring core and the alphabet ring, 0 = A (ring 1).
    pub ring_setting: u8,
}

impl RotorConfig {
    /// A rotor at the given position and ring setting.
    #[must_use]
    pub const fn new(rotor_type: RotorType, position: u8, ring_setting: u8) -> Self {
        Self {
            rotor_type,
            position,
            ring_setting,
        }
    }

    /// Letter showing in the machine window for this rotor.
    #[must_use]
    pub const fn window_letter(&self) -> char {
        index_letter(self.position)
    }

    fn validate(&self, slot: usize) -> Result<(), ConfigurationError> {
        if self.position >= ALPHABET_SIZE {
            return Err(ConfigurationError::PositionOutOfRange {
                slot,
                value: self.position,
            });
        }
        if self.ring_setting >= ALPHABET_SIZE {
            return Err(ConfigurationError::RingSettingOutOfRange {
                slot,
                value: self.ring_setting,
            });
        }
        Ok(())
    }
}

/// A plug lead swapping two letters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlugboardConnection {
    /// The alphabetically earlier letter.
    pub from: char,
    /// The alphabetically later letter.
    pub to: char,
}

impl PlugboardConnection {
    /// Connects `a` and `b`, storing the earlier letter as `from`.
    #[must_use]
    pub fn new(a: char, b: char) -> Self {
        let (a, b) = (a.to_ascii_uppercase(), b.to_ascii_uppercase());
        if a <= b {
            Self { from: a, to: b }
        } else {
            Self { from: b, to: a }
        }
    }
}

/// Everything needed to build a machine.
///
/// Rotors are listed right to left: index 0 is the fast rotor next to the
/// entry wheel. Only the `position` fields change while a machine encodes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnigmaConfig {
    /// Rotor slots, rightmost first.
    pub rotors: Vec<RotorConfig>,
    /// Reflector at the far left.
    #[serde(default)]
    pub reflector: ReflectorType,
    /// Plug leads.
    #[serde(default)]
    pub plugboard: Vec<PlugboardConnection>,
}

impl Default for EnigmaConfig {
    /// Rotors III, II, I (right to left) at A with ring A, reflector B, no plugs.
    fn default() -> Self {
        Self {
            rotors: vec![
                RotorConfig::new(RotorType::III, 0, 0),
                RotorConfig::new(RotorType::II, 0, 0),
                RotorConfig::new(RotorType::I, 0, 0),
            ],
            reflector: ReflectorType::B,
            plugboard: Vec::new(),
        }
    }
}

impl EnigmaConfig {
    /// Checks rotor ranges. Plugboard consistency is checked when the
    /// plugboard itself is built.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range position or ring setting.
    pub fn validate_rotors(&self) -> Result<(), ConfigurationError> {
        self.rotors
            .iter()
            .enumerate()
            .try_for_each(|(slot, rotor)| rotor.validate(slot))
    }

    /// Window letters, left to right, as the operator reads them.
    #[must_use]
    pub fn rotor_window(&self) -> String {
        self.rotors.iter().rev().map(RotorConfig::window_letter).collect()
    }
}

/// Loads a machine key from a JSON key file and validates it.
///
/// # Errors
///
/// Fails if the file cannot be read, is not a key file, or describes an
/// invalid machine.
pub fn load_key_file(path: &Path) -> Result<EnigmaConfig, KeyFileError> {
    let key_str = fs::read_to_string(path)?;
    let config: EnigmaConfig = serde_json::from_str(&key_str)?;
    crate::machine::EnigmaMachine::new(&config)?;
    Ok(config)
}

/// Writes a machine key as pretty-printed JSON.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn save_key_file(path: &Path, config: &EnigmaConfig) -> Result<(), KeyFileError> {
    let key_str = serde_json::to_string_pretty(config)?;
    fs::write(path, key_str)?;
    Ok(())
}
