//! Wire types for the HTTP backend and its clients.
//!
//! Settings on the wire follow operator notation: rotor lists read left to
//! right as in the machine window, ring settings count from 1, and start
//! positions are letters. [`EnigmaConfig`] keeps the engine's own notation
//! (right to left, zero based); the conversions live here.

use crate::config::{EnigmaConfig, PlugboardConnection, RotorConfig};
use crate::error::ConfigurationError;
use crate::wiring::{ReflectorType, RotorType, letter_index};
use serde::{Deserialize, Serialize};

/// Session used when a request does not name one.
pub const DEFAULT_SESSION: &str = "default";

/// `status` value of a successful response.
pub const STATUS_SUCCESS: &str = "success";

/// `status` value of a failed response.
pub const STATUS_ERROR: &str = "error";

/// A machine key in operator notation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MachineSettings {
    /// Rotor names, leftmost first.
    pub rotor_sequence: Vec<String>,
    /// Reflector name.
    pub reflector: String,
    /// Ring settings 1-26, leftmost first.
    pub ring_setting: Vec<u8>,
    /// Start position letters, leftmost first.
    pub initial_positions: String,
    /// Plug leads as two-letter strings.
    pub plug_combinations: Vec<String>,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self::from(&EnigmaConfig::default())
    }
}

impl From<&EnigmaConfig> for MachineSettings {
    fn from(config: &EnigmaConfig) -> Self {
        let leftmost_first = || config.rotors.iter().rev();
        Self {
            rotor_sequence: leftmost_first().map(|r| r.rotor_type.to_string()).collect(),
            reflector: config.reflector.to_string(),
            ring_setting: leftmost_first().map(|r| r.ring_setting + 1).collect(),
            initial_positions: config.rotor_window(),
            plug_combinations: config
                .plugboard
                .iter()
                .map(|conn| format!("{}{}", conn.from, conn.to))
                .collect(),
        }
    }
}

impl TryFrom<&MachineSettings> for EnigmaConfig {
    type Error = ConfigurationError;

    fn try_from(settings: &MachineSettings) -> Result<Self, Self::Error> {
        let positions: Vec<char> = settings.initial_positions.trim().chars().collect();
        let rotor_count = settings.rotor_sequence.len();
        if settings.ring_setting.len() != rotor_count || positions.len() != rotor_count {
            return Err(ConfigurationError::SettingsMismatch {
                rotors: rotor_count,
                rings: settings.ring_setting.len(),
                positions: positions.len(),
            });
        }

        let mut rotors = Vec::with_capacity(rotor_count);
        for (slot, ((name, &ring), &letter)) in settings
            .rotor_sequence
            .iter()
            .zip(&settings.ring_setting)
            .zip(&positions)
            .enumerate()
        {
            let rotor_type: RotorType = name.parse()?;
            if !(1..=26).contains(&ring) {
                return Err(ConfigurationError::RingNumberOutOfRange { slot, value: ring });
            }
            let position = letter_index(letter.to_ascii_uppercase())
                .ok_or(ConfigurationError::InvalidPositionLetter(letter))?;
            rotors.push(RotorConfig::new(rotor_type, position, ring - 1));
        }
        rotors.reverse();

        let plugboard = settings
            .plug_combinations
            .iter()
            .map(|pair| parse_plug_pair(pair))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rotors,
            reflector: settings.reflector.parse::<ReflectorType>()?,
            plugboard,
        })
    }
}

/// Parses a plug lead written as two letters, e.g. `"AB"`.
///
/// # Errors
///
/// Fails unless `pair` is exactly two characters. Letter validity is checked
/// when the plugboard is built.
pub fn parse_plug_pair(pair: &str) -> Result<PlugboardConnection, ConfigurationError> {
    let mut chars = pair.trim().chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => Ok(PlugboardConnection::new(a, b)),
        _ => Err(ConfigurationError::InvalidPlugPair(pair.to_string())),
    }
}

/// Rotor position letters, rightmost rotor first.
#[must_use]
pub fn rotor_positions(config: &EnigmaConfig) -> Vec<String> {
    config
        .rotors
        .iter()
        .map(|r| r.window_letter().to_string())
        .collect()
}

/// Body of `POST /api/enigma/create`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreateRequest {
    /// Session to create or replace.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Machine key.
    #[serde(flatten)]
    pub settings: MachineSettings,
}

/// Answer to a successful create.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateResponse {
    /// Always [`STATUS_SUCCESS`].
    pub status: String,
    /// Human readable confirmation.
    pub message: String,
    /// The session that now holds the machine.
    pub session_id: String,
}

/// Body of `POST /api/enigma/encode`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EncodeRequest {
    /// Session whose machine encodes the message.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Text to encode.
    #[serde(default)]
    pub message: String,
}

/// Answer to a successful encode.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EncodeResponse {
    /// Always [`STATUS_SUCCESS`].
    pub status: String,
    /// The message as received.
    pub original: String,
    /// The ciphertext.
    pub encoded: String,
    /// Position letters after encoding, rightmost rotor first.
    pub rotor_positions: Vec<String>,
}

/// Body of `POST /api/enigma/reset`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ResetRequest {
    /// Session to reset.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Generic answer carrying only a status and a message.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusResponse {
    /// [`STATUS_SUCCESS`] or [`STATUS_ERROR`].
    pub status: String,
    /// Human readable detail.
    pub message: String,
}

/// Answer to `GET /api/enigma/state/:session_id`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StateResponse {
    /// Always [`STATUS_SUCCESS`].
    pub status: String,
    /// The session asked about.
    pub session_id: String,
    /// Current machine setup.
    pub config: EnigmaConfig,
}

/// Answer to `GET /api/enigma/default`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DefaultResponse {
    /// Always [`STATUS_SUCCESS`].
    pub status: String,
    /// The default machine key.
    pub settings: MachineSettings,
}
