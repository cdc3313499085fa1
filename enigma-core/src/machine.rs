// File:    machine.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: The Enigma state machine: rotor stepping and the plugboard-rotor-reflector signal path.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The cipher machine itself.

use crate::config::{EnigmaConfig, RotorConfig};
use crate::error::ConfigurationError;
use crate::plugboard::Plugboard;
use crate::wiring::{ALPHABET_SIZE, ReflectorType, index_letter, letter_index};
use log::{debug, trace};

/// Slots that take part in notch-driven stepping: right, middle and left.
const STEPPING_SLOTS: usize = 3;

/// A configured Enigma machine.
///
/// The machine owns a private copy of its rotors, so encoding never touches
/// the [`EnigmaConfig`] it was built from. To change the setup, build a new
/// machine.
#[derive(Debug, Clone)]
pub struct EnigmaMachine {
    rotors: Vec<RotorConfig>,
    start_positions: Vec<u8>,
    reflector: ReflectorType,
    plugboard: Plugboard,
}

impl Default for EnigmaMachine {
    fn default() -> Self {
        let config = EnigmaConfig::default();
        Self {
            start_positions: config.rotors.iter().map(|r| r.position).collect(),
            rotors: config.rotors,
            reflector: config.reflector,
            plugboard: Plugboard::default(),
        }
    }
}

impl EnigmaMachine {
    /// Builds a machine from `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a rotor position or ring setting is
    /// outside `0..=25`, or if the plugboard connections are inconsistent.
    pub fn new(config: &EnigmaConfig) -> Result<Self, ConfigurationError> {
        config.validate_rotors()?;
        let plugboard = Plugboard::from_connections(&config.plugboard)?;
        debug!(
            "Built machine: rotors {} (right to left), window {}, reflector {}, {} plug pair(s).",
            config
                .rotors
                .iter()
                .map(|r| r.rotor_type.name())
                .collect::<Vec<_>>()
                .join("-"),
            config.rotor_window(),
            config.reflector,
            plugboard.len()
        );
        Ok(Self {
            rotors: config.rotors.clone(),
            start_positions: config.rotors.iter().map(|r| r.position).collect(),
            reflector: config.reflector,
            plugboard,
        })
    }

    /// The default setup: rotors III, II, I at A, ring A, reflector B.
    #[must_use]
    pub fn create_default_config() -> EnigmaConfig {
        EnigmaConfig::default()
    }

    /// Snapshot of the current setup, including the advanced positions.
    #[must_use]
    pub fn state(&self) -> EnigmaConfig {
        EnigmaConfig {
            rotors: self.rotors.clone(),
            reflector: self.reflector,
            plugboard: self.plugboard.connections(),
        }
    }

    /// Window letters, left to right.
    #[must_use]
    pub fn rotor_window(&self) -> String {
        self.rotors.iter().rev().map(RotorConfig::window_letter).collect()
    }

    /// Turns the rotors back to the positions the machine was built with.
    pub fn reset(&mut self) {
        for (rotor, &start) in self.rotors.iter_mut().zip(&self.start_positions) {
            rotor.position = start;
        }
        debug!("Machine reset to window {}.", self.rotor_window());
    }

    /// Advances the rotors as one key press would.
    ///
    /// Notch checks use the positions from before this step, which gives the
    /// middle rotor its double step. Only the first three slots move.
    pub fn step(&mut self) {
        let at_notch = |rotor: &RotorConfig| rotor.position == rotor.rotor_type.notch_position();
        let middle_at_notch = self.rotors.get(1).is_some_and(at_notch);
        let right_at_notch = self.rotors.first().is_some_and(at_notch);

        for (slot, rotor) in self.rotors.iter_mut().take(STEPPING_SLOTS).enumerate() {
            let moves = match slot {
                0 => true,
                1 => right_at_notch || middle_at_notch,
                _ => middle_at_notch,
            };
            if moves {
                advance(rotor);
            }
        }
        trace!("Stepped to window {}.", self.rotor_window());
    }

    /// Encodes one character.
    ///
    /// Anything other than `A`-`Z` comes back unchanged and leaves the rotors
    /// where they are.
    pub fn encode_char(&mut self, letter: char) -> char {
        let Some(index) = letter_index(letter) else {
            return letter;
        };
        self.step();

        let mut index = self.plugboard.swap(index);
        for rotor in &self.rotors {
            let wiring = rotor.rotor_type.wiring();
            index = unshift(wiring.forward(shift(index, rotor)), rotor);
        }
        index = self.reflector.wiring().forward(index);
        for rotor in self.rotors.iter().rev() {
            let wiring = rotor.rotor_type.wiring();
            index = unshift(wiring.backward(shift(index, rotor)), rotor);
        }
        index_letter(self.plugboard.swap(index))
    }

    /// Upper-cases `message` and encodes it character by character.
    ///
    /// Rotor positions carry over between calls.
    pub fn encode(&mut self, message: &str) -> String {
        message
            .to_uppercase()
            .chars()
            .map(|c| self.encode_char(c))
            .collect()
    }
}

const fn advance(rotor: &mut RotorConfig) {
    rotor.position = (rotor.position + 1) % ALPHABET_SIZE;
}

/// Contact on the rotor core hit by external contact `index`.
const fn shift(index: u8, rotor: &RotorConfig) -> u8 {
    (index + rotor.position + ALPHABET_SIZE - rotor.ring_setting) % ALPHABET_SIZE
}

/// External contact reached from core contact `index`.
const fn unshift(index: u8, rotor: &RotorConfig) -> u8 {
    (index + ALPHABET_SIZE - rotor.position + rotor.ring_setting) % ALPHABET_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlugboardConnection;
    use crate::wiring::RotorType;

    fn machine_at(left: u8, middle: u8, right: u8) -> EnigmaMachine {
        let config = EnigmaConfig {
            rotors: vec![
                RotorConfig::new(RotorType::III, right, 0),
                RotorConfig::new(RotorType::II, middle, 0),
                RotorConfig::new(RotorType::I, left, 0),
            ],
            ..EnigmaConfig::default()
        };
        EnigmaMachine::new(&config).unwrap()
    }

    #[test]
    fn test_default_vector() {
        let mut machine = EnigmaMachine::default();
        assert_eq!(machine.encode_char('A'), 'B');
        assert_eq!(machine.encode("AAAA"), "DZGO");
    }

    #[test]
    fn test_step_happens_before_substitution() {
        let mut machine = EnigmaMachine::default();
        machine.encode_char('A');
        assert_eq!(machine.rotor_window(), "AAB");
    }

    #[test]
    fn test_lowercase_char_is_not_encoded() {
        let mut machine = EnigmaMachine::default();
        assert_eq!(machine.encode_char('a'), 'a');
        assert_eq!(machine.rotor_window(), "AAA");
    }

    #[test]
    fn test_double_step_sequence() {
        let mut machine = machine_at(0, 3, 20);
        let windows: Vec<String> = (0..3)
            .map(|_| {
                machine.step();
                machine.rotor_window()
            })
            .collect();
        assert_eq!(windows, ["ADV", "AEW", "BFX"]);
    }

    #[test]
    fn test_reset_restores_start_positions() {
        let mut machine = machine_at(0, 3, 20);
        let first = machine.encode("WETTERBERICHT");
        machine.reset();
        assert_eq!(machine.rotor_window(), "ADU");
        assert_eq!(machine.encode("WETTERBERICHT"), first);
    }

    #[test]
    fn test_config_is_not_aliased() {
        let config = EnigmaConfig::default();
        let mut machine = EnigmaMachine::new(&config).unwrap();
        machine.encode("ABC");
        assert_eq!(config.rotors[0].position, 0);
        assert_eq!(machine.state().rotors[0].position, 3);
    }

    #[test]
    fn test_state_reports_plugboard_pairs_once() {
        let config = EnigmaConfig {
            plugboard: vec![
                PlugboardConnection::new('Q', 'E'),
                PlugboardConnection::new('A', 'Z'),
            ],
            ..EnigmaConfig::default()
        };
        let machine = EnigmaMachine::new(&config).unwrap();
        assert_eq!(
            machine.state().plugboard,
            vec![
                PlugboardConnection { from: 'A', to: 'Z' },
                PlugboardConnection { from: 'E', to: 'Q' },
            ]
        );
    }

    #[test]
    fn test_machine_without_rotors_is_plugboard_and_reflector() {
        let config = EnigmaConfig {
            rotors: Vec::new(),
            ..EnigmaConfig::default()
        };
        let mut machine = EnigmaMachine::new(&config).unwrap();
        assert_eq!(machine.encode("ABC"), "YRU");
    }

    #[test]
    fn test_shift_and_unshift_are_inverse() {
        let rotor = RotorConfig::new(RotorType::IV, 17, 9);
        for i in 0..ALPHABET_SIZE {
            assert_eq!(unshift(shift(i, &rotor), &rotor), i);
        }
    }
}
