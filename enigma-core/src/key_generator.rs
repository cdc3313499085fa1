// File:    key_generator.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Draws random machine keys (rotor order, positions, rings and plug leads), like a daily key sheet.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::config::{EnigmaConfig, PlugboardConnection, RotorConfig};
use crate::error::ConfigurationError;
use crate::wiring::{ALPHABET_SIZE, ReflectorType, RotorType, index_letter};
use rand::seq::SliceRandom;
use rand::{Rng, TryRngCore, rngs::OsRng};

/// Rotors in a generated key.
pub const KEY_ROTORS: usize = 3;

/// Plug leads in a generated key unless asked otherwise; the wartime norm.
pub const DEFAULT_PLUG_PAIRS: usize = 10;

/// Most plug leads that fit on the board.
pub const MAX_PLUG_PAIRS: usize = 13;

/// Draws a random machine key from `rng`.
///
/// The key uses three distinct rotors, uniform positions and ring settings,
/// reflector B and `plug_pairs` disjoint plug leads.
///
/// # Arguments
///
/// * `rng` - The source of randomness.
/// * `plug_pairs` - How many plug leads to place.
///
/// # Errors
///
/// Returns [`ConfigurationError::TooManyPlugPairs`] when `plug_pairs` exceeds
/// [`MAX_PLUG_PAIRS`].
pub fn generate_key<R: Rng + ?Sized>(
    rng: &mut R,
    plug_pairs: usize,
) -> Result<EnigmaConfig, ConfigurationError> {
    if plug_pairs > MAX_PLUG_PAIRS {
        return Err(ConfigurationError::TooManyPlugPairs(plug_pairs));
    }

    let mut wheels = RotorType::ALL;
    wheels.shuffle(rng);
    let rotors = wheels
        .iter()
        .take(KEY_ROTORS)
        .map(|&rotor_type| {
            RotorConfig::new(
                rotor_type,
                rng.random_range(0..ALPHABET_SIZE),
                rng.random_range(0..ALPHABET_SIZE),
            )
        })
        .collect();

    let mut letters: Vec<u8> = (0..ALPHABET_SIZE).collect();
    letters.shuffle(rng);
    let mut plugboard: Vec<PlugboardConnection> = letters
        .chunks_exact(2)
        .take(plug_pairs)
        .map(|pair| PlugboardConnection::new(index_letter(pair[0]), index_letter(pair[1])))
        .collect();
    plugboard.sort_by_key(|conn| conn.from);

    Ok(EnigmaConfig {
        rotors,
        reflector: ReflectorType::B,
        plugboard,
    })
}

/// Draws a machine key from the operating system's random source.
///
/// # Errors
///
/// Same as [`generate_key`].
pub fn generate_os_key(plug_pairs: usize) -> Result<EnigmaConfig, ConfigurationError> {
    let mut rng = OsRng.unwrap_err();
    generate_key(&mut rng, plug_pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::EnigmaMachine;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_generated_keys_build_machines() {
        let mut rng = StdRng::seed_from_u64(0x454e_4947);
        for plug_pairs in 0..=MAX_PLUG_PAIRS {
            let key = generate_key(&mut rng, plug_pairs).unwrap();
            assert_eq!(key.rotors.len(), KEY_ROTORS);
            assert_eq!(key.plugboard.len(), plug_pairs);
            let distinct: HashSet<_> = key.rotors.iter().map(|r| r.rotor_type).collect();
            assert_eq!(distinct.len(), KEY_ROTORS);
            let machine = EnigmaMachine::new(&key).unwrap();
            assert_eq!(machine.state(), key);
        }
    }

    #[test]
    fn test_same_seed_same_key() {
        let a = generate_key(&mut StdRng::seed_from_u64(42), DEFAULT_PLUG_PAIRS).unwrap();
        let b = generate_key(&mut StdRng::seed_from_u64(42), DEFAULT_PLUG_PAIRS).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_many_plug_pairs() {
        assert_eq!(
            generate_os_key(14),
            Err(ConfigurationError::TooManyPlugPairs(14))
        );
    }

    #[test]
    fn test_os_key() {
        let key = generate_os_key(DEFAULT_PLUG_PAIRS).unwrap();
        assert!(EnigmaMachine::new(&key).is_ok());
    }
}
