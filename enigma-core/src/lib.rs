// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: The main library crate for enigma-core, exposing the cipher engine, its configuration and wire formats.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Enigma Core Library
//!
//! This library simulates the Enigma I cipher machine: five historical
//! rotors, reflector B and a plugboard, with the middle rotor's double step.
//!
//! ```
//! use enigma_core::machine::EnigmaMachine;
//!
//! let mut machine = EnigmaMachine::new(&EnigmaMachine::create_default_config())?;
//! assert_eq!(machine.encode("aaaaa"), "BDZGO");
//!
//! // The cipher is its own inverse.
//! let mut receiver = EnigmaMachine::default();
//! assert_eq!(receiver.encode("BDZGO"), "AAAAA");
//! # Ok::<(), enigma_core::error::ConfigurationError>(())
//! ```

/// Wire types for the HTTP backend and its clients.
pub mod api;
/// Machine configuration and key files.
pub mod config;
/// The engine capability shared by local and remote machines.
pub mod engine;
/// Error types.
pub mod error;
/// Random machine keys.
pub mod key_generator;
/// The cipher machine.
pub mod machine;
/// The plugboard.
pub mod plugboard;
/// Rotor and reflector wiring tables.
pub mod wiring;

pub use config::{EnigmaConfig, PlugboardConnection, RotorConfig};
pub use engine::CipherEngine;
pub use error::{ConfigurationError, EngineError, KeyFileError};
pub use machine::EnigmaMachine;
pub use wiring::{ReflectorType, RotorType};
