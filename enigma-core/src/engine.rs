//! The cipher engine capability shared by local and remote machines.

use crate::config::EnigmaConfig;
use crate::error::EngineError;
use crate::machine::EnigmaMachine;

/// Something that runs the Enigma algorithm for one session.
///
/// Every implementation must agree letter for letter with [`EnigmaMachine`]
/// given the same configuration and input history. Construction is specific
/// to each implementation. Callers that hold more than one engine decide how
/// to fall back between them.
pub trait CipherEngine {
    /// Encodes one character, stepping the rotors if it is a letter.
    ///
    /// # Errors
    ///
    /// Fails only if the engine cannot be reached.
    fn encode_char(&mut self, letter: char) -> Result<char, EngineError>;

    /// Encodes a whole message, carrying rotor state across calls.
    ///
    /// # Errors
    ///
    /// Fails only if the engine cannot be reached.
    fn encode_message(&mut self, message: &str) -> Result<String, EngineError>;

    /// Current setup, with positions as they stand now.
    fn state(&self) -> EnigmaConfig;

    /// Returns the rotors to the positions the session started with.
    ///
    /// # Errors
    ///
    /// Fails only if the engine cannot be reached.
    fn reset(&mut self) -> Result<(), EngineError>;
}

impl CipherEngine for EnigmaMachine {
    fn encode_char(&mut self, letter: char) -> Result<char, EngineError> {
        Ok(Self::encode_char(self, letter))
    }

    fn encode_message(&mut self, message: &str) -> Result<String, EngineError> {
        Ok(self.encode(message))
    }

    fn state(&self) -> EnigmaConfig {
        Self::state(self)
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        Self::reset(self);
        Ok(())
    }
}
