//! Per-session machine storage.

use enigma_core::{EnigmaConfig, EnigmaMachine};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Machines keyed by session id.
///
/// Each request locks the store for the whole operation, so one session never
/// sees two messages interleaved.
#[derive(Default)]
pub(crate) struct SessionStore {
    machines: Mutex<HashMap<String, EnigmaMachine>>,
}

/// What an encode produced.
pub(crate) struct Encoded {
    pub(crate) text: String,
    pub(crate) state: EnigmaConfig,
}

impl SessionStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, EnigmaMachine>> {
        // A panic mid-request leaves a machine that is still a valid machine.
        self.machines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs `machine` under `session_id`, replacing any earlier one.
    pub(crate) fn create(&self, session_id: &str, machine: EnigmaMachine) {
        info!(
            "Session '{session_id}' set to rotor window {}.",
            machine.rotor_window()
        );
        self.lock().insert(session_id.to_string(), machine);
    }

    /// Encodes `message` on the session's machine, creating a default machine
    /// first if the session is unknown.
    pub(crate) fn encode(&self, session_id: &str, message: &str) -> Encoded {
        let mut machines = self.lock();
        let machine = machines.entry(session_id.to_string()).or_insert_with(|| {
            info!("Session '{session_id}' not found, creating a default machine.");
            EnigmaMachine::default()
        });
        let text = machine.encode(message);
        debug!(
            "Session '{session_id}' encoded {} characters, window now {}.",
            text.len(),
            machine.rotor_window()
        );
        Encoded {
            text,
            state: machine.state(),
        }
    }

    /// Returns the session's machine to its start positions. `false` if the
    /// session does not exist.
    pub(crate) fn reset(&self, session_id: &str) -> bool {
        self.lock().get_mut(session_id).is_some_and(|machine| {
            machine.reset();
            true
        })
    }

    /// Current setup of the session's machine.
    pub(crate) fn state(&self, session_id: &str) -> Option<EnigmaConfig> {
        self.lock().get(session_id).map(EnigmaMachine::state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_session_encodes_with_default_machine() {
        let store = SessionStore::default();
        let encoded = store.encode("fresh", "AAAAA");
        assert_eq!(encoded.text, "BDZGO");
        assert_eq!(encoded.state.rotor_window(), "AAF");
        assert!(store.state("fresh").is_some());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::default();
        store.encode("one", "AAAAA");
        assert_eq!(store.encode("two", "A").text, "B");
        assert_eq!(store.encode("one", "A").text, "W");
    }

    #[test]
    fn test_reset_only_known_sessions() {
        let store = SessionStore::default();
        assert!(!store.reset("missing"));

        store.create("known", EnigmaMachine::default());
        store.encode("known", "HELLO");
        assert!(store.reset("known"));
        assert_eq!(store.encode("known", "AAAAA").text, "BDZGO");
    }
}
