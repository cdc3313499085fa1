use enigma_core::api::{
    CreateRequest, CreateResponse, EncodeRequest, EncodeResponse, MachineSettings,
    ResetRequest, StatusResponse,
};
use enigma_core::wiring::letter_index;
use enigma_core::{CipherEngine, EngineError, EnigmaConfig, EnigmaMachine};
use log::{debug, info, warn};
use reqwest::blocking::Client;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A machine that lives in an `enigma-web` session.
///
/// The client keeps a local view of the rotor positions, refreshed from every
/// encode answer, so `state` needs no round trip.
pub(crate) struct RemoteEngine {
    client: Client,
    base_url: String,
    session_id: String,
    start: EnigmaConfig,
    current: EnigmaConfig,
}

impl RemoteEngine {
    /// Creates (or replaces) the session `session_id` on the backend at
    /// `base_url` with the machine described by `config`.
    pub(crate) fn connect(
        base_url: &str,
        session_id: String,
        config: &EnigmaConfig,
    ) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(unavailable)?;
        let engine = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_id,
            start: config.clone(),
            current: config.clone(),
        };

        let request = CreateRequest {
            session_id: Some(engine.session_id.clone()),
            settings: MachineSettings::from(config),
        };
        let created: CreateResponse = engine.post("/api/enigma/create", &request)?;
        info!(
            "Remote session '{}' created at {}.",
            created.session_id, engine.base_url
        );
        Ok(engine)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, EngineError> {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().map_err(unavailable)?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StatusResponse>()
                .map_or_else(|_| status.to_string(), |body| body.message);
            return Err(EngineError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<T>().map_err(unavailable)
    }
}

impl CipherEngine for RemoteEngine {
    fn encode_char(&mut self, letter: char) -> Result<char, EngineError> {
        if letter_index(letter).is_none() {
            return Ok(letter);
        }
        let encoded = self.encode_message(&letter.to_string())?;
        encoded
            .chars()
            .next()
            .ok_or_else(|| EngineError::Unavailable("empty answer from remote engine".to_string()))
    }

    fn encode_message(&mut self, message: &str) -> Result<String, EngineError> {
        let request = EncodeRequest {
            session_id: Some(self.session_id.clone()),
            message: message.to_string(),
        };
        let answer: EncodeResponse = self.post("/api/enigma/encode", &request)?;
        for (rotor, letter) in self.current.rotors.iter_mut().zip(&answer.rotor_positions) {
            if let Some(position) = letter.chars().next().and_then(letter_index) {
                rotor.position = position;
            }
        }
        Ok(answer.encoded)
    }

    fn state(&self) -> EnigmaConfig {
        self.current.clone()
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        let request = ResetRequest {
            session_id: Some(self.session_id.clone()),
        };
        let _: StatusResponse = self.post("/api/enigma/reset", &request)?;
        self.current = self.start.clone();
        Ok(())
    }
}

fn unavailable(err: reqwest::Error) -> EngineError {
    EngineError::Unavailable(err.to_string())
}

/// Result of encoding through a preferred engine with local fallback.
pub(crate) struct Outcome {
    /// The ciphertext.
    pub(crate) text: String,
    /// Machine state after encoding.
    pub(crate) state: EnigmaConfig,
    /// Why the preferred engine was abandoned, if it was.
    pub(crate) fallback: Option<EngineError>,
}

/// Encodes `message` with `preferred`, or with a fresh local machine built
/// from `config` when the preferred engine fails.
///
/// The local machine starts from `config` untouched, so the answer is never a
/// mix of remote and local output.
pub(crate) fn encode_with_fallback<E: CipherEngine>(
    preferred: Result<E, EngineError>,
    config: &EnigmaConfig,
    message: &str,
) -> Result<Outcome, EngineError> {
    let attempt = preferred.and_then(|mut engine| {
        let text = engine.encode_message(message)?;
        Ok((text, engine.state()))
    });
    match attempt {
        Ok((text, state)) => Ok(Outcome {
            text,
            state,
            fallback: None,
        }),
        Err(EngineError::Configuration(err)) => Err(err.into()),
        Err(cause) => {
            warn!("Preferred engine failed ({cause}); encoding locally.");
            let mut local = EnigmaMachine::new(config)?;
            let text = local.encode(message);
            Ok(Outcome {
                text,
                state: local.state(),
                fallback: Some(cause),
            })
        }
    }
}
