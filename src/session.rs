//! Session state machine
//!
//! ```text
//! Idle ──load ok──▶ Ready ──open form──▶ AwaitingInput ◀──┐
//!   │                                        │ submit      │
//!   └──load failed──▶ Unavailable            ▼             │
//!                                        Predicting ───────┘
//! ```
//!
//! `Unavailable` is terminal for prediction: no reload is attempted.

use crate::artifact::LoadedArtifacts;
use crate::diagnostic::{run_diagnostic, DiagnosticReport};
use crate::error::PriceError;
use crate::prediction::{run_prediction, Prediction};
use crate::schema::FeatureRecord;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No load attempted yet
    Idle,
    /// Model loaded, form not shown yet
    Ready,
    /// Model failed to load; prediction disabled for the whole session
    Unavailable(String),
    /// Form shown, waiting for a submission
    AwaitingInput,
    /// Running a prediction
    Predicting,
}

/// One user session over the cached artifacts
#[derive(Debug)]
pub struct Session<'a> {
    artifacts: Option<&'a LoadedArtifacts>,
    state: SessionState,
    last_outcome: Option<Result<Prediction, PriceError>>,
}

impl Default for Session<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Session<'a> {
    /// Session with nothing loaded
    pub fn new() -> Self {
        Self {
            artifacts: None,
            state: SessionState::Idle,
            last_outcome: None,
        }
    }

    /// Session started from a (cached) load result
    pub fn start(loaded: Result<&'a LoadedArtifacts, &PriceError>) -> Self {
        let mut session = Self::new();
        session.attach(loaded);
        session
    }

    /// Record the load result: `Idle` → `Ready` or `Unavailable`
    ///
    /// Only the first call has an effect.
    pub fn attach(&mut self, loaded: Result<&'a LoadedArtifacts, &PriceError>) {
        if self.state != SessionState::Idle {
            log::debug!("Session already attached, ignoring load result");
            return;
        }
        match loaded {
            Ok(artifacts) => {
                self.artifacts = Some(artifacts);
                self.state = SessionState::Ready;
            }
            Err(e) => {
                self.state = SessionState::Unavailable(e.to_string());
            }
        }
    }

    /// Show the form: `Ready` → `AwaitingInput`
    pub fn open_form(&mut self) {
        if self.state == SessionState::Ready {
            self.state = SessionState::AwaitingInput;
        }
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Loaded artifacts, if any
    pub fn artifacts(&self) -> Option<&'a LoadedArtifacts> {
        self.artifacts
    }

    /// Whether predictions can run
    pub fn can_predict(&self) -> bool {
        self.artifacts.is_some()
    }

    /// Outcome of the last submission
    pub fn last_outcome(&self) -> Option<&Result<Prediction, PriceError>> {
        self.last_outcome.as_ref()
    }

    fn loaded(&self) -> Result<&'a LoadedArtifacts, PriceError> {
        match (&self.state, self.artifacts) {
            (SessionState::Unavailable(reason), _) => {
                Err(PriceError::PredictionDisabled(reason.clone()))
            }
            (_, Some(artifacts)) => Ok(artifacts),
            (_, None) => Err(PriceError::PredictionDisabled(
                "no model loaded".to_string(),
            )),
        }
    }

    /// Predict a submitted record and keep the outcome
    ///
    /// Errors affect this submission only; the session returns to
    /// `AwaitingInput` either way.
    pub fn submit(&mut self, record: &FeatureRecord) -> Result<Prediction, PriceError> {
        let artifacts = self.loaded()?;
        self.state = SessionState::Predicting;
        let outcome = run_prediction(record, artifacts.classifier(), artifacts.transform());
        if let Err(e) = &outcome {
            log::warn!("Prediction failed: {}", e);
        }
        self.state = SessionState::AwaitingInput;
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Run the diagnostic harness against the loaded model
    pub fn diagnose(&self) -> Result<DiagnosticReport, PriceError> {
        let artifacts = self.loaded()?;
        Ok(run_diagnostic(artifacts.classifier(), artifacts.transform()))
    }
}
