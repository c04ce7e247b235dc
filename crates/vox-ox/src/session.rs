use crate::{
    VoxBridge, VoxRequestError,
    render::{Rendered, render},
    request::{InputKind, InputSelection},
};

/// Where the current submission stands
#[derive(Debug, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting(InputKind),
    Success(Rendered),
    Failed(VoxRequestError),
}

/// Drives one submission at a time through
/// Idle -> Submitting -> Success | Failed -> (next submission).
///
/// Nothing carries over between submissions; starting a new one discards the
/// previous result.
#[derive(Debug)]
pub struct Session {
    bridge: VoxBridge,
    state: SubmissionState,
}

impl Session {
    pub fn new(bridge: VoxBridge) -> Self {
        Self {
            bridge,
            state: SubmissionState::Idle,
        }
    }

    pub fn bridge(&self) -> &VoxBridge {
        &self.bridge
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Enter `Submitting`. Fails with `Busy` while a submission is in flight.
    pub fn begin(&mut self, kind: InputKind) -> Result<(), VoxRequestError> {
        if let SubmissionState::Submitting(_) = self.state {
            return Err(VoxRequestError::Busy);
        }
        self.state = SubmissionState::Submitting(kind);
        Ok(())
    }

    /// Record the outcome of the in-flight submission.
    pub fn settle(&mut self, outcome: Result<Rendered, VoxRequestError>) -> &SubmissionState {
        self.state = match outcome {
            Ok(rendered) => SubmissionState::Success(rendered),
            Err(e) => {
                tracing::debug!(error = %e, "submission failed");
                SubmissionState::Failed(e)
            }
        };
        &self.state
    }

    /// Drop whatever state is held and go back to `Idle`.
    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }

    /// Build, send and render one selection.
    ///
    /// Only `Busy` is returned as an error; every other failure ends up in
    /// `SubmissionState::Failed`.
    pub async fn submit(
        &mut self,
        selection: &InputSelection,
    ) -> Result<&SubmissionState, VoxRequestError> {
        let kind = selection.kind();
        self.begin(kind)?;

        let outcome = self
            .bridge
            .process(selection)
            .await
            .map(|response| render(&response, kind));

        Ok(self.settle(outcome))
    }
}
