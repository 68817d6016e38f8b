//! Judge response DTOs

use serde::Serialize;

use crate::services::{CheckOutcome, PollOutcome};

/// Result of the waiting check route
#[derive(Debug, Serialize)]
pub struct WaitResponse {
    /// False when the poll budget ran out before a terminal state
    pub settled: bool,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl From<PollOutcome> for WaitResponse {
    fn from(poll: PollOutcome) -> Self {
        Self {
            settled: poll.is_settled(),
            outcome: poll.into_inner(),
        }
    }
}
