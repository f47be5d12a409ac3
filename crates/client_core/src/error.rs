use thiserror::Error;

/// Ways the outbound summarization call can fail. All of them are surfaced
/// to the user as displayed content; none is fatal to the controller.
#[derive(Debug, Error)]
pub enum SummaryCallError {
    #[error("could not reach the summarization service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to get summary from the summarization service (HTTP {status})")]
    Status { status: u16 },
    #[error("summarization service returned a response that is not JSON: {0}")]
    Decode(String),
}

impl SummaryCallError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            Self::Decode(_) => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }
}
