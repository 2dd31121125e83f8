/// Remote proxy errors.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("remote backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("remote call failed with status {status}")]
    CallFailed { status: u16 },

    #[error("remote backend rejected the call: {reason}")]
    Rejected { reason: String },

    #[error("network error: {reason}")]
    Network { reason: String },
}
