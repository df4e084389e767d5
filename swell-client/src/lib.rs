pub mod notify;
pub mod service;
pub mod session;
pub mod submit;
pub mod toggle;

#[cfg(test)]
pub(crate) mod support;

pub use notify::{Notice, Notifier, Tone};
pub use service::{
    BroadcastFailure, IndexingError, PendingTransaction, PublicationService, ServiceError,
    StorageError, StorageUploader,
};
pub use session::{Session, SessionProvider};
pub use submit::{Phase, SubmissionJob, SubmissionPipeline, SubmitError, SubmitOutcome};
pub use toggle::{Ack, ActionKind, Sense, ToggleController, ToggleFailure};
