use async_trait::async_trait;
use swell_metadata::DraftMetadata;
use swell_pub::Publication;
use swell_ref::{ContentUri, PublicationId, TxHash};
use thiserror::Error as ThisError;

#[derive(Clone, Debug, ThisError)]
#[error("Failed to store metadata: {reason}")]
pub struct StorageError {
    pub reason: String,
}

#[derive(Clone, Debug, ThisError)]
pub enum BroadcastFailure {
    #[error("The network rejected the transaction: {0}")]
    Broadcasting(String),
    #[error("A signing request is still waiting in the wallet")]
    PendingSigningRequest,
    #[error("Failed to reach the wallet: {0}")]
    WalletConnection(String),
    #[error("The signing request was declined")]
    UserRejected,
}

#[derive(Clone, Debug, ThisError)]
#[error("Failed to index the transaction: {reason}")]
pub struct IndexingError {
    pub reason: String,
}

#[derive(Clone, Debug, ThisError)]
#[error("Request failed: {reason}")]
pub struct ServiceError {
    pub reason: String,
}

#[async_trait]
pub trait PendingTransaction: Send + Sync {
    fn tx_hash(&self) -> &TxHash;

    // Confirmation latency is variable and congestion dependent. No timeout
    // of its own; callers wanting a bound wrap the returned future.
    async fn wait_for_completion(&self) -> Result<Publication, IndexingError>;
}

#[async_trait]
pub trait StorageUploader: Send + Sync {
    async fn upload(&self, metadata: &DraftMetadata) -> Result<ContentUri, StorageError>;
}

// The network's write surface. Toggle requests are sense-explicit: the
// caller has already decided between add and remove.
#[async_trait]
pub trait PublicationService: Send + Sync {
    async fn create_publication(
        &self,
        content_uri: &ContentUri,
    ) -> Result<Box<dyn PendingTransaction>, BroadcastFailure>;

    async fn create_mirror(
        &self,
        target: &PublicationId,
    ) -> Result<Box<dyn PendingTransaction>, BroadcastFailure>;

    async fn add_reaction(&self, publication: &PublicationId) -> Result<(), ServiceError>;

    async fn remove_reaction(&self, publication: &PublicationId) -> Result<(), ServiceError>;

    async fn add_bookmark(&self, publication: &PublicationId) -> Result<(), ServiceError>;

    async fn remove_bookmark(&self, publication: &PublicationId) -> Result<(), ServiceError>;

    async fn mark_not_interested(&self, publication: &PublicationId) -> Result<(), ServiceError>;

    async fn undo_not_interested(&self, publication: &PublicationId) -> Result<(), ServiceError>;

    async fn hide(&self, publication: &PublicationId) -> Result<(), ServiceError>;
}
