use log::{info, trace};
use std::sync::Arc;
use swell_metadata::DraftMetadata;
use swell_pub::Publication;
use swell_ref::{ContentUri, PublicationId, TxHash};
use thiserror::Error as ThisError;

use crate::notify::{Notice, Notifier};
use crate::service::{
    BroadcastFailure, IndexingError, PublicationService, StorageError, StorageUploader,
};
use crate::session::{Session, SessionProvider};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Draft,
    Uploading,
    Broadcasting,
    PendingConfirmation,
    Indexed,
    Failed,
}

// One job per publish intent. Lives only for the duration of the intent
// and is discarded once a terminal phase has been reported.
#[derive(Debug)]
pub struct SubmissionJob {
    pub draft: DraftMetadata,
    pub storage_uri: Option<ContentUri>,
    pub tx_hash: Option<TxHash>,
    pub phase: Phase,
}

impl SubmissionJob {
    fn new(draft: DraftMetadata) -> Self {
        Self {
            draft,
            storage_uri: None,
            tx_hash: None,
            phase: Phase::Draft,
        }
    }

    fn advance(&mut self, phase: Phase) {
        trace!("submission: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }
}

#[derive(Debug, ThisError)]
pub enum SubmitError {
    #[error("A profile session is required to publish")]
    Unauthorized,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Broadcast(BroadcastFailure),
    #[error(transparent)]
    Indexing(#[from] IndexingError),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Indexed(Publication),
    // the viewer declined to sign; nothing is surfaced
    Cancelled,
}

pub struct SubmissionPipeline {
    sessions: Arc<dyn SessionProvider>,
    uploader: Arc<dyn StorageUploader>,
    service: Arc<dyn PublicationService>,
    notifier: Arc<dyn Notifier>,
}

impl SubmissionPipeline {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        uploader: Arc<dyn StorageUploader>,
        service: Arc<dyn PublicationService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sessions,
            uploader,
            service,
            notifier,
        }
    }

    pub async fn submit(&self, draft: DraftMetadata) -> Result<SubmitOutcome, SubmitError> {
        let Session::WithProfile(profile) = self.sessions.session() else {
            // refused locally: no job exists and no request goes out
            self.notifier.show(Notice::failure(
                "Not signed in",
                "Sign in with your profile to publish.",
            ));
            return Err(SubmitError::Unauthorized);
        };

        let mut job = SubmissionJob::new(draft);
        trace!("submission started by {}", profile.id.to_string());

        job.advance(Phase::Uploading);
        let storage_uri = match self.uploader.upload(&job.draft).await {
            Ok(uri) => uri,
            Err(error) => {
                job.advance(Phase::Failed);
                self.notifier.show(Notice::failure(
                    "Error creating post",
                    format!("Something went wrong storing your post. {}.", error.reason),
                ));
                return Err(error.into());
            }
        };
        job.storage_uri = Some(storage_uri.clone());

        job.advance(Phase::Broadcasting);
        let tx = match self.service.create_publication(&storage_uri).await {
            Ok(tx) => tx,
            Err(failure) => return self.broadcast_failed(job, failure),
        };
        job.tx_hash = Some(tx.tx_hash().clone());

        job.advance(Phase::PendingConfirmation);
        // this can take a while, depending on the transaction layer and the
        // congestion of the network
        match tx.wait_for_completion().await {
            Ok(publication) => {
                job.advance(Phase::Indexed);
                info!("submission indexed as {}", publication.id().to_string());
                self.notifier.show(Notice::success(
                    "Success",
                    "Your post has been successfully indexed!",
                ));
                Ok(SubmitOutcome::Indexed(publication))
            }
            Err(error) => {
                job.advance(Phase::Failed);
                self.notifier.show(Notice::failure(
                    "Error creating post",
                    format!("Something went wrong creating your post. {}.", error.reason),
                ));
                Err(error.into())
            }
        }
    }

    // Re-share an existing publication. Same broadcast and confirmation
    // tail as submit, with no upload phase.
    pub async fn mirror(&self, target: &PublicationId) -> Result<SubmitOutcome, SubmitError> {
        if !self.sessions.session().authenticated() {
            self.notifier.show(Notice::failure(
                "Not signed in",
                "Login to mirror this post!",
            ));
            return Err(SubmitError::Unauthorized);
        }

        trace!("mirror broadcast for {}", target.to_string());
        let tx = match self.service.create_mirror(target).await {
            Ok(tx) => tx,
            Err(BroadcastFailure::UserRejected) => {
                trace!("mirror cancelled in the wallet");
                return Ok(SubmitOutcome::Cancelled);
            }
            Err(failure) => {
                if let Some(notice) = broadcast_notice(&failure) {
                    self.notifier.show(notice);
                }
                return Err(SubmitError::Broadcast(failure));
            }
        };

        match tx.wait_for_completion().await {
            Ok(publication) => {
                info!("mirror indexed as {}", publication.id().to_string());
                self.notifier.show(Notice::success(
                    "Success",
                    "Mirrored! Your re-share has been indexed.",
                ));
                Ok(SubmitOutcome::Indexed(publication))
            }
            Err(error) => {
                self.notifier.show(Notice::failure(
                    "Error mirroring post",
                    format!("Something went wrong mirroring this post. {}.", error.reason),
                ));
                Err(error.into())
            }
        }
    }

    fn broadcast_failed(
        &self,
        mut job: SubmissionJob,
        failure: BroadcastFailure,
    ) -> Result<SubmitOutcome, SubmitError> {
        if let BroadcastFailure::UserRejected = failure {
            // silent cancellation; the job is simply discarded
            trace!("submission cancelled in the wallet");
            return Ok(SubmitOutcome::Cancelled);
        }
        job.advance(Phase::Failed);
        if let Some(notice) = broadcast_notice(&failure) {
            self.notifier.show(notice);
        }
        Err(SubmitError::Broadcast(failure))
    }
}

fn broadcast_notice(failure: &BroadcastFailure) -> Option<Notice> {
    match failure {
        BroadcastFailure::Broadcasting(reason) => Some(Notice::failure(
            "Error creating post",
            format!("There was an error broadcasting the transaction. {}.", reason),
        )),
        BroadcastFailure::PendingSigningRequest => Some(Notice::failure(
            "Wallet is busy",
            "There is a pending signing request in your wallet. Approve it or discard it and try again.",
        )),
        BroadcastFailure::WalletConnection(reason) => Some(Notice::failure(
            "Wallet unreachable",
            format!("There was an error connecting to your wallet. {}.", reason),
        )),
        BroadcastFailure::UserRejected => None,
    }
}
