// Recording fakes for the collaborator traits, shared by the pipeline and
// toggle tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Notify;

use swell_metadata::DraftMetadata;
use swell_pub::{Profile, Publication};
use swell_ref::{ContentUri, PublicationId, TxHash};

use crate::notify::{Notice, Notifier};
use crate::service::{
    BroadcastFailure, IndexingError, PendingTransaction, PublicationService, ServiceError,
    StorageError, StorageUploader,
};
use crate::session::{Session, SessionProvider};

pub struct FixedSession(pub Session);

impl SessionProvider for FixedSession {
    fn session(&self) -> Session {
        self.0.clone()
    }
}

pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            notices: Mutex::new(Vec::new()),
        })
    }

    pub fn count(&self) -> usize {
        self.notices.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub struct FakeUploader {
    result: Result<ContentUri, StorageError>,
    calls: Mutex<u32>,
}

impl FakeUploader {
    pub fn succeeding() -> Arc<Self> {
        Arc::new(Self {
            result: Ok(uri("ipfs://bafymeta")),
            calls: Mutex::new(0),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(StorageError {
                reason: reason.to_string(),
            }),
            calls: Mutex::new(0),
        })
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl StorageUploader for FakeUploader {
    async fn upload(&self, _metadata: &DraftMetadata) -> Result<ContentUri, StorageError> {
        *self.calls.lock().unwrap() += 1;
        self.result.clone()
    }
}

pub struct FakeTx {
    pub hash: TxHash,
    pub result: Result<Publication, IndexingError>,
}

#[async_trait]
impl PendingTransaction for FakeTx {
    fn tx_hash(&self) -> &TxHash {
        &self.hash
    }

    async fn wait_for_completion(&self) -> Result<Publication, IndexingError> {
        self.result.clone()
    }
}

pub struct FakeService {
    calls: Mutex<Vec<String>>,
    broadcast_failure: Option<BroadcastFailure>,
    completion: Result<Publication, IndexingError>,
    toggle_result: Result<(), ServiceError>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl FakeService {
    fn base() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            broadcast_failure: None,
            completion: Err(IndexingError {
                reason: "no completion configured".to_string(),
            }),
            toggle_result: Ok(()),
            hold: Mutex::new(None),
        }
    }

    pub fn indexing(publication: Publication) -> Arc<Self> {
        Arc::new(Self {
            completion: Ok(publication),
            ..Self::base()
        })
    }

    pub fn broadcast_failing(failure: BroadcastFailure) -> Arc<Self> {
        Arc::new(Self {
            broadcast_failure: Some(failure),
            ..Self::base()
        })
    }

    pub fn completion_failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            completion: Err(IndexingError {
                reason: reason.to_string(),
            }),
            ..Self::base()
        })
    }

    pub fn toggles_failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            toggle_result: Err(ServiceError {
                reason: reason.to_string(),
            }),
            ..Self::base()
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    // Makes every toggle request park until the returned gate is notified.
    pub fn hold_toggles(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn record(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    async fn toggled(&self, name: &str, publication: &PublicationId) -> Result<(), ServiceError> {
        self.record(format!("{} {}", name, publication.to_string()));
        let gate = self.hold.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.toggle_result.clone()
    }

    fn pending(&self) -> Result<Box<dyn PendingTransaction>, BroadcastFailure> {
        match &self.broadcast_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(Box::new(FakeTx {
                hash: tx_hash(),
                result: self.completion.clone(),
            })),
        }
    }
}

#[async_trait]
impl PublicationService for FakeService {
    async fn create_publication(
        &self,
        content_uri: &ContentUri,
    ) -> Result<Box<dyn PendingTransaction>, BroadcastFailure> {
        self.record(format!("create_publication {}", content_uri.as_str()));
        self.pending()
    }

    async fn create_mirror(
        &self,
        target: &PublicationId,
    ) -> Result<Box<dyn PendingTransaction>, BroadcastFailure> {
        self.record(format!("create_mirror {}", target.to_string()));
        self.pending()
    }

    async fn add_reaction(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("add_reaction", publication).await
    }

    async fn remove_reaction(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("remove_reaction", publication).await
    }

    async fn add_bookmark(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("add_bookmark", publication).await
    }

    async fn remove_bookmark(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("remove_bookmark", publication).await
    }

    async fn mark_not_interested(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("mark_not_interested", publication).await
    }

    async fn undo_not_interested(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("undo_not_interested", publication).await
    }

    async fn hide(&self, publication: &PublicationId) -> Result<(), ServiceError> {
        self.toggled("hide", publication).await
    }
}

pub fn uri(value: &str) -> ContentUri {
    ContentUri::from_string(value.to_string()).unwrap()
}

pub fn tx_hash() -> TxHash {
    TxHash::from_string(format!("0x{}", "ab".repeat(32))).unwrap()
}

pub fn profile(id_hex: &str, handle: &str) -> Profile {
    serde_json::from_value(json!({ "id": id_hex, "handle": handle })).unwrap()
}

pub fn post(profile_hex: &str, seq: &str) -> Publication {
    post_with_operations(profile_hex, seq, false, false, false)
}

pub fn post_with_operations(
    profile_hex: &str,
    seq: &str,
    has_upvoted: bool,
    has_bookmarked: bool,
    is_not_interested: bool,
) -> Publication {
    serde_json::from_value(json!({
        "__typename": "Post",
        "id": format!("{}-{}", profile_hex, seq),
        "by": { "id": profile_hex, "handle": "dinosaur" },
        "createdAt": 1700000000.0,
        "metadata": { "content": "gm" },
        "operations": {
            "hasUpvoted": has_upvoted,
            "hasBookmarked": has_bookmarked,
            "isNotInterested": is_not_interested
        }
    }))
    .unwrap()
}

pub fn mirror_of(by_hex: &str, seq: &str, target: Publication) -> Publication {
    serde_json::from_value(json!({
        "__typename": "Mirror",
        "id": format!("{}-{}", by_hex, seq),
        "by": { "id": by_hex, "handle": "echo" },
        "createdAt": 1700000001.0,
        "mirrorOn": serde_json::to_value(&target).unwrap()
    }))
    .unwrap()
}

pub fn mirror_without_target(by_hex: &str, seq: &str) -> Publication {
    serde_json::from_value(json!({
        "__typename": "Mirror",
        "id": format!("{}-{}", by_hex, seq),
        "by": { "id": by_hex, "handle": "echo" },
        "createdAt": 1700000001.0
    }))
    .unwrap()
}
