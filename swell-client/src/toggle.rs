use log::trace;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use swell_pub::Publication;
use swell_ref::PublicationId;
use swell_resolve::resolve;
use thiserror::Error as ThisError;

use crate::notify::{Notice, Notifier};
use crate::service::{PublicationService, ServiceError};
use crate::session::SessionProvider;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Reaction,
    Bookmark,
    NotInterested,
    Hide,
}

// Which sense of the action ended up being requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Set,
    Cleared,
}

#[derive(Clone, Copy, Debug)]
pub struct Ack {
    pub action: ActionKind,
    pub sense: Sense,
}

#[derive(Debug, ThisError)]
pub enum ToggleFailure {
    #[error("Sign in to do this")]
    Unauthenticated,
    #[error("Only the author can do this")]
    Unauthorized,
    #[error("The same action is still in flight for this publication")]
    AlreadyInFlight,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

pub struct ToggleController {
    sessions: Arc<dyn SessionProvider>,
    service: Arc<dyn PublicationService>,
    notifier: Arc<dyn Notifier>,
    in_flight: Mutex<HashSet<(PublicationId, ActionKind)>>,
}

impl ToggleController {
    pub fn new(
        sessions: Arc<dyn SessionProvider>,
        service: Arc<dyn PublicationService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sessions,
            service,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn toggle(
        &self,
        publication: &Publication,
        action: ActionKind,
    ) -> Result<Ack, ToggleFailure> {
        let resolved = resolve(publication);
        let Some(view) = resolved.content_view() else {
            // nothing to act on, e.g. a mirror whose target failed to load
            self.notifier
                .show(Notice::failure("Error", "This publication is unavailable."));
            return Err(ToggleFailure::Unauthorized);
        };
        let target = view.id.clone();
        let operations = *view.operations;
        let author_label = view.author.display_label().to_string();

        let session = self.sessions.session();
        match action {
            ActionKind::Reaction => {
                if !session.authenticated() {
                    self.notifier
                        .show(Notice::failure("Error", "Login to like this post!"));
                    return Err(ToggleFailure::Unauthenticated);
                }
            }
            ActionKind::Hide => {
                let owned = session
                    .profile()
                    .map(|profile| resolved.is_authored_by(&profile.id))
                    .unwrap_or(false);
                if !owned {
                    // never issued at all; the action is unavailable
                    self.notifier.show(Notice::failure(
                        "Error",
                        "Only the author can delete this post.",
                    ));
                    return Err(ToggleFailure::Unauthorized);
                }
            }
            ActionKind::Bookmark | ActionKind::NotInterested => {}
        }

        let _guard = match InFlightGuard::acquire(&self.in_flight, target.clone(), action) {
            Some(guard) => guard,
            None => {
                trace!(
                    "toggle already in flight: {} {:?}",
                    target.to_string(),
                    action
                );
                self.notifier.show(Notice::info(
                    "Hold on",
                    "That action is still being processed.",
                ));
                return Err(ToggleFailure::AlreadyInFlight);
            }
        };

        // the current server-observed flag decides the sense; the flag
        // itself only changes once the caller re-fetches
        let outcome = match action {
            ActionKind::Reaction => {
                if operations.has_upvoted {
                    self.service
                        .remove_reaction(&target)
                        .await
                        .map(|_| Sense::Cleared)
                } else {
                    self.service.add_reaction(&target).await.map(|_| Sense::Set)
                }
            }
            ActionKind::Bookmark => {
                if operations.has_bookmarked {
                    self.service
                        .remove_bookmark(&target)
                        .await
                        .map(|_| Sense::Cleared)
                } else {
                    self.service.add_bookmark(&target).await.map(|_| Sense::Set)
                }
            }
            ActionKind::NotInterested => {
                if operations.is_not_interested {
                    self.service
                        .undo_not_interested(&target)
                        .await
                        .map(|_| Sense::Cleared)
                } else {
                    self.service
                        .mark_not_interested(&target)
                        .await
                        .map(|_| Sense::Set)
                }
            }
            ActionKind::Hide => self.service.hide(&target).await.map(|_| Sense::Set),
        };

        match outcome {
            Ok(sense) => {
                self.notifier
                    .show(success_notice(action, sense, author_label.as_str()));
                Ok(Ack { action, sense })
            }
            Err(error) => {
                self.notifier
                    .show(Notice::failure("Error", format!("Something happened! {}", error)));
                Err(error.into())
            }
        }
    }
}

fn success_notice(action: ActionKind, sense: Sense, author_label: &str) -> Notice {
    match (action, sense) {
        (ActionKind::Reaction, Sense::Set) => Notice::success(
            "Success",
            format!("You liked {}'s post. Keep it going!", author_label),
        ),
        (ActionKind::Reaction, Sense::Cleared) => {
            Notice::success("Success", "Successfully removed upvote!")
        }
        (ActionKind::Bookmark, Sense::Set) => Notice::success(
            "Success",
            "Successfully bookmarked! View it on your dashboard.",
        ),
        (ActionKind::Bookmark, Sense::Cleared) => {
            Notice::success("Success", "Bookmark successfully removed!")
        }
        (ActionKind::NotInterested, Sense::Set) => Notice::success("Success", "Not interested!"),
        (ActionKind::NotInterested, Sense::Cleared) => {
            Notice::success("Success", "Successfully undone!")
        }
        (ActionKind::Hide, _) => Notice::success("Success", "Post deleted!"),
    }
}

// Serializes toggles on the same (publication, action) pair. Held across
// the request await and released on drop, success or not.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<(PublicationId, ActionKind)>>,
    key: (PublicationId, ActionKind),
}

impl<'a> InFlightGuard<'a> {
    fn acquire(
        in_flight: &'a Mutex<HashSet<(PublicationId, ActionKind)>>,
        publication: PublicationId,
        action: ActionKind,
    ) -> Option<Self> {
        let key = (publication, action);
        let mut set = in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if set.contains(&key) {
            return None;
        }
        set.insert(key.clone());
        Some(Self { in_flight, key })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        set.remove(&self.key);
    }
}
