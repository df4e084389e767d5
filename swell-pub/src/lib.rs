use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use swell_ref::{ContentUri, Handle, ProfileId, PublicationId};

// A publication is exactly one of four shapes. The wire tag decides which;
// there is no secondary marker to cross-check.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "__typename")]
pub enum Publication {
    Post(Post),
    Comment(Comment),
    Quote(Quote),
    Mirror(Mirror),
}

impl Publication {
    pub fn id(&self) -> &PublicationId {
        match self {
            Publication::Post(post) => &post.id,
            Publication::Comment(comment) => &comment.id,
            Publication::Quote(quote) => &quote.id,
            Publication::Mirror(mirror) => &mirror.id,
        }
    }

    pub fn by(&self) -> &Profile {
        match self {
            Publication::Post(post) => &post.by,
            Publication::Comment(comment) => &comment.by,
            Publication::Quote(quote) => &quote.by,
            Publication::Mirror(mirror) => &mirror.by,
        }
    }

    pub fn timestamp(&self) -> f64 {
        match self {
            Publication::Post(post) => post.timestamp,
            Publication::Comment(comment) => comment.timestamp,
            Publication::Quote(quote) => quote.timestamp,
            Publication::Mirror(mirror) => mirror.timestamp,
        }
    }

    // A mirror carries no content of its own, only the target does.
    pub fn metadata(&self) -> Option<&PublicationMetadata> {
        match self {
            Publication::Post(post) => Some(&post.metadata),
            Publication::Comment(comment) => Some(&comment.metadata),
            Publication::Quote(quote) => Some(&quote.metadata),
            Publication::Mirror(_) => None,
        }
    }

    pub fn stats(&self) -> Option<&PublicationStats> {
        match self {
            Publication::Post(post) => Some(&post.stats),
            Publication::Comment(comment) => Some(&comment.stats),
            Publication::Quote(quote) => Some(&quote.stats),
            Publication::Mirror(_) => None,
        }
    }

    pub fn operations(&self) -> Option<&ViewerOperations> {
        match self {
            Publication::Post(post) => Some(&post.operations),
            Publication::Comment(comment) => Some(&comment.operations),
            Publication::Quote(quote) => Some(&quote.operations),
            Publication::Mirror(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Publication::Post(_) => "Post",
            Publication::Comment(_) => "Comment",
            Publication::Quote(_) => "Quote",
            Publication::Mirror(_) => "Mirror",
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Post {
    pub id: PublicationId,
    pub by: Profile,
    #[serde(alias = "createdAt")]
    pub timestamp: f64,
    pub metadata: PublicationMetadata,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub stats: PublicationStats,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub operations: ViewerOperations,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Comment {
    pub id: PublicationId,
    pub by: Profile,
    #[serde(alias = "createdAt")]
    pub timestamp: f64,
    pub metadata: PublicationMetadata,
    // navigation target only, never an embedded snapshot
    #[serde(alias = "commentOn")]
    pub comment_on: PublicationId,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub stats: PublicationStats,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub operations: ViewerOperations,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Quote {
    pub id: PublicationId,
    pub by: Profile,
    #[serde(alias = "createdAt")]
    pub timestamp: f64,
    pub metadata: PublicationMetadata,
    // embedded snapshot of the quoted publication, absent when its fetch failed
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "quoteOn")]
    pub quote_on: Option<Box<Publication>>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub stats: PublicationStats,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub operations: ViewerOperations,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Mirror {
    pub id: PublicationId,
    pub by: Profile,
    #[serde(alias = "createdAt")]
    pub timestamp: f64,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "mirrorOn")]
    pub mirror_on: Option<Box<Publication>>,
}

#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub handle: Option<Handle>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub metadata: Option<ProfileMetadata>,
    #[serde(default)]
    pub stats: ProfileStats,
}

impl Profile {
    pub fn display_label(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.display_name.as_deref())
            .or_else(|| self.handle.as_ref().map(|handle| handle.local_name()))
            .unwrap_or("anon")
    }

    pub fn picture(&self) -> Option<&MediaSource> {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.picture.as_ref())
    }
}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProfileMetadata {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "displayName")]
    pub display_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub bio: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub picture: Option<MediaSource>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PublicationMetadata {
    #[serde(default)]
    pub content: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub asset: Option<MediaAsset>,
}

// At most one asset per publication, tagged by its own kind.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum MediaAsset {
    #[serde(alias = "image")]
    Image { image: MediaSource },
    #[serde(alias = "video")]
    Video { video: MediaSource },
    #[serde(alias = "audio")]
    Audio {
        audio: MediaSource,
        #[serde(default)]
        cover: Option<MediaSource>,
    },
    #[serde(other)]
    Unknown,
}

#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MediaSource {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub raw: Option<ContentUri>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub optimized: Option<ContentUri>,
}

impl MediaSource {
    pub fn best(&self) -> Option<&ContentUri> {
        self.optimized.as_ref().or(self.raw.as_ref())
    }
}

// Server-observed snapshot of what the viewer has already done to a
// publication. Read-only here: mutations go through the network and come
// back via re-fetch.
#[serde_as]
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct ViewerOperations {
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "hasUpvoted")]
    pub has_upvoted: bool,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "hasBookmarked")]
    pub has_bookmarked: bool,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default, alias = "isNotInterested")]
    pub is_not_interested: bool,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct PublicationStats {
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub mirrors: u64,
    #[serde(default)]
    pub quotes: u64,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub collects: u64,
}
