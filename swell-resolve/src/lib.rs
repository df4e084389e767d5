use lazy_static::lazy_static;
use swell_pub::{
    MediaAsset, MediaSource, Profile, Publication, PublicationMetadata, PublicationStats,
    ViewerOperations,
};
use swell_ref::{ContentUri, ProfileId, PublicationId};

// Canonical placeholder shown for any profile without a processed picture.
// Initialized once, never mutated.
lazy_static! {
    static ref FALLBACK_AVATAR: ContentUri = ContentUri::from_string(
        "ipfs://bafybeidkewnnnisaqmwk7ornt6fymjddlkhlou2tsfhaxxnird4w4yrebe".to_string()
    )
    .unwrap();
}

pub fn fallback_avatar() -> &'static ContentUri {
    &FALLBACK_AVATAR
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Post,
    Comment,
    Quote,
    Mirror,
}

// Borrowed view over the fields every content-bearing shape has in common.
#[derive(Clone, Copy, Debug)]
pub struct ContentView<'a> {
    pub id: &'a PublicationId,
    pub author: &'a Profile,
    pub timestamp: f64,
    pub metadata: &'a PublicationMetadata,
    pub stats: &'a PublicationStats,
    pub operations: &'a ViewerOperations,
}

impl<'a> ContentView<'a> {
    fn of(publication: &'a Publication) -> Option<Self> {
        match publication {
            Publication::Post(post) => Some(ContentView {
                id: &post.id,
                author: &post.by,
                timestamp: post.timestamp,
                metadata: &post.metadata,
                stats: &post.stats,
                operations: &post.operations,
            }),
            Publication::Comment(comment) => Some(ContentView {
                id: &comment.id,
                author: &comment.by,
                timestamp: comment.timestamp,
                metadata: &comment.metadata,
                stats: &comment.stats,
                operations: &comment.operations,
            }),
            Publication::Quote(quote) => Some(ContentView {
                id: &quote.id,
                author: &quote.by,
                timestamp: quote.timestamp,
                metadata: &quote.metadata,
                stats: &quote.stats,
                operations: &quote.operations,
            }),
            // a mirror wrapper has nothing to show
            Publication::Mirror(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum ContentState<'a> {
    Available(ContentView<'a>),
    // target failed to load, render a placeholder
    Unavailable,
}

// Read-only snapshot of a quoted publication, resolved exactly one level.
// A quote-of-a-quote surfaces the middle publication's own text and nothing
// below it.
#[derive(Clone, Copy, Debug)]
pub struct QuoteSnapshot<'a> {
    pub id: &'a PublicationId,
    pub author: &'a Profile,
    pub timestamp: f64,
    pub metadata: &'a PublicationMetadata,
}

impl<'a> QuoteSnapshot<'a> {
    fn of(publication: &'a Publication) -> Option<Self> {
        match publication {
            Publication::Post(post) => Some(QuoteSnapshot {
                id: &post.id,
                author: &post.by,
                timestamp: post.timestamp,
                metadata: &post.metadata,
            }),
            Publication::Comment(comment) => Some(QuoteSnapshot {
                id: &comment.id,
                author: &comment.by,
                timestamp: comment.timestamp,
                metadata: &comment.metadata,
            }),
            Publication::Quote(quote) => Some(QuoteSnapshot {
                id: &quote.id,
                author: &quote.by,
                timestamp: quote.timestamp,
                metadata: &quote.metadata,
            }),
            Publication::Mirror(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Relation<'a> {
    None,
    // parent is a navigation target, never rendered inline
    CommentOn(&'a PublicationId),
    Quoting(Option<QuoteSnapshot<'a>>),
    // who re-shared; the wrapper author is attribution only
    MirroredBy(&'a Profile),
}

#[derive(Clone, Copy, Debug)]
pub struct Resolved<'a> {
    pub variant: Variant,
    pub content: ContentState<'a>,
    pub relation: Relation<'a>,
}

impl<'a> Resolved<'a> {
    pub fn content_view(&self) -> Option<&ContentView<'a>> {
        match &self.content {
            ContentState::Available(view) => Some(view),
            ContentState::Unavailable => None,
        }
    }

    pub fn effective_author(&self) -> Option<&'a Profile> {
        match &self.content {
            ContentState::Available(view) => Some(view.author),
            ContentState::Unavailable => None,
        }
    }

    // Ownership check for destructive actions. Unresolvable content is
    // never owned.
    pub fn is_authored_by(&self, profile_id: &ProfileId) -> bool {
        match self.effective_author() {
            Some(author) => &author.id == profile_id,
            None => false,
        }
    }
}

pub fn resolve(publication: &Publication) -> Resolved<'_> {
    match publication {
        Publication::Post(_) => Resolved {
            variant: Variant::Post,
            content: available(publication),
            relation: Relation::None,
        },
        Publication::Comment(comment) => Resolved {
            variant: Variant::Comment,
            content: available(publication),
            relation: Relation::CommentOn(&comment.comment_on),
        },
        Publication::Quote(quote) => Resolved {
            variant: Variant::Quote,
            content: available(publication),
            relation: Relation::Quoting(
                quote
                    .quote_on
                    .as_deref()
                    .and_then(QuoteSnapshot::of),
            ),
        },
        Publication::Mirror(mirror) => Resolved {
            variant: Variant::Mirror,
            content: mirror
                .mirror_on
                .as_deref()
                .and_then(ContentView::of)
                .map(ContentState::Available)
                .unwrap_or(ContentState::Unavailable),
            relation: Relation::MirroredBy(&mirror.by),
        },
    }
}

fn available(publication: &Publication) -> ContentState<'_> {
    ContentView::of(publication)
        .map(ContentState::Available)
        .unwrap_or(ContentState::Unavailable)
}

#[derive(Clone, Copy, Debug)]
pub enum AssetKind<'a> {
    Image(&'a MediaSource),
    Video(&'a MediaSource),
    Audio {
        track: &'a MediaSource,
        // rendered above the player when present
        cover: Option<&'a MediaSource>,
    },
    None,
}

// Classification comes from the asset's own tag, never from sniffing urls.
pub fn classify_asset(metadata: &PublicationMetadata) -> AssetKind<'_> {
    match &metadata.asset {
        Some(MediaAsset::Image { image }) => AssetKind::Image(image),
        Some(MediaAsset::Video { video }) => AssetKind::Video(video),
        Some(MediaAsset::Audio { audio, cover }) => AssetKind::Audio {
            track: audio,
            cover: cover.as_ref(),
        },
        Some(MediaAsset::Unknown) | None => AssetKind::None,
    }
}

pub fn avatar_uri(profile: &Profile) -> &ContentUri {
    profile
        .picture()
        .and_then(|picture| picture.optimized.as_ref())
        .unwrap_or_else(|| fallback_avatar())
}

pub struct MediaConfig {
    pub ipfs_gateway: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway: "https://ipfs.io/ipfs/".to_string(),
        }
    }
}

impl MediaConfig {
    pub fn avatar_url(&self, profile: &Profile) -> String {
        avatar_uri(profile).to_gateway_url(&self.ipfs_gateway)
    }

    pub fn media_url(&self, source: &MediaSource) -> Option<String> {
        source
            .best()
            .map(|uri| uri.to_gateway_url(&self.ipfs_gateway))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn publication(value: serde_json::Value) -> Publication {
        serde_json::from_value(value).unwrap()
    }

    fn post_json(profile: &str, seq: &str, content: &str) -> serde_json::Value {
        json!({
            "__typename": "Post",
            "id": format!("{}-{}", profile, seq),
            "by": { "id": profile, "handle": "dinosaur" },
            "createdAt": 1700000000.0,
            "metadata": { "content": content }
        })
    }

    #[test]
    fn test_post_resolves_to_itself() {
        let post = publication(post_json("0x01", "0x01", "gm"));
        let resolved = resolve(&post);

        assert_eq!(resolved.variant, Variant::Post);
        let view = resolved.content_view().unwrap();
        assert_eq!(view.id.to_string(), "0x01-0x01");
        assert_eq!(view.metadata.content, "gm");
        assert!(matches!(resolved.relation, Relation::None));
    }

    #[test]
    fn test_comment_exposes_parent_as_navigation_only() {
        let comment = publication(json!({
            "__typename": "Comment",
            "id": "0x01-0x02",
            "by": { "id": "0x01" },
            "createdAt": 1700000000.0,
            "metadata": { "content": "same" },
            "commentOn": "0x02-0x09"
        }));
        let resolved = resolve(&comment);

        assert_eq!(resolved.variant, Variant::Comment);
        assert_eq!(resolved.content_view().unwrap().metadata.content, "same");
        match resolved.relation {
            Relation::CommentOn(parent) => assert_eq!(parent.to_string(), "0x02-0x09"),
            _ => panic!("expected comment relation"),
        }
    }

    #[test]
    fn test_mirror_resolves_to_target() {
        let mirror = publication(json!({
            "__typename": "Mirror",
            "id": "0x09-0x05",
            "by": { "id": "0x09", "handle": "echo" },
            "createdAt": 1700000001.0,
            "mirrorOn": post_json("0x01", "0x01", "original words")
        }));
        let resolved = resolve(&mirror);

        assert_eq!(resolved.variant, Variant::Mirror);
        let view = resolved.content_view().unwrap();
        // content and author come from the target, not the wrapper
        assert_eq!(view.id.to_string(), "0x01-0x01");
        assert_eq!(view.author.id.to_string(), "0x01");
        assert_eq!(view.metadata.content, "original words");
        match resolved.relation {
            Relation::MirroredBy(profile) => assert_eq!(profile.id.to_string(), "0x09"),
            _ => panic!("expected mirror relation"),
        }
    }

    #[test]
    fn test_mirror_without_target_is_unavailable() {
        let mirror = publication(json!({
            "__typename": "Mirror",
            "id": "0x09-0x06",
            "by": { "id": "0x09" },
            "createdAt": 1700000001.0
        }));
        let resolved = resolve(&mirror);

        assert!(resolved.content_view().is_none());
        assert!(matches!(resolved.content, ContentState::Unavailable));
        let someone = ProfileId::from_string("0x09".to_string()).unwrap();
        assert!(!resolved.is_authored_by(&someone));
    }

    #[test]
    fn test_quote_snapshot_resolves_one_level_only() {
        let inner_quote = json!({
            "__typename": "Quote",
            "id": "0x02-0x02",
            "by": { "id": "0x02" },
            "createdAt": 1700000000.0,
            "metadata": { "content": "middle words" },
            "quoteOn": post_json("0x03", "0x01", "deepest words")
        });
        let quote = publication(json!({
            "__typename": "Quote",
            "id": "0x01-0x07",
            "by": { "id": "0x01" },
            "createdAt": 1700000002.0,
            "metadata": { "content": "outer words" },
            "quoteOn": inner_quote
        }));
        let resolved = resolve(&quote);

        // the quote's own text is primary content
        assert_eq!(
            resolved.content_view().unwrap().metadata.content,
            "outer words"
        );
        match resolved.relation {
            Relation::Quoting(Some(snapshot)) => {
                assert_eq!(snapshot.id.to_string(), "0x02-0x02");
                assert_eq!(snapshot.metadata.content, "middle words");
            }
            _ => panic!("expected a quote snapshot"),
        }
    }

    #[test]
    fn test_quote_with_missing_target_renders_placeholder() {
        let quote = publication(json!({
            "__typename": "Quote",
            "id": "0x01-0x08",
            "by": { "id": "0x01" },
            "createdAt": 1700000002.0,
            "metadata": { "content": "orphan quote" }
        }));
        let resolved = resolve(&quote);

        assert!(matches!(resolved.relation, Relation::Quoting(None)));
        // its own content still renders
        assert!(resolved.content_view().is_some());
    }

    #[test]
    fn test_ownership_check() {
        let post = publication(post_json("0x01", "0x01", "mine"));
        let resolved = resolve(&post);

        let owner = ProfileId::from_string("0x01".to_string()).unwrap();
        let stranger = ProfileId::from_string("0x02".to_string()).unwrap();
        assert!(resolved.is_authored_by(&owner));
        assert!(!resolved.is_authored_by(&stranger));
    }

    #[test]
    fn test_classify_assets() {
        let image: PublicationMetadata = serde_json::from_value(json!({
            "content": "",
            "asset": { "type": "image", "image": { "optimized": "ipfs://bafypic" } }
        }))
        .unwrap();
        assert!(matches!(classify_asset(&image), AssetKind::Image(_)));

        let audio: PublicationMetadata = serde_json::from_value(json!({
            "content": "",
            "asset": {
                "type": "audio",
                "audio": { "raw": "ipfs://bafytrack" },
                "cover": { "optimized": "ipfs://bafycover" }
            }
        }))
        .unwrap();
        match classify_asset(&audio) {
            AssetKind::Audio { cover, .. } => assert!(cover.is_some()),
            _ => panic!("expected audio"),
        }

        let unknown: PublicationMetadata = serde_json::from_value(json!({
            "content": "",
            "asset": { "type": "hologram" }
        }))
        .unwrap();
        assert!(matches!(classify_asset(&unknown), AssetKind::None));

        let bare = PublicationMetadata::default();
        assert!(matches!(classify_asset(&bare), AssetKind::None));
    }

    #[test]
    fn test_avatar_falls_back_to_canonical_placeholder() {
        let profile: Profile = serde_json::from_value(json!({ "id": "0x01" })).unwrap();
        assert_eq!(avatar_uri(&profile), fallback_avatar());

        let pictured: Profile = serde_json::from_value(json!({
            "id": "0x01",
            "metadata": { "picture": { "optimized": "ipfs://bafyface" } }
        }))
        .unwrap();
        assert_eq!(avatar_uri(&pictured).as_str(), "ipfs://bafyface");
    }

    #[test]
    fn test_media_config_gateway() {
        let config = MediaConfig::default();
        let profile: Profile = serde_json::from_value(json!({ "id": "0x01" })).unwrap();
        assert_eq!(
            config.avatar_url(&profile),
            "https://ipfs.io/ipfs/bafybeidkewnnnisaqmwk7ornt6fymjddlkhlou2tsfhaxxnird4w4yrebe"
        );

        let source = MediaSource {
            raw: None,
            optimized: Some(ContentUri::from_string("ipfs://bafypic".to_string()).unwrap()),
        };
        assert_eq!(
            config.media_url(&source).unwrap(),
            "https://ipfs.io/ipfs/bafypic"
        );
    }
}
