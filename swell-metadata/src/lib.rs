use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use swell_ref::{url_regex, ContentUri, Handle};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    TextOnly,
    Image,
    Video,
    Audio,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum DraftAsset {
    #[serde(rename = "image")]
    Image { image: ContentUri },
    #[serde(rename = "video")]
    Video { video: ContentUri },
    #[serde(rename = "audio")]
    Audio {
        audio: ContentUri,
        #[serde(default)]
        cover: Option<ContentUri>,
    },
}

impl DraftAsset {
    fn kind(&self) -> ContentKind {
        match self {
            DraftAsset::Image { .. } => ContentKind::Image,
            DraftAsset::Video { .. } => ContentKind::Video,
            DraftAsset::Audio { .. } => ContentKind::Audio,
        }
    }
}

// Canonical metadata object handed to the storage uploader. Content
// addressing happens there, not here.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DraftMetadata {
    pub kind: ContentKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<DraftAsset>,
}

pub fn text_only(content: &str) -> DraftMetadata {
    DraftMetadata {
        kind: ContentKind::TextOnly,
        content: linkify(content),
        asset: None,
    }
}

pub fn with_asset(content: &str, asset: DraftAsset) -> DraftMetadata {
    DraftMetadata {
        kind: asset.kind(),
        content: linkify(content),
        asset: Some(asset),
    }
}

// Wrap bare urls and @mentions in anchors, then rewrite newlines for
// inline display. Runs once at build time and is deterministic.
pub fn linkify(text: &str) -> String {
    let linked = url_regex().replace_all(text, |caps: &Captures| {
        let url = &caps[0];
        format!("<a href=\"{}\" target=\"_blank\">{}</a>", url, url)
    });
    let mentioned = mention_in_text_regex().replace_all(&linked, |caps: &Captures| {
        let handle = &caps["handle"];
        format!(
            "{}<a href=\"/profile/{}\">@{}</a>",
            &caps["lead"], handle, handle
        )
    });
    mentioned.replace('\n', "<br> ")
}

// Mentions only count at a word boundary, so the handle charset inside an
// already-linked url is left alone.
fn mention_in_text_regex() -> &'static Regex {
    lazy_static! {
        static ref OG_RE: &'static str = Handle::mention_regex().as_str();
        static ref RE: Regex =
            Regex::new(format!(r"(?P<lead>^|\s){}", *OG_RE).as_str()).unwrap();
    }
    &*RE
}
