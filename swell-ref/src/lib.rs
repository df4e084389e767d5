use hex::FromHexError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error as ThisError;
use urlencoding::encode;

#[derive(Clone, Debug, ThisError)]
pub enum RefError {
    #[error("Does not match as {ref_type}: {input}")]
    BadFormat {
        ref_type: &'static str,
        input: String,
    },
    #[error("Failed to decode hex: {0}")]
    DecodeError(#[from] FromHexError),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(Vec<u8>);

impl ProfileId {
    // From string that starts with 0x
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            Err(RefError::BadFormat {
                ref_type: "Profile",
                input: string,
            })
        } else {
            Ok(Self(Self::parse_data(string.as_str())?))
        }
    }

    pub fn to_string(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = canonical_hex("0x", 16, true);
        }
        &*RE
    }

    pub fn multi_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = canonical_hex("0x", 16, false);
        }
        &*RE
    }

    pub fn is_match(string: &str) -> bool {
        let regex = Self::single_regex();
        regex.is_match(string)
    }

    fn parse_data(key: &str) -> Result<Vec<u8>, RefError> {
        Ok(hex::decode(&key[2..])?)
    }
}

impl TryFrom<String> for ProfileId {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProfileId::from_string(value)
    }
}

impl From<&ProfileId> for String {
    fn from(value: &ProfileId) -> String {
        value.to_string()
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> String {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicationId {
    profile: Vec<u8>,
    seq: Vec<u8>,
}

impl PublicationId {
    // From string shaped like 0x<profile>-0x<seq>
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            return Err(RefError::BadFormat {
                ref_type: "Publication",
                input: string,
            });
        }
        let (profile, seq) = Self::parse_data(string.as_str())?;
        Ok(Self { profile, seq })
    }

    pub fn to_string(&self) -> String {
        format!(
            "0x{}-0x{}",
            hex::encode(&self.profile),
            hex::encode(&self.seq)
        )
    }

    pub fn profile_id(&self) -> ProfileId {
        ProfileId(self.profile.clone())
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = canonical_hex_pair(true);
        }
        &*RE
    }

    pub fn multi_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = canonical_hex_pair(false);
        }
        &*RE
    }

    pub fn is_match(string: &str) -> bool {
        let regex = Self::single_regex();
        regex.is_match(string)
    }

    pub fn to_page_url(&self) -> String {
        format!("/post/{}", self.to_string())
    }

    fn parse_data(key: &str) -> Result<(Vec<u8>, Vec<u8>), RefError> {
        let (profile_part, seq_part) = match key.split_once('-') {
            Some(parts) => parts,
            None => {
                return Err(RefError::BadFormat {
                    ref_type: "Publication",
                    input: key.to_string(),
                })
            }
        };
        Ok((
            hex::decode(&profile_part[2..])?,
            hex::decode(&seq_part[2..])?,
        ))
    }
}

impl TryFrom<String> for PublicationId {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PublicationId::from_string(value)
    }
}

impl From<&PublicationId> for String {
    fn from(value: &PublicationId) -> String {
        value.to_string()
    }
}

impl From<PublicationId> for String {
    fn from(value: PublicationId) -> String {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct TxHash(Vec<u8>);

impl TxHash {
    // From string that starts with 0x, 32 bytes of hex
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            Err(RefError::BadFormat {
                ref_type: "Tx",
                input: string,
            })
        } else {
            Ok(Self(Self::parse_data(string.as_str())?))
        }
    }

    pub fn to_string(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = Regex::new("^0x[0-9a-f]{64}$").unwrap();
        }
        &*RE
    }

    pub fn multi_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = Regex::new("0x[0-9a-f]{64}").unwrap();
        }
        &*RE
    }

    pub fn is_match(string: &str) -> bool {
        let regex = Self::single_regex();
        regex.is_match(string)
    }

    fn parse_data(key: &str) -> Result<Vec<u8>, RefError> {
        Ok(hex::decode(&key[2..])?)
    }
}

impl TryFrom<String> for TxHash {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TxHash::from_string(value)
    }
}

impl From<&TxHash> for String {
    fn from(value: &TxHash) -> String {
        value.to_string()
    }
}

impl From<TxHash> for String {
    fn from(value: TxHash) -> String {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentUri(String);

impl ContentUri {
    // ipfs://, ar:// or http(s)://
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            Err(RefError::BadFormat {
                ref_type: "ContentUri",
                input: string,
            })
        } else {
            Ok(Self(string))
        }
    }

    pub fn to_string(&self) -> String {
        self.0.clone()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^(?:ipfs://|ar://|https?://)[^\s]+$").unwrap();
        }
        &*RE
    }

    pub fn multi_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"(?:ipfs://|ar://|https?://)[^\s<]+").unwrap();
        }
        &*RE
    }

    pub fn is_match(string: &str) -> bool {
        let regex = Self::single_regex();
        regex.is_match(string)
    }

    // ipfs:// content is fetched through a configured http gateway,
    // everything else already resolves as-is
    pub fn to_gateway_url(&self, gateway: &str) -> String {
        match self.0.strip_prefix("ipfs://") {
            Some(cid) => format!("{}{}", gateway, cid),
            None => self.0.clone(),
        }
    }
}

impl TryFrom<String> for ContentUri {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContentUri::from_string(value)
    }
}

impl From<&ContentUri> for String {
    fn from(value: &ContentUri) -> String {
        value.to_string()
    }
}

impl From<ContentUri> for String {
    fn from(value: ContentUri) -> String {
        value.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    pub fn from_string(string: String) -> Result<Self, RefError> {
        if !Self::is_match(string.as_str()) {
            Err(RefError::BadFormat {
                ref_type: "Handle",
                input: string,
            })
        } else {
            Ok(Self(string))
        }
    }

    pub fn to_string(&self) -> String {
        self.0.clone()
    }

    pub fn local_name(&self) -> &str {
        self.0.as_str()
    }

    pub fn single_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = Regex::new("^[a-z0-9_]{1,31}$").unwrap();
        }
        &*RE
    }

    // @mentions inside free text
    pub fn mention_regex() -> &'static Regex {
        lazy_static! {
            static ref RE: Regex = Regex::new("@(?P<handle>[a-z0-9_]{1,31})").unwrap();
        }
        &*RE
    }

    pub fn is_match(string: &str) -> bool {
        let regex = Self::single_regex();
        regex.is_match(string)
    }

    pub fn to_page_url(&self) -> String {
        let urlsafe_name = encode(self.0.as_str());
        format!("/profile/{}", urlsafe_name)
    }
}

impl TryFrom<String> for Handle {
    type Error = RefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Handle::from_string(value)
    }
}

impl From<&Handle> for String {
    fn from(value: &Handle) -> String {
        value.to_string()
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> String {
        value.0
    }
}

// Bare http(s) urls inside free text, for auto-linking
pub fn url_regex() -> &'static Regex {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"https?://[^\s<]+").unwrap();
    }
    &*RE
}

fn canonical_hex(prefix: &str, max_bytes: u32, include_start_and_end: bool) -> Regex {
    let mut re = String::new();
    if include_start_and_end {
        re.push_str("^");
    }
    re.push_str(prefix);
    re.push_str("(?:[0-9a-f][0-9a-f]){1,");
    re.push_str(&max_bytes.to_string());
    re.push_str("}");
    if include_start_and_end {
        re.push_str("$");
    }

    Regex::new(&re).unwrap()
}

fn canonical_hex_pair(include_start_and_end: bool) -> Regex {
    let profile = canonical_hex("0x", 16, false);
    let seq = canonical_hex("0x", 16, false);

    let mut re = String::new();
    if include_start_and_end {
        re.push_str("^");
    }
    re.push_str(profile.as_str());
    re.push_str("-");
    re.push_str(seq.as_str());
    if include_start_and_end {
        re.push_str("$");
    }

    Regex::new(&re).unwrap()
}
