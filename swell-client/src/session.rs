use swell_pub::Profile;

#[derive(Clone, Debug)]
pub enum Session {
    Guest,
    WithProfile(Profile),
}

impl Session {
    pub fn authenticated(&self) -> bool {
        matches!(self, Session::WithProfile(_))
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Session::WithProfile(profile) => Some(profile),
            Session::Guest => None,
        }
    }
}

// Where the current viewer identity comes from is not this crate's
// business; it only ever asks.
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Session;
}
