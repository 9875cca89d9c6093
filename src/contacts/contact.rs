use std::fmt;

/// Per-session match progress of a contact. A contact leaves the active
/// list on accept or reject, so neither decision is a state here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    Pending,
    Fetching,
    Matched,
    FetchFailed,
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            MatchState::Pending     => "Pending",
            MatchState::Fetching    => "Fetching",
            MatchState::Matched     => "Matched",
            MatchState::FetchFailed => "FetchFailed",
        };
        write!(f, "{}", str)
    }
}

pub struct ContactBuilder {
    id          : String,
    name        : Option<String>,
    emails      : Vec<String>,

    existing_image  : Option<Vec<u8>>,
    photo_available : bool,
}

impl ContactBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id          : id.to_string(),
            name        : None,
            emails      : Vec::new(),
            existing_image  : None,
            photo_available : false,
        }
    }

    pub fn with_name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_email_address(&mut self, email: &str) -> &mut Self {
        self.emails.push(email.to_string());
        self
    }

    pub fn with_email_addresses(&mut self, emails: &[String]) -> &mut Self {
        self.emails.extend(emails.iter().cloned());
        self
    }

    pub fn with_existing_image(&mut self, image: Vec<u8>) -> &mut Self {
        self.existing_image = Some(image);
        self.photo_available = true;
        self
    }

    pub fn with_photo_available(&mut self, available: bool) -> &mut Self {
        self.photo_available = available;
        self
    }

    pub fn build(&mut self) -> Contact {
        Contact::new(self)
    }
}

/// A contact projected out of a [`ContactStore`](super::ContactStore).
///
/// The identifier is the store-issued opaque key and the sole basis of
/// equality. The candidate image is session state owned by the workflow,
/// never persisted by itself.
#[derive(Clone, Debug)]
pub struct Contact {
    id          : String,
    name        : Option<String>,
    emails      : Vec<String>,

    existing_image  : Option<Vec<u8>>,
    candidate_image : Option<Vec<u8>>,

    has_existing_photo: bool,
    state       : MatchState,
}

impl Contact {
    pub(crate) fn new(b: &mut ContactBuilder) -> Self {
        Self {
            id          : std::mem::take(&mut b.id),
            name        : b.name.take(),
            emails      : std::mem::take(&mut b.emails),
            existing_image  : b.existing_image.take(),
            candidate_image : None,
            has_existing_photo: b.photo_available,
            state       : MatchState::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email_addresses(&self) -> &[String] {
        &self.emails
    }

    pub fn existing_image(&self) -> Option<&[u8]> {
        self.existing_image.as_deref()
    }

    pub fn candidate_image(&self) -> Option<&[u8]> {
        self.candidate_image.as_deref()
    }

    pub fn has_existing_photo(&self) -> bool {
        self.has_existing_photo
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub(crate) fn set_candidate_image(&mut self, image: Vec<u8>) {
        self.candidate_image = Some(image);
    }

    pub(crate) fn clear_candidate_image(&mut self) {
        self.candidate_image = None;
    }

    pub(crate) fn set_state(&mut self, state: MatchState) {
        self.state = state;
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contact {}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{}>",
            self.name.as_deref().unwrap_or("(unnamed)"),
            self.emails.first().map(|v| v.as_str()).unwrap_or(""))
    }
}
