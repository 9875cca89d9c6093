use std::collections::HashSet;
use log::{debug, info, warn};
use url::Url;

use crate::{
    Error,
    core::{
        Result,
        digest,
        logger,
        config::Config,
        http_client::HttpClient,
        default_configuration::{
            DEFAULT_AVATAR_BASE,
            DEFAULT_IMAGE_SIZE
        },
    },
};

use super::{
    contact::{Contact, MatchState},
    contact_store::ContactStore,
    repository::ContactRepository,
    workflow_listener::WorkflowListener,
};

/// Drives the per-contact match cycle: pick the contact's email, digest
/// it, fetch the candidate avatar, and carry the user's accept/reject
/// decision back to the store.
///
/// All state lives on one logical task; the avatar fetch is the only
/// suspension point.
pub struct MatchWorkflow {
    repository  : ContactRepository,
    http_client : HttpClient,

    contacts    : Vec<Contact>,
    checked_emails: HashSet<String>,

    avatar_base : Url,
    image_size  : u32,
    email_index : usize,

    listeners   : Vec<Box<dyn WorkflowListener>>,
}

impl MatchWorkflow {
    pub fn new(cfg: &Box<dyn Config>, store: Box<dyn ContactStore>) -> Result<Self> {
        logger::setup(cfg.log_level(), cfg.log_file().as_deref());

        let avatar = cfg.avatar();
        let base = avatar.as_ref()
            .map(|v| v.base_url().to_string())
            .unwrap_or_else(|| DEFAULT_AVATAR_BASE.to_string());
        let avatar_base = Url::parse(&base).map_err(|e| {
            Error::Argument(format!("Invalid avatar base URL {}: {}", base, e))
        })?;

        Ok(Self {
            repository  : ContactRepository::new(store),
            http_client : HttpClient::new()?,
            contacts    : Vec::new(),
            checked_emails: HashSet::new(),
            avatar_base,
            image_size  : avatar.as_ref()
                .map(|v| v.image_size())
                .unwrap_or(DEFAULT_IMAGE_SIZE),
            email_index : avatar.as_ref()
                .map(|v| v.email_index())
                .unwrap_or(0),
            listeners   : Vec::new(),
        })
    }

    pub fn open(&mut self, path: &str) -> Result<()> {
        self.repository.open(path)
    }

    pub fn close(&mut self) {
        self.contacts.clear();
        self.checked_emails.clear();
        self.repository.close();
        logger::teardown();
    }

    pub fn add_listener(&mut self, listener: Box<dyn WorkflowListener>) {
        self.listeners.push(listener);
    }

    /// (Re)loads the active list from the store and resets the session's
    /// checked-email record.
    pub fn load(&mut self) -> Result<usize> {
        let contacts = self.repository.load_candidates()?;

        self.checked_emails.clear();
        self.contacts = contacts;

        info!("Loaded {} contacts without profile photo", self.contacts.len());
        Ok(self.contacts.len())
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact(&self, contact_id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|v| v.id() == contact_id)
    }

    pub fn is_checked(&self, email: &str) -> bool {
        self.checked_emails.contains(email)
    }

    fn position(&self, contact_id: &str) -> Option<usize> {
        self.contacts.iter().position(|v| v.id() == contact_id)
    }

    fn matching_email(&self, contact: &Contact) -> Option<String> {
        let emails = contact.email_addresses();
        emails.get(self.email_index)
            .or_else(|| emails.first())
            .cloned()
    }

    /// The lookup URL for the given email address.
    pub fn avatar_url(&self, email: &str) -> Result<Url> {
        let hash = digest::md5_hex(email);
        let mut url = self.avatar_base.join(&format!("avatar/{}", hash))?;
        url.set_query(Some(&format!("s={}", self.image_size)));
        Ok(url)
    }

    /// Attempts to find a candidate avatar for the contact.
    ///
    /// No-op when the contact is not on the active list or its email was
    /// already checked this session. A failed fetch degrades the contact
    /// to `FetchFailed` and is not an error of this call.
    pub async fn begin_match(&mut self, contact_id: &str) -> Result<()> {
        let Some(pos) = self.position(contact_id) else {
            return Ok(());
        };

        let Some(email) = self.matching_email(&self.contacts[pos]) else {
            return Ok(());
        };
        if email.trim().is_empty() {
            return Err(Error::Encoding(format!("Contact {} carries a blank email address", contact_id)));
        }

        if !self.checked_emails.insert(email.clone()) {
            debug!("Email {} was already checked this session", email);
            return Ok(());
        }

        let url = self.avatar_url(&email)?;
        self.contacts[pos].set_state(MatchState::Fetching);
        debug!("Looking up avatar for {} at {}", email, url);

        let result = self.http_client.get(&url).await;

        // the contact may have been accepted or rejected while the fetch
        // was in flight; a stale completion must not touch the list.
        let Some(pos) = self.position(contact_id) else {
            return Ok(());
        };

        match result {
            Ok(image) => {
                self.contacts[pos].set_candidate_image(image);
                self.contacts[pos].set_state(MatchState::Matched);
                info!("Loaded avatar candidate for {}", email);
                self.notify_updated(contact_id);
            },
            Err(e) => {
                self.contacts[pos].set_state(MatchState::FetchFailed);
                warn!("Failed loading avatar for {}: {}", email, e);
            }
        }
        Ok(())
    }

    /// Persists the candidate image and drops the contact from the active
    /// list. Without a candidate image this is a no-op; a failed save
    /// leaves the contact in place so the accept can be retried.
    pub fn accept(&mut self, contact_id: &str) -> Result<()> {
        let Some(pos) = self.position(contact_id) else {
            return Ok(());
        };

        let Some(image) = self.contacts[pos].candidate_image().map(|v| v.to_vec()) else {
            debug!("Contact {} has no candidate image, accept ignored", contact_id);
            return Ok(());
        };

        match self.repository.commit_image(contact_id, &image) {
            Ok(_) => {
                self.contacts.remove(pos);
                info!("Saved new photo for contact {}", contact_id);
                self.notify_removed(contact_id);
                Ok(())
            },
            Err(e) => {
                warn!("Failed to save contact {}: {}", contact_id, e);
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Drops the contact from the active list without persisting
    /// anything. Idempotent.
    pub fn reject(&mut self, contact_id: &str) {
        let Some(pos) = self.position(contact_id) else {
            return;
        };

        self.contacts[pos].clear_candidate_image();
        self.contacts.remove(pos);
        self.notify_removed(contact_id);
    }

    fn notify_updated(&self, contact_id: &str) {
        for listener in self.listeners.iter() {
            listener.on_row_updated(contact_id);
        }
    }

    fn notify_removed(&self, contact_id: &str) {
        for listener in self.listeners.iter() {
            listener.on_row_removed(contact_id);
        }
    }

    fn notify_error(&self, error: &Error) {
        for listener in self.listeners.iter() {
            listener.on_error(error);
        }
    }
}
