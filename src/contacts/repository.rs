use log::{debug, warn};

use crate::core::Result;

use super::{
    contact::Contact,
    contact_store::ContactStore,
};

/// Read/write surface over a [`ContactStore`], projecting store rows into
/// workflow candidates.
pub struct ContactRepository {
    store: Box<dyn ContactStore>,
}

impl ContactRepository {
    pub fn new(store: Box<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn open(&mut self, path: &str) -> Result<()> {
        self.store.open(path)
    }

    pub fn close(&mut self) {
        self.store.close();
    }

    /// Enumerates every container and returns the contacts that are
    /// missing a photo and carry at least one email address, in store
    /// enumeration order.
    ///
    /// A container that fails to enumerate is logged and skipped; failing
    /// to enumerate the containers themselves is fatal to the load.
    pub fn load_candidates(&mut self) -> Result<Vec<Contact>> {
        let all = self.store.containers()?;

        let mut results: Vec<Contact> = Vec::new();
        for container in all.iter() {
            match self.store.contacts(container.id()) {
                Ok(batch) => results.extend(batch),
                Err(e) => {
                    warn!("Error fetching contacts for container {}: {}", container, e);
                }
            }
        }

        let candidates = results.into_iter()
            .filter(|v| !v.has_existing_photo() && !v.email_addresses().is_empty())
            .collect::<Vec<_>>();

        debug!("Loaded {} candidate contacts from {} containers",
            candidates.len(), all.len());
        Ok(candidates)
    }

    /// Writes the image back as the contact's photo. Either the save
    /// succeeds or the contact is left unmodified.
    pub fn commit_image(&mut self, contact_id: &str, image: &[u8]) -> Result<()> {
        self.store.save_image(contact_id, image)
    }
}
