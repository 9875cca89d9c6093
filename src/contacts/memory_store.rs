use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::{
    Error,
    core::Result,
};

use super::{
    contact::Contact,
    contact_store::{ContactStore, Container},
};

struct Inner {
    containers  : Vec<Container>,
    contacts    : HashMap<String, Vec<Contact>>,
    images      : HashMap<String, Vec<u8>>,
    broken      : HashSet<String>,
}

/// In-memory contact store. Cheap to seed and to inspect, which makes it
/// the store of choice for workflow tests; clones share the same state.
#[derive(Clone)]
pub struct MemoryContactStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                containers  : Vec::new(),
                contacts    : HashMap::new(),
                images      : HashMap::new(),
                broken      : HashSet::new(),
            }))
        }
    }

    pub fn put_container(&self, container: Container) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.containers.contains(&container) {
            inner.containers.push(container);
        }
    }

    pub fn put_contact(&self, container_id: &str, contact: Contact) {
        self.inner.lock().unwrap()
            .contacts
            .entry(container_id.to_string())
            .or_default()
            .push(contact);
    }

    /// Makes contact enumeration fail for the given container.
    pub fn fail_container(&self, container_id: &str) {
        self.inner.lock().unwrap()
            .broken
            .insert(container_id.to_string());
    }

    /// The image saved for the given contact, if any.
    pub fn image_of(&self, contact_id: &str) -> Option<Vec<u8>> {
        self.inner.lock().unwrap()
            .images
            .get(contact_id)
            .cloned()
    }
}

impl ContactStore for MemoryContactStore {
    fn open(&mut self, _path: &str) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {}

    fn containers(&mut self) -> Result<Vec<Container>> {
        Ok(self.inner.lock().unwrap().containers.clone())
    }

    fn contacts(&mut self, container_id: &str) -> Result<Vec<Contact>> {
        let inner = self.inner.lock().unwrap();
        if inner.broken.contains(container_id) {
            return Err(Error::Persistence(format!("Container {} is not accessible", container_id)));
        }

        Ok(inner.contacts
            .get(container_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_image(&mut self, contact_id: &str, image: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let container_id = inner.contacts
            .iter()
            .find(|(_, batch)| batch.iter().any(|v| v.id() == contact_id))
            .map(|(id, _)| id.clone());
        let Some(container_id) = container_id else {
            return Err(Error::Persistence(format!("Contact {} does not exist", contact_id)));
        };
        if inner.broken.contains(&container_id) {
            return Err(Error::Persistence(format!("Container {} is not accessible", container_id)));
        }

        inner.images.insert(contact_id.to_string(), image.to_vec());
        Ok(())
    }
}
