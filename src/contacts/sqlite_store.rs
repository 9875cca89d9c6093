use diesel::prelude::*;
use log::warn;
use rand::RngCore;

use crate::{
    Error,
    core::Result,
};

use crate::contacts::{
    contact::{Contact, ContactBuilder},
    contact_store::{ContactStore, Container},
    sqlite3::{
        models::NewContainerRow,
        models::NewContactRow,
        models::ContactRow,
        user_version,
        drop_tbs,
        create_tbs,
        get_containers,
        put_container,
        get_contacts,
        get_contact,
        put_contact,
        update_contact_image,
    },
};

pub struct SqliteContactStore {
    connection: Option<SqliteConnection>,
}

impl SqliteContactStore {
    pub fn new() -> Self {
        Self { connection: None }
    }

    fn conn(&mut self) -> Result<&mut SqliteConnection> {
        self.connection.as_mut().ok_or(
            Error::State(format!("Contact store is not opened"))
        )
    }

    /// Issues an opaque identifier for a newly imported contact.
    pub fn random_identifier() -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    pub fn add_container(&mut self, container: &Container) -> Result<()> {
        let row = NewContainerRow {
            id  : container.id(),
            name: container.name(),
        };
        put_container(self.conn()?, row).map_err(Error::from)?;
        Ok(())
    }

    pub fn add_contact(&mut self,
        container_id: &str,
        contact: &Contact
    ) -> Result<()> {
        let emails = serde_json::to_string(contact.email_addresses())?;
        let row = NewContactRow {
            id          : contact.id(),
            containerId : container_id,
            fullName    : contact.name(),
            emailAddresses: &emails,
            image       : contact.existing_image(),
            thumbnail   : None,
        };
        put_contact(self.conn()?, row).map_err(Error::from)?;
        Ok(())
    }

    fn project(row: ContactRow) -> Contact {
        let emails = serde_json::from_str::<Vec<String>>(&row.emailAddresses)
            .unwrap_or_else(|e| {
                warn!("Contact {} carries malformed email data: {}", row.id, e);
                Vec::new()
            });

        let mut b = ContactBuilder::new(&row.id);
        b.with_email_addresses(&emails);
        if let Some(name) = row.fullName.as_deref() {
            b.with_name(name);
        }
        if let Some(image) = row.image.or(row.thumbnail) {
            b.with_existing_image(image);
        }
        b.build()
    }
}

impl ContactStore for SqliteContactStore {
    fn open(&mut self, path: &str) -> Result<()> {
        let connection = match SqliteConnection::establish(path) {
            Ok(c) => c,
            Err(e) => return Err(Error::from(e))
        };
        self.connection = Some(connection);

        // if we change the schema,
        // we should check the user version, do the schema update,
        // then increase the user_version;
        let ver  = user_version(self.conn()?);
        let conn = self.connection.as_mut().unwrap();
        if ver < 1 && !drop_tbs(conn) {
            return Err(Error::State(format!("Failed to update db tables")));
        }
        if !create_tbs(conn) {
            return Err(Error::State(format!("Failed to create db tables")));
        }

        Ok(())
    }

    fn close(&mut self) {
        self.connection = None;
    }

    fn containers(&mut self) -> Result<Vec<Container>> {
        let rows = get_containers(self.conn()?).map_err(Error::from)?;
        Ok(rows.iter()
            .map(|v| Container::new(&v.id, &v.name))
            .collect())
    }

    fn contacts(&mut self, container_id: &str) -> Result<Vec<Contact>> {
        let rows = get_contacts(self.conn()?, container_id).map_err(Error::from)?;
        Ok(rows.into_iter()
            .map(Self::project)
            .collect())
    }

    fn save_image(&mut self, contact_id: &str, image: &[u8]) -> Result<()> {
        // copy-modify-save: verify the row exists, then update it with
        // a single statement so the save applies fully or not at all.
        let existed = get_contact(self.conn()?, contact_id).map_err(Error::from)?;
        if existed.is_none() {
            return Err(Error::Persistence(format!("Contact {} does not exist", contact_id)));
        }

        let updated = update_contact_image(self.conn()?, contact_id, image)
            .map_err(Error::from)?;
        if !updated {
            return Err(Error::Persistence(format!("Failed to save image for contact {}", contact_id)));
        }
        Ok(())
    }
}
