pub(crate) mod models;
pub(crate) mod schema;
mod sql;

use crate::contacts::sqlite3::models::{
    ContainerRow,
    NewContainerRow,
    ContactRow,
    NewContactRow
};

use crate::contacts::sqlite3::schema::contacts::{
    dsl::contacts,
    containerId as contact_container,
    image       as contact_image,
};

use crate::contacts::sqlite3::schema::containers::{
    dsl::containers,
};

use diesel::prelude::*;
use diesel::result::Error;
use diesel::sql_types::Integer;

#[derive(QueryableByName)]
struct UserVersion {
    #[diesel(sql_type = Integer)]
    user_version: i32,
}

pub(crate) fn user_version(
    conn: &mut SqliteConnection
) -> i32 {
    let result = diesel::sql_query(sql::GET_USER_VERSION)
        .get_result::<UserVersion>(conn);

    match result {
        Ok(ver) => ver.user_version,
        Err(_) => 0,
    }
}

pub(crate) fn drop_tbs(
    conn: &mut SqliteConnection
) -> bool {
    diesel::sql_query(sql::DROP_CONTACTS_CONTAINER_INDEX).execute(conn).is_ok()  &&
    diesel::sql_query(sql::DROP_CONTACTS_TABLE).execute(conn).is_ok()            &&
    diesel::sql_query(sql::DROP_CONTAINERS_TABLE).execute(conn).is_ok()
}

pub(crate) fn create_tbs(
    conn: &mut SqliteConnection
) -> bool {
    diesel::sql_query(sql::SET_USER_VERSION).execute(conn).is_ok()               &&
    diesel::sql_query(sql::CREATE_CONTAINERS_TABLE).execute(conn).is_ok()        &&
    diesel::sql_query(sql::CREATE_CONTACTS_TABLE).execute(conn).is_ok()          &&
    diesel::sql_query(sql::CREATE_CONTACTS_CONTAINER_INDEX).execute(conn).is_ok()
}

// ------------------------------------
// "SELECT * FROM containers"
// ------------------------------------
pub(crate) fn get_containers(
    conn: &mut SqliteConnection
) -> Result<Vec<ContainerRow>, Error> {
    containers
        .select(ContainerRow::as_select())
        .load(conn)
}

// --------------------------------------------------------------
// "INSERT INTO containers(id, name) VALUES(?, ?)"
// --------------------------------------------------------------
pub(crate) fn put_container(
    conn: &mut SqliteConnection,
    v: NewContainerRow
) -> Result<bool, Error> {
    use crate::contacts::sqlite3::schema::containers;
    diesel::insert_or_ignore_into(containers::table)
        .values(&v)
        .execute(conn)
        .and_then(|num| Ok(num > 0))
}

// --------------------------------------------------------------
// "SELECT * FROM contacts WHERE containerId = ?"
// --------------------------------------------------------------
pub(crate) fn get_contacts(
    conn: &mut SqliteConnection,
    container_id: &str
) -> Result<Vec<ContactRow>, Error> {
    contacts
        .filter(contact_container.eq(container_id))
        .select(ContactRow::as_select())
        .load(conn)
}

// ------------------------------------
// "SELECT * FROM contacts WHERE id = ?"
// ------------------------------------
pub(crate) fn get_contact(
    conn: &mut SqliteConnection,
    id: &str
) -> Result<Option<ContactRow>, Error> {
    contacts.find(id)
        .select(ContactRow::as_select())
        .load(conn)
        .and_then(|mut v| Ok(v.pop()))
}

// --------------------------------------------------------------
// "INSERT INTO contacts(id, containerId, fullName, \
//  emailAddresses, image, thumbnail) VALUES(?, ?, ?, ?, ?, ?)"
// --------------------------------------------------------------
pub(crate) fn put_contact(
    conn: &mut SqliteConnection,
    v: NewContactRow
) -> Result<bool, Error> {
    use crate::contacts::sqlite3::schema::contacts as tbl;
    diesel::insert_into(tbl::table)
        .values(&v)
        .execute(conn)
        .and_then(|num| Ok(num > 0))
}

// ------------------------------------------------
// "UPDATE contacts SET image = ? WHERE id = ?"
// ------------------------------------------------
pub(crate) fn update_contact_image(
    conn: &mut SqliteConnection,
    id: &str,
    image: &[u8]
) -> Result<bool, Error> {
    diesel::update(contacts.find(id))
        .set(contact_image.eq(Some(image)))
        .execute(conn)
        .and_then(|num| Ok(num > 0))
}
