use diesel::prelude::*;
use super::schema::{
    containers,
    contacts
};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = containers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ContainerRow {
    pub(crate) id: String,
    pub(crate) name: String,
}

#[derive(Insertable)]
#[diesel(table_name = containers)]
pub(crate) struct NewContainerRow<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
}

#[allow(non_snake_case)]
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ContactRow {
    pub(crate) id: String,
    pub(crate) containerId: String,
    pub(crate) fullName: Option<String>,
    pub(crate) emailAddresses: String,
    pub(crate) image: Option<Vec<u8>>,
    pub(crate) thumbnail: Option<Vec<u8>>,
}

#[allow(non_snake_case)]
#[derive(Insertable)]
#[diesel(table_name = contacts)]
#[derive(Default)]
pub(crate) struct NewContactRow<'a> {
    pub(crate) id: &'a str,
    pub(crate) containerId: &'a str,
    pub(crate) fullName: Option<&'a str>,
    pub(crate) emailAddresses: &'a str,
    pub(crate) image: Option<&'a [u8]>,
    pub(crate) thumbnail: Option<&'a [u8]>,
}
