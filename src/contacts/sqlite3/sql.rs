// const VERSION: i32 = 1;

pub(crate) const SET_USER_VERSION: &str = "PRAGMA user_version = 1";
pub(crate) const GET_USER_VERSION: &str = "PRAGMA user_version";

pub(crate) const CREATE_CONTAINERS_TABLE: &str = "
        CREATE TABLE IF NOT EXISTS containers(\
        id VARCHAR(64) NOT NULL PRIMARY KEY, \
        name VARCHAR(256) NOT NULL\
        ) WITHOUT ROWID
    ";

pub(crate) const CREATE_CONTACTS_TABLE: &str = "
        CREATE TABLE IF NOT EXISTS contacts( \
        id VARCHAR(64) NOT NULL PRIMARY KEY, \
        containerId VARCHAR(64) NOT NULL, \
        fullName VARCHAR(256), \
        emailAddresses TEXT NOT NULL, \
        image BLOB, \
        thumbnail BLOB\
        ) WITHOUT ROWID
    ";

pub(crate) const CREATE_CONTACTS_CONTAINER_INDEX: &str = "
        CREATE INDEX IF NOT EXISTS idx_contacts_containerId ON contacts(containerId)
    ";

pub(crate) const DROP_CONTAINERS_TABLE: &str = "
        DROP TABLE IF EXISTS containers
    ";

pub(crate) const DROP_CONTACTS_TABLE: &str = "
        DROP TABLE IF EXISTS contacts
    ";

pub(crate) const DROP_CONTACTS_CONTAINER_INDEX: &str = "
        DROP INDEX IF EXISTS idx_contacts_containerId
    ";
