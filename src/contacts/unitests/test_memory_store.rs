use crate::Error;
use crate::contacts::{
    contact_store::{ContactStore, Container},
    memory_store::MemoryContactStore,
};
use super::contact;

#[test]
fn test_containers() {
    let mut store = MemoryContactStore::new();
    store.put_container(Container::new("local", "Local"));
    store.put_container(Container::new("work", "Work"));
    store.put_container(Container::new("local", "Local"));

    let containers = store.containers().unwrap();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].id(), "local");
    assert_eq!(containers[1].name(), "Work");
}

#[test]
fn test_contacts_roundtrip() {
    let mut store = MemoryContactStore::new();
    store.put_container(Container::new("local", "Local"));
    store.put_contact("local", contact("A", "Alice", "alice@example.com"));
    store.put_contact("local", contact("B", "Bob", "bob@example.com"));

    let contacts = store.contacts("local").unwrap();
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].id(), "A");
    assert_eq!(contacts[1].name(), Some("Bob"));

    assert!(store.contacts("nowhere").unwrap().is_empty());
}

#[test]
fn test_broken_container() {
    let mut store = MemoryContactStore::new();
    store.put_container(Container::new("broken", "Broken"));
    store.put_contact("broken", contact("A", "Alice", "alice@example.com"));
    store.fail_container("broken");

    let result = store.contacts("broken");
    assert!(matches!(result, Err(Error::Persistence(_))));
}

#[test]
fn test_save_image() {
    let mut store = MemoryContactStore::new();
    store.put_container(Container::new("local", "Local"));
    store.put_contact("local", contact("A", "Alice", "alice@example.com"));

    assert!(store.image_of("A").is_none());
    store.save_image("A", &[0xFF, 0xD8, 0xFF]).unwrap();
    assert_eq!(store.image_of("A"), Some(vec![0xFF, 0xD8, 0xFF]));
}

#[test]
fn test_save_image_unknown_contact() {
    let mut store = MemoryContactStore::new();
    let result = store.save_image("missing", &[0x00]);
    assert!(matches!(result, Err(Error::Persistence(_))));
    assert!(store.image_of("missing").is_none());
}

#[test]
fn test_clones_share_state() {
    let store = MemoryContactStore::new();
    let mut handle = store.clone();

    store.put_container(Container::new("local", "Local"));
    store.put_contact("local", contact("A", "Alice", "alice@example.com"));

    handle.save_image("A", &[0x01]).unwrap();
    assert_eq!(store.image_of("A"), Some(vec![0x01]));
}
