use std::net::SocketAddr;
use serial_test::serial;

use visage::{
    configuration as cfg,
    config::Config,
    ContactBuilder,
    Container,
    ContactStore,
    MatchWorkflow,
    SqliteContactStore,
};

use crate::{serve_avatars, working_path, remove_working_path};

fn server_config(addr: &SocketAddr) -> Box<dyn Config> {
    let base = format!("http://{}", addr);
    cfg::Builder::new()
        .with_avatar_base(&base)
        .build()
        .unwrap()
}

#[tokio::test]
#[serial]
async fn test_accept_persists_to_sqlite() {
    let image = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let (addr, _) = serve_avatars("200 OK", image.clone());

    let path = working_path("apitests-sqlite");
    let db = format!("{}/contacts.db", path);

    let mut store = SqliteContactStore::new();
    store.open(&db).unwrap();
    store.add_container(&Container::new("local", "Local")).unwrap();
    store.add_contact("local", &ContactBuilder::new("A")
        .with_name("Alice")
        .with_email_address("alice@example.com")
        .build()).unwrap();
    store.close();

    let cfg = server_config(&addr);
    let mut workflow = MatchWorkflow::new(&cfg, Box::new(SqliteContactStore::new())).unwrap();
    workflow.open(&db).unwrap();
    assert_eq!(workflow.load().unwrap(), 1);

    workflow.begin_match("A").await.unwrap();
    workflow.accept("A").unwrap();
    assert!(workflow.contacts().is_empty());
    workflow.close();

    // the written-back photo survives the session and takes the
    // contact out of the candidate set
    let mut store = SqliteContactStore::new();
    store.open(&db).unwrap();
    let contacts = store.contacts("local").unwrap();
    assert_eq!(contacts.len(), 1);
    assert!(contacts[0].has_existing_photo());
    assert_eq!(contacts[0].existing_image(), Some(&image[..]));
    store.close();

    let cfg = server_config(&addr);
    let mut workflow = MatchWorkflow::new(&cfg, Box::new(SqliteContactStore::new())).unwrap();
    workflow.open(&db).unwrap();
    assert_eq!(workflow.load().unwrap(), 0);
    workflow.close();

    remove_working_path(&path);
}

#[tokio::test]
#[serial]
async fn test_failed_lookup_never_touches_sqlite() {
    let (addr, _) = serve_avatars("404 Not Found", Vec::new());

    let path = working_path("apitests-sqlite-fail");
    let db = format!("{}/contacts.db", path);

    let mut store = SqliteContactStore::new();
    store.open(&db).unwrap();
    store.add_container(&Container::new("local", "Local")).unwrap();
    store.add_contact("local", &ContactBuilder::new("A")
        .with_name("Alice")
        .with_email_address("alice@example.com")
        .build()).unwrap();
    store.close();

    let cfg = server_config(&addr);
    let mut workflow = MatchWorkflow::new(&cfg, Box::new(SqliteContactStore::new())).unwrap();
    workflow.open(&db).unwrap();
    workflow.load().unwrap();
    workflow.begin_match("A").await.unwrap();

    // accept without a candidate is a no-op, in memory and on disk
    workflow.accept("A").unwrap();
    assert_eq!(workflow.contacts().len(), 1);
    workflow.close();

    let mut store = SqliteContactStore::new();
    store.open(&db).unwrap();
    let contacts = store.contacts("local").unwrap();
    assert!(!contacts[0].has_existing_photo());
    assert!(contacts[0].existing_image().is_none());
    store.close();

    remove_working_path(&path);
}
