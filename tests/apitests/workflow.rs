use std::net::SocketAddr;
use std::sync::atomic::Ordering;

use visage::{
    configuration as cfg,
    config::Config,
    ContactBuilder,
    Container,
    MatchState,
    MatchWorkflow,
    MemoryContactStore,
};

use crate::serve_avatars;

fn server_config(addr: &SocketAddr) -> Box<dyn Config> {
    let base = format!("http://{}", addr);
    cfg::Builder::new()
        .with_avatar_base(&base)
        .build()
        .unwrap()
}

fn seeded_store() -> MemoryContactStore {
    let store = MemoryContactStore::new();
    store.put_container(Container::new("local", "Local"));
    store.put_contact("local", ContactBuilder::new("A")
        .with_name("Alice")
        .with_email_address("a@x.com")
        .build());
    store.put_contact("local", ContactBuilder::new("B")
        .with_name("Bob")
        .with_email_address("b@x.com")
        .build());
    store.put_contact("local", ContactBuilder::new("C")
        .with_name("Carol")
        .with_email_address("carol@example.com")
        .with_existing_image(vec![0x01, 0x02])
        .build());
    store
}

#[tokio::test]
async fn test_accept_scenario() {
    let image = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    let (addr, hits) = serve_avatars("200 OK", image.clone());

    let store = seeded_store();
    let handle = store.clone();

    let cfg = server_config(&addr);
    let mut workflow = MatchWorkflow::new(&cfg, Box::new(store)).unwrap();

    // Carol already has a photo and never enters the workflow
    assert_eq!(workflow.load().unwrap(), 2);
    assert!(workflow.contact("C").is_none());

    let url = workflow.avatar_url("a@x.com").unwrap();
    assert_eq!(url.path(), "/avatar/743173788aa9166801df2e18f0e7ff24");
    assert_eq!(url.query(), Some("s=512"));

    workflow.begin_match("A").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(workflow.contact("A").unwrap().candidate_image(), Some(&image[..]));

    workflow.accept("A").unwrap();
    assert_eq!(workflow.contacts().len(), 1);
    assert!(workflow.contact("A").is_none());
    assert_eq!(handle.image_of("A"), Some(image));
}

#[tokio::test]
async fn test_not_found_scenario() {
    let (addr, hits) = serve_avatars("404 Not Found", Vec::new());

    let store = seeded_store();
    let handle = store.clone();

    let cfg = server_config(&addr);
    let mut workflow = MatchWorkflow::new(&cfg, Box::new(store)).unwrap();
    workflow.load().unwrap();

    workflow.begin_match("B").await.unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let failed = workflow.contact("B").unwrap();
    assert_eq!(failed.state(), MatchState::FetchFailed);
    assert!(failed.candidate_image().is_none());

    // accept is a no-op without a candidate image
    workflow.accept("B").unwrap();
    assert_eq!(workflow.contacts().len(), 2);
    assert!(handle.image_of("B").is_none());
}

#[tokio::test]
async fn test_reject_scenario() {
    let (addr, _) = serve_avatars("200 OK", vec![0xFF, 0xD8]);

    let store = seeded_store();
    let handle = store.clone();

    let cfg = server_config(&addr);
    let mut workflow = MatchWorkflow::new(&cfg, Box::new(store)).unwrap();
    workflow.load().unwrap();

    workflow.begin_match("A").await.unwrap();
    workflow.reject("A");

    assert!(workflow.contact("A").is_none());
    assert!(handle.image_of("A").is_none());
}
