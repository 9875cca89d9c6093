use std::net::TcpListener;
use url::Url;

use crate::Error;
use crate::core::http_client::HttpClient;
use super::serve_once;

#[tokio::test]
async fn test_get_success() {
    let addr = serve_once("200 OK", b"avatar-bytes");
    let url = Url::parse(&format!("http://{}/avatar/abc?s=512", addr)).unwrap();

    let client = HttpClient::new().unwrap();
    let result = client.get(&url).await;
    assert!(result.is_ok());
    assert_eq!(result.unwrap(), b"avatar-bytes".to_vec());
}

#[tokio::test]
async fn test_get_not_found() {
    let addr = serve_once("404 Not Found", b"");
    let url = Url::parse(&format!("http://{}/avatar/abc", addr)).unwrap();

    let client = HttpClient::new().unwrap();
    let result = client.get(&url).await;
    assert!(matches!(result, Err(Error::Server(_))));
}

#[tokio::test]
async fn test_get_server_error() {
    let addr = serve_once("500 Internal Server Error", b"boom");
    let url = Url::parse(&format!("http://{}/", addr)).unwrap();

    let client = HttpClient::new().unwrap();
    let result = client.get(&url).await;
    assert!(matches!(result, Err(Error::Server(_))));
}

#[tokio::test]
async fn test_get_unreachable() {
    // bind then drop a listener so the port actively refuses connections.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}/", addr)).unwrap();
    let client = HttpClient::new().unwrap();
    let result = client.get(&url).await;
    assert!(matches!(result, Err(Error::Transport(_))));
}
