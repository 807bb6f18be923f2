use crate::config::ClientConfig;
use crate::upload::{ExtractionClient, SelectedFile};
use std::time::Duration;

/// Base URL of a server that accepts connections and never answers.
pub async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Base URL of a local port with nothing listening.
pub fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn client_at(api_url: String) -> ExtractionClient {
    let config = ClientConfig {
        api_url,
        connect_timeout: Duration::from_secs(2),
        health_timeout: Duration::from_millis(300),
        ..Default::default()
    };
    ExtractionClient::new(config).unwrap()
}

pub fn video_fixture(dir: &tempfile::TempDir, name: &str, len: usize) -> SelectedFile {
    let path = dir.path().join(name);
    std::fs::write(&path, vec![7u8; len]).unwrap();
    SelectedFile::from_path(path).unwrap()
}
