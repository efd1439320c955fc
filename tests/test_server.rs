use beacon::config::{ServerConfig, StaticConfig};
use beacon::server::listener::{accept_loop, bind};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn local_server_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        ..ServerConfig::default()
    }
}

async fn start(cfg: StaticConfig) -> SocketAddr {
    let listener = bind(&local_server_config()).unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = accept_loop(listener, &cfg).await;
    });
    addr
}

async fn get(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(format!("GET {path} HTTP/1.1\r\nHost: device\r\n\r\n").as_bytes())
        .await
        .unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn test_serves_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<html>home</html>").unwrap();
    std::fs::write(dir.path().join("hello.txt"), "hello").unwrap();
    let addr = start(StaticConfig {
        root: dir.path().to_path_buf(),
        ..StaticConfig::default()
    })
    .await;

    let text = get(addr, "/hello.txt").await;
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Type: text/plain; charset=utf-8\r\n"));
    assert!(text.contains("Content-Length: 5\r\n"));
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with("\r\n\r\nhello"));

    let text = get(addr, "/some/spa/route").await;
    assert!(text.ends_with("<html>home</html>"));
}

#[tokio::test]
async fn test_connections_are_served_in_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "shell").unwrap();
    let addr = start(StaticConfig {
        root: dir.path().to_path_buf(),
        ..StaticConfig::default()
    })
    .await;

    // the first client connects but stays silent, holding the server
    let mut stalled = TcpStream::connect(addr).await.unwrap();
    let second = tokio::spawn(get(addr, "/"));

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert!(!second.is_finished());

    stalled.write_all(b"GET / HTTP/1.1\r\n\r\n").await.unwrap();
    let mut first = Vec::new();
    stalled.read_to_end(&mut first).await.unwrap();
    assert!(first.ends_with(b"shell"));

    let second = second.await.unwrap();
    assert!(second.ends_with("shell"));
}

#[tokio::test]
async fn test_missing_storage_serves_404() {
    let addr = start(StaticConfig {
        root: "/definitely/not/mounted".into(),
        ..StaticConfig::default()
    })
    .await;

    let text = get(addr, "/").await;
    assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(text.ends_with("<html><body><h1>404 Not Found</h1></body></html>"));
}

#[tokio::test]
async fn test_silent_disconnect_gets_nothing_and_server_continues() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "shell").unwrap();
    let addr = start(StaticConfig {
        root: dir.path().to_path_buf(),
        ..StaticConfig::default()
    })
    .await;

    let mut silent = TcpStream::connect(addr).await.unwrap();
    silent.shutdown().await.unwrap();
    let mut response = Vec::new();
    silent.read_to_end(&mut response).await.unwrap();
    assert!(response.is_empty());

    assert!(get(addr, "/").await.ends_with("shell"));
}

#[tokio::test]
async fn test_bind_conflict_is_an_error() {
    let listener = bind(&local_server_config()).unwrap();
    let taken = listener.local_addr().unwrap();

    let result = bind(&ServerConfig {
        host: taken.ip(),
        port: taken.port(),
        ..ServerConfig::default()
    });

    assert!(result.is_err());
}
