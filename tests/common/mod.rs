//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use doctor_directory::config::DirectoryConfig;
use doctor_directory::lifecycle::Shutdown;
use doctor_directory::HttpServer;

/// Three doctors in upstream wire format, with the usual sloppiness.
pub const DOCTORS_JSON: &str = r#"[
  {"id":"1","name":"Dr. Alice Rao","name_initials":"AR","photo":"null",
   "doctor_introduction":"","specialities":[{"name":"Dentist"}],
   "fees":"₹ 500","experience":"10 Years of experience",
   "clinic":{"address":{"locality":"Indiranagar","city":"Bangalore"}},
   "video_consult":true,"in_clinic":false},
  {"id":"2","name":"Dr. Bob Mehta","name_initials":"BM","photo":null,
   "doctor_introduction":"Ear, nose and throat.",
   "specialities":[{"name":"ENT"},{"name":"Dentist"}],
   "fees":"₹ 300","experience":"5 Years of experience",
   "clinic":{"address":{"locality":null,"city":"Pune"}},
   "video_consult":false,"in_clinic":true},
  {"id":"3","name":"Dr. Carol Iyer","name_initials":"CI",
   "specialities":[{"name":"Cardiologist"}],
   "fees":"₹ 1,000","experience":"21 Years of experience",
   "video_consult":true,"in_clinic":true}
]"#;

/// Start a programmable mock upstream on an ephemeral port.
///
/// `f` returns the status code and body for each request.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that always answers `status` with `body`.
pub async fn start_upstream(status: u16, body: &'static str) -> SocketAddr {
    start_programmable_upstream(move || async move { (status, body.to_string()) }).await
}

/// Start the directory service pointed at `upstream_url`.
///
/// Returns the service address and the shutdown handle keeping it alive.
pub async fn start_directory(upstream_url: String) -> (SocketAddr, Shutdown) {
    let mut config = DirectoryConfig::default();
    config.upstream.url = upstream_url;
    config.upstream.use_system_proxy = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
