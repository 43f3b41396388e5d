//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;

use sefaz_monitor::config::MonitorConfig;
use sefaz_monitor::{HttpServer, Shutdown};

/// Start a mock endpoint returning a fixed HTTP response, optionally after a
/// delay. Returns the bound address.
pub async fn start_mock_endpoint(
    status: u16,
    content_type: &'static str,
    body: String,
    delay: Duration,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let body = body.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let reason = match status {
                            200 => "OK",
                            403 => "Forbidden",
                            500 => "Internal Server Error",
                            503 => "Service Unavailable",
                            _ => "OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason,
                            content_type,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock answering 302 to `location`, counting nothing itself.
#[allow(dead_code)]
pub async fn start_redirect_endpoint(location: String, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let response = format!(
                        "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        location,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock that counts every hit and returns a fixed 200 response.
#[allow(dead_code)]
pub async fn start_counting_endpoint(
    body: String,
) -> (SocketAddr, std::sync::Arc<std::sync::atomic::AtomicU32>) {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

/// Start a mock that accepts connections but never answers.
#[allow(dead_code)]
pub async fn start_silent_endpoint() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(60)).await;
                        drop(socket);
                    });
                }
                Err(_) => break,
            }
        }
    });
    addr
}

/// Reserve a port and close it, yielding an address nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Build one row of the national availability table.
pub fn portal_row(state: &str, colors: [&str; 5]) -> String {
    let mut html = format!("<tr><td>{}</td>", state);
    for color in colors {
        html.push_str(&format!(
            "<td align=\"center\"><img src=\"imagens/bola_{}_P.png\" /></td>",
            color
        ));
    }
    html.push_str("</tr>");
    html
}

/// Wrap rows into the disponibilidade page shape.
pub fn portal_page(rows: &[String]) -> String {
    format!(
        "<html><body><table class=\"tabelaListagemDados\">\
         <tr><th>UF</th><th>A</th><th>RA</th><th>I</th><th>C</th><th>S</th></tr>{}\
         </table></body></html>",
        rows.join("")
    )
}

/// A plausible WSDL-ish payload for the probed endpoint.
pub fn wsdl_body() -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><definitions>{}</definitions>",
        "s".repeat(5000)
    )
}

/// Config wired to mock endpoints, ticker disabled, in-memory sink.
pub fn test_config(probe_url: String, portal_url: String) -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.probe.url = probe_url;
    config.probe.timeout_secs = 2;
    config.portal.url = portal_url;
    config.portal.timeout_secs = 2;
    config.service.cycle_interval_secs = 0;
    config
}

/// Spin up a full server on an ephemeral port.
pub async fn spawn_server(config: MonitorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).expect("server build");
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
