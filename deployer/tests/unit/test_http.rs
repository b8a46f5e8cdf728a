//! HTTP facade tests against a local stub server

mod fake;

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ecsdeploy::errors::DeployError;
use ecsdeploy::http::client::HttpClient;
use ecsdeploy::http::logs::{LogsClient, TARGET_PREFIX};
use ecsdeploy::terminal::MemorySink;
use ecsdeploy::workers::renderer::{self, Options, StatusSource, TaskLogSource};
use fake::memory_console;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;
use tracing::level_filters::LevelFilter;
use url::Url;

const THROTTLED: &str = r#"{"__type":"ThrottlingException","message":"Rate exceeded"}"#;

fn read_request(stream: &mut std::net::TcpStream) {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let Ok(n) = stream.read(&mut chunk) else {
            return;
        };
        if n == 0 {
            return;
        }
        buffer.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buffer).to_string();
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= header_end + 4 + content_length {
            return;
        }
    }
}

/// Serve `status` with `body` to every connection, returning the base URL
fn stub_server(status: &'static str, body: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else {
                break;
            };
            read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/x-amz-json-1.1\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

fn subscriber_at(level: LevelFilter, sink: MemorySink) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish()
}

fn log_source(endpoint: Url) -> TaskLogSource {
    let http = HttpClient::new(endpoint, TARGET_PREFIX, None).unwrap();
    TaskLogSource::new(
        Arc::new(LogsClient::new(http)),
        "/ecs/web",
        "web/app/0123abcd",
        Utc::now(),
        90,
    )
}

#[tokio::test]
async fn test_failed_call_is_quiet_at_info() {
    let logs = MemorySink::new();
    let _guard = tracing::subscriber::set_default(subscriber_at(LevelFilter::INFO, logs.clone()));
    tracing::info!("capture ready");

    let mut source = log_source(stub_server("400 Bad Request", THROTTLED));
    let err = assert_err!(source.fetch().await);
    match err.root() {
        DeployError::ApiError { code, message } => {
            assert_eq!(code, "ThrottlingException");
            assert_eq!(message, "Rate exceeded");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let captured = logs.contents();
    assert!(captured.contains("capture ready"));
    assert!(!captured.contains("GetLogEvents"), "{captured}");
    assert!(!captured.contains("Rate exceeded"), "{captured}");
}

#[tokio::test]
async fn test_throttled_ticks_leave_the_display_alone() {
    let logs = MemorySink::new();
    let _guard = tracing::subscriber::set_default(subscriber_at(LevelFilter::INFO, logs.clone()));

    let source = log_source(stub_server("400 Bad Request", THROTTLED));
    let (console, screen) = memory_console(true);
    let token = CancellationToken::new();

    let ticks = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = ticks.clone();
    let stop = token.clone();
    let sleep = move |_: Duration| {
        // three ticks, then stop
        if counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) >= 3 {
            stop.cancel();
        }
        async {}
    };
    renderer::run(Options { interval: Duration::from_millis(1) }, source, console, sleep, token)
        .await;

    assert_eq!(screen.contents(), "");
    assert_eq!(logs.contents(), "");
}

#[tokio::test]
async fn test_successful_ticks_are_quiet_at_debug() {
    let logs = MemorySink::new();
    let _guard = tracing::subscriber::set_default(subscriber_at(LevelFilter::DEBUG, logs.clone()));

    let mut source = log_source(stub_server("200 OK", r#"{"events":[]}"#));
    let lines = assert_ok!(source.fetch().await);
    assert!(lines.is_empty());

    let captured = logs.contents();
    assert!(!captured.contains("POST"), "{captured}");
    assert!(!captured.contains("GetLogEvents"), "{captured}");
}
