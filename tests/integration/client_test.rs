use honeybadger::core::{Backend, Feature, Logger};
use honeybadger::platform::StaticEnvironment;
use honeybadger::{Client, Configuration, Context, Error, Extra, HoneybadgerError, Notice, Result};
use parking_lot::Mutex;
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Default)]
struct Recording {
    notices: Mutex<Vec<Notice>>,
}

impl Backend for Recording {
    fn notify(&self, feature: Feature, notice: &Notice, _config: &Configuration) -> Result<()> {
        assert_eq!(feature, Feature::Notices);
        self.notices.lock().push(notice.clone());
        Ok(())
    }
}

struct Refusing;

impl Backend for Refusing {
    fn notify(&self, _feature: Feature, _notice: &Notice, _config: &Configuration) -> Result<()> {
        Err(HoneybadgerError::transport("connection refused"))
    }
}

#[derive(Default)]
struct Lines(Mutex<Vec<String>>);

impl Logger for Lines {
    fn log(&self, args: fmt::Arguments<'_>) {
        self.0.lock().push(args.to_string());
    }
}

fn client(backend: Arc<dyn Backend>) -> Client {
    let overrides = Configuration::default()
        .with_api_key("abc")
        .with_backend(backend);
    Client::with_config(Configuration::resolve_with(&StaticEnvironment::new(), overrides))
}

fn error() -> Error {
    Error::new("boom", "RuntimeError", Vec::new())
}

#[test]
fn test_notify_delivers_once_and_returns_token() {
    let backend = Arc::new(Recording::default());
    let client = client(backend.clone());

    let token = client.notify(error(), []).unwrap();

    let notices = backend.notices.lock();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].token, token);
    assert_eq!(notices[0].api_key, "abc");
}

#[test]
fn test_client_context_seeds_notices() {
    let backend = Arc::new(Recording::default());
    let client = client(backend.clone());
    client.set_context(Context::new().with("user", "u1").with("plan", "free"));

    client
        .notify(error(), [Extra::from(Context::new().with("plan", "pro"))])
        .unwrap();

    let notices = backend.notices.lock();
    assert_eq!(notices[0].context, Context::new().with("user", "u1").with("plan", "pro"));
    assert_eq!(client.context(), Context::new().with("user", "u1").with("plan", "free"));
}

#[test]
fn test_delivery_errors_are_returned_and_logged() {
    let lines = Arc::new(Lines::default());
    let overrides = Configuration::default()
        .with_backend(Arc::new(Refusing))
        .with_logger(lines.clone());
    let client = Client::with_config(Configuration::resolve_with(&StaticEnvironment::new(), overrides));

    let result = client.notify(error(), []);

    assert!(matches!(result, Err(HoneybadgerError::Transport(_))));
    assert_eq!(lines.0.lock().len(), 1);
    assert!(lines.0.lock()[0].contains("connection refused"));
}

#[test]
fn test_configure_layers_overrides() {
    let client = client(Arc::new(Recording::default()));
    client.configure(Configuration::default().with_env("staging"));
    client.configure(Configuration::default().with_api_key("rotated"));

    let config = client.config();
    assert_eq!(config.env, "staging");
    assert_eq!(config.api_key, "rotated");
}

#[test]
fn test_build_notice_does_not_send() {
    let backend = Arc::new(Recording::default());
    let client = client(backend.clone());

    let notice = client.build_notice(error(), []).unwrap();

    assert_eq!(notice.error_message, "boom");
    assert!(backend.notices.lock().is_empty());
}

#[test]
fn test_concurrent_notify() {
    let backend = Arc::new(Recording::default());
    let client = Arc::new(client(backend.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || client.notify(error(), []).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(backend.notices.lock().len(), 8);
}

/// Accept one request on a local port and return its lowercased header lines.
fn serve_once() -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut headers = Vec::new();
        let mut content_length = 0usize;

        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_lowercase();
            if line.is_empty() {
                break;
            }
            if let Some(value) = line.strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap();
            }
            headers.push(line);
        }

        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = reader.into_inner();
        stream
            .write_all(b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
            .unwrap();
        headers
    });

    (endpoint, handle)
}

#[test]
fn test_configure_reaches_default_transport() {
    let (endpoint, server) = serve_once();
    let overrides = Configuration::default()
        .with_api_key("old-key")
        .with_endpoint("http://127.0.0.1:9");
    let client = Client::with_config(Configuration::resolve_with(&StaticEnvironment::new(), overrides));

    client.configure(
        Configuration::default()
            .with_api_key("rotated-key")
            .with_endpoint(endpoint),
    );
    client.notify(error(), []).unwrap();

    let headers = server.join().unwrap();
    assert!(headers.iter().any(|h| h.starts_with("post /v1/notices ")));
    assert!(headers.contains(&"x-api-key: rotated-key".to_string()), "{:?}", headers);
    assert!(!headers.contains(&"x-api-key: old-key".to_string()));
}
