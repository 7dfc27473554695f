//! Network failures and wire logging of the SOAP client

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use icsoap::soap::{Envelope, Rpc};
use icsoap::{CallContext, SoapClient, SoapError, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const PORTAL: &str = "/iControl/iControlPortal.cgi";

/// Log sink shared with the fmt subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs a debug-level subscriber for the current thread
fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

fn version_response() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
    xmlns:m="urn:iControl:System/SystemInfo">
  <SOAP-ENV:Body>
    <m:get_versionResponse><return>BIG-IP_v11.6.1</return></m:get_versionResponse>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
        .to_string()
}

fn get_version() -> Envelope {
    Envelope::new("urn:iControl:System/SystemInfo", Rpc::new("get_version"))
}

#[tokio::test]
async fn test_debug_logs_request_and_response_bodies() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(version_response()))
        .mount(&mock_server)
        .await;

    let (logs, _guard) = capture_logs();
    let client = SoapClient::builder(format!("{}{}", mock_server.uri(), PORTAL))
        .debug(true)
        .build()
        .unwrap();
    client
        .call(&CallContext::background(), &get_version())
        .await
        .unwrap();

    let output = logs.contents();
    assert!(output.contains("icsoap::wire"), "{output}");
    assert!(output.contains("<tns:get_version"), "{output}");
    assert!(output.contains("BIG-IP_v11.6.1"), "{output}");
}

#[tokio::test]
async fn test_no_wire_logs_without_debug() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(version_response()))
        .mount(&mock_server)
        .await;

    let (logs, _guard) = capture_logs();
    let client = SoapClient::builder(format!("{}{}", mock_server.uri(), PORTAL))
        .build()
        .unwrap();
    client
        .call(&CallContext::background(), &get_version())
        .await
        .unwrap();

    let output = logs.contents();
    assert!(!output.contains("icsoap::wire"), "{output}");
    assert!(!output.contains("BIG-IP_v11.6.1"), "{output}");
}

#[tokio::test]
async fn test_refused_connection_is_connect_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = SoapClient::builder(format!("http://127.0.0.1:{port}{PORTAL}"))
        .build()
        .unwrap();
    let err = client
        .call(&CallContext::background(), &get_version())
        .await
        .unwrap_err();

    assert!(
        matches!(err, SoapError::Transport(TransportError::Connect(_))),
        "unexpected error: {err:?}"
    );
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_total_timeout_is_timeout_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(version_response())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let client = SoapClient::builder(format!("{}{}", mock_server.uri(), PORTAL))
        .connection_timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let err = client
        .call(&CallContext::background(), &get_version())
        .await
        .unwrap_err();

    assert!(
        matches!(err, SoapError::Transport(TransportError::Timeout(_))),
        "unexpected error: {err:?}"
    );
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        while !request.windows(15).any(|w| w == b"</env:Envelope>") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        // Announces more bytes than are sent, then hangs up
        socket
            .write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 1000\r\nConnection: close\r\n\r\nmaintenance",
            )
            .await
            .unwrap();
    });

    let client = SoapClient::builder(format!("http://{addr}{PORTAL}"))
        .build()
        .unwrap();
    let err = client
        .call(&CallContext::background(), &get_version())
        .await
        .unwrap_err();

    match &err {
        SoapError::HttpStatus { status, body } => {
            assert_eq!(*status, 503);
            assert!(b"maintenance".starts_with(body));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
