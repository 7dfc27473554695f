//! Integration tests for the SOAP transport client

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use icsoap::soap::{Envelope, Rpc, parse_envelope};
use icsoap::{
    CallContext, HttpRequest, HttpResponse, HttpTransport, SoapClient, SoapError, TransportError,
};
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use xmltree::{Element, XMLNode};

const PORTAL: &str = "/iControl/iControlPortal.cgi";

fn response_envelope(namespace: &str, rpc: &str, inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xmlns:m="{namespace}">
  <SOAP-ENV:Body>
    <m:{rpc}Response>{inner}</m:{rpc}Response>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#
    )
}

async fn client_for(server: &MockServer) -> SoapClient {
    SoapClient::builder(format!("{}{}", server.uri(), PORTAL))
        .basic_auth("admin", "admin")
        .build()
        .unwrap()
}

/// Transport that never answers
struct PendingTransport;

#[async_trait]
impl HttpTransport for PendingTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        std::future::pending().await
    }
}

/// Transport counting requests and keeping the last one
#[derive(Default)]
struct RecordingTransport {
    calls: AtomicUsize,
    last: Mutex<Option<HttpRequest>>,
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request);
        Ok(HttpResponse {
            status: 200,
            body: Bytes::from(response_envelope("urn:x", "get_list", "<return/>")),
        })
    }
}

/// Transport answering every RPC with its first parameter as `return`
struct EchoTransport;

#[async_trait]
impl HttpTransport for EchoTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let envelope = parse_envelope(&request.body).unwrap();
        let call = envelope.payload().unwrap();

        let mut value = call
            .children
            .iter()
            .find_map(|n| n.as_element())
            .cloned()
            .unwrap_or_else(|| Element::new("return"));
        value.name = "return".to_string();

        let mut response = Element::new(&format!("{}Response", call.name));
        response.children.push(XMLNode::Element(value));
        let mut body = Element::new("E:Body");
        body.children.push(XMLNode::Element(response));
        let mut root = Element::new("E:Envelope");
        root.attributes.insert(
            "xmlns:E".to_string(),
            "http://schemas.xmlsoap.org/soap/envelope/".to_string(),
        );
        root.children.push(XMLNode::Element(body));

        let mut buf = Vec::new();
        root.write(&mut buf).unwrap();
        Ok(HttpResponse {
            status: 200,
            body: Bytes::from(buf),
        })
    }
}

#[tokio::test]
async fn test_request_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(PORTAL))
        .and(header("content-type", r#"text/xml; charset="utf-8""#))
        .and(header(
            "user-agent",
            concat!("icsoap/", env!("CARGO_PKG_VERSION")),
        ))
        .and(header("x-request-source", "tests"))
        .and(basic_auth("admin", "admin"))
        .and(body_string_contains("<tns:get_version"))
        .and(body_string_contains(
            r#"xmlns:tns="urn:iControl:System/SystemInfo""#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_envelope(
            "urn:iControl:System/SystemInfo",
            "get_version",
            "<return>BIG-IP_v11.6.1</return>",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = SoapClient::builder(format!("{}{}", mock_server.uri(), PORTAL))
        .basic_auth("admin", "admin")
        .header("X-Request-Source", "tests")
        .debug(true)
        .build()
        .unwrap();

    let version: String = client
        .invoke(
            &CallContext::background(),
            "urn:iControl:System/SystemInfo",
            Rpc::new("get_version"),
        )
        .await
        .unwrap();

    assert_eq!(version, "BIG-IP_v11.6.1");
}

#[tokio::test]
async fn test_http_error_keeps_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let envelope = Envelope::new("urn:iControl:GlobalLB/Pool", Rpc::new("get_list"));
    let err = client
        .call(&CallContext::background(), &envelope)
        .await
        .unwrap_err();

    match &err {
        SoapError::HttpStatus { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body.as_ref(), b"internal error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "HTTP Status 500: internal error");
    assert!(err.fault().is_none());
}

#[tokio::test]
async fn test_fault_is_parsed_on_demand() {
    let mock_server = MockServer::start().await;

    let fault = r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/">
  <SOAP-ENV:Body>
    <SOAP-ENV:Fault>
      <faultcode>SOAP-ENV:Server</faultcode>
      <faultstring>The requested wide IP (/Common/missing) was not found.</faultstring>
    </SOAP-ENV:Fault>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .invoke::<Vec<String>>(
            &CallContext::background(),
            "urn:iControl:GlobalLB/WideIP",
            Rpc::new("get_lb_method").param("wide_ips", &vec!["/Common/missing".to_string()]),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    let fault = err.fault().unwrap();
    assert_eq!(fault.fault_code, "SOAP-ENV:Server");
    assert!(fault.fault_string.contains("was not found"));
}

#[tokio::test]
async fn test_unauthorized_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Authorization Required"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .invoke::<String>(
            &CallContext::background(),
            "urn:iControl:System/SystemInfo",
            Rpc::new("get_version"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.raw_body().unwrap().as_ref(), b"Authorization Required");
}

#[tokio::test]
async fn test_malformed_success_body_is_decoding_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>proxy"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client
        .invoke::<Vec<String>>(
            &CallContext::background(),
            "urn:iControl:GlobalLB/Pool",
            Rpc::new("get_list"),
        )
        .await
        .unwrap_err();

    match err {
        SoapError::Decoding { raw, .. } => assert_eq!(raw.as_ref(), b"<html><body>proxy"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_self_closing_return_is_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string(response_envelope(
            "urn:iControl:GlobalLB/WideIP",
            "get_list",
            r#"<return xsi:type="A:Array" xmlns:A="http://schemas.xmlsoap.org/soap/encoding/"/>"#,
        )))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let names: Vec<String> = client
        .invoke(
            &CallContext::background(),
            "urn:iControl:GlobalLB/WideIP",
            Rpc::new("get_list"),
        )
        .await
        .unwrap();

    assert!(names.is_empty());
}

#[tokio::test]
async fn test_concurrent_calls_do_not_mix_responses() {
    let mock_server = MockServer::start().await;

    for i in 0..64 {
        Mock::given(method("POST"))
            .and(body_string_contains(format!("<item>/Common/pool_{i}</item>")))
            .respond_with(ResponseTemplate::new(200).set_body_string(response_envelope(
                "urn:iControl:GlobalLB/Pool",
                "get_ttl",
                &format!("<return><item>{}</item></return>", i * 10),
            )))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server).await;
    let mut handles = Vec::new();
    for i in 0..64i64 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let names = vec![format!("/Common/pool_{i}")];
            let ttls: Vec<i64> = client
                .invoke(
                    &CallContext::background(),
                    "urn:iControl:GlobalLB/Pool",
                    Rpc::new("get_ttl").param("pool_names", &names),
                )
                .await
                .unwrap();
            (i, ttls)
        }));
    }

    for handle in handles {
        let (i, ttls) = handle.await.unwrap();
        assert_eq!(ttls, vec![i * 10]);
    }
}

#[tokio::test]
async fn test_cancelled_context_returns_promptly() {
    // Non-routable address: a real attempt would hang until the dial timeout.
    let client = SoapClient::builder("http://10.255.255.1:81/iControl/iControlPortal.cgi")
        .build()
        .unwrap();

    let ctx = CallContext::background();
    ctx.cancel();

    let envelope = Envelope::new("urn:iControl:GlobalLB/Pool", Rpc::new("get_list"));
    let result = tokio::time::timeout(Duration::from_secs(1), client.call(&ctx, &envelope))
        .await
        .expect("cancelled call should not wait on the network");

    let err = result.unwrap_err();
    assert!(err.is_cancelled());
    assert!(matches!(err, SoapError::Transport(TransportError::Cancelled)));
}

#[tokio::test]
async fn test_cancellation_aborts_in_flight_call() {
    let client = SoapClient::builder("http://bigip.test/iControl/iControlPortal.cgi")
        .transport(Arc::new(PendingTransport))
        .build()
        .unwrap();

    let ctx = CallContext::background();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let envelope = Envelope::new("urn:iControl:GlobalLB/Pool", Rpc::new("get_list"));
    let err = tokio::time::timeout(Duration::from_secs(5), client.call(&ctx, &envelope))
        .await
        .unwrap()
        .unwrap_err();

    assert!(err.is_cancelled());
}

#[tokio::test]
async fn test_deadline_aborts_in_flight_call() {
    let client = SoapClient::builder("http://bigip.test/iControl/iControlPortal.cgi")
        .transport(Arc::new(PendingTransport))
        .build()
        .unwrap();

    let ctx = CallContext::with_timeout(Duration::from_millis(50));
    let envelope = Envelope::new("urn:iControl:GlobalLB/Pool", Rpc::new("get_list"));
    let err = tokio::time::timeout(Duration::from_secs(5), client.call(&ctx, &envelope))
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, SoapError::Transport(TransportError::DeadlineExceeded)));
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_encoding_error_sends_nothing() {
    let transport = Arc::new(RecordingTransport::default());
    let client = SoapClient::builder("http://bigip.test/iControl/iControlPortal.cgi")
        .transport(transport.clone())
        .build()
        .unwrap();

    let envelope = Envelope::new(
        "urn:iControl:Management/Zone",
        Rpc::new("get_zone").param("view_zones", "bad\u{0}value"),
    );
    let err = client
        .call(&CallContext::background(), &envelope)
        .await
        .unwrap_err();

    assert!(matches!(err, SoapError::Encoding(_)));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_every_request_closes_the_connection() {
    let transport = Arc::new(RecordingTransport::default());
    let client = SoapClient::builder("http://bigip.test/iControl/iControlPortal.cgi")
        .transport(transport.clone())
        .header("Connection", "keep-alive")
        .basic_auth("admin", "admin")
        .build()
        .unwrap();

    let envelope = Envelope::new("urn:x", Rpc::new("get_list"));
    client
        .call(&CallContext::background(), &envelope)
        .await
        .unwrap();

    let request = transport.last.lock().unwrap().take().unwrap();
    assert_eq!(request.headers["connection"], "close");
    assert_eq!(request.headers["authorization"], "Basic YWRtaW46YWRtaW4=");
    assert_eq!(request.url.path(), "/iControl/iControlPortal.cgi");
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

icsoap::xml_struct! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct WideIpPool {
        pub pool_name: String => "pool_name",
        pub order: i64 => "order",
        pub ratio: i64 => "ratio",
    }
}

#[tokio::test]
async fn test_echo_round_trip_is_symmetric() {
    let client = SoapClient::builder("http://bigip.test/iControl/iControlPortal.cgi")
        .transport(Arc::new(EchoTransport))
        .build()
        .unwrap();
    let ctx = CallContext::background();

    let nested: Vec<Vec<String>> = vec![
        vec!["a".to_string(), "b".to_string()],
        vec![],
        vec!["c".to_string()],
    ];
    let echoed: Vec<Vec<String>> = client
        .invoke(&ctx, "urn:x", Rpc::new("echo").param("values", &nested))
        .await
        .unwrap();
    assert_eq!(echoed, nested);

    let pools = vec![vec![
        WideIpPool {
            pool_name: "/Common/p1".to_string(),
            order: 0,
            ratio: 1,
        },
        WideIpPool {
            pool_name: "/Common/p2".to_string(),
            order: 1,
            ratio: 3,
        },
    ]];
    let echoed: Vec<Vec<WideIpPool>> = client
        .invoke(&ctx, "urn:x", Rpc::new("echo").param("pools", &pools))
        .await
        .unwrap();
    assert_eq!(echoed, pools);

    let empty: Vec<String> = Vec::new();
    let echoed: Vec<String> = client
        .invoke(&ctx, "urn:x", Rpc::new("echo").param("values", &empty))
        .await
        .unwrap();
    assert!(echoed.is_empty());
}
