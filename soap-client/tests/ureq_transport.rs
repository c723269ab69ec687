//! SOAP calls over a real HTTP connection against a mock device

use std::net::TcpListener;
use std::time::{Duration, Instant};

use soap_client::{SoapClient, SoapError, UreqTransport};

const RENDERING_CONTROL: &str = "urn:schemas-upnp-org:service:RenderingControl:1";

fn split_host(server: &mockito::Server) -> (String, u16) {
    let host_with_port = server.host_with_port();
    let (host, port) = host_with_port.rsplit_once(':').unwrap();
    (host.to_string(), port.parse().unwrap())
}

#[test]
fn posts_envelope_with_soap_headers() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/MediaRenderer/RenderingControl/Control")
        .match_header("content-type", "text/xml; charset=\"utf-8\"")
        .match_header("soapaction", "urn:schemas-upnp-org:service:RenderingControl:1#GetVolume")
        .match_body(mockito::Matcher::Regex(
            "<InstanceID>0</InstanceID><Channel>Master</Channel>".to_string(),
        ))
        .with_status(200)
        .with_body("<CurrentVolume>31</CurrentVolume>")
        .create();

    let (host, port) = split_host(&server);
    let client = SoapClient::new();
    let body = client
        .call(
            &host,
            port,
            "MediaRenderer/RenderingControl/Control",
            RENDERING_CONTROL,
            "GetVolume",
            "<InstanceID>0</InstanceID><Channel>Master</Channel>",
        )
        .unwrap();

    assert_eq!(body, "<CurrentVolume>31</CurrentVolume>");
    mock.assert();
}

#[test]
fn error_status_is_a_status_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/MediaRenderer/RenderingControl/Control")
        .with_status(500)
        .with_body("<s:Fault><detail><UPnPError><errorCode>402</errorCode></UPnPError></detail></s:Fault>")
        .create();

    let (host, port) = split_host(&server);
    let err = SoapClient::new()
        .call(&host, port, "MediaRenderer/RenderingControl/Control", RENDERING_CONTROL, "SetVolume", "")
        .unwrap_err();

    assert_eq!(
        err,
        SoapError::Status {
            status: 500,
            fault_code: Some(402)
        }
    );
}

#[test]
fn refused_connection_is_a_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = SoapClient::new()
        .call("127.0.0.1", port, "MediaRenderer/AVTransport/Control", "urn:x", "Next", "")
        .unwrap_err();

    assert!(matches!(err, SoapError::Network(_)), "unexpected error: {err:?}");
}

#[test]
fn silent_device_times_out() {
    // Connections complete through the backlog but nothing ever answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let client = SoapClient::with_transport(UreqTransport::with_timeout(Duration::from_millis(200)));
    let started = Instant::now();
    let err = client
        .call("127.0.0.1", port, "MediaRenderer/AVTransport/Control", "urn:x", "Next", "")
        .unwrap_err();

    assert!(matches!(err, SoapError::Timeout(_)), "unexpected error: {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
    drop(listener);
}
