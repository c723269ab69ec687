//! Integration tests for the control client
//!
//! These drive [`ControlClient`] against a scripted transport and check both
//! the outcome and the exact sequence of SOAP actions sent to the device.

use std::sync::Arc;

use proptest::prelude::*;
use rstest::rstest;
use soap_client::mock::MockTransport;
use soap_client::SoapError;
use sonos_api::{
    status_code, ApiError, ControlClient, DeviceAddress, PlaybackCommand, SonosClient, Volume, CONNECT_FAILURE,
    STATUS_OK,
};

const AV: &str = "urn:schemas-upnp-org:service:AVTransport:1";
const RC: &str = "urn:schemas-upnp-org:service:RenderingControl:1";

fn control() -> (ControlClient<Arc<MockTransport>>, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let control = ControlClient::with_client(SonosClient::with_transport(Arc::clone(&transport)));
    (control, transport)
}

fn device() -> DeviceAddress {
    "192.168.1.40".parse().unwrap()
}

fn state_body(state: &str) -> String {
    format!(
        "<s:Envelope><s:Body><u:GetTransportInfoResponse><CurrentTransportState>{}</CurrentTransportState>\
         </u:GetTransportInfoResponse></s:Body></s:Envelope>",
        state
    )
}

fn volume_body(volume: &str) -> String {
    format!("<u:GetVolumeResponse><CurrentVolume>{}</CurrentVolume></u:GetVolumeResponse>", volume)
}

fn desired_volumes(transport: &MockTransport) -> Vec<String> {
    transport
        .requests()
        .iter()
        .filter(|r| r.header("SOAPACTION").map_or(false, |a| a == format!("{}#SetVolume", RC)))
        .map(|r| sonos_parser::tag_text(&r.body, "DesiredVolume").unwrap())
        .collect()
}

mod toggle {
    use super::*;

    #[test]
    fn playing_device_is_paused() {
        let (control, transport) = control();
        transport.respond(200, state_body("PLAYING")).respond(200, "");

        let command = control.toggle_playback(&device()).unwrap();

        assert_eq!(command, PlaybackCommand::Pause);
        assert_eq!(
            transport.actions(),
            vec![format!("{}#GetTransportInfo", AV), format!("{}#Pause", AV)]
        );
    }

    #[rstest]
    #[case("PAUSED_PLAYBACK")]
    #[case("STOPPED")]
    #[case("TRANSITIONING")]
    #[case("NO_MEDIA_PRESENT")]
    fn anything_else_is_played(#[case] state: &str) {
        let (control, transport) = control();
        transport.respond(200, state_body(state)).respond(200, "");

        assert_eq!(control.toggle_playback(&device()).unwrap(), PlaybackCommand::Play);
        assert_eq!(transport.actions()[1], format!("{}#Play", AV));
    }

    #[test]
    fn failed_state_query_still_plays() {
        let (control, transport) = control();
        transport.respond(500, "").respond(200, "");

        let result = control.toggle_playback(&device());

        assert_eq!(result, Ok(PlaybackCommand::Play));
        assert_eq!(status_code(&result), STATUS_OK);
        assert_eq!(transport.actions()[1], format!("{}#Play", AV));
    }

    #[test]
    fn command_failure_is_reported() {
        let (control, transport) = control();
        transport.respond(200, state_body("PLAYING")).respond(500, "");

        let result = control.toggle_playback(&device());
        assert_eq!(status_code(&result), 500);
    }
}

mod next {
    use super::*;

    #[test]
    fn sends_next_with_instance_and_speed() {
        let (control, transport) = control();
        transport.respond(200, "");

        control.next(&device()).unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.url, "http://192.168.1.40:1400/MediaRenderer/AVTransport/Control");
        let expected = r#"<u:Next xmlns:u="urn:schemas-upnp-org:service:AVTransport:1"><InstanceID>0</InstanceID><Speed>1</Speed></u:Next>"#;
        assert!(request.body.contains(expected));
    }

    #[test]
    fn unreachable_device_reports_connect_failure() {
        let (control, transport) = control();
        transport.fail(SoapError::Network("connection refused".into()));

        let result = control.next(&device());
        assert!(matches!(result, Err(ApiError::NetworkUnavailable(_))));
        assert_eq!(status_code(&result), CONNECT_FAILURE);
    }

    #[test]
    fn timeout_reports_connect_failure() {
        let (control, transport) = control();
        transport.fail(SoapError::Timeout("read timed out".into()));

        assert_eq!(status_code(&control.next(&device())), CONNECT_FAILURE);
    }
}

mod volume {
    use super::*;

    #[rstest]
    #[case::up("40", true, "47")]
    #[case::down("40", false, "33")]
    #[case::clamped_high("98", true, "100")]
    #[case::clamped_low("3", false, "0")]
    #[case::already_max("100", true, "100")]
    fn steps_by_seven(#[case] current: &str, #[case] up: bool, #[case] expected: &str) {
        let (control, transport) = control();
        transport.respond(200, volume_body(current)).respond(200, "");

        let result = if up {
            control.volume_up(&device())
        } else {
            control.volume_down(&device())
        };

        assert_eq!(result.unwrap().to_string(), expected);
        assert_eq!(desired_volumes(&transport), vec![expected.to_string()]);
    }

    #[test]
    fn set_volume_payload_targets_master() {
        let (control, transport) = control();
        transport.respond(200, volume_body("10")).respond(200, "");

        control.volume_up(&device()).unwrap();

        let set = &transport.requests()[1];
        assert!(set.body.contains(
            "<u:SetVolume xmlns:u=\"urn:schemas-upnp-org:service:RenderingControl:1\">\
             <InstanceID>0</InstanceID><Channel>Master</Channel><DesiredVolume>17</DesiredVolume></u:SetVolume>"
        ));
    }

    #[rstest]
    #[case::bad_status(Ok((500, String::new())))]
    #[case::garbage(Ok((200, volume_body("loud"))))]
    #[case::unreachable(Err(SoapError::Network("connection refused".into())))]
    fn unreadable_volume_writes_nothing(#[case] first: Result<(u16, String), SoapError>) {
        let (control, transport) = control();
        match first {
            Ok((status, body)) => transport.respond(status, body),
            Err(e) => transport.fail(e),
        };

        let result = control.volume_up(&device());

        assert!(matches!(result, Err(ApiError::NetworkUnavailable(_))));
        assert_eq!(status_code(&result), CONNECT_FAILURE);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn failed_write_reports_its_status() {
        let (control, transport) = control();
        transport.respond(200, volume_body("20")).respond(500, "");

        assert_eq!(status_code(&control.volume_down(&device())), 500);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn written_volume_is_current_plus_step_clamped(current in 0u8..=100, up in any::<bool>()) {
            let (control, transport) = control();
            transport.respond(200, volume_body(&current.to_string())).respond(200, "");

            let delta = if up { 7 } else { -7 };
            let written = if up { control.volume_up(&device()) } else { control.volume_down(&device()) }.unwrap();

            let expected = (i32::from(current) + delta).clamp(0, 100);
            prop_assert_eq!(i32::from(written.value()), expected);
            prop_assert_eq!(desired_volumes(&transport), vec![expected.to_string()]);
        }

        #[test]
        fn offset_never_leaves_range(start in 0u8..=100, delta in -300i32..300) {
            let volume = Volume::new(start).unwrap().offset(delta);
            prop_assert!(volume <= Volume::MAX);
            prop_assert_eq!(i32::from(volume.value()), (i32::from(start) + delta).clamp(0, 100));
        }
    }
}
