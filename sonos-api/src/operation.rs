use crate::error::Result;
use crate::service::Service;

/// Base trait for all Sonos API operations
///
/// Each UPnP action is a zero-sized type naming its service and action, with
/// typed request and response values. Responses are parsed straight from the
/// raw SOAP body with the streaming extractor.
pub trait SonosOperation {
    /// Arguments sent inside the action element
    type Request;

    /// Values extracted from the response body
    type Response;

    /// The UPnP service this operation belongs to
    const SERVICE: Service;

    /// The SOAP action name for this operation
    const ACTION: &'static str;

    /// Build the XML argument payload that goes inside the action element
    fn build_payload(request: &Self::Request) -> String;

    /// Extract the typed response from the raw SOAP response body
    fn parse_response(xml: &str) -> Result<Self::Response>;
}

/// Text of the first `tag` element in `xml`, or a malformed-response error if absent
pub(crate) fn required_text(xml: &str, tag: &str) -> Result<String> {
    let text = sonos_parser::tag_text(xml, tag)?;
    if text.is_empty() {
        return Err(crate::ApiError::MalformedResponse(format!("missing {} element", tag)));
    }
    Ok(text)
}
