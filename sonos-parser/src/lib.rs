//! # sonos-parser
//!
//! Streaming extraction of values from Sonos UPnP XML.
//!
//! Nothing here builds a document tree. Both extraction modes walk the input
//! with a pull reader and keep only the value being captured, so they work the
//! same on a short SOAP response and on a large zone group topology dump.
//!
//! ## Tag text
//! ```rust
//! use sonos_parser::tag_text;
//!
//! let body = "<s:Body><u:GetVolumeResponse><CurrentVolume>42</CurrentVolume></u:GetVolumeResponse></s:Body>";
//! assert_eq!(tag_text(body, "CurrentVolume").unwrap(), "42");
//! ```
//!
//! ## Attribute rows
//! ```rust
//! use sonos_parser::{first_attribute_row, RowQuery};
//!
//! let topology = r#"<ZoneGroups><ZoneGroupMember UUID="RINCON_B" Location="http://10.0.0.2:1400/xml"/></ZoneGroups>"#;
//! let query = RowQuery::new("ZoneGroupMember", "UUID", "RINCON_B", "Location");
//! assert_eq!(
//!     first_attribute_row(topology, &query).unwrap().as_deref(),
//!     Some("http://10.0.0.2:1400/xml")
//! );
//! ```
//!
//! Tag names are matched by prefix on the raw (possibly namespace-prefixed)
//! name, and the first lexical match wins. `tag_text(xml, "Current")` will
//! therefore capture whichever `Current*` element appears first.

pub mod error;
mod extract;

pub use error::{ParseError, ParseResult};
pub use extract::{
    attribute_rows, first_attribute_row, for_each_attribute_row, tag_text,
    tag_text_from_reader, RowQuery,
};
