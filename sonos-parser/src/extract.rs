//! Pull-reader based tag text and attribute row extraction.

use std::io::BufRead;
use std::ops::ControlFlow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ParseError, ParseResult};

/// Selects attribute values from rows of a repeated element.
///
/// For every element whose name starts with `tag` and whose `filter_key`
/// attribute equals `filter_value`, the value of `result_key` is yielded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowQuery<'a> {
    pub tag: &'a str,
    pub filter_key: &'a str,
    pub filter_value: &'a str,
    pub result_key: &'a str,
}

impl<'a> RowQuery<'a> {
    pub fn new(tag: &'a str, filter_key: &'a str, filter_value: &'a str, result_key: &'a str) -> Self {
        Self {
            tag,
            filter_key,
            filter_value,
            result_key,
        }
    }
}

/// Capture the character data of the first element whose name starts with `tag`.
///
/// Text and CDATA inside the element (including nested children) are
/// unescaped and concatenated. Returns an empty string when no element
/// matches.
pub fn tag_text(xml: &str, tag: &str) -> ParseResult<String> {
    tag_text_from_reader(xml.as_bytes(), tag)
}

/// Same as [`tag_text`] over any buffered reader.
pub fn tag_text_from_reader<R: BufRead>(input: R, tag: &str) -> ParseResult<String> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut captured = String::new();
    // 0 while searching, otherwise the element depth below the matched tag + 1
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if depth > 0 {
                    depth += 1;
                } else if name_matches(e, tag) {
                    depth = 1;
                }
            }
            Ok(Event::Empty(ref e)) => {
                if depth == 0 && name_matches(e, tag) {
                    return Ok(captured);
                }
            }
            Ok(Event::End(_)) => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(captured);
                    }
                }
            }
            Ok(Event::Text(ref t)) => {
                if depth > 0 {
                    let text = t
                        .unescape()
                        .map_err(|e| xml_error(reader.buffer_position(), e))?;
                    captured.push_str(&text);
                }
            }
            Ok(Event::CData(ref c)) => {
                if depth > 0 {
                    captured.push_str(&String::from_utf8_lossy(&**c));
                }
            }
            // A truncated document keeps whatever was captured so far
            Ok(Event::Eof) => return Ok(captured),
            Err(e) => return Err(xml_error(reader.buffer_position(), e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Stream attribute rows matching `query` into `on_row`.
///
/// Returning `ControlFlow::Break` from the callback stops the scan.
pub fn for_each_attribute_row<R, F>(input: R, query: &RowQuery<'_>, mut on_row: F) -> ParseResult<()>
where
    R: BufRead,
    F: FnMut(String) -> ControlFlow<()>,
{
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if name_matches(e, query.tag) {
                    let position = reader.buffer_position();
                    if let Some(value) = select_row(e, query, position)? {
                        if on_row(value).is_break() {
                            return Ok(());
                        }
                    }
                }
            }
            Ok(Event::Eof) => return Ok(()),
            Err(e) => return Err(xml_error(reader.buffer_position(), e)),
            _ => {}
        }
        buf.clear();
    }
}

/// Collect every matching row value in document order.
pub fn attribute_rows(xml: &str, query: &RowQuery<'_>) -> ParseResult<Vec<String>> {
    let mut rows = Vec::new();
    for_each_attribute_row(xml.as_bytes(), query, |value| {
        rows.push(value);
        ControlFlow::Continue(())
    })?;
    Ok(rows)
}

/// Return the first matching row value, stopping the scan there.
pub fn first_attribute_row(xml: &str, query: &RowQuery<'_>) -> ParseResult<Option<String>> {
    let mut first = None;
    for_each_attribute_row(xml.as_bytes(), query, |value| {
        first = Some(value);
        ControlFlow::Break(())
    })?;
    Ok(first)
}

fn select_row(
    element: &BytesStart<'_>,
    query: &RowQuery<'_>,
    position: usize,
) -> ParseResult<Option<String>> {
    let mut filter_matched = false;
    let mut result = None;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(position, e))?;
        let key = attr.key.as_ref();
        if key == query.filter_key.as_bytes() {
            let value = attr.unescape_value().map_err(|e| xml_error(position, e))?;
            filter_matched = value == query.filter_value;
        } else if key == query.result_key.as_bytes() {
            let value = attr.unescape_value().map_err(|e| xml_error(position, e))?;
            result = Some(value.into_owned());
        }
    }

    Ok(if filter_matched { result } else { None })
}

fn name_matches(element: &BytesStart<'_>, tag: &str) -> bool {
    element.name().as_ref().starts_with(tag.as_bytes())
}

fn xml_error(position: usize, error: impl std::fmt::Display) -> ParseError {
    ParseError::Xml {
        position,
        message: error.to_string(),
    }
}
