//! XML reader built on `quick-xml` events.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::parse_error;
use crate::keywords::ATTRIBUTES_MARKER;
use crate::{RawTree, StrataResult, StrataResultExt};

/// An element whose end tag has not been read yet.
struct OpenElement {
    name: String,
    node: RawTree,
    text: String,
}

/// Parses XML text into a raw tree of its top-level elements.
///
/// Comments, processing instructions, declarations and doctypes are skipped.
/// Element text, including CDATA sections, is concatenated and trimmed.
pub(crate) fn read_xml(text: &str) -> StrataResult<RawTree> {
    let mut reader = Reader::from_str(text);
    let mut document = RawTree::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let (name, node) = open_element(&start)?;
                stack.push(OpenElement {
                    name,
                    node,
                    text: String::new(),
                });
            }
            Ok(Event::Empty(start)) => {
                let (name, node) = open_element(&start)?;
                attach(&mut stack, &mut document, name, node);
            }
            Ok(Event::End(_)) => {
                let Some(OpenElement {
                    name,
                    mut node,
                    text: content,
                }) = stack.pop()
                else {
                    return Err(parse_error("unexpected closing tag", Some(position)));
                };
                node.set_value(content.trim());
                attach(&mut stack, &mut document, name, node);
            }
            Ok(Event::Text(content)) => {
                let unescaped = content.unescape().map_err(|err| {
                    parse_error(format!("invalid text content: {err}"), Some(position))
                })?;
                push_text(&mut stack, &unescaped, position)?;
            }
            Ok(Event::CData(content)) => {
                let raw = String::from_utf8_lossy(content.as_ref());
                push_text(&mut stack, &raw, position)?;
            }
            Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(parse_error(err.to_string(), Some(reader.error_position())));
            }
        }
    }
    if let Some(open) = stack.last() {
        return Err(parse_error(
            format!("unexpected end of document: element <{}> is not closed", open.name),
            Some(reader.buffer_position()),
        ));
    }
    Ok(document)
}

/// Builds the node for a start tag, collecting attributes under the marker.
///
/// Duplicate attribute names are kept so the normaliser can report them
/// against the element's path.
fn open_element(start: &BytesStart<'_>) -> StrataResult<(String, RawTree)> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = RawTree::new();
    for entry in start.attributes().with_checks(false) {
        let attribute = entry.into_strata()?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().into_strata()?;
        attributes.push_child(key, RawTree::leaf(value));
    }
    let mut node = RawTree::new();
    if !attributes.children().is_empty() {
        node.push_child(ATTRIBUTES_MARKER, attributes);
    }
    Ok((name, node))
}

fn attach(stack: &mut [OpenElement], document: &mut RawTree, name: String, node: RawTree) {
    match stack.last_mut() {
        Some(parent) => parent.node.push_child(name, node),
        None => document.push_child(name, node),
    };
}

fn push_text(stack: &mut [OpenElement], content: &str, position: u64) -> StrataResult<()> {
    match stack.last_mut() {
        Some(open) => {
            open.text.push_str(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(parse_error(
            format!("text outside of any element: '{}'", content.trim()),
            Some(position),
        )),
    }
}
