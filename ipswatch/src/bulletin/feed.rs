//! Syndication feed parsing (RSS 2.0 and Atom).
//!
//! Only the first entry matters: its title and its link.

use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};

use super::Bulletin;
use crate::error::BulletinError;

/// Which child of the entry is collecting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collecting {
    Title,
    Link,
}

/// Extract the first `<item>` (RSS) or `<entry>` (Atom) of a feed.
pub fn parse_first_entry(xml: &str) -> Result<Bulletin, BulletinError> {
    let xml = xml.trim_start_matches('\u{feff}');
    let mut reader = Reader::from_str(xml);

    let mut depth: Vec<String> = Vec::new();
    // Depth at which the first entry element was opened
    let mut entry_depth: Option<usize> = None;
    // Field being collected and the depth of its element
    let mut capture: Option<(Collecting, usize)> = None;
    let mut text = String::new();

    let mut title: Option<String> = None;
    let mut link: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = local_name(&e);

                match entry_depth {
                    None if tag == "item" || tag == "entry" => {
                        entry_depth = Some(depth.len());
                    }
                    // Direct children of the entry only
                    Some(d) if depth.len() == d + 1 => match tag.as_str() {
                        "title" if title.is_none() => {
                            capture = Some((Collecting::Title, depth.len()));
                            text.clear();
                        }
                        "link" if link.is_none() => {
                            if has_href(&e) {
                                link = atom_href(&e);
                            } else {
                                capture = Some((Collecting::Link, depth.len()));
                                text.clear();
                            }
                        }
                        _ => {}
                    },
                    _ => {}
                }

                depth.push(tag);
            }
            Event::Empty(e) => {
                // Atom: <link rel="alternate" href="..."/>
                if let Some(d) = entry_depth
                    && depth.len() == d + 1
                    && link.is_none()
                    && local_name(&e) == "link"
                {
                    link = atom_href(&e);
                }
            }
            Event::Text(e) => {
                if capture.is_some() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if capture.is_some() {
                    text.push('&');
                    text.push_str(&String::from_utf8_lossy(&e));
                    text.push(';');
                }
            }
            Event::CData(e) => {
                if capture.is_some() {
                    // Re-escaped so the final unescape pass leaves it literal
                    text.push_str(&escape(String::from_utf8_lossy(&e).as_ref()));
                }
            }
            Event::End(_) => {
                depth.pop();

                // Closing tags of markup nested in the field do not end it
                if let Some((field, d)) = capture
                    && d == depth.len()
                {
                    let value = decode_text(&text);
                    match field {
                        Collecting::Title => title = Some(value),
                        Collecting::Link => link = Some(value),
                    }
                    capture = None;
                    text.clear();
                }

                if entry_depth == Some(depth.len()) {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if entry_depth.is_none() {
        return Err(BulletinError::EmptyFeed);
    }

    Ok(Bulletin {
        title: title.unwrap_or_default(),
        link: link.unwrap_or_default(),
    })
}

/// Tag name without its namespace prefix.
fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn has_href(e: &BytesStart<'_>) -> bool {
    e.attributes()
        .flatten()
        .any(|attr| attr.key.local_name().as_ref() == b"href")
}

/// The `href` of an Atom link, unless it points somewhere other than the
/// entry itself (`rel="enclosure"`, `rel="related"`, ...).
fn atom_href(e: &BytesStart<'_>) -> Option<String> {
    let mut href = None;
    let mut rel_alternate = true;

    for attr in e.attributes().flatten() {
        let val = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.local_name().as_ref() {
            b"href" => href = Some(decode_text(&val)),
            b"rel" => rel_alternate = val == "alternate",
            _ => {}
        }
    }

    href.filter(|_| rel_alternate)
}

fn decode_text(raw: &str) -> String {
    let unescaped = unescape(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    unescaped.trim().to_string()
}
