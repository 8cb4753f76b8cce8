use crate::error::{DogShowError, Result};
use crate::model::{DogEntry, Field};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

pub const ROOT_TAG: &str = "doglist";
pub const ENTRY_TAG: &str = "dog";

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Malformed(String),
}

fn malformed(e: impl std::fmt::Display) -> DecodeError {
    DecodeError::Malformed(e.to_string())
}

/// Serializes entries into an indented `<doglist>` document.
pub fn encode(entries: &[DogEntry]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    let write_err = |e| DogShowError::Io(std::io::Error::other(e));

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_err)?;

    if entries.is_empty() {
        writer
            .write_event(Event::Empty(BytesStart::new(ROOT_TAG)))
            .map_err(write_err)?;
    } else {
        writer
            .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
            .map_err(write_err)?;
        for entry in entries {
            let mut elem = BytesStart::new(ENTRY_TAG);
            for field in Field::ALL {
                elem.push_attribute((field.name(), entry.get(field)));
            }
            writer.write_event(Event::Empty(elem)).map_err(write_err)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
            .map_err(write_err)?;
    }

    let mut xml = String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| DogShowError::Io(std::io::Error::other(e)))?;
    xml.push('\n');
    Ok(xml)
}

/// Parses a `<doglist>` document.
///
/// Only `dog` elements that are direct children of the root produce entries;
/// missing attributes decode to empty strings and unknown tags are skipped.
pub fn decode(xml: &str) -> std::result::Result<Vec<DogEntry>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(ref e) => {
                if depth == 0 {
                    if seen_root {
                        return Err(malformed("document has more than one root element"));
                    }
                    seen_root = true;
                } else if depth == 1 && e.name().as_ref() == ENTRY_TAG.as_bytes() {
                    entries.push(entry_from(e)?);
                }
                depth += 1;
            }
            Event::Empty(ref e) => {
                if depth == 0 {
                    if seen_root {
                        return Err(malformed("document has more than one root element"));
                    }
                    seen_root = true;
                } else if depth == 1 && e.name().as_ref() == ENTRY_TAG.as_bytes() {
                    entries.push(entry_from(e)?);
                }
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) if depth == 0 => {
                return Err(malformed("text content outside the root element"));
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(malformed("unexpected end of document (unclosed element)"));
    }
    if !seen_root {
        return Err(malformed("document has no root element"));
    }
    Ok(entries)
}

fn entry_from(elem: &BytesStart) -> std::result::Result<DogEntry, DecodeError> {
    let mut entry = DogEntry::default();
    for attr in elem.attributes() {
        let attr = attr.map_err(malformed)?;
        let key = attr.key.as_ref();
        if let Some(field) = Field::ALL.into_iter().find(|f| f.name().as_bytes() == key) {
            let value = attr.unescape_value().map_err(malformed)?;
            entry.set(field, value.into_owned());
        }
    }
    Ok(entry)
}

pub fn write_file(path: &Path, entries: &[DogEntry]) -> Result<()> {
    let xml = encode(entries)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Reads and decodes a file. Failing to open it counts as a parse failure.
pub fn read_file(path: &Path) -> Result<Vec<DogEntry>> {
    let parse_err = |reason: String| DogShowError::Parse {
        path: path.to_path_buf(),
        reason,
    };
    let content = fs::read_to_string(path).map_err(|e| parse_err(e.to_string()))?;
    decode(&content).map_err(|e| parse_err(e.to_string()))
}
