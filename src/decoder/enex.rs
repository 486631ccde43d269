use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::app::{MigrateError, Result};
use crate::domain::Note;

/// Streaming reader over the `<note>` elements of an ENEX export.
///
/// Yields one note at a time without loading the whole document. `None`
/// marks the end of the stream. A malformed document yields a single
/// `Err(Decode)`, after which the reader is exhausted.
pub struct EnexReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> EnexReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: Reader::from_reader(inner),
            buf: Vec::new(),
            done: false,
        }
    }

    fn next_note(&mut self) -> Result<Option<Note>> {
        let mut note: Option<Note> = None;
        // Element names below the current <note>
        let mut path: Vec<Vec<u8>> = Vec::new();

        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| MigrateError::Decode(format!("near byte {}: {}", position, e)))?;

            match event {
                Event::Start(e) => {
                    let name = e.local_name().as_ref().to_vec();
                    match note {
                        Some(_) => path.push(name),
                        None if name.as_slice() == b"note" => note = Some(Note::default()),
                        None => {}
                    }
                }
                Event::End(_) => {
                    if note.is_some() && path.pop().is_none() {
                        return Ok(note.map(finish));
                    }
                }
                Event::Text(t) => {
                    if let Some(field) = note.as_mut().and_then(|n| field_mut(n, &path)) {
                        let text = match t.unescape() {
                            Ok(text) => text.into_owned(),
                            Err(_) => String::from_utf8_lossy(&t).into_owned(),
                        };
                        field.push_str(&text);
                    }
                }
                Event::CData(c) => {
                    if let Some(field) = note.as_mut().and_then(|n| field_mut(n, &path)) {
                        field.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Event::Eof => {
                    if note.is_some() {
                        return Err(MigrateError::Decode(
                            "unexpected end of document inside <note>".into(),
                        ));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

fn field_mut<'n>(note: &'n mut Note, path: &[Vec<u8>]) -> Option<&'n mut String> {
    match path {
        [name] if name.as_slice() == b"title" => Some(&mut note.title),
        [name] if name.as_slice() == b"content" => Some(&mut note.content),
        [name] if name.as_slice() == b"created" => Some(&mut note.created),
        [parent, name]
            if parent.as_slice() == b"note-attributes" && name.as_slice() == b"source-url" =>
        {
            Some(&mut note.source_url)
        }
        _ => None,
    }
}

fn finish(mut note: Note) -> Note {
    note.title = note.title.trim().to_string();
    note.created = note.created.trim().to_string();
    note.source_url = note.source_url.trim().to_string();
    note
}

impl<R: BufRead> Iterator for EnexReader<R> {
    type Item = Result<Note>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_note() {
            Ok(Some(note)) => Some(Ok(note)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENEX_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE en-export SYSTEM "http://xml.evernote.com/pub/evernote-export3.dtd">
<en-export export-date="20231101T120000Z" application="Evernote" version="10.0">
  <note>
    <title>Rust &amp; friends</title>
    <created>20231021T100502Z</created>
    <updated>20231022T100502Z</updated>
    <tag>rust</tag>
    <note-attributes>
      <author>someone</author>
      <source-url>https://example.com/post?utm_source=feed</source-url>
    </note-attributes>
    <content><![CDATA[<en-note><div>Hello</div></en-note>]]></content>
  </note>
  <note>
    <title>Offline thought</title>
    <content><![CDATA[<en-note>No link here</en-note>]]></content>
    <created>20220101T000000Z</created>
    <note-attributes/>
    <resource>
      <data encoding="base64">aGVsbG8=</data>
      <resource-attributes><source-url>https://ignored.example</source-url></resource-attributes>
    </resource>
  </note>
</en-export>
"#;

    #[test]
    fn test_reads_notes_in_order() {
        let notes: Vec<Note> = EnexReader::new(ENEX_SAMPLE.as_bytes())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(notes.len(), 2);

        assert_eq!(notes[0].title, "Rust & friends");
        assert_eq!(notes[0].created, "20231021T100502Z");
        assert_eq!(notes[0].source_url, "https://example.com/post?utm_source=feed");
        assert_eq!(notes[0].content, "<en-note><div>Hello</div></en-note>");

        assert_eq!(notes[1].title, "Offline thought");
        assert_eq!(notes[1].source_url, "");
        assert_eq!(notes[1].created, "20220101T000000Z");
    }

    #[test]
    fn test_empty_export() {
        let mut reader = EnexReader::new("<en-export></en-export>".as_bytes());
        assert!(reader.next().is_none());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_malformed_document_ends_stream() {
        let doc = "<en-export><note><title>ok</title></note><note><title>broken</wrong></note>";
        let mut reader = EnexReader::new(doc.as_bytes());

        assert_eq!(reader.next().unwrap().unwrap().title, "ok");
        assert!(matches!(reader.next(), Some(Err(MigrateError::Decode(_)))));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_note_is_an_error() {
        let doc = "<en-export><note><title>half";
        let mut reader = EnexReader::new(doc.as_bytes());
        assert!(matches!(reader.next(), Some(Err(MigrateError::Decode(_)))));
        assert!(reader.next().is_none());
    }
}
