//! Report ingestion: JUnit test reports and JaCoCo coverage reports.
//!
//! Readers turn raw XML into the fixed-shape summaries consumed by the
//! scorers. Any read or parse failure surfaces as [`Error::Ingest`].

pub mod jacoco;
pub mod junit;

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::{Result, Session};

/// Local name of the first element in the document, or an empty string
/// when the document has no elements.
fn root_element(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::Eof => return Ok(String::new()),
            _ => {}
        }
    }
}

/// Load whichever reports are given into a fresh session.
pub fn load_session(junit: Option<&Path>, jacoco: Option<&Path>) -> Result<Session> {
    let mut session = Session::new();
    if let Some(path) = junit {
        session.load_tests(junit::load(path)?)?;
    }
    if let Some(path) = jacoco {
        session.load_coverage(jacoco::load(path)?)?;
    }
    Ok(session)
}
