//! XML validation utilities
//!
//! Generated documents are re-read before they are handed back so that a
//! malformed property value can never leave the converter.

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Check that `xml_content` is a well-formed XML document.
///
/// Walks every event with a pull reader; unbalanced tags, bad escapes and
/// truncated input all fail.
///
/// # Example
///
/// ```rust
/// use iflow_converter::validation::check_well_formed;
///
/// assert!(check_well_formed("<?xml version=\"1.0\"?><a><b/></a>").is_ok());
/// assert!(check_well_formed("<a><b></a>").is_err());
/// ```
pub fn check_well_formed(xml_content: &str) -> Result<()> {
    if !xml_content.trim_start().starts_with("<?xml") && !xml_content.trim_start().starts_with('<')
    {
        anyhow::bail!("Invalid XML: document does not start with markup");
    }

    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().check_end_names = true;

    let mut depth: usize = 0;
    let mut roots = 0;
    loop {
        match reader
            .read_event()
            .with_context(|| format!("XML parsing error at byte {}", reader.buffer_position()))?
        {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(text) => {
                text.unescape().context("XML validation failed: bad character reference")?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 {
        anyhow::bail!("XML validation failed: {} unclosed element(s)", depth);
    }
    if roots != 1 {
        anyhow::bail!("XML validation failed: expected one root element, found {}", roots);
    }

    Ok(())
}
