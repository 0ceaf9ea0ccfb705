//! Output targets for diff events.
//!
//! One sink is chosen per run: plain text lines on stdout, or an OSM XML
//! file of synthetic nodes that can be opened in an editor for review.

mod osm;
mod text;

use std::io;

pub use osm::OsmSink;
pub use text::TextSink;

use crate::diff::DiffEvent;

pub trait DiffSink {
    /// Called once before the first event
    fn begin(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Section headers and informational notes
    fn comment(&mut self, text: &str) -> io::Result<()>;

    fn emit(&mut self, event: &DiffEvent) -> io::Result<()>;

    /// Called once after the last event
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collects events in memory and drops comments.
impl DiffSink for Vec<DiffEvent> {
    fn comment(&mut self, _text: &str) -> io::Result<()> {
        Ok(())
    }

    fn emit(&mut self, event: &DiffEvent) -> io::Result<()> {
        self.push(event.clone());
        Ok(())
    }
}
