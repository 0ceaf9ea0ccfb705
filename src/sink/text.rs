//! Plain text sink: one line per event or comment.

use std::io::{self, Write};

use super::DiffSink;
use crate::diff::DiffEvent;

/// One line per event or comment.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DiffSink for TextSink<W> {
    fn comment(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    fn emit(&mut self, event: &DiffEvent) -> io::Result<()> {
        writeln!(self.out, "{}", event.discrepancy)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{Discrepancy, Side};
    use crate::models::GeoPoint;

    #[test]
    fn test_lines() {
        let mut sink = TextSink::new(Vec::new());
        sink.begin().unwrap();
        sink.comment("CITY TYPE: village").unwrap();
        sink.emit(&DiffEvent::new(
            GeoPoint::new(1.0, 2.0),
            Discrepancy::ExtraCity {
                side: Side::Second,
                city: "City Bucha (3)".into(),
            },
        ))
        .unwrap();
        sink.finish().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "CITY TYPE: village\n(1)! Extra city in 2nd file: City Bucha (3)\n"
        );
    }
}
