//! OSM XML sink: review nodes for an editor.

use std::io::{self, Write};

use super::DiffSink;
use crate::diff::DiffEvent;

const HEADER: &str = "<?xml version='1.0' encoding='utf-8'?>\n<osm version='0.6'>\n";
const FOOTER: &str = "</osm>\n";

/// Writes every event as a synthetic OSM node tagged for review.
///
/// Node ids start at -1 and decrease by one per event.
pub struct OsmSink<W: Write> {
    out: W,
    next_id: i64,
}

impl<W: Write> OsmSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, next_id: -1 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Attribute values are single-quoted, so quotes become `_`.
fn escape_note(msg: &str) -> String {
    let mut escaped = String::with_capacity(msg.len());
    for c in msg.chars() {
        match c {
            '\'' => escaped.push('_'),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl<W: Write> DiffSink for OsmSink<W> {
    fn begin(&mut self) -> io::Result<()> {
        self.out.write_all(HEADER.as_bytes())
    }

    fn comment(&mut self, text: &str) -> io::Result<()> {
        // "--" is not allowed inside an XML comment
        writeln!(self.out, "<!-- {} -->", text.replace("--", "- -"))
    }

    fn emit(&mut self, event: &DiffEvent) -> io::Result<()> {
        let id = self.next_id;
        self.next_id -= 1;
        writeln!(
            self.out,
            "  <node lat='{}' lon='{}' id='{}'>",
            event.location.lat, event.location.lon, id
        )?;
        writeln!(
            self.out,
            "    <tag k='note' v='{}'/>",
            escape_note(&event.message())
        )?;
        writeln!(self.out, "    <tag k='fixme' v='yes'/>")?;
        writeln!(self.out, "    <tag k='type' v='{}'/>", event.category().code())?;
        writeln!(self.out, "  </node>")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(FOOTER.as_bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{Discrepancy, Side};
    use crate::models::GeoPoint;

    fn extra(name: &str) -> DiffEvent {
        DiffEvent::new(
            GeoPoint::new(50.5, 30.25),
            Discrepancy::ExtraCity {
                side: Side::First,
                city: name.into(),
            },
        )
    }

    #[test]
    fn test_escape_note() {
        assert_eq!(escape_note("O'Hara <b> & c"), "O_Hara &lt;b&gt; &amp; c");
    }

    #[test]
    fn test_framing_and_ids() {
        let mut sink = OsmSink::new(Vec::new());
        sink.begin().unwrap();
        sink.comment("CITY TYPE: city_or_town").unwrap();
        sink.emit(&extra("A")).unwrap();
        sink.emit(&extra("B")).unwrap();
        sink.finish().unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with(HEADER));
        assert!(out.ends_with(FOOTER));
        assert!(out.contains("<!-- CITY TYPE: city_or_town -->"));
        assert!(out.contains("<node lat='50.5' lon='30.25' id='-1'>"));
        assert!(out.contains("id='-2'"));
        assert!(!out.contains("id='-3'"));
        assert!(out.contains("<tag k='type' v='11'/>"));
        assert!(out.contains("<tag k='fixme' v='yes'/>"));
        assert!(out.contains("v='(1)! Extra city in 1st file: A'"));
    }
}
