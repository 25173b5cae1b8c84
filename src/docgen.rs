//! DocBook documentation generation from a wait event [`Catalog`].
//!
//! Writes `wait_event_types.sgml`: one `<table>` per class, every class
//! included, with anchor ids of the form `wait-event-<class>-table`.
//! Descriptions keep their markup; only the outer quotes are removed.

use std::fmt::Write;
use std::path::Path;

use crate::GenerationStats;
use crate::catalog::{Catalog, WaitClass};
use crate::describe::strip_quotes;
use crate::error::Result;
use crate::naming::title_case;
use crate::output::write_atomic;

/// Documentation tables, one per class.
pub const DOCS_FILE: &str = "wait_event_types.sgml";

/// Generate the documentation artifact for `catalog` into `output_dir`.
pub fn generate(catalog: &Catalog, output_dir: &Path) -> Result<GenerationStats> {
    let docs = render_docs(catalog);
    write_atomic(&output_dir.join(DOCS_FILE), &docs)?;

    Ok(GenerationStats {
        classes: catalog.classes().len(),
        events: catalog.event_count(),
        artifacts_written: 1,
        ..GenerationStats::default()
    })
}

/// Anchor id of a class table: `WaitEventIPC` → `wait-event-ipc-table`.
pub fn table_id(class: &WaitClass) -> String {
    format!("wait-event-{}-table", class.suffix().to_lowercase())
}

/// Render the full documentation artifact.
pub fn render_docs(catalog: &Catalog) -> String {
    let mut out = String::new();
    for class in catalog.classes() {
        write_table(&mut out, class);
    }
    out
}

fn write_table(out: &mut String, class: &WaitClass) {
    let suffix = class.suffix();
    tracing::debug!(class = %class.name, rows = class.events.len(), "rendering documentation table");

    writeln!(out, "  <table id=\"{}\">", table_id(class)).unwrap();
    writeln!(
        out,
        "   <title>Wait Events of Type <literal>{}</literal></title>",
        title_case(suffix)
    )
    .unwrap();
    writeln!(out, "   <tgroup cols=\"2\">").unwrap();
    writeln!(out, "    <colspec colname=\"col1\" colwidth=\"1*\"/>").unwrap();
    writeln!(out, "    <colspec colname=\"col2\" colwidth=\"2*\"/>").unwrap();
    writeln!(out, "    <thead>").unwrap();
    writeln!(out, "     <row>").unwrap();
    writeln!(out, "      <entry><literal>{suffix}</literal> Wait Event</entry>").unwrap();
    writeln!(out, "      <entry>Description</entry>").unwrap();
    writeln!(out, "     </row>").unwrap();
    writeln!(out, "    </thead>").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    <tbody>").unwrap();

    for event in &class.events {
        writeln!(out, "     <row>").unwrap();
        writeln!(out, "      <entry><literal>{}</literal></entry>", event.label).unwrap();
        writeln!(out, "      <entry>{}</entry>", strip_quotes(&event.description)).unwrap();
        writeln!(out, "     </row>").unwrap();
    }

    writeln!(out, "    </tbody>").unwrap();
    writeln!(out, "   </tgroup>").unwrap();
    writeln!(out, "  </table>").unwrap();
    writeln!(out).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;
    use crate::parse::parse_catalog;

    const CATALOG: &str = "\
Section: ClassName - WaitEventIPC
WaitEventIPC\tZ_EVENT\t\"Waiting for Z.\"
ABI_compatibility:
WaitEventIPC\tA_EVENT\t\"Waiting for <literal>A</literal>.\"

Section: ClassName - WaitEventLWLock
WaitEventLWLock\tBufferMapping\t\"Waiting to associate a data block with a buffer.\"
";

    fn docs() -> String {
        let catalog = Catalog::build(parse_catalog(CATALOG).unwrap(), Mode::Docs).unwrap();
        render_docs(&catalog)
    }

    #[test]
    fn one_table_per_class_including_hand_maintained() {
        let docs = docs();
        assert_eq!(docs.matches("  <table id=").count(), 2);
        assert!(docs.contains("  <table id=\"wait-event-ipc-table\">"));
        assert!(docs.contains("  <table id=\"wait-event-lwlock-table\">"));
    }

    #[test]
    fn table_headers() {
        let docs = docs();
        assert!(docs.contains("   <title>Wait Events of Type <literal>Ipc</literal></title>"));
        assert!(docs.contains("      <entry><literal>IPC</literal> Wait Event</entry>"));
        assert!(docs.contains("   <title>Wait Events of Type <literal>Lwlock</literal></title>"));
    }

    #[test]
    fn rows_keep_markup_and_period() {
        let docs = docs();
        assert!(docs.contains(
            "     <row>\n      <entry><literal>AEvent</literal></entry>\n      <entry>Waiting for <literal>A</literal>.</entry>\n     </row>"
        ));
        assert!(docs.contains("      <entry><literal>BufferMapping</literal></entry>"));
    }

    #[test]
    fn rows_are_alphabetical_regardless_of_abi_region() {
        let docs = docs();
        let a = docs.find("AEvent").unwrap();
        let z = docs.find("ZEvent").unwrap();
        assert!(a < z);
    }
}
