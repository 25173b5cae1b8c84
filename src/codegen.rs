//! C code generation from a wait event [`Catalog`].
//!
//! Generates, for every class not maintained by hand:
//! - a `typedef enum` in `wait_event_types.h`, whose first member starts at
//!   the class's `PG_WAIT_*` base value
//! - a `pgstat_get_wait_*()` lookup function in `pgstat_wait_event.c`
//!
//! and, for every class, rows in the `wait_event_funcs_data.c` table that
//! backs the wait event introspection view. An optional
//! `wait_event_map.json` lists every generated enum member.
//!
//! All artifacts are rendered before the first one is written, and each is
//! written atomically.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::GenerationStats;
use crate::catalog::{Catalog, WaitClass};
use crate::describe::clean_description;
use crate::error::Result;
use crate::output::{generated_banner, write_atomic};

/// Enum declarations, one per generated class.
pub const TYPES_HEADER: &str = "wait_event_types.h";

/// Lookup functions, one per generated class.
pub const LOOKUP_SOURCE: &str = "pgstat_wait_event.c";

/// Flat `{class, name, description}` table across all classes.
pub const FUNCS_DATA_SOURCE: &str = "wait_event_funcs_data.c";

/// JSON reference of generated enum members.
pub const MANIFEST: &str = "wait_event_map.json";

/// Label returned by lookup functions for values outside the enum.
const UNKNOWN_EVENT: &str = "unknown wait event";

/// Generate the code artifacts for `catalog` into `output_dir`.
///
/// With `manifest` set, also writes [`MANIFEST`].
pub fn generate(catalog: &Catalog, output_dir: &Path, manifest: bool) -> Result<GenerationStats> {
    let mut artifacts = vec![
        (TYPES_HEADER, render_types_header(catalog)),
        (LOOKUP_SOURCE, render_lookup_functions(catalog)),
        (FUNCS_DATA_SOURCE, render_funcs_data(catalog)),
    ];
    if manifest {
        artifacts.push((MANIFEST, render_manifest(catalog)?));
    }

    for class in catalog.classes().iter().filter(|c| c.is_hand_maintained()) {
        tracing::debug!(class = %class.name, "no enum or lookup function for hand-maintained class");
    }

    for (file_name, content) in &artifacts {
        write_atomic(&output_dir.join(file_name), content)?;
    }

    Ok(GenerationStats {
        classes: catalog.classes().len(),
        events: catalog.event_count(),
        abi_preserved: catalog.abi_preserved_count(),
        hand_maintained_skipped: catalog
            .classes()
            .iter()
            .filter(|c| c.is_hand_maintained())
            .count(),
        artifacts_written: artifacts.len(),
    })
}

/// Classes that get an enum and a lookup function.
fn generated_classes(catalog: &Catalog) -> impl Iterator<Item = &WaitClass> {
    catalog.classes().iter().filter(|c| !c.is_hand_maintained())
}

// ── Enum header ────────────────────────────────────────────────────────

/// Render `wait_event_types.h`.
pub fn render_types_header(catalog: &Catalog) -> String {
    let mut out = generated_banner(TYPES_HEADER, "Generated wait events infrastructure code");

    writeln!(out, "#ifndef WAIT_EVENT_TYPES_H").unwrap();
    writeln!(out, "#define WAIT_EVENT_TYPES_H").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#include \"utils/wait_event.h\"").unwrap();
    writeln!(out).unwrap();

    for class in generated_classes(catalog) {
        write_enum_definition(&mut out, class);
    }

    writeln!(out, "#endif\t\t\t\t\t\t\t/* WAIT_EVENT_TYPES_H */").unwrap();
    out
}

/// Write one `typedef enum` for `class`.
///
/// The first member is pinned to the class base value; the rest follow
/// implicitly.
fn write_enum_definition(out: &mut String, class: &WaitClass) {
    let base = format!("PG_WAIT_{}", class.suffix().to_uppercase());
    tracing::debug!(class = %class.name, members = class.events.len(), "rendering enum");

    writeln!(out, "typedef enum").unwrap();
    writeln!(out, "{{").unwrap();
    let members: Vec<String> = class
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            if i == 0 {
                format!("\t{} = {base}", event.enum_name)
            } else {
                format!("\t{}", event.enum_name)
            }
        })
        .collect();
    writeln!(out, "{}", members.join(",\n")).unwrap();
    writeln!(out, "}} {};", class.name).unwrap();
    writeln!(out).unwrap();
}

// ── Lookup functions ───────────────────────────────────────────────────

/// Render `pgstat_wait_event.c`.
pub fn render_lookup_functions(catalog: &Catalog) -> String {
    let mut out = generated_banner(LOOKUP_SOURCE, "Generated wait event name lookup functions");
    writeln!(out).unwrap();

    for class in generated_classes(catalog) {
        write_lookup_function(&mut out, class);
    }

    out
}

/// Write `pgstat_get_wait_<suffix>()` for `class`.
///
/// There is deliberately no `default:` label: a member missing from the
/// switch then shows up as a compiler warning.
fn write_lookup_function(out: &mut String, class: &WaitClass) {
    let suffix = class.suffix().to_lowercase();
    tracing::debug!(class = %class.name, "rendering lookup function");

    writeln!(out, "static const char *").unwrap();
    writeln!(out, "pgstat_get_wait_{suffix}({} w)", class.name).unwrap();
    writeln!(out, "{{").unwrap();
    writeln!(out, "\tconst char *event_name = \"{UNKNOWN_EVENT}\";").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\tswitch (w)").unwrap();
    writeln!(out, "\t{{").unwrap();

    for event in &class.events {
        writeln!(out, "\t\tcase {}:", event.enum_name).unwrap();
        writeln!(out, "\t\t\tevent_name = \"{}\";", event.label).unwrap();
        writeln!(out, "\t\t\tbreak;").unwrap();
    }

    writeln!(out, "\t\t\t/* no default case, so that compiler will warn */").unwrap();
    writeln!(out, "\t}}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "\treturn event_name;").unwrap();
    writeln!(out, "}}").unwrap();
    writeln!(out).unwrap();
}

// ── Introspection table ────────────────────────────────────────────────

/// Render `wait_event_funcs_data.c`, covering hand-maintained classes too.
pub fn render_funcs_data(catalog: &Catalog) -> String {
    let mut out = generated_banner(FUNCS_DATA_SOURCE, "Generated wait event introspection data");
    writeln!(out).unwrap();

    for class in catalog.classes() {
        for event in &class.events {
            writeln!(
                out,
                "\t{{\"{}\", \"{}\", \"{}\"}},",
                class.suffix(),
                event.label,
                clean_description(&event.description)
            )
            .unwrap();
        }
    }

    out
}

// ── Enum member map (JSON reference) ───────────────────────────────────

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    class: &'a str,
    name: &'a str,
    /// Position within the class enum, counted from the base value.
    offset: usize,
}

/// Render [`MANIFEST`]: enum member name → class, label and offset.
pub fn render_manifest(catalog: &Catalog) -> Result<String> {
    let mut map: BTreeMap<&str, ManifestEntry<'_>> = BTreeMap::new();

    for class in generated_classes(catalog) {
        for (offset, event) in class.events.iter().enumerate() {
            map.insert(
                &event.enum_name,
                ManifestEntry {
                    class: &class.name,
                    name: &event.label,
                    offset,
                },
            );
        }
    }

    Ok(serde_json::to_string_pretty(&map)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;
    use crate::parse::parse_catalog;

    const CATALOG: &str = "\
Section: ClassName - WaitEventIPC
WaitEventIPC\tM_EVENT\t\"Waiting for <literal>M</literal>.\"
WaitEventIPC\tA_EVENT\t\"Waiting for A.\"
ABI_compatibility:
WaitEventIPC\tZ_EVENT\t\"Waiting for Z.\"

Section: ClassName - WaitEventActivity
WaitEventActivity\tARCHIVER_MAIN\t\"Waiting in main loop of archiver process.\"

Section: ClassName - WaitEventLock
WaitEventLock\trelation\t\"Waiting to acquire a lock on a relation.\"
";

    fn catalog() -> Catalog {
        Catalog::build(parse_catalog(CATALOG).unwrap(), Mode::Code).unwrap()
    }

    #[test]
    fn header_declares_generated_enums() {
        let header = render_types_header(&catalog());

        assert!(header.contains("#ifndef WAIT_EVENT_TYPES_H\n#define WAIT_EVENT_TYPES_H\n"));
        assert!(header.contains("#include \"utils/wait_event.h\""));
        assert!(header.contains(
            "typedef enum\n{\n\tWAIT_EVENT_ARCHIVER_MAIN = PG_WAIT_ACTIVITY\n} WaitEventActivity;\n"
        ));
        assert!(header.contains(
            "typedef enum\n{\n\tWAIT_EVENT_A_EVENT = PG_WAIT_IPC,\n\tWAIT_EVENT_M_EVENT,\n\tWAIT_EVENT_Z_EVENT\n} WaitEventIPC;\n"
        ));
        assert!(header.trim_end().ends_with("/* WAIT_EVENT_TYPES_H */"));
    }

    #[test]
    fn header_skips_hand_maintained_classes() {
        let header = render_types_header(&catalog());
        assert!(!header.contains("WaitEventLock"));
        assert!(!header.contains("WAIT_EVENT_relation"));
    }

    #[test]
    fn enums_follow_class_order() {
        let header = render_types_header(&catalog());
        let activity = header.find("} WaitEventActivity;").unwrap();
        let ipc = header.find("} WaitEventIPC;").unwrap();
        assert!(activity < ipc);
    }

    #[test]
    fn lookup_function_is_exhaustive_without_default() {
        let source = render_lookup_functions(&catalog());

        assert!(source.contains("static const char *\npgstat_get_wait_ipc(WaitEventIPC w)\n{"));
        assert!(source.contains("\tconst char *event_name = \"unknown wait event\";"));
        assert!(source.contains("\t\tcase WAIT_EVENT_M_EVENT:\n\t\t\tevent_name = \"MEvent\";\n\t\t\tbreak;"));
        assert!(source.contains("\t\tcase WAIT_EVENT_Z_EVENT:"));
        assert!(source.contains("pgstat_get_wait_activity(WaitEventActivity w)"));
        assert!(!source.contains("default:"));
        assert!(!source.contains("pgstat_get_wait_lock("));
    }

    #[test]
    fn funcs_data_covers_every_class() {
        let data = render_funcs_data(&catalog());

        assert!(data.contains(
            "\t{\"Activity\", \"ArchiverMain\", \"Waiting in main loop of archiver process\"},"
        ));
        assert!(data.contains("\t{\"IPC\", \"MEvent\", \"Waiting for M\"},"));
        assert!(data.contains(
            "\t{\"Lock\", \"relation\", \"Waiting to acquire a lock on a relation\"},"
        ));
    }

    #[test]
    fn funcs_data_rows_follow_emission_order() {
        let data = render_funcs_data(&catalog());
        let rows: Vec<&str> = data.lines().filter(|l| l.starts_with("\t{")).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].contains("ArchiverMain"));
        assert!(rows[1].contains("AEvent"));
        assert!(rows[2].contains("MEvent"));
        assert!(rows[3].contains("ZEvent"));
        assert!(rows[4].contains("relation"));
    }

    #[test]
    fn manifest_lists_generated_members() {
        let json = render_manifest(&catalog()).unwrap();
        let map: serde_json::Value = serde_json::from_str(&json).unwrap();
        let obj = map.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        assert_eq!(obj["WAIT_EVENT_Z_EVENT"]["class"], "WaitEventIPC");
        assert_eq!(obj["WAIT_EVENT_Z_EVENT"]["name"], "ZEvent");
        assert_eq!(obj["WAIT_EVENT_Z_EVENT"]["offset"], 2);
        assert_eq!(obj["WAIT_EVENT_ARCHIVER_MAIN"]["offset"], 0);
        assert!(!obj.contains_key("WAIT_EVENT_relation"));
    }
}
