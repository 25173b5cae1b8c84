//! Generate wait event sources and documentation from a wait event catalog.
//!
//! `wait-event-gen` reads a line-oriented catalog of wait events grouped
//! into classes and emits, from that single source of truth:
//!
//! - `wait_event_types.h`: one `typedef enum` per class
//! - `pgstat_wait_event.c`: one exhaustive name lookup function per class
//! - `wait_event_funcs_data.c`: a flat `{class, name, description}` table
//! - `wait_event_types.sgml`: DocBook tables for the documentation
//!
//! # Features
//!
//! - Classes and events sorted case-insensitively
//! - `ABI_compatibility:` regions keep late additions at the end of their
//!   enum so existing values never shift
//! - Lookup functions without `default:` so missing members are caught by
//!   the C compiler
//! - Duplicate keys rejected before anything is written
//! - Atomic writes: every artifact appears in one rename
//! - Deterministic output: byte-identical across runs
//!
//! # Usage
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//!
//! use wait_event_gen::{GenerateOptions, Mode};
//!
//! let options = GenerateOptions {
//!     mode: Mode::Code,
//!     output_dir: PathBuf::from("output/"),
//!     manifest: false,
//! };
//! let stats = wait_event_gen::generate(Path::new("wait_event_names.txt"), &options)?;
//! eprintln!("Generated {} events in {} classes", stats.events, stats.classes);
//! # Ok::<(), wait_event_gen::error::Error>(())
//! ```

use std::path::{Path, PathBuf};

pub mod catalog;
pub mod codegen;
pub mod describe;
pub mod docgen;
pub mod error;
pub mod naming;
pub mod output;
pub mod parse;

use crate::catalog::Catalog;
use crate::error::Result;

/// Which family of artifacts a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// C enums, lookup functions and the introspection table.
    Code,
    /// DocBook tables.
    Docs,
}

/// Options for a single [`generate`] run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub mode: Mode,

    /// Directory receiving the artifacts; created if missing.
    pub output_dir: PathBuf,

    /// Also write [`codegen::MANIFEST`]. Ignored in [`Mode::Docs`].
    pub manifest: bool,
}

/// Statistics collected during generation for reporting.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationStats {
    pub classes: usize,
    pub events: usize,
    pub abi_preserved: usize,
    pub hand_maintained_skipped: usize,
    pub artifacts_written: usize,
}

/// Read the catalog at `input` and write the artifacts for `options.mode`.
///
/// The catalog is parsed, validated and ordered in full before any file is
/// written, so a malformed catalog leaves the output directory untouched.
pub fn generate(input: &Path, options: &GenerateOptions) -> Result<GenerationStats> {
    let records = parse::load_catalog(input)?;
    let catalog = Catalog::build(records, options.mode)?;

    match options.mode {
        Mode::Code => codegen::generate(&catalog, &options.output_dir, options.manifest),
        Mode::Docs => docgen::generate(&catalog, &options.output_dir),
    }
}
