//! Grouping and ordering of parsed wait events.
//!
//! A [`Catalog`] is built once from the parser's records and never changes
//! afterwards. Its order is the emission order:
//! - classes sorted case-insensitively by name;
//! - events within a class sorted case-insensitively by key;
//! - in [`Mode::Code`], events from an ABI region follow the sorted events
//!   of their class in file order, so existing enum values stay put.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::Mode;
use crate::error::{Error, Result};
use crate::naming::{class_suffix, display_label, enum_name, is_hand_maintained};
use crate::parse::RawRecord;

/// A normalized wait event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitEvent {
    /// Bare key from the catalog (e.g. `"WAL_SENDER_WAIT_WAL"`).
    pub key: String,

    /// Generated enum member (e.g. `"WAIT_EVENT_WAL_SENDER_WAIT_WAL"`).
    pub enum_name: String,

    /// Human-facing label (e.g. `"WalSenderWaitWal"`).
    pub label: String,

    /// Quoted description, verbatim.
    pub description: String,

    /// Kept in file order after the sorted events.
    pub abi_preserved: bool,

    /// 1-based catalog line.
    pub line_number: usize,
}

impl WaitEvent {
    fn normalize(record: RawRecord, abi_preserved: bool) -> Self {
        Self {
            enum_name: enum_name(&record.key),
            label: display_label(&record.class, &record.key),
            key: record.key,
            description: record.description,
            abi_preserved,
            line_number: record.line_number,
        }
    }
}

/// One wait event class and its events in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitClass {
    /// Full class name (e.g. `"WaitEventIO"`).
    pub name: String,

    pub events: Vec<WaitEvent>,
}

impl WaitClass {
    /// Class name without the `WaitEvent` prefix.
    pub fn suffix(&self) -> &str {
        class_suffix(&self.name)
    }

    /// Whether code generation leaves this class to hand-written sources.
    pub fn is_hand_maintained(&self) -> bool {
        is_hand_maintained(&self.name)
    }
}

/// All wait event classes in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    classes: Vec<WaitClass>,
}

impl Catalog {
    /// Group, normalize and order parsed records.
    ///
    /// Rejects duplicate keys anywhere in the catalog, since every key
    /// becomes a member of the same enum namespace, and keys of one class
    /// that collapse to the same display label. In [`Mode::Docs`] the
    /// records' ABI flags are ignored.
    pub fn build(records: Vec<RawRecord>, mode: Mode) -> Result<Self> {
        check_unique_keys(&records)?;

        // (sorted part, ABI part) per class.
        let mut grouped: BTreeMap<String, (Vec<WaitEvent>, Vec<WaitEvent>)> = BTreeMap::new();
        let mut labels: HashMap<(String, String), usize> = HashMap::new();
        for record in records {
            let abi = mode == Mode::Code && record.abi;
            let class = record.class.clone();
            let event = WaitEvent::normalize(record, abi);
            let label_key = (class.clone(), event.label.clone());
            if let Some(&first_line) = labels.get(&label_key) {
                return Err(Error::DuplicateLabel {
                    class,
                    label: event.label,
                    first_line,
                    second_line: event.line_number,
                });
            }
            labels.insert(label_key, event.line_number);
            let entry = grouped.entry(class).or_default();
            if abi {
                entry.1.push(event);
            } else {
                entry.0.push(event);
            }
        }

        let mut classes: Vec<WaitClass> = grouped
            .into_iter()
            .map(|(name, (mut events, abi_events))| {
                events.sort_by(|a, b| case_insensitive(&a.key, &b.key));
                events.extend(abi_events);
                WaitClass { name, events }
            })
            .collect();
        classes.sort_by(|a, b| case_insensitive(&a.name, &b.name));

        tracing::debug!(classes = classes.len(), ?mode, "built catalog");
        Ok(Self { classes })
    }

    /// Classes in emission order.
    pub fn classes(&self) -> &[WaitClass] {
        &self.classes
    }

    /// Look up a class by its full name.
    pub fn class(&self, name: &str) -> Option<&WaitClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Total number of events across all classes.
    pub fn event_count(&self) -> usize {
        self.classes.iter().map(|c| c.events.len()).sum()
    }

    /// Number of events kept in file order by an ABI region.
    pub fn abi_preserved_count(&self) -> usize {
        self.classes
            .iter()
            .flat_map(|c| &c.events)
            .filter(|e| e.abi_preserved)
            .count()
    }
}

/// Case-insensitive comparison; upper-cases both sides.
///
/// Strings differing only in case compare equal so a stable sort keeps
/// their file order.
fn case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_uppercase().cmp(&b.to_uppercase())
}

fn check_unique_keys(records: &[RawRecord]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for record in records {
        if let Some(&first_line) = seen.get(record.key.as_str()) {
            return Err(Error::DuplicateEvent {
                key: record.key.clone(),
                first_line,
                second_line: record.line_number,
            });
        }
        seen.insert(&record.key, record.line_number);
    }
    Ok(())
}
