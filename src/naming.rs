//! Naming rules shared by every generated artifact.
//!
//! # Naming Table
//!
//! | Input | Rule | Example |
//! |-------|------|---------|
//! | event key | `WAIT_EVENT_` prefix, case kept | `ARCHIVER_MAIN` → `WAIT_EVENT_ARCHIVER_MAIN` |
//! | event key | camel collapse per `_` segment | `WAL_SENDER_WAIT_WAL` → `WalSenderWaitWal` |
//! | lock class key | passed through | `BufferMapping` → `BufferMapping` |
//! | class name | `WaitEvent` prefix stripped | `WaitEventIO` → `IO` |

/// Prefix of every generated enum member.
pub const ENUM_PREFIX: &str = "WAIT_EVENT_";

/// Common prefix of class names in section headers.
pub const CLASS_PREFIX: &str = "WaitEvent";

/// Classes whose keys are already display labels.
const VERBATIM_LABEL_CLASSES: [&str; 2] = ["WaitEventLWLock", "WaitEventLock"];

/// Classes whose enums and lookup functions are maintained by hand.
const HAND_MAINTAINED_CLASSES: [&str; 3] =
    ["WaitEventExtension", "WaitEventLWLock", "WaitEventLock"];

/// Build the enum member name for an event key.
///
/// - `"ARCHIVER_MAIN"` → `"WAIT_EVENT_ARCHIVER_MAIN"`
pub fn enum_name(key: &str) -> String {
    format!("{ENUM_PREFIX}{key}")
}

/// Build the human-facing label for an event key within `class`.
///
/// Lock classes keep the key verbatim; every other class gets
/// [`camel_collapse`].
pub fn display_label(class: &str, key: &str) -> String {
    if VERBATIM_LABEL_CLASSES.contains(&class) {
        key.to_string()
    } else {
        camel_collapse(key)
    }
}

/// Collapse an underscore-separated key into camel case.
///
/// Each segment keeps its first character as written and lower-cases the
/// rest, so this is not a general title-case conversion:
/// - `"WAL_SENDER_WAIT_WAL"` → `"WalSenderWaitWal"`
/// - `"xact_SLRU"` → `"xactSlru"`
pub fn camel_collapse(key: &str) -> String {
    key.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_string() + &chars.as_str().to_lowercase(),
            }
        })
        .collect()
}

/// Strip the common class prefix: `"WaitEventIPC"` → `"IPC"`.
///
/// Names without the prefix are returned unchanged.
pub fn class_suffix(class: &str) -> &str {
    class.strip_prefix(CLASS_PREFIX).unwrap_or(class)
}

/// Whether generated enums and lookup functions skip `class`.
///
/// These classes still contribute rows to the introspection table and the
/// documentation.
pub fn is_hand_maintained(class: &str) -> bool {
    HAND_MAINTAINED_CLASSES.contains(&class)
}

/// Upper-case the first character and lower-case the rest: `"IPC"` → `"Ipc"`.
pub fn title_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_name_keeps_case() {
        assert_eq!(enum_name("WAL_SENDER_WAIT_WAL"), "WAIT_EVENT_WAL_SENDER_WAIT_WAL");
        assert_eq!(enum_name("BufferMapping"), "WAIT_EVENT_BufferMapping");
    }

    #[test]
    fn camel_collapse_conversion() {
        assert_eq!(camel_collapse("WAL_SENDER_WAIT_WAL"), "WalSenderWaitWal");
        assert_eq!(camel_collapse("ARCHIVER_MAIN"), "ArchiverMain");
        assert_eq!(camel_collapse("BUFFILE_READ"), "BuffileRead");
        assert_eq!(camel_collapse("SINGLE"), "Single");
    }

    #[test]
    fn camel_collapse_keeps_first_character_verbatim() {
        assert_eq!(camel_collapse("xact_SLRU"), "xactSlru");
        assert_eq!(camel_collapse("a_B_c"), "aBc");
    }

    #[test]
    fn camel_collapse_skips_empty_segments() {
        assert_eq!(camel_collapse("DOUBLE__UNDERSCORE"), "DoubleUnderscore");
        assert_eq!(camel_collapse("_LEADING"), "Leading");
    }

    #[test]
    fn lock_classes_pass_keys_through() {
        assert_eq!(display_label("WaitEventLWLock", "BufferMapping"), "BufferMapping");
        assert_eq!(display_label("WaitEventLock", "relation"), "relation");
        assert_eq!(display_label("WaitEventIO", "BUFFILE_READ"), "BuffileRead");
    }

    #[test]
    fn class_suffix_strips_prefix() {
        assert_eq!(class_suffix("WaitEventIPC"), "IPC");
        assert_eq!(class_suffix("WaitEventBufferPin"), "BufferPin");
        assert_eq!(class_suffix("Custom"), "Custom");
    }

    #[test]
    fn hand_maintained_classes() {
        assert!(is_hand_maintained("WaitEventExtension"));
        assert!(is_hand_maintained("WaitEventLWLock"));
        assert!(is_hand_maintained("WaitEventLock"));
        assert!(!is_hand_maintained("WaitEventIO"));
        assert!(!is_hand_maintained("WaitEventLockManager"));
    }

    #[test]
    fn title_case_conversion() {
        assert_eq!(title_case("IPC"), "Ipc");
        assert_eq!(title_case("BufferPin"), "Bufferpin");
        assert_eq!(title_case(""), "");
    }
}
