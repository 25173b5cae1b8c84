//! Atomic artifact writes.
//!
//! Every artifact is written to a temporary file in its destination
//! directory and renamed into place, so concurrent runs (parallel builds
//! invoking the generator twice) never expose a half-written file.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

/// Banner placed at the top of every generated C artifact.
pub fn generated_banner(file_name: &str, summary: &str) -> String {
    format!(
        "\
/*-------------------------------------------------------------------------
 *
 * {file_name}
 *    {summary}
 *
 * NOTES
 *  ******************************
 *  *** DO NOT EDIT THIS FILE! ***
 *  ******************************
 *
 *  It has been GENERATED by {generator}
 *
 *-------------------------------------------------------------------------
 */
",
        generator = env!("CARGO_PKG_NAME"),
    )
}

/// Write `content` to `path` through a temporary file and a rename.
///
/// The temporary file lives next to `path` and carries the process id in
/// its name. Parent directories are created as needed.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| Error::Write {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let prefix = format!("{file_name}.tmp{}.", std::process::id());
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .tempfile_in(dir)
        .map_err(write_err)?;

    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Temp files are created owner-only; generated sources should be readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.h");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new contents\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new contents\n");
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        write_atomic(&dir.path().join("a.c"), "a").unwrap();
        write_atomic(&dir.path().join("b.c"), "b").unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["a.c", "b.c"]);
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.sgml");
        write_atomic(&path, "x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn write_into_file_path_reports_destination() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_atomic(&blocker.join("out.h"), "x").unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("blocker"));
    }

    #[test]
    fn banner_names_file_and_generator() {
        let banner = generated_banner("wait_event_types.h", "Generated wait events infrastructure code");
        assert!(banner.starts_with("/*---"));
        assert!(banner.contains(" * wait_event_types.h\n"));
        assert!(banner.contains("DO NOT EDIT THIS FILE!"));
        assert!(banner.contains("GENERATED by wait-event-gen"));
        assert!(banner.ends_with(" */\n"));
    }
}
