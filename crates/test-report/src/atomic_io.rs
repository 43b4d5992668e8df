//! Replace a file in one step by writing a sibling temp file and renaming it.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::error::ReportError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Write `contents` to `file_name` inside `dir`, replacing any existing file.
///
/// `display_path` is only used in error messages. Readers see either the old
/// file or the complete new one.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &Utf8Path,
    display_path: &Utf8Path,
    contents: &str,
) -> Result<(), ReportError> {
    let write_error = |message: String| ReportError::Write {
        path: display_path.to_path_buf(),
        message,
    };
    let mut components = file_name.components();
    let (Some(Utf8Component::Normal(name)), None) = (components.next(), components.next()) else {
        return Err(write_error("report path must be a file name".to_owned()));
    };
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(".{name}.tmp.{}.{nanos}.{counter}", std::process::id());

    write_temp(dir, &tmp_name, contents).map_err(|err| write_error(err.to_string()))?;
    if let Err(err) = replace(dir, &tmp_name, name) {
        drop(dir.remove_file(&tmp_name));
        return Err(write_error(err.to_string()));
    }
    if dir.open(".").and_then(|parent| parent.sync_all()).is_err() {
        // Directory sync is best effort.
    }
    Ok(())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    if written.is_err() {
        drop(file);
        drop(dir.remove_file(tmp_name));
    }
    written
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}
