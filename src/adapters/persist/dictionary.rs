//! # Dictionary Files
//!
//! One entry per line, `code|word`:
//!
//! ```text
//! E00|猫
//! C00|食べる
//! ```
//!
//! The role and id are recovered from the code. Lines without a `|`,
//! with a bad code, or duplicating an earlier entry are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::codec::{Code, Dictionary};
use crate::ports::{PersistError, PersistResult};

/// Write `dict` to `path`, replacing the file. Returns entries written.
pub fn save(path: impl AsRef<Path>, dict: &Dictionary) -> PersistResult<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PersistError::io(path, e))?;
    let mut out = BufWriter::new(file);

    for entry in dict.entries() {
        writeln!(out, "{}|{}", entry.code, entry.word).map_err(|e| PersistError::io(path, e))?;
    }
    out.flush().map_err(|e| PersistError::io(path, e))?;

    info!(path = %path.display(), count = dict.len(), "saved dictionary");
    Ok(dict.len())
}

/// Read a dictionary from `path`
pub fn load(path: impl AsRef<Path>) -> PersistResult<Dictionary> {
    let mut dict = Dictionary::new();
    load_into(path, &mut dict)?;
    Ok(dict)
}

/// Merge the entries of `path` into `dict`. Returns entries added.
pub fn load_into(path: impl AsRef<Path>, dict: &mut Dictionary) -> PersistResult<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PersistError::io(path, e))?;

    let mut added = 0usize;
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(path = %path.display(), error = %e, added, "read failed, keeping partial dictionary");
                break;
            }
        };
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let Some((code, word)) = line.split_once('|') else {
            debug!(line = lineno + 1, "skipping record without separator");
            continue;
        };
        let code = match Code::parse(code) {
            Ok(code) => code,
            Err(e) => {
                debug!(line = lineno + 1, error = %e, "skipping record");
                continue;
            }
        };

        if dict.insert(code, word) {
            added += 1;
        } else {
            debug!(line = lineno + 1, %code, "skipping duplicate record");
        }
    }

    info!(path = %path.display(), added, "loaded dictionary");
    Ok(added)
}
