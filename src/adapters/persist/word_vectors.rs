//! # Word Vector Files
//!
//! Text format, one entry per line:
//!
//! ```text
//! 猫 0.125000 -0.031250 ... 0.062500
//! ```
//!
//! A label followed by the vector's components with six fractional
//! digits, which round-trips to f32 precision. Loading never aborts on a
//! bad line: unparsable lines are skipped and counted.
//!
//! The cache is rebuilt from the word list when the list is newer than the
//! cache. Word vectors are a pure function of the word's bytes, so the
//! same list always rebuilds the same cache.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;

use rand::Rng;
use tracing::{debug, info, warn};

use super::word_list::WordList;
use crate::adapters::storage::VectorStore;
use crate::core::config::RetrievalConfig;
use crate::core::{math, EntryId, Vector};
use crate::ports::{PersistError, PersistResult, StoreError};

/// Write every entry of `store` to `path`, replacing the file.
///
/// Labels come from `words` for ids below `label_limit`; everything else
/// is written as `word<id>`. Returns the number of lines written.
pub fn save(
    path: impl AsRef<Path>,
    store: &VectorStore,
    words: Option<&WordList>,
    label_limit: usize,
) -> PersistResult<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| PersistError::io(path, e))?;
    let mut out = BufWriter::new(file);

    let empty = WordList::default();
    let words = words.unwrap_or(&empty);

    for entry in store {
        write_entry(&mut out, &words.label(entry.id, label_limit), &entry.vector)
            .map_err(|e| PersistError::io(path, e))?;
    }
    out.flush().map_err(|e| PersistError::io(path, e))?;

    info!(path = %path.display(), count = store.size(), "saved word vectors");
    Ok(store.size())
}

fn write_entry(out: &mut impl Write, label: &str, vector: &Vector) -> std::io::Result<()> {
    out.write_all(label.as_bytes())?;
    for x in vector.dims() {
        write!(out, " {x:.6}")?;
    }
    out.write_all(b"\n")
}

/// Parse one `label v0 .. vN` line.
///
/// The last `dimensionality` tokens are the components; everything before
/// them is the label, which may itself contain whitespace.
fn parse_entry(line: &str, dimensionality: usize) -> Option<(&str, Vector)> {
    let mut rest = line.trim();
    let mut dims = vec![0.0f32; dimensionality];

    for slot in dims.iter_mut().rev() {
        let (head, token) = rest.rsplit_once(char::is_whitespace)?;
        *slot = token.parse().ok()?;
        rest = head.trim_end();
    }
    if rest.is_empty() {
        return None;
    }

    Some((rest, Vector::new(dims)))
}

/// Read vectors from `path` into `store`.
///
/// Each vector is normalized and added with sequential ids 0, 1, 2, ...
/// Stops after `max_words` entries when `max_words > 0`, or when the store
/// fills up. Returns the number of entries added.
pub fn load(path: impl AsRef<Path>, store: &mut VectorStore, max_words: usize) -> PersistResult<usize> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PersistError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for (lineno, line) in reader.split(b'\n').enumerate() {
        if max_words > 0 && loaded >= max_words {
            break;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(path = %path.display(), error = %e, loaded, "read failed, keeping partial load");
                break;
            }
        };

        let Ok(text) = std::str::from_utf8(&line) else {
            skipped += 1;
            debug!(line = lineno + 1, "skipping non-utf8 record");
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }

        let Some((_label, vector)) = parse_entry(text, store.dimensionality()) else {
            skipped += 1;
            debug!(line = lineno + 1, "skipping malformed record");
            continue;
        };

        match store.add(&vector.normalize(), loaded as EntryId) {
            Ok(()) => loaded += 1,
            Err(StoreError::CapacityExceeded { capacity }) => {
                warn!(capacity, loaded, "vector store is full, stopping load");
                break;
            }
            Err(e) => {
                skipped += 1;
                debug!(line = lineno + 1, error = %e, "skipping record");
            }
        }
    }

    info!(path = %path.display(), loaded, skipped, "loaded word vectors");
    Ok(loaded)
}

/// Deterministic unit vector for `word`.
///
/// Each component is a position-weighted sum of the word's bytes, folded
/// into [-1, 1) before normalization.
pub fn word_vector(word: &str, dimensionality: usize) -> Vector {
    let mut dims = vec![0.0f32; dimensionality];
    for (i, slot) in dims.iter_mut().enumerate() {
        let val: f32 = word
            .bytes()
            .enumerate()
            .map(|(j, b)| (b as f32 * (j + 1) as f32 * (i + 1) as f32) / 10_000.0)
            .sum();
        *slot = val.rem_euclid(2.0) - 1.0;
    }
    math::normalize(&mut dims);
    Vector::new(dims)
}

/// Uniform random unit vector
pub fn random_vector(rng: &mut impl Rng, dimensionality: usize) -> Vector {
    let mut dims: Vec<f32> = (0..dimensionality).map(|_| rng.gen_range(-1.0..=1.0)).collect();
    math::normalize(&mut dims);
    Vector::new(dims)
}

/// Top `store` up to `target` entries.
///
/// Words of the list not yet covered by the store (the first `store.size()`
/// words are taken as already present) are hashed into vectors first; any
/// shortfall is filled with random vectors. Ids continue from the current
/// size. Returns the new total, which never exceeds the store's capacity.
pub fn regenerate_large(
    store: &mut VectorStore,
    words: Option<&WordList>,
    target: usize,
    rng: &mut impl Rng,
) -> usize {
    let target = target.min(store.capacity());
    let start = store.size();
    if start >= target {
        return start;
    }

    info!(current = start, target, "generating word vectors");
    let dim = store.dimensionality();

    let mut hashed = 0usize;
    if let Some(words) = words {
        for word in words.words().skip(start) {
            if store.size() >= target {
                break;
            }
            let id = store.size() as EntryId;
            if store.add(&word_vector(word, dim), id).is_err() {
                break;
            }
            hashed += 1;
            if hashed % 1000 == 0 {
                debug!(hashed, "hashed word vectors");
            }
        }
    } else {
        warn!("no word list, falling back to random vectors");
    }

    let mut random = 0usize;
    while store.size() < target {
        let id = store.size() as EntryId;
        if store.add(&random_vector(rng, dim), id).is_err() {
            break;
        }
        random += 1;
    }

    info!(hashed, random, total = store.size(), "word vectors generated");
    store.size()
}

/// What [`refresh_if_stale`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The cache was fresh and this many vectors were read from it
    Loaded(usize),
    /// The cache was missing or stale; the store now holds this many
    Regenerated(usize),
}

/// Knobs for [`refresh_if_stale`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub target: usize,
    pub load_limit: usize,
    pub label_limit: usize,
}

impl From<&RetrievalConfig> for RefreshPolicy {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            target: config.regenerate_target,
            load_limit: config.load_limit,
            label_limit: config.label_limit,
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// The cache is stale when it is missing or older than the word list.
/// A missing word list never makes an existing cache stale.
pub fn is_stale(word_list_path: &Path, cache_path: &Path) -> bool {
    match (modified(word_list_path), modified(cache_path)) {
        (_, None) => true,
        (Some(list), Some(cache)) => list > cache,
        (None, Some(_)) => false,
    }
}

/// Fill `store` from the cache, rebuilding the cache first if it is stale.
///
/// A rebuild regenerates to `policy.target` and writes the cache. Failing
/// to write it is logged and otherwise ignored; the store is still usable.
pub fn refresh_if_stale(
    store: &mut VectorStore,
    word_list_path: impl AsRef<Path>,
    cache_path: impl AsRef<Path>,
    policy: &RefreshPolicy,
    rng: &mut impl Rng,
) -> Refresh {
    let word_list_path = word_list_path.as_ref();
    let cache_path = cache_path.as_ref();

    if !is_stale(word_list_path, cache_path) {
        match load(cache_path, store, policy.load_limit) {
            Ok(n) => return Refresh::Loaded(n),
            Err(e) => warn!(error = %e, "cache unreadable, regenerating"),
        }
    } else {
        info!(cache = %cache_path.display(), "word vector cache missing or stale, regenerating");
    }

    let words = match WordList::read(word_list_path) {
        Ok(words) => Some(words),
        Err(e) => {
            warn!(error = %e, "word list unavailable");
            None
        }
    };

    let total = regenerate_large(store, words.as_ref(), policy.target, rng);

    if let Some(parent) = cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(dir = %parent.display(), error = %e, "cannot create cache directory");
        }
    }
    if let Err(e) = save(cache_path, store, words.as_ref(), policy.label_limit) {
        warn!(error = %e, "failed to write word vector cache");
    }

    Refresh::Regenerated(total)
}
