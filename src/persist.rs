//! Durable snapshot of the best-move cache.
//!
//! The snapshot is a JSON document mapping the text encoding of a board
//! (`"XX.OO...."`) to its best move set. Entries are written in key order so
//! the same cache always produces the same bytes.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::CacheError;
use crate::min_max::cache::{BestMoveCache, HashMapCache};
use crate::min_max::MoveSet;
use crate::ttt::GameBoard;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    entries: BTreeMap<String, MoveSet>,
}

pub fn save(cache: &BestMoveCache, path: &Path) -> Result<(), CacheError> {
    let snapshot = Snapshot {
        version: FORMAT_VERSION,
        entries: cache.iter()
            .map(|(board, moves)| (board.encode(), *moves))
            .collect(),
    };

    let io_error = |operation, source| CacheError::Io { operation, path: path.to_path_buf(), source };
    // written next to the target and renamed over it, so a failed write leaves the old snapshot
    let staging = staging_path(path);
    let file = File::create(&staging).map_err(|source| io_error("create", source))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(|source| CacheError::Format {
        path: staging.clone(),
        source,
    })?;
    writer.flush().map_err(|source| io_error("write", source))?;
    drop(writer);
    fs::rename(&staging, path).map_err(|source| io_error("replace", source))?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn load(path: &Path) -> Result<BestMoveCache, CacheError> {
    let file = File::open(path).map_err(|source| CacheError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file)).map_err(|source| CacheError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    if snapshot.version != FORMAT_VERSION {
        return Err(CacheError::UnsupportedVersion { found: snapshot.version, expected: FORMAT_VERSION });
    }

    let entries = snapshot.entries.into_iter()
        .map(|(encoded, moves)| -> Result<_, CacheError> {
            let board = encoded.parse::<GameBoard>()?;
            if !board.accepts(&moves) {
                return Err(CacheError::UnplayableEntry { board: encoded, moves: moves.to_string() });
            }
            Ok((board, moves))
        })
        .collect::<Result<_, _>>()?;
    Ok(HashMapCache::new(entries))
}

/// Loads the snapshot at `path`. A missing file is an empty cache; an
/// unreadable one is logged and also treated as empty.
pub fn load_or_default(path: &Path) -> BestMoveCache {
    match load(path) {
        Ok(cache) => {
            info!(path = %path.display(), entries = cache.len(), "loaded best-move cache");
            cache
        }
        Err(CacheError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no best-move cache yet, starting empty");
            BestMoveCache::default()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable best-move cache");
            BestMoveCache::default()
        }
    }
}

/// Writes the snapshot, logging instead of failing. Returns whether it was written.
pub fn save_or_warn(cache: &BestMoveCache, path: &Path) -> bool {
    match save(cache, path) {
        Ok(()) => {
            info!(path = %path.display(), entries = cache.len(), "saved best-move cache");
            true
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not save best-move cache");
            false
        }
    }
}
