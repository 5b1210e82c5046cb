//! Transcript loading.
//!
//! Reads an exported chat from disk and hands plain text to the pipeline.
//! Size limits are enforced here, before any parsing happens: an oversized
//! file never reaches the engine.
//!
//! `.zip` exports are unpacked by taking the first `.txt` entry. The entry's
//! decompressed size is bounded by the same limit as a plain file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use humansize::{format_size, BINARY};

/// Errors raised before the engine is invoked.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Input too large ({}). Maximum is {}.", human(.size), human(.max))]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open archive {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    #[error("Archive {} contains no .txt chat export", .path.display())]
    NoTextInArchive { path: PathBuf },
}

fn human(bytes: &u64) -> String {
    format_size(*bytes, BINARY)
}

/// A loaded transcript ready for parsing.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Decoded text
    pub text: String,
    /// File name the text came from (the archive entry for `.zip` inputs)
    pub source_name: String,
    /// Size of the text in bytes before decoding
    pub bytes: u64,
}

/// Load a `.txt` or `.zip` chat export, enforcing `max_bytes`.
pub fn load_transcript(path: &Path, max_bytes: u64) -> Result<Transcript, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = fs::metadata(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    check_size(path, metadata.len(), max_bytes)?;

    if is_zip(path) {
        return load_from_zip(path, max_bytes);
    }

    let bytes = fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded transcript");
    Ok(Transcript {
        bytes: bytes.len() as u64,
        text: decode(&bytes),
        source_name,
    })
}

/// Decode export bytes: drop a UTF-8 BOM and replace invalid sequences.
pub fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

fn check_size(path: &Path, size: u64, max: u64) -> Result<(), InputError> {
    if size > max {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            max,
        });
    }
    Ok(())
}

fn load_from_zip(path: &Path, max_bytes: u64) -> Result<Transcript, InputError> {
    let archive_error = |e: zip::result::ZipError| InputError::Archive {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file = fs::File::open(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(archive_error)?;

    let index = (0..archive.len())
        .find(|i| {
            archive
                .by_index(*i)
                .map(|entry| !entry.is_dir() && entry.name().to_lowercase().ends_with(".txt"))
                .unwrap_or(false)
        })
        .ok_or_else(|| InputError::NoTextInArchive {
            path: path.to_path_buf(),
        })?;

    let entry = archive.by_index(index).map_err(archive_error)?;
    let source_name = entry.name().to_string();
    check_size(path, entry.size(), max_bytes)?;

    // Declared sizes can lie; read one byte past the limit to detect it
    let mut bytes = Vec::new();
    entry
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    check_size(path, bytes.len() as u64, max_bytes)?;

    tracing::debug!(
        path = %path.display(),
        entry = %source_name,
        bytes = bytes.len(),
        "unpacked transcript from archive"
    );
    Ok(Transcript {
        bytes: bytes.len() as u64,
        text: decode(&bytes),
        source_name,
    })
}
