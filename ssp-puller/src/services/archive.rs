//! tar.gz artifact writer and reader
//!
//! Entries are named by their path relative to the data root
//! (`<year>/<month>/<day>/<sport>/<file>`) so every archive records where it
//! came from. Tar cannot store absolute or `..` paths, which is why the root
//! prefix is dropped rather than kept verbatim.

use crate::error::{PullerError, PullerResult};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// Write a gzip-over-tar stream holding every file in `files` to `sink`
///
/// Any read, stat or write error aborts the whole archive; whatever was
/// written to `sink` so far must be discarded by the caller.
pub fn create_archive<W: Write>(files: &[PathBuf], base: &Path, sink: W) -> io::Result<W> {
    let encoder = GzEncoder::new(sink, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for file in files {
        let name = file.strip_prefix(base).unwrap_or(file);
        builder.append_path_with_name(file, name)?;
    }

    let encoder = builder.into_inner()?;
    encoder.finish()
}

/// Compress `raw` into the file `archive`
///
/// A partial archive is removed on failure so a later presence check does
/// not mistake it for a finished artifact.
pub fn archive_file(raw: &Path, archive: &Path, base: &Path) -> PullerResult<()> {
    let result = (|| -> io::Result<()> {
        let out = BufWriter::new(File::create(archive)?);
        let mut out = create_archive(&[raw.to_path_buf()], base, out)?;
        out.flush()?;
        out.into_inner().map_err(|e| e.into_error())?.sync_all()
    })();

    result.map_err(|source| {
        if let Err(e) = fs::remove_file(archive) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %archive.display(), error = %e, "Failed to remove partial archive");
            }
        }
        PullerError::Archive {
            path: archive.to_path_buf(),
            source,
        }
    })
}

/// Extract `archive` into `dest`, dropping the first `strip_components`
/// components of each entry path
///
/// Entries with no components left are skipped. Returns the written paths.
pub fn extract_archive(
    archive: &Path,
    dest: &Path,
    strip_components: usize,
) -> PullerResult<Vec<PathBuf>> {
    let to_error = |source: io::Error| PullerError::Archive {
        path: archive.to_path_buf(),
        source,
    };

    let file = File::open(archive).map_err(to_error)?;
    let mut reader = tar::Archive::new(GzDecoder::new(file));
    let mut written = Vec::new();

    for entry in reader.entries().map_err(to_error)? {
        let mut entry = entry.map_err(to_error)?;
        let entry_path = entry.path().map_err(to_error)?.into_owned();

        let Some(relative) = strip_path(&entry_path, strip_components).map_err(to_error)? else {
            continue;
        };

        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        entry.unpack(&target).map_err(to_error)?;
        written.push(target);
    }

    Ok(written)
}

fn strip_path(path: &Path, strip_components: usize) -> io::Result<Option<PathBuf>> {
    let mut remaining = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) => remaining.push(part),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("refusing to extract entry {}", path.display()),
                ))
            }
        }
    }

    if remaining.len() <= strip_components {
        return Ok(None);
    }
    Ok(Some(remaining[strip_components..].iter().collect()))
}
