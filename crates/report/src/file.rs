use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::ReportError;

/// Write `comments` one per line (UTF-8), truncating any existing file.
///
/// Parent directories are created as needed.
pub fn write_comments(path: &Path, comments: &[String]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    for comment in comments {
        writer.write_all(comment.as_bytes()).map_err(io_err)?;
        writer.write_all(b"\n").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!(path = %path.display(), count = comments.len(), "stored filtered comments");
    Ok(())
}
