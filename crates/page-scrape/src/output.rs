//! Reading and writing the JSON artifact.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::RunError;
use crate::types::ScrapeOutput;

/// Serialize with two-space indentation.
pub fn to_pretty_json(output: &ScrapeOutput) -> serde_json::Result<String> {
    serde_json::to_string_pretty(output)
}

/// Write `output` to `path`, creating parent directories as needed.
///
/// The JSON is written to a sibling temp file and renamed into place, so the
/// target always holds one complete record.
pub fn write_output(path: &Path, output: &ScrapeOutput) -> Result<(), RunError> {
    let persistence = |source: io::Error| RunError::Persistence {
        path: path.display().to_string(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(persistence)?;
    }

    let json = to_pretty_json(output).map_err(|e| persistence(io::Error::from(e)))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    if let Err(e) = fs::write(tmp, json).and_then(|()| fs::rename(tmp, path)) {
        if let Err(cleanup) = fs::remove_file(tmp) {
            tracing::debug!(path = %tmp.display(), "temp file cleanup: {cleanup}");
        }
        return Err(persistence(e));
    }

    tracing::debug!(path = %path.display(), failure = output.is_failure(), "output written");
    Ok(())
}

/// Load a previously written artifact.
pub fn read_output(path: &Path) -> anyhow::Result<ScrapeOutput> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
