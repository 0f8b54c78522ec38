/*============================================================
  Project: apkver
  Module: apkver::output
  ------------------------------------------------------------
  Purpose:
    Persist the extracted release as `version.json` for build
    pipelines polling for updates.

  Security / Safety Notes:
    Writes only to the operator-chosen path, replacing any
    previous contents.

  Dependencies:
    serde_json for pretty (two-space) JSON.

  Revision History:
    2026-10-19  Authored version file writer.
============================================================*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{FetchError, Result};
use crate::version_info::VersionInfo;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "version.json";

/// Serialize `info` to `path`, truncating any existing file.
pub fn write_version_file(info: &VersionInfo, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            FetchError::Filesystem(format!(
                "Failed to create output directory {}: {err}",
                parent.display()
            ))
        })?;
    }
    let file = File::create(path).map_err(|err| {
        FetchError::Filesystem(format!(
            "Failed to create version file {}: {err}",
            path.display()
        ))
    })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, info).map_err(|err| {
        FetchError::Serialization(format!(
            "Failed to encode version file {}: {err}",
            path.display()
        ))
    })?;
    writer.flush().map_err(|err| {
        FetchError::Filesystem(format!(
            "Failed to write version file {}: {err}",
            path.display()
        ))
    })
}
