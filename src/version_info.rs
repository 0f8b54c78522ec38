/*============================================================
  Project: apkver
  Module: apkver::version_info
  ------------------------------------------------------------
  Purpose:
    Data contract for the release metadata extracted from the
    listing site and written to the output file.

  Security / Safety Notes:
    Pure data container; no I/O performed in this module.

  Dependencies:
    serde for JSON serialization.

  Revision History:
    2026-10-19  Introduced VersionInfo type.
============================================================*/

use serde::Serialize;

/// Version label and build number of the latest published release.
///
/// Field order is the key order of the written JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInfo {
    pub version_name: String,
    pub version_code: u64,
}

impl VersionInfo {
    pub fn new(version_name: impl Into<String>, version_code: u64) -> Self {
        Self {
            version_name: version_name.into(),
            version_code,
        }
    }
}
