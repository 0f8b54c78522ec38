/*============================================================
  Project: apkver
  Module: apkver::markup
  ------------------------------------------------------------
  Purpose:
    Extract the latest release link from the listing page and
    the version label and build number from a release page.

  Security / Safety Notes:
    Operates on in-memory HTML only; performs no I/O.

  Dependencies:
    scraper for HTML parsing and CSS selectors, reqwest::Url
    for link resolution.

  Operational Scope:
    Called by the release client between the two page fetches.
    Coupled to the listing site's current markup.

  Revision History:
    2026-10-19  Implemented listing and variants extraction.
============================================================*/

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::{FetchError, Result};
use crate::version_info::VersionInfo;

const RELEASE_LINK: &str = ".appRowTitle > a";
const VARIANTS_TABLE: &str = ".variants-table";
const TABLE_ROW: &str = ".table-row";
const TABLE_CELL: &str = ".table-cell";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|err| FetchError::Runtime(format!("Invalid selector `{css}`: {err:?}")))
}

/// Resolve the first release link on the listing page to an absolute URL.
///
/// Links are resolved against the scheme and host of `listing_url`.
pub fn parse_release_link(html: &str, listing_url: &Url) -> Result<Url> {
    let document = Html::parse_document(html);
    let link = document
        .select(&selector(RELEASE_LINK)?)
        .next()
        .ok_or(FetchError::NotFound("latest version link"))?;
    let href = link
        .value()
        .attr("href")
        .ok_or(FetchError::NotFound("href on latest version link"))?;

    let mut origin = listing_url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin.join(href.trim()).map_err(|err| {
        FetchError::Extraction(format!("Invalid release link `{href}`: {err}"))
    })
}

/// Read the version label and build number from a release detail page.
///
/// The last row of the first variants table is taken as the primary
/// variant; its first cell holds the release text.
pub fn parse_variants(html: &str) -> Result<VersionInfo> {
    let document = Html::parse_document(html);
    let table = document
        .select(&selector(VARIANTS_TABLE)?)
        .next()
        .ok_or(FetchError::NotFound("variants table"))?;
    let row = table
        .select(&selector(TABLE_ROW)?)
        .last()
        .ok_or(FetchError::NotFound("table rows"))?;
    let cell = row
        .select(&selector(TABLE_CELL)?)
        .next()
        .ok_or(FetchError::NotFound("table cells"))?;

    parse_cell_text(&element_text(cell))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Split cell text into trimmed, non-empty lines and pick out the
/// version label (first line) and build number (first all-digit line).
pub fn parse_cell_text(text: &str) -> Result<VersionInfo> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let version_name = lines
        .first()
        .ok_or_else(|| FetchError::Extraction("Could not parse app data".into()))?;

    let digits = lines
        .iter()
        .find(|line| line.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| FetchError::Extraction("Could not find build number".into()))?;
    let version_code = digits.parse::<u64>().map_err(|err| {
        FetchError::Extraction(format!("Build number `{digits}` is out of range: {err}"))
    })?;

    Ok(VersionInfo::new(*version_name, version_code))
}
