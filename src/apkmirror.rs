/*============================================================
  Project: apkver
  Module: apkver::apkmirror
  ------------------------------------------------------------
  Purpose:
    Fetch the app's release listing and latest release page and
    hand both to the markup extractors.

  Security / Safety Notes:
    Performs two read-only HTTPS GET requests. No credentials
    or cookies are sent.

  Dependencies:
    reqwest for HTTP.

  Operational Scope:
    Exactly one listing request followed by one detail request
    per run. No retries: the first failure ends the run.

  Revision History:
    2026-10-19  Implemented release client.
============================================================*/

use std::time::Duration;

use reqwest::Url;

use crate::config::HttpConfig;
use crate::error::{FetchError, Result};
use crate::logger::Logger;
use crate::markup::{parse_release_link, parse_variants};
use crate::version_info::VersionInfo;

/// Release listing of the tracked app.
pub const LISTING_URL: &str = "https://www.apkmirror.com/apk/grindr-llc/grindr-gay-chat-meet-date/";

/// Client for the listing site.
pub struct ReleaseClient {
    client: reqwest::Client,
    listing_url: Url,
}

impl ReleaseClient {
    /// Construct a client that starts from `listing_url`.
    pub fn new(config: &HttpConfig, listing_url: &str) -> Result<Self> {
        let listing_url = Url::parse(listing_url).map_err(|err| {
            FetchError::Config(format!("Invalid listing URL {listing_url}: {err}"))
        })?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|err| FetchError::Network(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            listing_url,
        })
    }

    /// Resolve the latest release and read its version label and build number.
    pub async fn fetch_latest(&self, logger: &Logger) -> Result<VersionInfo> {
        let listing = self.fetch_page(&self.listing_url, logger).await?;
        let release_url = parse_release_link(&listing, &self.listing_url)?;
        logger.info("RELEASE", format!("Latest release page {release_url}"));

        let detail = self.fetch_page(&release_url, logger).await?;
        let info = parse_variants(&detail)?;
        logger.info(
            "EXTRACT",
            format!("version={} build={}", info.version_name, info.version_code),
        );
        Ok(info)
    }

    async fn fetch_page(&self, url: &Url, logger: &Logger) -> Result<String> {
        logger.debug("FETCH", format!("GET {url}"));
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| FetchError::Network(format!("Request to {url} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Network(format!(
                "Request to {url} returned status {status}"
            )));
        }
        if response.url() != url {
            logger.warn("REDIRECT", format!("{url} redirected to {}", response.url()));
        }

        let body = response.text().await.map_err(|err| {
            FetchError::Network(format!("Failed to read response from {url}: {err}"))
        })?;
        logger.debug("FETCH", format!("{} bytes from {url}", body.len()));
        Ok(body)
    }
}
