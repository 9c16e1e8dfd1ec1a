//! Version comparison against a remote endpoint.

use tokio::task::JoinHandle;
use url::Url;

use crate::defaults::SPIGOT_VERSION_ENDPOINT;

use super::{HttpClient, HttpRequest, UpdateError};

/// Outcome of a successful update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// The running version matches the published one.
    UpToDate,
    /// A different version is published.
    Available {
        /// The published version
        latest: String,
        /// Where to download it
        download_url: String,
    },
}

impl UpdateStatus {
    /// Compares `current` with `latest`, ignoring case.
    ///
    /// Any difference counts as an update; versions are not ordered.
    #[must_use]
    pub fn compare(current: &str, latest: &str, download_url: &str) -> Self {
        if current.to_lowercase() == latest.to_lowercase() {
            Self::UpToDate
        } else {
            Self::Available {
                latest: latest.to_owned(),
                download_url: download_url.to_owned(),
            }
        }
    }

    /// Returns `true` if a different version is published.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Checks a plain-text version endpoint for a newer release.
///
/// The endpoint answers with the published version; only the first
/// whitespace-delimited token of the body is used.
#[derive(Debug, Clone)]
pub struct UpdateChecker<C> {
    client: C,
    version_url: Url,
    download_url: String,
    current_version: String,
}

impl<C: HttpClient> UpdateChecker<C> {
    /// Creates a checker querying `version_url`.
    ///
    /// `download_url` is reported to the user when an update is found.
    #[must_use]
    pub fn new(
        client: C,
        version_url: Url,
        download_url: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            client,
            version_url,
            download_url: download_url.into(),
            current_version: current_version.into(),
        }
    }

    /// Creates a checker for a resource listed on SpigotMC.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::Endpoint`] if the endpoint URL cannot be built.
    pub fn spigot(
        client: C,
        resource_id: u32,
        download_url: impl Into<String>,
        current_version: impl Into<String>,
    ) -> Result<Self, UpdateError> {
        let version_url = Url::parse_with_params(
            SPIGOT_VERSION_ENDPOINT,
            [("resource", resource_id.to_string())],
        )?;
        Ok(Self::new(client, version_url, download_url, current_version))
    }

    /// Returns the URL the published version is fetched from.
    #[must_use]
    pub const fn version_url(&self) -> &Url {
        &self.version_url
    }

    /// Returns the version the caller is running.
    #[must_use]
    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Fetches the published version.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::Http`] if the request fails,
    /// [`UpdateError::Status`] for a non-2xx answer and
    /// [`UpdateError::EmptyBody`] if the body holds no version.
    pub async fn fetch_latest(&self) -> Result<String, UpdateError> {
        let response = self
            .client
            .request(HttpRequest::get(self.version_url.clone()))
            .await?;
        if !response.is_success() {
            return Err(UpdateError::Status(response.status));
        }
        response
            .body_text()
            .split_whitespace()
            .next()
            .map(str::to_owned)
            .ok_or(UpdateError::EmptyBody)
    }

    /// Checks for an update and logs the outcome.
    ///
    /// Returns `None` when the published version could not be determined;
    /// the reason is logged.
    pub async fn check(&self) -> Option<UpdateStatus> {
        tracing::info!("Checking for updates...");
        let latest = match self.fetch_latest().await {
            Ok(latest) => latest,
            Err(e) => {
                tracing::warn!("Unable to check for updates: {e}");
                return None;
            }
        };

        let status = UpdateStatus::compare(&self.current_version, &latest, &self.download_url);
        match &status {
            UpdateStatus::UpToDate => {
                tracing::info!("You are already running the latest version.");
            }
            UpdateStatus::Available {
                latest,
                download_url,
            } => {
                tracing::info!(
                    "There is an update available ({latest})! Download it at {download_url}"
                );
            }
        }
        Some(status)
    }
}

impl<C: HttpClient + 'static> UpdateChecker<C> {
    /// Runs [`check`](Self::check) as a background task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> JoinHandle<Option<UpdateStatus>> {
        tokio::spawn(async move { self.check().await })
    }
}
