//! Fetching generated images from the image service.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::constants::{
    IMAGE_ENHANCE, IMAGE_HEIGHT, IMAGE_MODEL, IMAGE_WIDTH, MAX_RESPONSE_BYTES, REQUEST_TIMEOUT,
    RESPONSE_SNIPPET_CHARS,
};
use crate::error::DreamError;
use crate::progress::{Stage, report};

/// Something that turns a prompt into encoded image bytes.
pub trait ImageSource {
    /// Generate an image for the prompt, one attempt, no retries.
    fn fetch(&self, prompt: &str) -> Result<Vec<u8>, DreamError>;
}

/// Builds the request URL, the prompt becomes a single path segment.
///
/// Every reserved character in the prompt is percent-encoded, `/` included
/// (as `%2F`), so a slash in the dream text can't add path segments.
pub fn build_url(base_url: &str, prompt: &str) -> Result<Url, DreamError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| DreamError::Generation(format!("Invalid base URL {base_url}: {err}")))?;
    url.path_segments_mut()
        .map_err(|_| DreamError::Generation(format!("Base URL can't take a path: {base_url}")))?
        .pop_if_empty()
        .push(prompt);
    url.query_pairs_mut()
        .append_pair("width", &IMAGE_WIDTH.to_string())
        .append_pair("height", &IMAGE_HEIGHT.to_string())
        .append_pair("model", IMAGE_MODEL)
        .append_pair("enhance", &IMAGE_ENHANCE.to_string());
    Ok(url)
}

/// Cuts an error body down to something fit for a log line.
pub(crate) fn response_snippet(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .take(RESPONSE_SNIPPET_CHARS)
        .collect()
}

/// Client for the free Pollinations image service, no API key needed.
#[derive(Clone)]
pub struct PollinationsClient {
    agent: ureq::Agent,
    base_url: String,
}

impl PollinationsClient {
    /// Creates a client for the given endpoint, eg [crate::constants::DEFAULT_BASE_URL]
    pub fn new(base_url: &str) -> Result<Self, DreamError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    #[doc(hidden)]
    /// Same as [PollinationsClient::new] with a custom request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, DreamError> {
        // fail early on a bad endpoint
        build_url(base_url, "")?;

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Ok(Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.to_string(),
        })
    }
}

impl ImageSource for PollinationsClient {
    fn fetch(&self, prompt: &str) -> Result<Vec<u8>, DreamError> {
        let url = build_url(&self.base_url, prompt)?;
        debug!("GET {url}");

        report(Stage::Processing, "Generating image...");
        let mut response = self.agent.get(url.as_str()).call()?;
        let status = response.status();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .read_to_vec()?;
        debug!("Image service returned {status}, {} bytes", bytes.len());

        if status.as_u16() != 200 {
            return Err(DreamError::Api {
                status: status.as_u16(),
                body: response_snippet(&bytes),
            });
        }
        report(Stage::Downloading, "Image generated successfully");
        Ok(bytes)
    }
}
