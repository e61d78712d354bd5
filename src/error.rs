//! Error handling

use std::io::ErrorKind;

/// Everything that can end a dreamviz run.
#[derive(Debug)]
pub enum DreamError {
    /// Missing or empty dream text
    Input(String),
    /// `--emotions` or `--symbols` wasn't valid JSON of the right shape
    Json(serde_json::Error),
    /// The parameter file couldn't be read or parsed
    ParamFile(String),
    /// The image service didn't answer within the request timeout
    Timeout,
    /// The image service answered with something other than 200
    Api {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },
    /// The response body wasn't an image we can decode
    Image(String),
    /// Any other failure while talking to the image service
    Generation(String),
    /// Writing the image to disk failed
    Save(String),
}

impl DreamError {
    /// The category marker callers grep for on stderr.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Input(_) => "ERROR_INPUT",
            Self::Json(_) => "ERROR_JSON",
            Self::ParamFile(_) => "ERROR_PARAM_FILE",
            Self::Timeout => "ERROR_TIMEOUT",
            Self::Api { .. } => "ERROR_API",
            Self::Image(_) => "ERROR_IMAGE",
            Self::Generation(_) => "ERROR_GENERATION",
            Self::Save(_) => "ERROR_SAVE",
        }
    }
}

impl std::fmt::Display for DreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(message) => write!(f, "{message}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::ParamFile(message) => write!(f, "{message}"),
            Self::Timeout => write!(f, "Request timed out (try again)"),
            Self::Api { status, body } => {
                write!(f, "Failed to generate image: HTTP {status}; response: {body}")
            }
            Self::Image(message) => write!(f, "Could not process image: {message}"),
            Self::Generation(message) => write!(f, "{message}"),
            Self::Save(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for DreamError {}

impl From<serde_json::Error> for DreamError {
    fn from(err: serde_json::Error) -> Self {
        DreamError::Json(err)
    }
}

impl From<ureq::Error> for DreamError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Timeout(_) => DreamError::Timeout,
            ureq::Error::Io(io_err) if io_err.kind() == ErrorKind::TimedOut => DreamError::Timeout,
            other => DreamError::Generation(other.to_string()),
        }
    }
}

impl From<image::ImageError> for DreamError {
    fn from(err: image::ImageError) -> Self {
        DreamError::Image(err.to_string())
    }
}
