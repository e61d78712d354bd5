//! Shared constants for prompt building and image generation
//!

use std::time::Duration;

/// The public image generation endpoint, the prompt is appended as a path segment
pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai/prompt";

/// Where images land when `--output-dir` isn't given
pub const DEFAULT_OUTPUT_DIR: &str = "generated_images";

/// Requested image width in pixels.
pub const IMAGE_WIDTH: u32 = 512;

/// Requested image height in pixels.
pub const IMAGE_HEIGHT: u32 = 512;

/// Model identifier sent to the image service.
pub const IMAGE_MODEL: &str = "flux";

/// Ask the service to enhance the prompt server-side.
pub const IMAGE_ENHANCE: bool = true;

/// Upper bound for the whole request, connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest response body we'll read, in bytes.
pub const MAX_RESPONSE_BYTES: u64 = 32 * 1024 * 1024;

/// How much of an error response body ends up in the error message.
pub const RESPONSE_SNIPPET_CHARS: usize = 200;

/// Only this many characters of the dream text make it into the prompt.
pub const MAX_DREAM_TEXT_CHARS: usize = 100;

/// Prompts longer than this get cut down and suffixed with [PROMPT_ELLIPSIS].
pub const MAX_PROMPT_CHARS: usize = 500;

/// Suffix for truncated prompts
pub const PROMPT_ELLIPSIS: &str = "...";

/// At most this many symbols are appended to the prompt.
pub const MAX_SYMBOLS: usize = 2;

/// Style keywords every prompt carries.
pub const STYLE_KEYWORDS: [&str; 6] = [
    "digital art",
    "ethereal",
    "mystical",
    "vibrant colors",
    "dreamlike",
    "high quality",
];

/// Saved images are named `{IMAGE_FILENAME_PREFIX}{timestamp}_{id}.png`
pub const IMAGE_FILENAME_PREFIX: &str = "dream_free_";
