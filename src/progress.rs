//! Stage lines on stderr, front ends parse these to drive a progress bar.

use std::fmt::Display;

/// Where a run currently is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Reading the parameter file
    Loading,
    /// Parameter file parsed
    Loaded,
    /// About to start generating
    Starting,
    /// Building the prompt
    Generating,
    /// The prompt that's going to be sent
    Prompt,
    /// Waiting on the image service
    Processing,
    /// Image service answered, reading the image
    Downloading,
    /// Image decoded
    Generated,
    /// Image written to disk
    Saved,
}

impl Stage {
    /// The line prefix for this stage.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Loaded => "LOADED",
            Self::Starting => "STARTING",
            Self::Generating => "GENERATING",
            Self::Prompt => "PROMPT",
            Self::Processing => "PROCESSING",
            Self::Downloading => "DOWNLOADING",
            Self::Generated => "GENERATED",
            Self::Saved => "SAVED",
        }
    }
}

/// Formats a stage line.
pub fn stage_line(stage: Stage, message: impl Display) -> String {
    format!("{}: {}", stage.marker(), message)
}

/// Writes a stage line to stderr.
pub fn report(stage: Stage, message: impl Display) {
    eprintln!("{}", stage_line(stage, message));
}
