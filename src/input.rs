//! Resolving the dream to visualize, from flags or a parameter file.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use tracing::{debug, warn};

use crate::cli::CliOptions;
use crate::error::DreamError;
use crate::progress::{Stage, report};

/// Emotion weights, in the order they were given.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Emotions(Vec<(String, f64)>);

impl Emotions {
    /// Iterate over `(name, weight)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    /// True when there are no emotions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Emotions {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, weight)| (name.into(), weight))
                .collect(),
        )
    }
}

struct EmotionsVisitor;

impl<'de> Visitor<'de> for EmotionsVisitor {
    type Value = Emotions;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping emotion names to numeric weights")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, weight)) = map.next_entry::<String, f64>()? {
            // a repeated key overrides the earlier weight but keeps its position
            if let Some(entry) = entries
                .iter_mut()
                .find(|entry: &&mut (String, f64)| entry.0 == name)
            {
                entry.1 = weight;
            } else {
                entries.push((name, weight));
            }
        }
        Ok(Emotions(entries))
    }
}

impl<'de> Deserialize<'de> for Emotions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(EmotionsVisitor)
    }
}

/// Layout of the `--param-file` JSON, every key is optional.
#[derive(Debug, Default)]
struct ParamFile {
    dream_text: Option<String>,
    emotions: Option<Emotions>,
    symbols: Option<Vec<String>>,
}

struct ParamFileVisitor;

impl<'de> Visitor<'de> for ParamFileVisitor {
    type Value = ParamFile;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with dream_text, emotions and symbols keys")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut params = ParamFile::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "dream_text" => params.dream_text = map.next_value()?,
                "emotions" => params.emotions = map.next_value()?,
                "symbols" => params.symbols = map.next_value()?,
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(params)
    }
}

// map only, so a positional array can't fill the fields by index
impl<'de> Deserialize<'de> for ParamFile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ParamFileVisitor)
    }
}

/// One dream to visualize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DreamInput {
    /// Free-form description of the dream
    pub text: String,
    /// Emotion weights, used to pick a dominant style
    pub emotions: Emotions,
    /// Dream motifs, the first few end up in the prompt
    pub symbols: Vec<String>,
}

impl DreamInput {
    /// Resolve the input from the CLI, preferring the parameter file, then validate it.
    pub fn from_cli(cli: &CliOptions) -> Result<Self, DreamError> {
        let input = match cli.param_file.as_deref() {
            Some(path) => {
                if cli.dream_text.is_some() || cli.emotions.is_some() || cli.symbols.is_some() {
                    warn!("--param-file given, ignoring --dream-text/--emotions/--symbols");
                }
                Self::from_param_file(path)?
            }
            None => Self::from_flags(
                cli.dream_text.as_deref(),
                cli.emotions.as_deref(),
                cli.symbols.as_deref(),
            )?,
        };
        input.validate()?;
        Ok(input)
    }

    /// Load the input from a JSON parameter file.
    pub fn from_param_file(path: &Path) -> Result<Self, DreamError> {
        report(
            Stage::Loading,
            format!("Reading parameters from {}", path.display()),
        );
        let raw = fs::read_to_string(path)
            .map_err(|err| DreamError::ParamFile(format!("{}: {err}", path.display())))?;
        let params: ParamFile = serde_json::from_str(&raw)
            .map_err(|err| DreamError::ParamFile(format!("{}: {err}", path.display())))?;

        let input = Self {
            text: params.dream_text.unwrap_or_default(),
            emotions: params.emotions.unwrap_or_default(),
            symbols: params.symbols.unwrap_or_default(),
        };
        report(
            Stage::Loaded,
            format!("Dream text length: {}", input.text.chars().count()),
        );
        Ok(input)
    }

    /// Build the input from individual flags, emotions and symbols are JSON strings.
    pub fn from_flags(
        text: Option<&str>,
        emotions: Option<&str>,
        symbols: Option<&str>,
    ) -> Result<Self, DreamError> {
        let Some(text) = text.filter(|text| !text.is_empty()) else {
            return Err(DreamError::Input(
                "Either --dream-text or --param-file is required".to_string(),
            ));
        };

        // empty strings and JSON null both mean "not given"
        let emotions = match emotions.filter(|raw| !raw.is_empty()) {
            Some(raw) => serde_json::from_str::<Option<Emotions>>(raw)?.unwrap_or_default(),
            None => Emotions::default(),
        };
        let symbols = match symbols.filter(|raw| !raw.is_empty()) {
            Some(raw) => serde_json::from_str::<Option<Vec<String>>>(raw)?.unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(Self {
            text: text.to_string(),
            emotions,
            symbols,
        })
    }

    /// Checks there's actually something to draw.
    pub fn validate(&self) -> Result<(), DreamError> {
        if self.text.trim().is_empty() {
            return Err(DreamError::Input("Dream text is empty".to_string()));
        }
        debug!(
            "Dream input: {} chars, {} emotions, {} symbols",
            self.text.chars().count(),
            self.emotions.0.len(),
            self.symbols.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_params(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write params");
        file
    }

    #[test]
    fn flags_keep_emotion_order() {
        let input = DreamInput::from_flags(
            Some("a dream"),
            Some(r#"{"peace": 0.5, "fear": 0.5, "joy": 0.2}"#),
            Some(r#"["moon", "door"]"#),
        )
        .expect("parse flags");
        let names = input
            .emotions
            .iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["peace", "fear", "joy"]);
        assert_eq!(input.symbols, vec!["moon", "door"]);
    }

    #[test]
    fn flags_require_text() {
        let err = DreamInput::from_flags(None, None, None).unwrap_err();
        assert_eq!(err.marker(), "ERROR_INPUT");
    }

    #[test]
    fn malformed_flag_json() {
        let err = DreamInput::from_flags(Some("x"), Some("{joy: 1"), None).unwrap_err();
        assert_eq!(err.marker(), "ERROR_JSON");

        let err = DreamInput::from_flags(Some("x"), None, Some(r#"{"a": 1}"#)).unwrap_err();
        assert_eq!(err.marker(), "ERROR_JSON");

        let err = DreamInput::from_flags(Some("x"), Some(r#"{"joy": "lots"}"#), None).unwrap_err();
        assert_eq!(err.marker(), "ERROR_JSON");
    }

    #[test]
    fn empty_flag_json_is_absent() {
        let input = DreamInput::from_flags(Some("x"), Some(""), Some("")).expect("parse flags");
        assert!(input.emotions.is_empty());
        assert!(input.symbols.is_empty());
    }

    #[test]
    fn null_flag_json_is_absent() {
        let input =
            DreamInput::from_flags(Some("x"), Some("null"), Some("null")).expect("parse flags");
        assert!(input.emotions.is_empty());
        assert!(input.symbols.is_empty());

        let input = DreamInput::from_flags(Some("x"), Some(" null "), Some(r#"["a"]"#))
            .expect("parse flags");
        assert!(input.emotions.is_empty());
        assert_eq!(input.symbols, vec!["a"]);
    }

    #[test]
    fn duplicate_emotion_keeps_first_position() {
        let emotions: Emotions =
            serde_json::from_str(r#"{"joy": 0.1, "fear": 0.2, "joy": 0.9}"#).expect("parse");
        assert_eq!(
            emotions.iter().collect::<Vec<_>>(),
            vec![("joy", 0.9), ("fear", 0.2)]
        );
    }

    #[test]
    fn param_file_roundtrip() {
        let file = write_params(
            r#"{"dream_text": "I was underwater", "emotions": {"peace": 1}, "symbols": ["fish"]}"#,
        );
        let input = DreamInput::from_param_file(file.path()).expect("load params");
        assert_eq!(input.text, "I was underwater");
        assert_eq!(input.emotions.iter().collect::<Vec<_>>(), vec![("peace", 1.0)]);
        assert_eq!(input.symbols, vec!["fish"]);
    }

    #[test]
    fn param_file_keeps_emotion_order() {
        let file = write_params(
            r#"{"symbols": ["owl"], "emotions": {"peace": 0.5, "fear": 0.5}, "dream_text": "x", "mood": 3}"#,
        );
        let input = DreamInput::from_param_file(file.path()).expect("load params");
        let names = input
            .emotions
            .iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["peace", "fear"]);
        assert_eq!(input.symbols, vec!["owl"]);
    }

    #[test]
    fn param_file_missing_keys_default() {
        let file = write_params(r#"{"dream_text": "just text", "emotions": null}"#);
        let input = DreamInput::from_param_file(file.path()).expect("load params");
        assert_eq!(input.text, "just text");
        assert!(input.emotions.is_empty());
        assert!(input.symbols.is_empty());

        let file = write_params("{}");
        let input = DreamInput::from_param_file(file.path()).expect("load params");
        assert_eq!(input.validate().unwrap_err().marker(), "ERROR_INPUT");
    }

    #[test]
    fn param_file_invalid() {
        let file = write_params("{ not json");
        let err = DreamInput::from_param_file(file.path()).unwrap_err();
        assert_eq!(err.marker(), "ERROR_PARAM_FILE");

        let file = write_params(r#"["a list"]"#);
        let err = DreamInput::from_param_file(file.path()).unwrap_err();
        assert_eq!(err.marker(), "ERROR_PARAM_FILE");

        let file = write_params(r#"["a dream", {"joy": 1}, ["sym"]]"#);
        let err = DreamInput::from_param_file(file.path()).unwrap_err();
        assert_eq!(err.marker(), "ERROR_PARAM_FILE");

        let file = write_params(r#""just a string""#);
        let err = DreamInput::from_param_file(file.path()).unwrap_err();
        assert_eq!(err.marker(), "ERROR_PARAM_FILE");

        let file = write_params(r#"{"dream_text": "x", "symbols": "not a list"}"#);
        let err = DreamInput::from_param_file(file.path()).unwrap_err();
        assert_eq!(err.marker(), "ERROR_PARAM_FILE");

        let err = DreamInput::from_param_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.marker(), "ERROR_PARAM_FILE");
    }

    #[test]
    fn whitespace_text_is_rejected() {
        let input = DreamInput::from_flags(Some("   \n\t"), None, None).expect("parse flags");
        let err = input.validate().unwrap_err();
        assert_eq!(err.marker(), "ERROR_INPUT");
    }

    #[test]
    fn param_file_wins_over_flags() {
        let file = write_params(r#"{"dream_text": "from the file"}"#);
        let cli = CliOptions {
            debug: false,
            dream_text: Some("from the flag".to_string()),
            emotions: None,
            symbols: None,
            param_file: Some(file.path().to_path_buf()),
            output_dir: "out".into(),
            base_url: crate::constants::DEFAULT_BASE_URL.to_string(),
        };
        let input = DreamInput::from_cli(&cli).expect("resolve input");
        assert_eq!(input.text, "from the file");
    }
}
