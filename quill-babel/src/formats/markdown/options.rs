use crate::error::FormatError;
use std::collections::HashMap;

/// Default element nesting the serializer follows before dropping a subtree.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for the Markdown serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Deepest element nesting that is serialized; deeper subtrees are dropped
    pub max_depth: usize,

    /// Whether footnote definitions and references are recognized at all
    pub footnotes: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            footnotes: true,
        }
    }
}

impl MarkdownOptions {
    /// Build options from `--extra-*` style parameters.
    ///
    /// Recognized keys are `max-depth` and `footnotes`. Unknown keys are rejected so
    /// that a typo on the command line does not silently fall back to defaults.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut options = Self::default();
        for key in params.keys() {
            match key.as_str() {
                "max-depth" | "footnotes" => {}
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Unknown markdown parameter '{other}'"
                    )))
                }
            }
        }

        if let Some(value) = params.get("max-depth") {
            options.max_depth = value
                .trim()
                .parse()
                .map_err(|_| invalid("max-depth", value))?;
        }
        options.footnotes = parse_bool_flag(params, "footnotes", options.footnotes)?;

        Ok(options)
    }
}

fn parse_bool_flag(
    params: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    if let Some(value) = params.get(key) {
        if value.is_empty() {
            return Ok(true);
        }
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            _ => Err(invalid(key, value)),
        }
    } else {
        Ok(default)
    }
}

fn invalid(name: &str, value: &str) -> FormatError {
    FormatError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}
