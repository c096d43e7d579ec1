//! `--filter-param` matching against metadata values

use super::LaunchError;
use crate::collection::Row;
use crate::utils::render_value;
use regex::Regex;
use serde_json::Value;

/// Requires a metadata column to match a regex.
///
/// Matching is anchored at the start of the rendered value but not at the end,
/// so `^a$` and `a$` both demand an exact `a`, while `res` accepts `resnet50`.
#[derive(Debug, Clone)]
pub struct ParamFilter {
    param: String,
    pattern: String,
    regex: Regex,
}

impl ParamFilter {
    pub fn new(param: impl Into<String>, pattern: impl Into<String>) -> Result<Self, LaunchError> {
        let param = param.into();
        let pattern = pattern.into();
        let invalid = |source| LaunchError::InvalidRegex { param: param.clone(), source };
        // Checked on its own first so a stray ')' cannot escape the anchoring group.
        Regex::new(&pattern).map_err(invalid)?;
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(invalid)?;
        Ok(Self { param, pattern, regex })
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `row` passes. Rows without a value for the parameter never do.
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.param) {
            None | Some(Value::Null) => false,
            Some(value) => self.regex.is_match(&render_value(value)),
        }
    }
}
