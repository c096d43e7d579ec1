//! Display-name templates such as `lr={lr}_arch={arch}`

use super::LaunchError;
use crate::collection::Row;
use crate::utils::{join_list, render_value};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// `.3f`: fixed number of decimals for numeric columns.
static PRECISION_SPEC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.(\d+)f$").unwrap());

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field { column: String, precision: Option<usize> },
}

/// A parsed format string with named `{column}` placeholders.
///
/// `{{` and `}}` produce literal braces. `{column:.Nf}` renders a number with
/// `N` decimals; no other format spec is accepted. Lists are joined with `.`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl NameTemplate {
    pub fn parse(template: &str) -> Result<Self, LaunchError> {
        let invalid = |reason: &str| LaunchError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(invalid("single '}' encountered")),
                '{' => {
                    let mut body = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(invalid("unexpected '{' in field name")),
                            Some(ch) => body.push(ch),
                            None => return Err(invalid("expected '}' before end of string")),
                        }
                    }

                    let (column, spec) = match body.split_once(':') {
                        Some((column, spec)) => (column, Some(spec)),
                        None => (body.as_str(), None),
                    };
                    if column.is_empty() {
                        return Err(invalid("positional placeholders are not supported"));
                    }
                    let precision = match spec {
                        None => None,
                        Some(spec) => {
                            let caps = PRECISION_SPEC.captures(spec).ok_or_else(|| {
                                invalid(&format!("unsupported format spec '{spec}'"))
                            })?;
                            Some(caps[1].parse().map_err(|_| invalid("precision out of range"))?)
                        }
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field { column: column.to_string(), precision });
                }
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source: template.to_string(), segments })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Columns referenced by the template, in order of appearance.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { column, .. } => Some(column.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fill the template from `row`. Columns missing from the row render as null.
    pub fn render(&self, row: &Row) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { column, precision } => {
                    let value = row.get(column).unwrap_or(&Value::Null);
                    out.push_str(&render_field(value, *precision));
                }
            }
        }
        out
    }
}

fn render_field(value: &Value, precision: Option<usize>) -> String {
    match (value, precision) {
        (Value::Array(items), _) => join_list(items),
        (Value::Number(n), Some(precision)) => match n.as_f64() {
            Some(f) => format!("{:.*}", precision, f),
            None => n.to_string(),
        },
        (other, _) => render_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        serde_json::from_value(value).expect("row")
    }

    #[test]
    fn test_renders_named_placeholders() {
        let template = NameTemplate::parse("{arch}_lr={lr}").expect("parse");
        let rendered = template.render(&row(json!({"arch": "resnet18", "lr": 0.1})));
        assert_eq!(rendered, "resnet18_lr=0.1");
        assert_eq!(template.columns().collect::<Vec<_>>(), vec!["arch", "lr"]);
    }

    #[test]
    fn test_lists_are_joined_with_dots() {
        let template = NameTemplate::parse("steps={milestones}").expect("parse");
        assert_eq!(template.render(&row(json!({"milestones": [30, 60, 90]}))), "steps=30.60.90");
    }

    #[test]
    fn test_escaped_braces_and_precision() {
        let template = NameTemplate::parse("{{eps}}={eps:.3f} wd={wd:.2f}").expect("parse");
        let rendered = template.render(&row(json!({"eps": 0.12345, "wd": 1})));
        assert_eq!(rendered, "{eps}=0.123 wd=1.00");
    }

    #[test]
    fn test_missing_value_renders_null() {
        let template = NameTemplate::parse("{seed}").expect("parse");
        assert_eq!(template.render(&row(json!({}))), "null");
    }

    #[test]
    fn test_rejects_malformed_templates() {
        for bad in ["{", "}", "{arch", "{}", "{a{b}}", "{lr:>10}", "{lr:.3}"] {
            assert!(
                matches!(NameTemplate::parse(bad), Err(LaunchError::InvalidTemplate { .. })),
                "template {bad:?}"
            );
        }
    }
}
