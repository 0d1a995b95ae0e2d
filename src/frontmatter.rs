// ABOUTME: YAML frontmatter extraction for slide documents
// ABOUTME: Splits the leading `---` block off and turns it into the base page configuration

use crate::errors::Result;
use crate::option::{PageOption, StyleValue};
use log::{debug, warn};
use serde_yaml::Value;

/// Delimiter line opening and closing the frontmatter block.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Parses the YAML frontmatter of a document.
///
/// Returns the remaining body (trimmed) and the base configuration. A missing
/// or unparseable block is not an error: the whole trimmed document is
/// returned as body with the default configuration. A recognised field with
/// a value that cannot be coerced is a format error.
pub fn parse_frontmatter(document: &str) -> Result<(String, PageOption)> {
    let document = document.trim();
    let Some((yaml, body)) = split_frontmatter(document) else {
        return Ok((document.to_string(), PageOption::default()));
    };

    let Some(pairs) = frontmatter_pairs(&yaml) else {
        return Ok((document.to_string(), PageOption::default()));
    };
    debug!("Frontmatter provided {} keys", pairs.len());

    let option = PageOption::default().with_overrides(pairs)?;
    Ok((body, option))
}

/// Reads only the base configuration of a document.
pub fn read_options(document: &str) -> Result<PageOption> {
    parse_frontmatter(document).map(|(_, option)| option)
}

/// Splits `document` into the raw YAML block and the trimmed body after it.
fn split_frontmatter(document: &str) -> Option<(String, String)> {
    let lines: Vec<&str> = document.lines().collect();
    if lines.first().map(|l| l.trim()) != Some(FRONTMATTER_DELIMITER) {
        return None;
    }
    let close = lines
        .iter()
        .skip(1)
        .position(|l| l.trim() == FRONTMATTER_DELIMITER)?
        + 1;
    let yaml = lines[1..close].join("\n");
    let body = lines[close + 1..].join("\n").trim().to_string();
    Some((yaml, body))
}

/// Converts a YAML block into ordered key/value pairs, or `None` when the
/// block is not a key/value mapping.
fn frontmatter_pairs(yaml: &str) -> Option<Vec<(String, StyleValue)>> {
    if yaml.trim().is_empty() {
        return Some(Vec::new());
    }
    let value: Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring unparseable frontmatter: {}", e);
            return None;
        }
    };

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Some(Vec::new()),
        _ => {
            warn!("Ignoring frontmatter that is not a key/value mapping");
            return None;
        }
    };

    let mut pairs = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            warn!("Skipping frontmatter entry with a non-scalar key");
            continue;
        };
        match yaml_to_style_value(value) {
            Some(value) => pairs.push((key, value)),
            None => warn!("Skipping frontmatter key '{}': value is not a scalar", key),
        }
    }
    Some(pairs)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn yaml_to_style_value(value: Value) -> Option<StyleValue> {
    match value {
        Value::Bool(b) => Some(StyleValue::Bool(b)),
        Value::Number(n) => n
            .as_i64()
            .map(StyleValue::Int)
            .or_else(|| n.as_f64().map(StyleValue::Float)),
        Value::String(s) => Some(StyleValue::Str(s)),
        Value::Tagged(tagged) => yaml_to_style_value(tagged.value),
        _ => None,
    }
}
