//! Content classification for exposed responses.
//!
//! Each rule is gated on a path suffix and runs a single first-match search
//! against the response body. Rules are independent: a path whose name
//! matched several suffixes would collect several annotations.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BRANCH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ref: refs/heads/([\w-]+)").expect("invalid branch pattern"));

static CONFIG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[core\]").expect("invalid config pattern"));

static DESCRIPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Unnamed repository").expect("invalid description pattern"));

/// How a matching rule turns its match into an annotation value.
#[derive(Debug, Clone, Copy)]
enum Extraction {
    /// Use the first capture group of the pattern.
    Capture,
    /// Use a fixed message.
    Fixed(&'static str),
}

struct ContentRule {
    suffix: &'static str,
    key: &'static str,
    pattern: &'static LazyLock<Regex>,
    extraction: Extraction,
}

static RULES: [ContentRule; 3] = [
    ContentRule {
        suffix: "HEAD",
        key: "branch",
        pattern: &BRANCH_PATTERN,
        extraction: Extraction::Capture,
    },
    ContentRule {
        suffix: "config",
        key: "config",
        pattern: &CONFIG_PATTERN,
        extraction: Extraction::Fixed("Git config exposed"),
    },
    ContentRule {
        suffix: "description",
        key: "description",
        pattern: &DESCRIPTION_PATTERN,
        extraction: Extraction::Fixed("Default Git description exposed"),
    },
];

/// Derive annotations from an exposed response body.
///
/// Pure function of `(path, body)`: the same inputs always produce the same
/// annotations. A rule whose pattern does not match simply contributes no
/// key.
pub fn classify(path: &str, body: &str) -> BTreeMap<String, String> {
    let mut annotations = BTreeMap::new();

    for rule in &RULES {
        if !path.ends_with(rule.suffix) {
            continue;
        }

        let Some(captures) = rule.pattern.captures(body) else {
            continue;
        };

        let value = match rule.extraction {
            Extraction::Capture => match captures.get(1) {
                Some(group) => group.as_str().to_string(),
                None => continue,
            },
            Extraction::Fixed(message) => message.to_string(),
        };

        annotations.insert(rule.key.to_string(), value);
    }

    annotations
}
