//! Self-closing component tags such as `<Video src="intro.mp4" autoplay />`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^<([A-Za-z][\w.:-]*)((?:\s+[A-Za-z_:][\w.:-]*(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>/`]+))?)*)\s*/>$"#,
    )
    .expect("component tag pattern is valid")
});

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][\w.:-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>/`]+)))?"#)
        .expect("component attribute pattern is valid")
});

/// An opaque embedded component with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentEmbed {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl ComponentEmbed {
    /// Parses a whole line as a self-closing tag. Bare attributes map to `""`.
    pub fn parse(line: &str) -> Option<Self> {
        let t = super::strip_indent(line)?.trim_end();
        let caps = TAG.captures(t)?;
        let attributes = ATTR
            .captures_iter(&caps[2])
            .map(|a| {
                let value = a
                    .get(2)
                    .or_else(|| a.get(3))
                    .or_else(|| a.get(4))
                    .map_or("", |m| m.as_str());
                (a[1].to_string(), value.to_string())
            })
            .collect();
        Some(ComponentEmbed {
            name: caps[1].to_string(),
            attributes,
        })
    }
}
