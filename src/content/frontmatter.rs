//! Front-matter parsing

use indexmap::IndexMap;
use serde::Deserializer;
use serde_yaml::Value;

use super::error::FrontMatterError;

/// Opening and closing line of a YAML block
const YAML_DELIMITER: &str = "---";
/// Opening and closing line of a JSON block
const JSON_DELIMITER: &str = ";;;";
/// UTF-8 byte-order mark some editors write at the start of a file
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Custom deserializer that handles both a single scalar and a list of scalars
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Value>()? {
                match scalar_to_string(&item) {
                    Some(s) => vec.push(s),
                    None if item.is_null() => {}
                    None => {
                        return Err(de::Error::custom(
                            "list entries must be strings or numbers",
                        ))
                    }
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// String form of a scalar value; `None` for null, sequences and mappings
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Attributes from the header of a markdown file, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub attributes: IndexMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A leading byte-order mark is dropped. Without a block the text is
    /// returned untouched; with one, the body starts on the line after the
    /// closing delimiter.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        let header = content.trim_start();

        if let Some((block, rest)) = split_block(header, YAML_DELIMITER) {
            return Ok((Self::parse_yaml(block)?, rest));
        }

        if let Some((block, rest)) = split_block(header, JSON_DELIMITER) {
            return Ok((Self::parse_json(block)?, rest));
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(block: &str) -> Result<Self, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        match serde_yaml::from_str::<Value>(block)? {
            Value::Null => Ok(FrontMatter::default()),
            Value::Mapping(mapping) => {
                let mut attributes = IndexMap::with_capacity(mapping.len());
                for (key, value) in mapping {
                    let key = scalar_to_string(&key).ok_or(FrontMatterError::NotAMapping)?;
                    attributes.insert(key, value);
                }
                Ok(Self { attributes })
            }
            _ => Err(FrontMatterError::NotAMapping),
        }
    }

    fn parse_json(block: &str) -> Result<Self, FrontMatterError> {
        let block = block.trim();
        if block.is_empty() {
            return Ok(FrontMatter::default());
        }

        // Braces are optional around the key/value pairs
        let attributes: IndexMap<String, Value> = if block.starts_with('{') {
            serde_json::from_str(block)?
        } else {
            serde_json::from_str(&format!("{{{}}}", block))?
        };

        Ok(Self { attributes })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Split `content` into the block between two `delimiter` lines and the rest.
/// The opening delimiter must be the first line.
fn split_block<'a>(content: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let (first, mut rest) = split_line(content);
    if first.trim_end() != delimiter {
        return None;
    }

    let start = content.len() - rest.len();
    let mut offset = start;
    while !rest.is_empty() {
        let (line, next) = split_line(rest);
        if line.trim_end() == delimiter {
            return Some((&content[start..offset], next));
        }
        offset += rest.len() - next.len();
        rest = next;
    }

    None
}

fn split_line(s: &str) -> (&str, &str) {
    match s.find('\n') {
        Some(pos) => (&s[..pos], &s[pos + 1..]),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str_attr(fm: &FrontMatter, key: &str) -> Option<String> {
        fm.get(key).and_then(scalar_to_string)
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
categories:
  - programming
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(str_attr(&fm, "title"), Some("Hello World".to_string()));
        assert_eq!(str_attr(&fm, "date"), Some("2024-01-15".to_string()));
        assert_eq!(remaining, "\nThis is the content.\n");
    }

    #[test]
    fn test_attribute_order_preserved() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<&str> = fm.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#";;;
{"title": "Test Post", "categories": ["a", "b"]}
;;;

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(str_attr(&fm, "title"), Some("Test Post".to_string()));
        assert!(fm.get("categories").unwrap().is_sequence());
        assert_eq!(remaining, "\nThis is content.\n");
    }

    #[test]
    fn test_parse_bare_json_pairs() {
        let content = ";;;\n\"title\": \"Bare\",\n\"date\": \"2024-02-02\"\n;;;\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(str_attr(&fm, "title"), Some("Bare".to_string()));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just a heading\n\nSome text.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_only_one_line_break_after_delimiter_removed() {
        let (_, remaining) = FrontMatter::parse("---\ntitle: T\n---\n\n\nBody").unwrap();
        assert_eq!(remaining, "\n\nBody");

        let (_, remaining) = FrontMatter::parse("---\r\ntitle: T\r\n---\r\n\r\nBody").unwrap();
        assert_eq!(remaining, "\r\nBody");
    }

    #[test]
    fn test_leading_whitespace_kept_without_frontmatter() {
        let content = "    fn main() {}\n\nIndented code block first.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);

        let (_, remaining) = FrontMatter::parse("\n\nStarts with blank lines").unwrap();
        assert_eq!(remaining, "\n\nStarts with blank lines");
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let content = "\u{FEFF}---\ntitle: Hello\ndate: 2024-01-01\n---\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(str_attr(&fm, "title"), Some("Hello".to_string()));
        assert_eq!(str_attr(&fm, "date"), Some("2024-01-01".to_string()));
        assert_eq!(remaining, "Body");

        let (fm, remaining) = FrontMatter::parse("\u{FEFF}# Plain").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "# Plain");
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let content = "---\ntitle: never closed\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_crlf_delimiters() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(str_attr(&fm, "title"), Some("Windows".to_string()));
        assert_eq!(remaining, "Body\r\n");
    }

    #[test]
    fn test_longer_rule_is_not_delimiter() {
        let content = "----\ntitle: x\n----\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.is_empty());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_non_mapping_yaml_is_error() {
        let content = "---\n- just\n- a list\n---\nBody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let content = ";;;\n{\"title\": }\n;;;\nBody";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, FrontMatterError::Json(_)));
    }

    #[test]
    fn test_string_or_vec() {
        let single: Value = serde_yaml::from_str("Notes").unwrap();
        assert_eq!(string_or_vec(single).unwrap(), vec!["Notes"]);

        let list: Value = serde_yaml::from_str("[rust, 2024]").unwrap();
        assert_eq!(string_or_vec(list).unwrap(), vec!["rust", "2024"]);

        assert!(string_or_vec(Value::Null).unwrap().is_empty());

        let float: Value = serde_yaml::from_str("1.5").unwrap();
        assert_eq!(string_or_vec(float).unwrap(), vec!["1.5"]);

        assert_eq!(string_or_vec(Value::Bool(true)).unwrap(), vec!["true"]);

        let nested: Value = serde_yaml::from_str("[[a]]").unwrap();
        assert!(string_or_vec(nested).is_err());
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&Value::Bool(true)), Some("true".to_string()));
        assert_eq!(scalar_to_string(&Value::from(3)), Some("3".to_string()));
        assert_eq!(scalar_to_string(&Value::Null), None);
    }
}
