// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Line-oriented `key=value` properties text.
//!
//! Rendering is used by the encoder for PROPERTIES configurations; parsing
//! is used by the configuration reader on the receiving side.

use std::collections::BTreeMap;

use crate::core::value::{kind_name, scalar_text, RawMapping};
use crate::core::{CodecError, Result};

/// Separator between rendered entries.
pub const LINE_SEPARATOR: &str = "\n";

/// Render a mapping as properties text.
///
/// Entries keep the mapping's order, one `key=value` per line, with no
/// trailing separator. Values must be scalars: strings are written as-is,
/// numbers and booleans in their canonical form.
///
/// Escaping follows `java.util.Properties`: backslashes and line breaks are
/// always escaped, `=`, `:` and blanks in keys, a leading blank in values,
/// and a leading `#` or `!` in keys.
pub fn render(entries: &RawMapping) -> Result<String> {
    let mut lines = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let text = scalar_text(value).ok_or_else(|| {
            CodecError::invalid_format(format!(
                "property '{key}' must be a scalar, found {}",
                kind_name(value)
            ))
        })?;
        lines.push(format!("{}={}", escape(key, true), escape(&text, false)));
    }
    Ok(lines.join(LINE_SEPARATOR))
}

fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' if is_key => {
                out.push('\\');
                out.push(c);
            }
            '#' | '!' if is_key && i == 0 => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Parse properties text.
///
/// Reads the `java.util.Properties` line format: blank lines and lines
/// starting with `#` or `!` are skipped, a line ending in an unescaped `\`
/// continues on the next one, and the key ends at the first unescaped `=`,
/// `:` or blank. Escapes are resolved in keys and values. Later duplicates
/// override earlier ones.
pub fn parse(text: &str) -> BTreeMap<String, String> {
    let mut properties = BTreeMap::new();
    for line in logical_lines(text) {
        let (key, value) = split_entry(&line);
        properties.insert(unescape(key), unescape(value));
    }
    properties
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for physical in text.lines() {
        let line = physical.trim_start_matches(is_blank);
        let mut current = match pending.take() {
            Some(current) => current,
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                String::new()
            }
        };

        let trailing = line.len() - line.trim_end_matches('\\').len();
        if trailing % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            pending = Some(current);
        } else {
            current.push_str(line);
            lines.push(current);
        }
    }

    if let Some(current) = pending {
        lines.push(current);
    }
    lines
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut separator = false;
    let mut chars = line.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '=' | ':' => {
                key_end = i;
                separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let mut rest = &line[key_end..];
    if separator {
        rest = &rest[1..];
    }
    rest = rest.trim_start_matches(is_blank);
    if !separator {
        if let Some(stripped) = rest.strip_prefix(|c: char| c == '=' || c == ':') {
            rest = stripped.trim_start_matches(is_blank);
        }
    }
    (&line[..key_end], rest)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let digits: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if digits.len() == 4 => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    _ => out.push('u'),
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: serde_json::Value) -> RawMapping {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_render_single_entry() {
        let text = render(&mapping(json!({"Truth": "Beauty"}))).unwrap();
        assert_eq!(text, "Truth=Beauty");
    }

    #[test]
    fn test_render_multiple_entries_in_order() {
        let text = render(&mapping(json!({"foo": "foo", "bar": "bar"}))).unwrap();
        assert_eq!(text, "foo=foo\nbar=bar");
    }

    #[test]
    fn test_render_scalars() {
        let text = render(&mapping(json!({"port": 8080, "debug": true}))).unwrap();
        assert_eq!(text, "port=8080\ndebug=true");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&RawMapping::new()).unwrap(), "");
    }

    #[test]
    fn test_render_rejects_nested_values() {
        let err = render(&mapping(json!({"nested": {"a": "b"}}))).unwrap_err();
        assert!(matches!(err, CodecError::InvalidConfigurationFormat { .. }));
        assert!(err.to_string().contains("nested"));

        assert!(render(&mapping(json!({"list": ["a"]}))).is_err());
        assert!(render(&mapping(json!({"nothing": null}))).is_err());
    }

    #[test]
    fn test_parse() {
        let props = parse("foo=foo\nbar = bar\n# comment\n! other comment\n\nbaz: qux\nflag");
        assert_eq!(props.len(), 4);
        assert_eq!(props["foo"], "foo");
        assert_eq!(props["bar"], "bar");
        assert_eq!(props["baz"], "qux");
        assert_eq!(props["flag"], "");
    }

    #[test]
    fn test_parse_later_duplicate_wins() {
        let props = parse("a=1\na=2");
        assert_eq!(props["a"], "2");
    }

    #[test]
    fn test_parse_value_keeps_separators() {
        let props = parse("url=http://host:8080/?a=b");
        assert_eq!(props["url"], "http://host:8080/?a=b");
    }

    #[test]
    fn test_render_then_parse() {
        let text = render(&mapping(json!({"Truth": "Beauty", "x": "y"}))).unwrap();
        let props = parse(&text);
        assert_eq!(props["Truth"], "Beauty");
        assert_eq!(props["x"], "y");
    }

    #[test]
    fn test_render_escapes_keys_and_multiline_values() {
        let entries = mapping(json!({"motd": "line1\nline2", "a=b": "c", "path": "C:\\dir"}));
        let text = render(&entries).unwrap();
        assert_eq!(text, "motd=line1\\nline2\na\\=b=c\npath=C:\\\\dir");

        let props = parse(&text);
        assert_eq!(props.len(), 3);
        assert_eq!(props["motd"], "line1\nline2");
        assert_eq!(props["a=b"], "c");
        assert_eq!(props["path"], "C:\\dir");
    }

    #[test]
    fn test_render_escapes_blanks() {
        let text = render(&mapping(json!({"two words": " padded", "#hash": "x"}))).unwrap();
        assert_eq!(text, "two\\ words=\\ padded\n\\#hash=x");

        let props = parse(&text);
        assert_eq!(props["two words"], " padded");
        assert_eq!(props["#hash"], "x");
    }

    #[test]
    fn test_parse_continuation_lines() {
        let props = parse("fruits=apple, \\\n    banana\nnext=1");
        assert_eq!(props["fruits"], "apple, banana");
        assert_eq!(props["next"], "1");
    }

    #[test]
    fn test_parse_escaped_backslash_is_not_continuation() {
        let props = parse("dir=C:\\\\\nnext=1");
        assert_eq!(props["dir"], "C:\\");
        assert_eq!(props["next"], "1");
    }

    #[test]
    fn test_parse_unicode_escape() {
        let props = parse("greeting=caf\\u00e9");
        assert_eq!(props["greeting"], "caf\u{e9}");
    }

    #[test]
    fn test_parse_blank_separator() {
        let props = parse("key value\nother   =   spaced");
        assert_eq!(props["key"], "value");
        assert_eq!(props["other"], "spaced");
    }
}
