//! Decorated names.
//!
//! A decorated name flattens a declaration's nesting path into one string key: every name
//! step is written as `$name` and every type parameter as `@type`, attached to the name step
//! before it. `$Shape$area@int@float` is method `area(int,float)` of class `Shape`; a
//! variable declared inside it, in anonymous block `0`, is `$Shape$area@int@float$0$total`.
//!
//! The key is what the hash table stores. [`DecoratedName`] is the same path kept as
//! segments so diagnostics never have to re-parse the string.

use crate::config::constants::decoration::{NAME_MARKER, TYPE_MARKER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One name step and the type parameters attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    pub types: Vec<String>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedName {
    segments: Vec<Segment>,
}

impl DecoratedName {
    /// Split a decorated key into segments. A type before any name step attaches to an
    /// unnamed first segment.
    pub fn parse(decorated: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        for (marker, component) in components(decorated) {
            match marker {
                NAME_MARKER => segments.push(Segment::new(component)),
                _ => match segments.last_mut() {
                    Some(segment) => segment.types.push(component.to_string()),
                    None => segments.push(Segment {
                        name: String::new(),
                        types: vec![component.to_string()],
                    }),
                },
            }
        }
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The outermost name step
    pub fn class(&self) -> Option<&str> {
        self.segments.first().map(|s| s.name.as_str())
    }

    /// The innermost name step
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(|s| s.name.as_str())
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The storage key this name decorates to
    pub fn key(&self) -> String {
        let mut key = String::new();
        for segment in &self.segments {
            key.push(char::from(NAME_MARKER));
            key.push_str(&segment.name);
            for ty in &segment.types {
                key.push(char::from(TYPE_MARKER));
                key.push_str(ty);
            }
        }
        key
    }

    /// `class.method(int,string).var`
    pub fn human_readable(&self) -> String {
        self.segments
            .iter()
            .map(|segment| {
                if segment.types.is_empty() {
                    segment.name.clone()
                } else {
                    format!("{}({})", segment.name, segment.types.join(","))
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for DecoratedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.human_readable())
    }
}

/// `(marker, text)` pairs of a decorated key. Text before the first marker is skipped.
fn components(decorated: &str) -> impl Iterator<Item = (u8, &str)> {
    let bytes = decorated.as_bytes();
    let starts: Vec<usize> = bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == NAME_MARKER || b == TYPE_MARKER)
        .map(|(i, _)| i)
        .collect();

    let ends: Vec<usize> = starts
        .iter()
        .skip(1)
        .copied()
        .chain(std::iter::once(bytes.len()))
        .collect();

    starts
        .into_iter()
        .zip(ends)
        .map(move |(start, end)| (bytes[start], &decorated[start + 1..end]))
}

/// Undecorate a key for diagnostics.
///
/// The leading `$` is dropped, later `$` become `.`, and a run of `@` components becomes a
/// parenthesized, comma separated list. A `$` after a type run closes the list:
/// `$c$m@int$v` renders as `c.m(int).v`.
pub fn render_human_readable(decorated: &str) -> String {
    let mut out = String::with_capacity(decorated.len() + 2);
    let mut in_types = false;
    let body = decorated
        .strip_prefix(char::from(NAME_MARKER))
        .unwrap_or(decorated);

    for ch in body.chars() {
        match ch {
            c if c == char::from(NAME_MARKER) => {
                if in_types {
                    out.push(')');
                    in_types = false;
                }
                out.push('.');
            }
            c if c == char::from(TYPE_MARKER) => {
                out.push(if in_types { ',' } else { '(' });
                in_types = true;
            }
            c => out.push(c),
        }
    }
    if in_types {
        out.push(')');
    }
    out
}

/// Length of the class prefix: everything before the second name marker
pub fn class_prefix_len(decorated: &[u8]) -> usize {
    decorated
        .iter()
        .enumerate()
        .skip(1)
        .find(|&(_, &b)| b == NAME_MARKER)
        .map_or(decorated.len(), |(i, _)| i)
}

/// The class step with its marker, e.g. `$Shape`
pub fn extract_class(decorated: &str) -> Option<&str> {
    if !decorated.starts_with(char::from(NAME_MARKER)) {
        return None;
    }
    let end = decorated[1..]
        .find(|c| c == char::from(NAME_MARKER) || c == char::from(TYPE_MARKER))
        .map_or(decorated.len(), |i| i + 1);
    Some(&decorated[..end])
}

/// Everything after the class step, starting at the next name marker
pub fn extract_name(decorated: &str) -> Option<&str> {
    let start = class_prefix_len(decorated.as_bytes());
    if start < decorated.len() {
        Some(&decorated[start..])
    } else {
        None
    }
}

/// The `index`-th type component, counting across the whole key
pub fn extract_type(decorated: &str, index: usize) -> Option<&str> {
    components(decorated)
        .filter(|(marker, _)| *marker == TYPE_MARKER)
        .nth(index)
        .map(|(_, text)| text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_method_prototype() {
        assert_eq!(
            render_human_readable("$some_cls$some_meth@int@string"),
            "some_cls.some_meth(int,string)"
        );
    }

    #[test]
    fn test_render_closes_type_run_before_name() {
        assert_eq!(render_human_readable("$c$m@int$v"), "c.m(int).v");
        assert_eq!(render_human_readable("$c$m@int@float$0$v"), "c.m(int,float).0.v");
    }

    #[test]
    fn test_render_plain_names() {
        assert_eq!(render_human_readable("$Shape"), "Shape");
        assert_eq!(render_human_readable("$Shape$area"), "Shape.area");
        assert_eq!(render_human_readable(""), "");
    }

    #[test]
    fn test_parse_segments() {
        let name = DecoratedName::parse("$Shape$area@int@float$0$total");
        let names: Vec<&str> = name.segments().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Shape", "area", "0", "total"]);
        assert_eq!(name.segments()[1].types, vec!["int", "float"]);
        assert_eq!(name.class(), Some("Shape"));
        assert_eq!(name.leaf(), Some("total"));
        assert_eq!(name.depth(), 4);
    }

    #[test]
    fn test_parse_agrees_with_key_and_rendering() {
        for key in ["$a", "$a$b@int", "$a$b@int@string$c", "$x@t"] {
            let name = DecoratedName::parse(key);
            assert_eq!(name.key(), key);
            assert_eq!(name.to_string(), render_human_readable(key));
        }
    }

    #[test]
    fn test_leading_type_gets_unnamed_segment() {
        let name = DecoratedName::parse("@int");
        assert_eq!(name.segments()[0], Segment { name: String::new(), types: vec!["int".into()] });
    }

    #[test]
    fn test_class_prefix() {
        assert_eq!(class_prefix_len(b"$cls$meth@int"), 4);
        assert_eq!(class_prefix_len(b"$cls"), 4);
        assert_eq!(class_prefix_len(b""), 0);
    }

    #[test]
    fn test_extractors() {
        let key = "$cls$meth@int@string";
        assert_eq!(extract_class(key), Some("$cls"));
        assert_eq!(extract_name(key), Some("$meth@int@string"));
        assert_eq!(extract_type(key, 0), Some("int"));
        assert_eq!(extract_type(key, 1), Some("string"));
        assert_eq!(extract_type(key, 2), None);

        assert_eq!(extract_class("$cls"), Some("$cls"));
        assert_eq!(extract_name("$cls"), None);
        assert_eq!(extract_class("cls"), None);
    }
}
