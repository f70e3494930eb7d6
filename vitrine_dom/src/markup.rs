// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup fragments: a small, strict parser for HTML-like fragments and escaping helpers.
//!
//! The parser accepts what component renderers produce: elements, quoted,
//! bare, or boolean attributes, text, comments, and void elements. It is not
//! an HTML5 tree builder; it never invents implied tags, and mismatched or
//! unclosed tags are reported as [`MarkupError`]s.
//!
//! ```
//! use vitrine_dom::markup::{parse_fragment, MarkupNode};
//!
//! let nodes = parse_fragment(r#"<button class="btn" disabled>Save &amp; close</button>"#).unwrap();
//! let MarkupNode::Element { tag, attrs, children } = &nodes[0] else { panic!() };
//! assert_eq!(tag, "button");
//! assert_eq!(attrs[1], ("disabled".to_string(), String::new()));
//! assert_eq!(children[0], MarkupNode::Text("Save & close".into()));
//! ```

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Returns true if `tag` is a void element.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// A parsed fragment node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    /// An element and its children.
    Element {
        /// Lowercase tag name.
        tag: String,
        /// Attributes in source order, entity-decoded.
        attrs: Vec<(String, String)>,
        /// Child nodes.
        children: Vec<Self>,
    },
    /// Entity-decoded text. Whitespace-only runs are dropped.
    Text(String),
}

/// What went wrong while parsing a fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupErrorKind {
    /// Input ended inside a tag, attribute value, or comment.
    UnexpectedEof,
    /// A tag name was missing or contained invalid characters.
    MalformedTag,
    /// A closing tag did not match the innermost open element.
    MismatchedClose {
        /// The element that was open.
        expected: String,
        /// The closing tag that was found.
        found: String,
    },
    /// A closing tag appeared with no open element.
    UnexpectedClose(String),
    /// The fragment ended with this element still open.
    Unclosed(String),
}

/// Error returned by [`parse_fragment`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupError {
    /// Failure kind.
    pub kind: MarkupErrorKind,
    /// Byte offset into the input.
    pub offset: usize,
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MarkupErrorKind::UnexpectedEof => write!(f, "unexpected end of markup"),
            MarkupErrorKind::MalformedTag => write!(f, "malformed tag"),
            MarkupErrorKind::MismatchedClose { expected, found } => {
                write!(f, "expected </{expected}> but found </{found}>")
            }
            MarkupErrorKind::UnexpectedClose(tag) => write!(f, "unexpected </{tag}>"),
            MarkupErrorKind::Unclosed(tag) => write!(f, "<{tag}> is never closed"),
        }?;
        write!(f, " at byte {}", self.offset)
    }
}

impl core::error::Error for MarkupError {}

/// Escapes text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decodes the named and numeric character references renderers emit.
///
/// Unknown references are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_owned();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let name = &rest[1..semi];
            let ch = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => name.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

struct Open {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn err(&self, kind: MarkupErrorKind) -> MarkupError {
        MarkupError {
            kind,
            offset: self.pos,
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&f) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn name(&mut self) -> Result<String, MarkupError> {
        let name = self.take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'));
        if name.is_empty() {
            return Err(self.err(MarkupErrorKind::MalformedTag));
        }
        Ok(name.to_ascii_lowercase())
    }
}

fn is_attr_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'')
}

/// Parse a markup fragment into a list of top-level nodes.
pub fn parse_fragment(src: &str) -> Result<Vec<MarkupNode>, MarkupError> {
    let mut cur = Cursor { src, pos: 0 };
    let mut top: Vec<MarkupNode> = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    fn push(stack: &mut [Open], top: &mut Vec<MarkupNode>, node: MarkupNode) {
        match stack.last_mut() {
            Some(open) => open.children.push(node),
            None => top.push(node),
        }
    }

    while !cur.eof() {
        let rest = cur.rest();
        if rest.starts_with("<!--") {
            let Some(end) = rest.find("-->") else {
                return Err(cur.err(MarkupErrorKind::UnexpectedEof));
            };
            cur.pos += end + 3;
        } else if let Some(after) = rest.strip_prefix("</") {
            cur.pos += rest.len() - after.len();
            let tag = cur.name()?;
            cur.skip_ws();
            if cur.bump() != Some('>') {
                return Err(cur.err(MarkupErrorKind::MalformedTag));
            }
            let Some(open) = stack.pop() else {
                return Err(cur.err(MarkupErrorKind::UnexpectedClose(tag)));
            };
            if open.tag != tag {
                return Err(cur.err(MarkupErrorKind::MismatchedClose {
                    expected: open.tag,
                    found: tag,
                }));
            }
            let node = MarkupNode::Element {
                tag: open.tag,
                attrs: open.attrs,
                children: open.children,
            };
            push(&mut stack, &mut top, node);
        } else if rest.starts_with('<') {
            cur.bump();
            let tag = cur.name()?;
            let mut attrs = Vec::new();
            let self_closing = loop {
                cur.skip_ws();
                match cur.peek() {
                    None => return Err(cur.err(MarkupErrorKind::UnexpectedEof)),
                    Some('>') => {
                        cur.bump();
                        break false;
                    }
                    Some('/') => {
                        cur.bump();
                        if cur.bump() != Some('>') {
                            return Err(cur.err(MarkupErrorKind::MalformedTag));
                        }
                        break true;
                    }
                    Some(_) => {
                        let name = cur.take_while(is_attr_name_char);
                        if name.is_empty() {
                            return Err(cur.err(MarkupErrorKind::MalformedTag));
                        }
                        let name = name.to_ascii_lowercase();
                        cur.skip_ws();
                        let value = if cur.peek() == Some('=') {
                            cur.bump();
                            cur.skip_ws();
                            match cur.peek() {
                                Some(q @ ('"' | '\'')) => {
                                    cur.bump();
                                    let raw = cur.take_while(|c| c != q);
                                    if cur.bump() != Some(q) {
                                        return Err(cur.err(MarkupErrorKind::UnexpectedEof));
                                    }
                                    decode_entities(raw)
                                }
                                Some(_) => decode_entities(
                                    cur.take_while(|c| !c.is_whitespace() && c != '>'),
                                ),
                                None => return Err(cur.err(MarkupErrorKind::UnexpectedEof)),
                            }
                        } else {
                            String::new()
                        };
                        attrs.push((name, value));
                    }
                }
            };
            if self_closing || is_void(&tag) {
                let node = MarkupNode::Element {
                    tag,
                    attrs,
                    children: Vec::new(),
                };
                push(&mut stack, &mut top, node);
            } else {
                stack.push(Open {
                    tag,
                    attrs,
                    children: Vec::new(),
                });
            }
        } else {
            let raw = cur.take_while(|c| c != '<');
            if !raw.trim().is_empty() {
                push(&mut stack, &mut top, MarkupNode::Text(decode_entities(raw)));
            }
        }
    }

    if let Some(open) = stack.pop() {
        return Err(cur.err(MarkupErrorKind::Unclosed(open.tag)));
    }
    Ok(top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn el(tag: &str, attrs: &[(&str, &str)], children: Vec<MarkupNode>) -> MarkupNode {
        MarkupNode::Element {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
        }
    }

    #[test]
    fn nested_elements_and_text() {
        let nodes = parse_fragment(
            r#"<ul class="menu"><li data-value="a">Alpha</li><li data-value='b'>Beta</li></ul>"#,
        )
        .unwrap();
        assert_eq!(
            nodes,
            vec![el(
                "ul",
                &[("class", "menu")],
                vec![
                    el("li", &[("data-value", "a")], vec![MarkupNode::Text("Alpha".into())]),
                    el("li", &[("data-value", "b")], vec![MarkupNode::Text("Beta".into())]),
                ]
            )]
        );
    }

    #[test]
    fn void_and_self_closing_elements() {
        let nodes = parse_fragment(r#"<input type=checkbox checked><br/><span/>"#).unwrap();
        assert_eq!(
            nodes,
            vec![
                el("input", &[("type", "checkbox"), ("checked", "")], vec![]),
                el("br", &[], vec![]),
                el("span", &[], vec![]),
            ]
        );
    }

    #[test]
    fn whitespace_only_text_and_comments_are_dropped() {
        let nodes = parse_fragment("<div>\n  <!-- note -->\n  <p>x</p>\n</div>").unwrap();
        assert_eq!(
            nodes,
            vec![el("div", &[], vec![el("p", &[], vec![MarkupNode::Text("x".into())])])]
        );
    }

    #[test]
    fn entities_are_decoded_in_text_and_attributes() {
        let nodes = parse_fragment(r#"<p title="a &quot;b&quot; &#x41;">1 &lt; 2 &amp;&unknown;</p>"#)
            .unwrap();
        assert_eq!(
            nodes,
            vec![el(
                "p",
                &[("title", "a \"b\" A")],
                vec![MarkupNode::Text("1 < 2 &&unknown;".into())]
            )]
        );
    }

    #[test]
    fn json_in_single_quoted_attribute() {
        let nodes = parse_fragment(r#"<span data-rows='[{"label":"a","value":"1"}]'></span>"#)
            .unwrap();
        let MarkupNode::Element { attrs, .. } = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(attrs[0].1, r#"[{"label":"a","value":"1"}]"#);
    }

    #[test]
    fn mismatched_close_is_an_error() {
        let err = parse_fragment("<div><span></div>").unwrap_err();
        assert_eq!(
            err.kind,
            MarkupErrorKind::MismatchedClose {
                expected: "span".into(),
                found: "div".into()
            }
        );
    }

    #[test]
    fn unclosed_and_stray_close_are_errors() {
        assert_eq!(
            parse_fragment("<div>").unwrap_err().kind,
            MarkupErrorKind::Unclosed("div".into())
        );
        assert_eq!(
            parse_fragment("</p>").unwrap_err().kind,
            MarkupErrorKind::UnexpectedClose("p".into())
        );
        assert_eq!(
            parse_fragment("<div class=\"x").unwrap_err().kind,
            MarkupErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn escaping_round_trips_through_decode() {
        let raw = r#"<a href="x">Tom & "Jerry"</a>"#;
        assert_eq!(decode_entities(&escape_attr(raw)), raw);
        assert_eq!(decode_entities(&escape_text(raw)), raw);
    }
}
