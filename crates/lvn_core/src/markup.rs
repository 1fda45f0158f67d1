//! Markup parser
//!
//! Parses the server-sent markup subset into an [`Element`] tree:
//!
//! - elements `<tag a="v" b='v' c>...</tag>` and self-closing `<tag/>`
//! - text content (HTML entities decoded, whitespace-only runs dropped)
//! - comments `<!-- ... -->` (skipped)
//!
//! # Error Handling
//!
//! Failures carry line/column information and the context stack collected by
//! nom's `VerboseError`. Errors are also logged via tracing at DEBUG level.
//!
//! # Example
//!
//! ```rust
//! use lvn_core::markup::parse;
//!
//! let root = parse(r#"
//!     <list style="grouped" phx-delete="remove">
//!         <text>One</text>
//!         <text>Two &amp; three</text>
//!     </list>
//! "#).unwrap();
//!
//! assert_eq!(root.tag(), "list");
//! assert_eq!(root.children()[1].text(), Some("Two & three"));
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{cut, eof, map, opt, value},
    error::{context, VerboseError, VerboseErrorKind},
    multi::many0,
    sequence::{delimited, preceded, tuple},
    Finish, IResult,
};
use tracing::debug;

use crate::element::Element;

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Markup parse failure with location information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable description of what was expected
    pub message: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Input near the failure
    pub fragment: String,
    /// Context stack from nom's VerboseError, innermost first
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "markup error: line {}, column {}: {}",
            self.line, self.column, self.message
        )?;
        if !self.fragment.is_empty() {
            write!(f, " near \"{}\"", self.fragment)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    fn from_verbose(input: &str, err: VerboseError<&str>) -> Self {
        let (line, column, fragment) = match err.errors.first() {
            Some((frag, _)) => position(input, frag),
            None => (1, 1, String::new()),
        };

        let contexts = err
            .errors
            .iter()
            .filter_map(|(_, kind)| match kind {
                VerboseErrorKind::Context(ctx) => Some((*ctx).to_string()),
                _ => None,
            })
            .collect();

        Self {
            message: describe(&err),
            line,
            column,
            fragment,
            contexts,
        }
    }
}

/// Line, column and a short preview of where `fragment` starts inside `original`
fn position(original: &str, fragment: &str) -> (usize, usize, String) {
    let offset = original.len().saturating_sub(fragment.len());
    let consumed = &original[..offset];

    let line = consumed.matches('\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };

    let preview: String = fragment.chars().take(24).collect();
    (line, column, preview)
}

fn describe(err: &VerboseError<&str>) -> String {
    for (_, kind) in &err.errors {
        match kind {
            VerboseErrorKind::Char(c) => return format!("expected '{}'", c),
            VerboseErrorKind::Context(ctx) => return format!("expected {}", ctx),
            VerboseErrorKind::Nom(_) => {}
        }
    }
    "invalid markup".to_string()
}

/// Parse a markup document with exactly one root element
pub fn parse(markup: &str) -> Result<Element, ParseError> {
    match document(markup).finish() {
        Ok((_, root)) => Ok(root),
        Err(err) => {
            let err = ParseError::from_verbose(markup, err);
            debug!("{}", err);
            Err(err)
        }
    }
}

// ============================================================================
// Parsers
// ============================================================================

enum Node<'a> {
    Element(Element),
    Text(&'a str),
    Comment,
}

fn document(input: &str) -> ParseResult<Element> {
    let (input, _) = ws(input)?;
    let (input, root) = context("root element", element)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = context("end of document", eof)(input)?;
    Ok((input, root))
}

/// Whitespace and comments
fn ws(input: &str) -> ParseResult<()> {
    value((), many0(alt((value((), multispace1), value((), comment)))))(input)
}

fn comment(input: &str) -> ParseResult<&str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

fn name(input: &str) -> ParseResult<&str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))(input)
}

fn attribute_value(input: &str) -> ParseResult<&str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
        take_while1(|c: char| {
            !c.is_whitespace() && !matches!(c, '>' | '/' | '"' | '\'' | '=' | '<')
        }),
    ))(input)
}

/// ` key="value"` or a bare ` key`
fn attribute(input: &str) -> ParseResult<(&str, String)> {
    let (input, _) = multispace1(input)?;
    let (input, key) = name(input)?;
    let (input, raw) = opt(preceded(
        tuple((multispace0, char('='), multispace0)),
        cut(context("attribute value", attribute_value)),
    ))(input)?;
    let decoded = raw
        .map(|raw| html_escape::decode_html_entities(raw).into_owned())
        .unwrap_or_default();
    Ok((input, (key, decoded)))
}

fn node(input: &str) -> ParseResult<Node<'_>> {
    alt((
        map(comment, |_| Node::Comment),
        map(element, Node::Element),
        map(take_while1(|c: char| c != '<'), Node::Text),
    ))(input)
}

fn element(input: &str) -> ParseResult<Element> {
    let (input, _) = char('<')(input)?;
    let (input, tag_name) = context("tag name", name)(input)?;
    let (input, attributes) = many0(attribute)(input)?;
    let (input, _) = multispace0(input)?;

    let mut element = Element::new(tag_name);
    for (key, value) in attributes {
        element = element.with_attr(key, value);
    }

    if let Ok((input, _)) = tag::<_, _, VerboseError<&str>>("/>")(input) {
        return Ok((input, element));
    }

    let (input, _) = context("'>'", cut(char('>')))(input)?;
    let (input, nodes) = many0(node)(input)?;
    let (input, _) = context("closing tag", cut(tag("</")))(input)?;
    let (rest, close) = context("closing tag name", cut(name))(input)?;
    if close != tag_name {
        return Err(nom::Err::Failure(VerboseError {
            errors: vec![(input, VerboseErrorKind::Context("matching closing tag"))],
        }));
    }
    let (rest, _) = multispace0(rest)?;
    let (rest, _) = context("'>'", cut(char('>')))(rest)?;

    let mut texts = Vec::new();
    for node in nodes {
        match node {
            Node::Element(child) => element = element.child(child),
            Node::Text(raw) => {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    texts.push(html_escape::decode_html_entities(trimmed).into_owned());
                }
            }
            Node::Comment => {}
        }
    }
    if !texts.is_empty() {
        element = element.with_text(texts.join(" "));
    }

    Ok((rest, element))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_elements() {
        let root = parse(
            r#"<form id="f1" phx-change="validate">
                 <text-field name="email" value="a@b.c" />
                 <toggle name="remember" value='true'/>
               </form>"#,
        )
        .unwrap();

        assert_eq!(root.tag(), "form");
        assert_eq!(root.id(), Some("f1"));
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].tag(), "text-field");
        assert_eq!(root.children()[1].attr_if_present("value"), Some("true"));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let root = parse(r#"<list style="grouped" phx-delete="remove" id="l"></list>"#).unwrap();
        let keys: Vec<_> = root.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["style", "phx-delete", "id"]);
    }

    #[test]
    fn test_bare_and_unquoted_attributes() {
        let root = parse("<button disabled kind=primary/>").unwrap();
        assert_eq!(root.attr_if_present("disabled"), Some(""));
        assert_eq!(root.attr_if_present("kind"), Some("primary"));
    }

    #[test]
    fn test_entities_and_comments() {
        let root = parse(
            r#"<!-- header -->
            <text modifiers="[{&quot;type&quot;:&quot;brightness&quot;,&quot;amount&quot;:0.5}]">
                Fish &amp; chips <!-- inline -->
            </text>"#,
        )
        .unwrap();

        assert_eq!(root.text(), Some("Fish & chips"));
        assert_eq!(
            root.attr_if_present("modifiers"),
            Some(r#"[{"type":"brightness","amount":0.5}]"#)
        );
    }

    #[test]
    fn test_mismatched_close_tag() {
        let err = parse("<list>\n  <text>hi</txet>\n</list>").unwrap_err();
        assert_eq!(err.message, "expected matching closing tag");
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 13);
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err = parse("<a/><b/>").unwrap_err();
        assert!(err.contexts.iter().any(|c| c == "end of document"));
    }

    #[test]
    fn test_unterminated_attribute() {
        assert!(parse(r#"<text id="oops></text>"#).is_err());
    }
}
