//! logos-based lexer for `{{...}}` token markers.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (`{{` beats two `{`)
//! 2. For equal length matches, earlier-defined variants win
//!
//! The lexer only locates markers. [`scan`] pairs each opening marker with the
//! first closing marker after it and slices the expression out of the source.

use std::ops::Range;

use logos::Logos;

use super::TemplateError;

/// Marker produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `{{`
    #[token("{{")]
    Open,

    /// `}}`
    #[token("}}")]
    Close,

    /// A single `{` that does not start a token.
    #[token("{")]
    Brace,

    /// A single `}` that does not end a token.
    #[token("}")]
    BraceClose,

    /// Any run of text without braces.
    #[regex(r"[^{}]+")]
    Text,
}

/// A `{{expr}}` occurrence inside a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    /// Byte range of the whole token, markers included.
    pub span: Range<usize>,
    /// The raw text between the markers.
    pub expr: String,
}

/// A piece of a scanned template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output unchanged.
    Literal(String),
    /// A token to resolve.
    Token(TokenSpan),
}

/// Split `input` into literal text and tokens.
///
/// A token runs from the first `{{` to the first `}}` after it; anything in
/// between (including another `{{`) is part of the expression. A `}}` outside
/// a token is plain text.
///
/// # Errors
///
/// [`TemplateError::Unterminated`] if a `{{` has no matching `}}`.
pub fn scan(input: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut open: Option<Range<usize>> = None;

    for (result, span) in Marker::lexer(input).spanned() {
        match result {
            Ok(Marker::Open) if open.is_none() => {
                if span.start > cursor {
                    segments.push(Segment::Literal(input[cursor..span.start].to_owned()));
                }
                open = Some(span);
            }
            Ok(Marker::Close) => {
                if let Some(start) = open.take() {
                    segments.push(Segment::Token(TokenSpan {
                        span: start.start..span.end,
                        expr: input[start.end..span.start].to_owned(),
                    }));
                    cursor = span.end;
                }
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        return Err(TemplateError::Unterminated {
            position: start.start,
            source_text: input.to_owned(),
        });
    }
    if cursor < input.len() {
        segments.push(Segment::Literal(input[cursor..].to_owned()));
    }
    Ok(segments)
}

/// Whether `input` contains at least one token marker.
pub fn has_tokens(input: &str) -> bool {
    input.contains("{{")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn markers(input: &str) -> Vec<Marker> {
        Marker::lexer(input).filter_map(Result::ok).collect()
    }

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_owned())
    }

    fn tok(span: Range<usize>, expr: &str) -> Segment {
        Segment::Token(TokenSpan {
            span,
            expr: expr.to_owned(),
        })
    }

    // ── Lexer ────────────────────────────────────────────────────────

    #[test]
    fn double_brace_beats_single() {
        assert_eq!(
            markers("a{{b}}c"),
            vec![Marker::Text, Marker::Open, Marker::Text, Marker::Close, Marker::Text]
        );
    }

    #[test]
    fn triple_brace_is_open_then_brace() {
        assert_eq!(markers("{{{"), vec![Marker::Open, Marker::Brace]);
    }

    #[test]
    fn lone_braces() {
        assert_eq!(markers("{ }"), vec![Marker::Brace, Marker::Text, Marker::BraceClose]);
    }

    // ── Scanner ──────────────────────────────────────────────────────

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(scan("hello").unwrap(), vec![lit("hello")]);
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(scan("").unwrap().is_empty());
    }

    #[test]
    fn token_spans_cover_markers() {
        assert_eq!(
            scan("Hi {{name}}!").unwrap(),
            vec![lit("Hi "), tok(3..11, "name"), lit("!")]
        );
    }

    #[test]
    fn adjacent_tokens() {
        assert_eq!(
            scan("{{a}}{{b()}}").unwrap(),
            vec![tok(0..5, "a"), tok(5..12, "b()")]
        );
    }

    #[test]
    fn single_braces_stay_literal() {
        assert_eq!(
            scan("{x} {{y}} }").unwrap(),
            vec![lit("{x} "), tok(4..9, "y"), lit(" }")]
        );
    }

    #[test]
    fn stray_close_is_literal() {
        assert_eq!(scan("a }} b").unwrap(), vec![lit("a }} b")]);
    }

    #[test]
    fn nested_open_is_part_of_expression() {
        assert_eq!(
            scan("{{a{{b}}c}}").unwrap(),
            vec![tok(0..8, "a{{b"), lit("c}}")]
        );
    }

    #[test]
    fn unterminated_token_is_an_error() {
        let err = scan("ok {{name").unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated { position: 3, .. }));
    }

    #[test]
    fn unterminated_after_complete_token() {
        assert!(scan("{{a}} {{b").is_err());
    }

    #[test]
    fn has_tokens_detects_open_marker() {
        assert!(has_tokens("x {{y}}"));
        assert!(!has_tokens("x { y }"));
    }
}
