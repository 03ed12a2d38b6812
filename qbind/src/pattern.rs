//! Pattern expansion: `{cam}`, `{rel}` and `{val}` templates
//!
//! A pattern controls how one field/operator/value triple is rendered into
//! SQL text. `{cam}` and `{rel}` are replaced by the field name and the
//! relational operator as literal text; every `{val}` becomes its own `?`
//! placeholder and costs one bound parameter.
//!
//! ```
//! use qbind::Pattern;
//!
//! let between = Pattern::parse("{cam} BETWEEN {val} AND {val}");
//! let expansion = between.expand("age", "");
//! assert_eq!(expansion.text, "age BETWEEN ? AND ?");
//! assert_eq!(expansion.placeholders, 2);
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Positional placeholder emitted for every `{val}`.
pub const PLACEHOLDER: &str = "?";

/// Default pattern for WHERE/HAVING conditions.
pub const CONDITION_PATTERN: &str = "{cam} {rel} {val}";

/// Default pattern for INSERT values and UPDATE assignments.
pub const VALUE_PATTERN: &str = "{val}";

const FIELD_MARKER: &str = "{cam}";
const OPERATOR_MARKER: &str = "{rel}";
const VALUE_MARKER: &str = "{val}";

/// One parsed piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text copied verbatim
    Literal(String),
    /// `{cam}`
    Field,
    /// `{rel}`
    Operator,
    /// `{val}`
    ValuePlaceholder,
}

/// A template parsed once into tokens.
///
/// Unknown `{...}` sequences and stray braces are kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    tokens: Vec<Token>,
    placeholders: usize,
}

/// Text produced by expanding a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Number of `?` placeholders in `text`
    pub placeholders: usize,
}

impl Pattern {
    /// Parse a template string.
    pub fn parse(template: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            literal.push_str(&rest[..start]);
            let tail = &rest[start..];

            let marker = [
                (FIELD_MARKER, Token::Field),
                (OPERATOR_MARKER, Token::Operator),
                (VALUE_MARKER, Token::ValuePlaceholder),
            ]
            .into_iter()
            .find(|(text, _)| tail.starts_with(text));

            match marker {
                Some((text, token)) => {
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(token);
                    rest = &tail[text.len()..];
                }
                None => {
                    literal.push('{');
                    rest = &tail[1..];
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let placeholders = tokens
            .iter()
            .filter(|t| matches!(t, Token::ValuePlaceholder))
            .count();

        Self {
            tokens,
            placeholders,
        }
    }

    /// The default condition pattern, `{cam} {rel} {val}`.
    pub fn condition() -> Self {
        Self::parse(CONDITION_PATTERN)
    }

    /// The default value pattern, `{val}`.
    pub fn value() -> Self {
        Self::parse(VALUE_PATTERN)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of `{val}` occurrences, i.e. parameters one expansion binds.
    pub fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Expand with a field name and operator.
    pub fn expand(&self, field: &str, operator: &str) -> Expansion {
        self.render(Some(field), Some(operator))
    }

    /// Expand only the `{val}` markers, leaving `{cam}` and `{rel}` as
    /// written. Used where no field or operator exists (INSERT values).
    pub fn expand_values(&self) -> Expansion {
        self.render(None, None)
    }

    fn render(&self, field: Option<&str>, operator: Option<&str>) -> Expansion {
        let text = self
            .tokens
            .iter()
            .fold(String::new(), |mut out, token| {
                match token {
                    Token::Literal(s) => out.push_str(s),
                    Token::Field => out.push_str(field.unwrap_or(FIELD_MARKER)),
                    Token::Operator => out.push_str(operator.unwrap_or(OPERATOR_MARKER)),
                    Token::ValuePlaceholder => out.push_str(PLACEHOLDER),
                }
                out
            });

        Expansion {
            text,
            placeholders: self.placeholders,
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::condition()
    }
}

impl From<&str> for Pattern {
    fn from(template: &str) -> Self {
        Self::parse(template)
    }
}

impl From<String> for Pattern {
    fn from(template: String) -> Self {
        Self::parse(&template)
    }
}

impl From<&Pattern> for Pattern {
    fn from(pattern: &Pattern) -> Self {
        pattern.clone()
    }
}

impl FromStr for Pattern {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Literal(s) => f.write_str(s)?,
                Token::Field => f.write_str(FIELD_MARKER)?,
                Token::Operator => f.write_str(OPERATOR_MARKER)?,
                Token::ValuePlaceholder => f.write_str(VALUE_MARKER)?,
            }
        }
        Ok(())
    }
}

/// Expand `template` in one step.
pub fn expand(template: &str, field: &str, operator: &str) -> Expansion {
    Pattern::parse(template).expand(field, operator)
}
