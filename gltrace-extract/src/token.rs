use std::fmt::Display;

use crate::error::ParseError;

/// A lexical token of a C function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Star,
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl Token {
    pub fn ident(&self) -> Option<&str> {
        match self {
            Token::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "{s}"),
            Token::Star => write!(f, "*"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
        }
    }
}

/// Split a declaration into tokens. Columns in errors are 1-based.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '*' => Token::Star,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = c.to_string();
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(ident)
            }
            c => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: c,
                    column: source[..index].chars().count() + 1,
                })
            }
        };

        tokens.push(token);
    }

    Ok(tokens)
}

/// Render a sequence of type tokens as a canonical type spelling.
///
/// Identifiers are separated by a single space and every `*` is attached to the token before it, so
/// `const GLchar *const*` becomes `const GLchar* const*`.
pub fn spell_type(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        match token {
            Token::Star => result.push('*'),
            other => {
                if !result.is_empty() {
                    result.push(' ');
                }
                result.push_str(&other.to_string());
            }
        }
    }
    result
}
