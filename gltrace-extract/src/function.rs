use std::fmt::Display;

use tracing::{instrument, trace};
use ustr::Ustr;

use crate::error::ParseError;
use crate::token::{spell_type, tokenize, Token};

type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Calling-convention and linkage decoration stripped from the head of a declaration
pub const DECORATIONS: &[&str] = &[
    "APIENTRY",
    "APIENTRYP",
    "GLAPIENTRY",
    "WINAPI",
    "__stdcall",
    "__cdecl",
    "extern",
    "KHRONOS_APICALL",
    "KHRONOS_APIENTRY",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub(crate) name: String,
    pub(crate) type_name: String,
}

impl Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

impl Argument {
    pub fn new(type_name: &str, name: &str) -> Argument {
        Argument {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The canonical spelling of this argument's type, e.g. `const GLchar* const*`
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// One native API entry point as declared in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub(crate) name: Ustr,
    pub(crate) result: String,
    pub(crate) arguments: Vec<Argument>,
}

impl FunctionSignature {
    pub fn name(&self) -> Ustr {
        self.name
    }

    /// The return type spelling. Empty if the declaration had no return type tokens.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn returns_void(&self) -> bool {
        self.result.is_empty() || self.result == "void"
    }
}

impl Display for FunctionSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = if self.result.is_empty() {
            "void"
        } else {
            &self.result
        };

        write!(f, "{result} {}(", self.name)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the run of identifiers and `*` making up a type followed by a name
    fn type_tokens(&mut self) -> Vec<Token> {
        let mut result = Vec::new();
        while let Some(token) = self.peek() {
            match token {
                Token::Ident(_) | Token::Star => {
                    result.push(token.clone());
                    self.pos += 1;
                }
                _ => break,
            }
        }
        result
    }
}

/// A declaration whose head (return type and name) has been parsed but whose parameter list has not.
///
/// Only the text before the opening parenthesis is tokenized up front, so the caller can decide from the name alone
/// whether the rest of the declaration is worth parsing.
pub struct Declaration {
    source: String,
    name: Ustr,
    result: String,
    /// Byte offset of the first character after the opening parenthesis
    arguments_start: usize,
}

impl Declaration {
    /// Parse everything up to and including the opening parenthesis
    #[instrument(level = "trace")]
    pub fn parse_head(source: &str, linkage_marker: &str) -> Result<Declaration> {
        let paren = match source.find('(') {
            Some(paren) => paren,
            None => return Err(malformed(source, "expected '(' after the function name")),
        };

        let mut parser = Parser {
            tokens: tokenize(&source[..paren])?,
            pos: 0,
        };

        match parser.next() {
            Some(Token::Ident(marker)) if marker == linkage_marker => (),
            _ => return Err(ParseError::MissingLinkageMarker(linkage_marker.to_string())),
        }

        let head: Vec<Token> = parser
            .type_tokens()
            .into_iter()
            .filter(|t| !matches!(t.ident(), Some(id) if DECORATIONS.contains(&id)))
            .collect();

        if parser.peek().is_some() {
            return Err(malformed(source, "expected '(' after the function name"));
        }

        let (name, result) = match head.split_last() {
            Some((Token::Ident(name), result)) => (Ustr::from(name.as_str()), spell_type(result)),
            _ => return Err(malformed(source, "missing function name")),
        };

        trace!("parsed head of {name} returning \"{result}\"");

        Ok(Declaration {
            source: source.to_string(),
            name,
            result,
            arguments_start: paren + 1,
        })
    }

    pub fn name(&self) -> Ustr {
        self.name
    }

    /// Parse the parameter list and trailing terminator to produce the full signature
    #[instrument(level = "trace", skip(self))]
    pub fn finish(self) -> Result<FunctionSignature> {
        trace!("parsing arguments of {}", self.name);

        let rest = &self.source[self.arguments_start..];
        let tokens = tokenize(rest).map_err(|e| match e {
            // report the column within the whole declaration
            ParseError::UnexpectedCharacter { ch, column } => ParseError::UnexpectedCharacter {
                ch,
                column: column + self.source[..self.arguments_start].chars().count(),
            },
            e => e,
        })?;

        let mut parser = Parser { tokens, pos: 0 };
        let arguments = self.parse_arguments(&mut parser)?;

        parser.eat(&Token::Semicolon);
        if parser.peek().is_some() {
            return Err(malformed(&self.source, "unexpected tokens after the parameter list"));
        }

        Ok(FunctionSignature {
            name: self.name,
            result: self.result,
            arguments,
        })
    }

    fn parse_arguments(&self, parser: &mut Parser) -> Result<Vec<Argument>> {
        let mut arguments = Vec::new();

        if parser.eat(&Token::RParen) {
            return Ok(arguments);
        }

        loop {
            let tokens = parser.type_tokens();

            if tokens.len() == 1 && tokens[0].ident() == Some("void") {
                // (void) is the same as ()
                if arguments.is_empty() && parser.eat(&Token::RParen) {
                    return Ok(arguments);
                }
                return Err(malformed(&self.source, "'void' must be the only parameter"));
            }

            match tokens.split_last() {
                Some((Token::Ident(name), type_tokens)) if !type_tokens.is_empty() => {
                    arguments.push(Argument {
                        name: name.clone(),
                        type_name: spell_type(type_tokens),
                    });
                }
                Some(_) => {
                    return Err(malformed(&self.source, "parameter is missing a type or a name"))
                }
                None => return Err(malformed(&self.source, "empty parameter")),
            }

            match parser.next() {
                Some(Token::Comma) => continue,
                Some(Token::RParen) => break,
                Some(_) => {
                    return Err(malformed(&self.source, "unexpected token in the parameter list"))
                }
                None => return Err(malformed(&self.source, "missing ')'")),
            }
        }

        Ok(arguments)
    }
}

impl std::fmt::Debug for Declaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Declaration({})", self.source)
    }
}

fn malformed(source: &str, reason: &'static str) -> ParseError {
    ParseError::MalformedDeclaration {
        declaration: source.to_string(),
        reason,
    }
}

/// Parse one full declaration line
pub fn parse_declaration(source: &str, linkage_marker: &str) -> Result<FunctionSignature> {
    Declaration::parse_head(source, linkage_marker)?.finish()
}
