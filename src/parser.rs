use crate::{
    ast::{Expr, Op, Token},
    lexer::{LexError, Lexer},
    path::{Path, PathError},
    value::Value,
};
use std::mem;

/// Parse errors for both surface syntaxes.
///
/// Always fatal to the parse call; a query is never partially parsed.
/// Positions are byte offsets into the infix query text; the nested-list
/// front-end reports structural errors without positions.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Lexer failure
    Lex(LexError),
    /// A token that cannot appear here
    UnexpectedToken { found: Token, position: usize },
    /// Input ended mid-expression (dangling operand or operator)
    UnexpectedEof { position: usize },
    /// An operator name the language does not define
    UnknownOperator { name: String, position: usize },
    /// A `(` without its matching `)`
    UnclosedParen { position: usize },
    /// Extra tokens after a complete expression
    TrailingInput { found: Token, position: usize },
    /// A field reference with an invalid path
    InvalidPath { error: PathError, position: usize },
    /// Wrong number of arguments for an operator (nested-list form)
    Arity {
        op: Op,
        expected: &'static str,
        found: usize,
    },
    /// Malformed nested-list structure
    Structure { message: String },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::UnexpectedToken { found, position } => {
                write!(f, "unexpected {} at position {}", found, position)
            }
            ParseError::UnexpectedEof { position } => {
                write!(f, "unexpected end of query at position {}", position)
            }
            ParseError::UnknownOperator { name, position } => {
                write!(f, "unknown operator '{}' at position {}", name, position)
            }
            ParseError::UnclosedParen { position } => {
                write!(f, "unclosed '(' at position {}", position)
            }
            ParseError::TrailingInput { found, position } => {
                write!(
                    f,
                    "trailing {} at position {} (combine clauses with AND/OR)",
                    found, position
                )
            }
            ParseError::InvalidPath { error, position } => {
                write!(f, "{} at position {}", error, position)
            }
            ParseError::Arity {
                op,
                expected,
                found,
            } => write!(
                f,
                "'{}' takes {} argument(s), got {}",
                op.name(),
                expected,
                found
            ),
            ParseError::Structure { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Recursive-descent parser for the infix surface syntax.
///
/// Precedence, tightest first: `NOT`, comparison operators, `AND`, `OR`;
/// parentheses override.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_pos: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_pos = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_pos,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_pos = self.lexer.token_start();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    /// Parse a complete predicate, requiring the whole input to be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;
        match &self.current_token {
            Token::Eof => Ok(expr),
            found => Err(ParseError::TrailingInput {
                found: found.clone(),
                position: self.current_pos,
            }),
        }
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::Or) {
            self.advance()?;
            let right = self.parse_and()?;
            left = Expr::call(Op::Or, vec![left, right]);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;

        while self.check(&Token::And) {
            self.advance()?;
            let right = self.parse_not()?;
            left = Expr::call(Op::And, vec![left, right]);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        if self.check(&Token::Not) {
            self.advance()?;
            let operand = self.parse_not()?; // right-associative
            return Ok(Expr::call(Op::Not, vec![operand]));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_operand()?;

        if let Token::Ident(name) = &self.current_token {
            let position = self.current_pos;
            match Op::from_name(name) {
                Some(op) if op.is_comparison() => {
                    self.advance()?;
                    let right = self.parse_operand()?;
                    return Ok(Expr::call(op, vec![left, right]));
                }
                // An operator-looking name we don't know is an error here,
                // not a bare string literal.
                None if name.ends_with('?') => {
                    return Err(ParseError::UnknownOperator {
                        name: name.clone(),
                        position,
                    });
                }
                _ => {}
            }
        }
        Ok(left)
    }

    /// An operand: a primary, optionally wrapped by prefix value functions
    /// (`lower-case :name`).
    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        if let Token::Ident(name) = &self.current_token {
            if let Some(op) = Op::from_name(name)
                && op.is_value_function()
            {
                self.advance()?;
                let arg = self.parse_operand()?;
                return Ok(Expr::call(op, vec![arg]));
            }
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.current_pos;
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Expr::Literal(Value::Integer(n)))
            }
            Token::Float(n) => {
                self.advance()?;
                Ok(Expr::Literal(Value::Float(n)))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Expr::Literal(Value::String(s)))
            }
            Token::Boolean(b) => {
                self.advance()?;
                Ok(Expr::Literal(Value::Boolean(b)))
            }
            Token::Null => {
                self.advance()?;
                Ok(Expr::Literal(Value::Null))
            }
            Token::Field(text) => {
                self.advance()?;
                let path = Path::parse(&text)
                    .map_err(|error| ParseError::InvalidPath { error, position })?;
                Ok(Expr::Path(path))
            }
            Token::Ident(name) => {
                // A comparison operator cannot start an operand; anything
                // else is an unquoted string literal (`:language eq? Python`).
                if Op::from_name(&name).is_some_and(|op| op.is_comparison()) {
                    return Err(ParseError::UnexpectedToken {
                        found: Token::Ident(name),
                        position,
                    });
                }
                self.advance()?;
                Ok(Expr::Literal(Value::String(name)))
            }
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_or()?;
                if !self.check(&Token::RParen) {
                    return Err(ParseError::UnclosedParen { position });
                }
                self.advance()?;
                Ok(expr)
            }
            Token::Eof => Err(ParseError::UnexpectedEof { position }),
            token => Err(ParseError::UnexpectedToken {
                found: token,
                position,
            }),
        }
    }
}

/// Parse an infix query string into an AST.
pub fn parse_query(text: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(text))?.parse()
}
