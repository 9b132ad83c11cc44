/// Lexical tokens of the infix surface syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 1000
    /// -10
    /// ```
    Integer(i64),

    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// -0.5
    /// ```
    Float(f64),

    /// String literal, single- or double-quoted
    ///
    /// # Examples
    /// ```text
    /// "machine learning"
    /// 'data'
    /// ```
    String(String),

    /// Boolean literal (`true` / `false`)
    Boolean(bool),

    /// Null literal
    Null,

    /// Field reference with a leading colon
    ///
    /// The payload is the raw dotted path text, validated during parsing.
    ///
    /// # Examples
    /// ```text
    /// :stargazers_count
    /// :owner.login
    /// ```
    Field(String),

    /// Bare identifier: an operator name (`gt?`, `lower-case`) or, in
    /// operand position, an unquoted string literal (`Python`)
    Ident(String),

    // Keywords (case-insensitive)
    /// Logical AND keyword
    And,

    /// Logical OR keyword
    Or,

    /// Logical NOT keyword
    Not,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{}", n),
            Token::Float(n) => write!(f, "{}", n),
            Token::String(s) => write!(f, "\"{}\"", s),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::Null => write!(f, "null"),
            Token::Field(path) => write!(f, ":{}", path),
            Token::Ident(name) => write!(f, "{}", name),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::Not => write!(f, "NOT"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
