/// Named operators of the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Comparison
    /// Equal (`eq?`)
    Eq,
    /// Not equal (`neq?`)
    Neq,
    /// Greater than (`gt?`)
    Gt,
    /// Greater than or equal (`gte?`)
    Gte,
    /// Less than (`lt?`)
    Lt,
    /// Less than or equal (`lte?`)
    Lte,

    // String tests
    /// Substring test (`contains?`)
    Contains,
    /// Prefix test (`startswith?`)
    StartsWith,
    /// Suffix test (`endswith?`)
    EndsWith,
    /// Regex match (`matches?`)
    Matches,

    // Membership
    /// Array membership (`in?`): value is an element of the field's array
    In,

    // String transforms
    /// Lowercase a string (`lower-case`)
    LowerCase,
    /// Uppercase a string (`upper-case`)
    UpperCase,

    // Logical
    /// Logical AND, two or more operands
    And,
    /// Logical OR, two or more operands
    Or,
    /// Logical NOT, exactly one operand
    Not,
}

impl Op {
    /// Look up an operator by its surface name.
    ///
    /// The trailing `?` of the infix spelling is optional, so `"gt"` and
    /// `"gt?"` name the same operator. Logical operator names are matched
    /// case-insensitively (`AND`, `and`).
    pub fn from_name(name: &str) -> Option<Op> {
        let bare = name.strip_suffix('?').unwrap_or(name);
        match bare.to_ascii_lowercase().as_str() {
            "eq" => Some(Op::Eq),
            "neq" => Some(Op::Neq),
            "gt" => Some(Op::Gt),
            "gte" => Some(Op::Gte),
            "lt" => Some(Op::Lt),
            "lte" => Some(Op::Lte),
            "contains" => Some(Op::Contains),
            "startswith" => Some(Op::StartsWith),
            "endswith" => Some(Op::EndsWith),
            "matches" | "regex" => Some(Op::Matches),
            "in" => Some(Op::In),
            "lower-case" => Some(Op::LowerCase),
            "upper-case" => Some(Op::UpperCase),
            "and" => Some(Op::And),
            "or" => Some(Op::Or),
            "not" => Some(Op::Not),
            _ => None,
        }
    }

    /// Canonical surface spelling, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Eq => "eq?",
            Op::Neq => "neq?",
            Op::Gt => "gt?",
            Op::Gte => "gte?",
            Op::Lt => "lt?",
            Op::Lte => "lte?",
            Op::Contains => "contains?",
            Op::StartsWith => "startswith?",
            Op::EndsWith => "endswith?",
            Op::Matches => "matches?",
            Op::In => "in?",
            Op::LowerCase => "lower-case",
            Op::UpperCase => "upper-case",
            Op::And => "and",
            Op::Or => "or",
            Op::Not => "not",
        }
    }

    /// Binary operators that sit between two operands in the infix form.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Op::Eq
                | Op::Neq
                | Op::Gt
                | Op::Gte
                | Op::Lt
                | Op::Lte
                | Op::Contains
                | Op::StartsWith
                | Op::EndsWith
                | Op::Matches
                | Op::In
        )
    }

    /// Unary value functions applied prefix-style in the infix form.
    pub fn is_value_function(&self) -> bool {
        matches!(self, Op::LowerCase | Op::UpperCase)
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
