use crate::ast::Op;
use crate::path::Path;
use crate::value::Value;

/// Abstract Syntax Tree node representing a parsed query expression.
///
/// Both surface syntaxes parse to this tree; the evaluator walks it against
/// one record at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant scalar (or, from the nested-list form, any literal value).
    ///
    /// # Examples
    /// ```text
    /// 1000
    /// "Python"
    /// true
    /// null
    /// ```
    Literal(Value),

    /// A field reference, resolved against the record at evaluation time.
    ///
    /// # Examples
    /// ```text
    /// :stargazers_count
    /// :owner.login
    /// ```
    Path(Path),

    /// A named operator/function application.
    ///
    /// Arity is checked at parse time: comparisons take exactly two
    /// arguments, `not` one, `and`/`or` two or more, string transforms one.
    ///
    /// # Examples
    /// ```text
    /// :forks_count gte? 100
    /// lower-case :name
    /// :language eq? Python AND :archived eq? false
    /// ```
    Call { op: Op, args: Vec<Expr> },
}

impl Expr {
    /// Shorthand for a literal expression.
    pub fn literal(value: Value) -> Expr {
        Expr::Literal(value)
    }

    /// Shorthand for a call expression.
    pub fn call(op: Op, args: Vec<Expr>) -> Expr {
        Expr::Call { op, args }
    }
}
