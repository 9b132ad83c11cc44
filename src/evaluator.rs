//! Walks a parsed predicate against one record at a time.
//!
//! Evaluation results are `Option<Value>`: `None` is the ABSENT outcome of a
//! field path that does not resolve, distinct from `Value::Null`. The rules
//! for how ABSENT interacts with each operator are fixed here (and covered
//! by tests) rather than left to chance:
//!
//! - `eq?` treats ABSENT like `null`: a missing field compares equal to a
//!   `null` literal (and to another missing field) and unequal to everything
//!   else. `neq?` is the exact negation.
//! - Every other comparison with an ABSENT side evaluates to `false`.
//! - `lower-case`/`upper-case` propagate ABSENT.

use regex::Regex;

use crate::{
    ast::{Expr, Op},
    value::Value,
};

/// Errors that can occur while evaluating a predicate against a record.
///
/// These are per-record: under lenient filtering the record is excluded and
/// the error recorded, never aborting the whole collection.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Operator applied to an operand of the wrong kind
    TypeError(String),

    /// A predicate position evaluated to something other than a boolean
    NonBooleanPredicate { found: &'static str },

    /// The right operand of `matches?` is not a valid regex
    BadPattern(String),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::TypeError(msg) => write!(f, "type error: {}", msg),
            EvalError::NonBooleanPredicate { found } => {
                write!(f, "predicate evaluated to {}, expected boolean", found)
            }
            EvalError::BadPattern(msg) => write!(f, "invalid regex: {}", msg),
        }
    }
}

impl std::error::Error for EvalError {}

/// Evaluate an expression against a record.
///
/// `Ok(None)` is the ABSENT result: the expression was a field reference (or
/// a string transform of one) that did not resolve.
pub fn evaluate(expr: &Expr, record: &Value) -> Result<Option<Value>, EvalError> {
    match expr {
        Expr::Literal(value) => Ok(Some(value.clone())),
        Expr::Path(path) => Ok(path.resolve(record).cloned()),
        Expr::Call { op, args } => eval_call(*op, args, record),
    }
}

/// Evaluate a predicate, requiring a boolean result.
pub fn eval_predicate(expr: &Expr, record: &Value) -> Result<bool, EvalError> {
    match evaluate(expr, record)? {
        Some(Value::Boolean(b)) => Ok(b),
        Some(other) => Err(EvalError::NonBooleanPredicate {
            found: other.type_name(),
        }),
        None => Err(EvalError::NonBooleanPredicate { found: "absent" }),
    }
}

fn eval_call(op: Op, args: &[Expr], record: &Value) -> Result<Option<Value>, EvalError> {
    match op {
        // Short-circuit left to right.
        Op::And => {
            for arg in args {
                if !eval_predicate(arg, record)? {
                    return Ok(Some(Value::Boolean(false)));
                }
            }
            Ok(Some(Value::Boolean(true)))
        }
        Op::Or => {
            for arg in args {
                if eval_predicate(arg, record)? {
                    return Ok(Some(Value::Boolean(true)));
                }
            }
            Ok(Some(Value::Boolean(false)))
        }
        Op::Not => {
            let inner = eval_predicate(unary_arg(op, args)?, record)?;
            Ok(Some(Value::Boolean(!inner)))
        }

        Op::LowerCase | Op::UpperCase => {
            let arg = evaluate(unary_arg(op, args)?, record)?;
            match arg {
                None => Ok(None),
                Some(Value::String(s)) => {
                    let transformed = if op == Op::LowerCase {
                        s.to_lowercase()
                    } else {
                        s.to_uppercase()
                    };
                    Ok(Some(Value::String(transformed)))
                }
                Some(other) => Err(EvalError::TypeError(format!(
                    "{} requires a string, got {}",
                    op.name(),
                    other.type_name()
                ))),
            }
        }

        _ => {
            let [left_expr, right_expr] = args else {
                return Err(arity_error(op, args.len()));
            };
            let left = evaluate(left_expr, record)?;
            let right = evaluate(right_expr, record)?;
            apply_comparison(op, left.as_ref(), right.as_ref()).map(|b| Some(Value::Boolean(b)))
        }
    }
}

fn unary_arg(op: Op, args: &[Expr]) -> Result<&Expr, EvalError> {
    match args {
        [arg] => Ok(arg),
        _ => Err(arity_error(op, args.len())),
    }
}

fn arity_error(op: Op, found: usize) -> EvalError {
    EvalError::TypeError(format!("{} applied to {} argument(s)", op.name(), found))
}

fn apply_comparison(
    op: Op,
    left: Option<&Value>,
    right: Option<&Value>,
) -> Result<bool, EvalError> {
    match op {
        // Equality never raises: cross-type operands are simply unequal.
        Op::Eq => Ok(absent_aware_equal(left, right)),
        Op::Neq => Ok(!absent_aware_equal(left, right)),

        Op::Gt | Op::Gte | Op::Lt | Op::Lte => {
            let (Some(left), Some(right)) = (left, right) else {
                return Ok(false);
            };
            let ordering = compare_ordered(op, left, right)?;
            Ok(ordering)
        }

        Op::Contains | Op::StartsWith | Op::EndsWith => {
            let (Some(left), Some(right)) = (left, right) else {
                return Ok(false);
            };
            let (s, needle) = string_operands(op, left, right)?;
            Ok(match op {
                Op::Contains => s.contains(needle),
                Op::StartsWith => s.starts_with(needle),
                _ => s.ends_with(needle),
            })
        }

        Op::Matches => {
            let (Some(left), Some(right)) = (left, right) else {
                return Ok(false);
            };
            let (s, pattern) = string_operands(op, left, right)?;
            let re = Regex::new(pattern).map_err(|e| EvalError::BadPattern(e.to_string()))?;
            Ok(re.is_match(s))
        }

        Op::In => {
            let (Some(left), Some(right)) = (left, right) else {
                return Ok(false);
            };
            let Value::Array(items) = left else {
                return Err(EvalError::TypeError(format!(
                    "in? requires an array field, got {}",
                    left.type_name()
                )));
            };
            Ok(items.iter().any(|item| values_equal(item, right)))
        }

        // Logical and unary operators are handled in eval_call.
        _ => Err(EvalError::TypeError(format!(
            "{} is not a comparison operator",
            op.name()
        ))),
    }
}

/// Equality with the fixed ABSENT policy: ABSENT behaves like `null`.
fn absent_aware_equal(left: Option<&Value>, right: Option<&Value>) -> bool {
    let left = left.unwrap_or(&Value::Null);
    let right = right.unwrap_or(&Value::Null);
    values_equal(left, right)
}

/// Value equality with numeric cross-type comparison (1 == 1.0).
fn values_equal(a: &Value, b: &Value) -> bool {
    if a.is_number() && b.is_number() {
        match (a, b) {
            (Value::Integer(x), Value::Integer(y)) => x == y,
            _ => a.as_f64() == b.as_f64(),
        }
    } else {
        a == b
    }
}

fn compare_ordered(op: Op, left: &Value, right: &Value) -> Result<bool, EvalError> {
    use std::cmp::Ordering;

    let ordering = if left.is_number() && right.is_number() {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            _ => {
                let (a, b) = (left.as_f64().unwrap_or(f64::NAN), right.as_f64().unwrap_or(f64::NAN));
                a.partial_cmp(&b).ok_or_else(|| {
                    EvalError::TypeError("cannot order NaN".to_string())
                })?
            }
        }
    } else if let (Value::String(a), Value::String(b)) = (left, right) {
        a.cmp(b)
    } else {
        return Err(EvalError::TypeError(format!(
            "cannot compare {} {} {} (requires two numbers or two strings)",
            left.type_name(),
            op.name(),
            right.type_name()
        )));
    };

    Ok(match op {
        Op::Gt => ordering == Ordering::Greater,
        Op::Gte => ordering != Ordering::Less,
        Op::Lt => ordering == Ordering::Less,
        _ => ordering != Ordering::Greater,
    })
}

fn string_operands<'a>(
    op: Op,
    left: &'a Value,
    right: &'a Value,
) -> Result<(&'a str, &'a str), EvalError> {
    match (left.as_str(), right.as_str()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(EvalError::TypeError(format!(
            "{} requires string operands, got {} and {}",
            op.name(),
            left.type_name(),
            right.type_name()
        ))),
    }
}
