//! Nested-list front-end for the query language.
//!
//! Queries arrive as JSON arrays whose head element names the operator:
//!
//! ```text
//! ["and", ["eq?", ["path", "language"], "Python"],
//!         ["gt?", ["path", "stargazers_count"], 50]]
//! ```
//!
//! The form is structurally recursive and maps directly onto [`Expr`] with
//! no tokenizing and no precedence ambiguity. Operator names may be spelled
//! with or without the trailing `?`, so queries written for the original
//! `ghj` toolkit (`["stars", "gt", 100]` style operators) keep working as
//! `["gt", ["path", "stars"], 100]`.

use crate::{
    ast::{Expr, Op},
    parser::ParseError,
    path::Path,
    value::Value,
};

/// Parse a nested-list query from its JSON representation.
pub fn parse_query(query: &serde_json::Value) -> Result<Expr, ParseError> {
    parse_node(query)
}

fn parse_node(node: &serde_json::Value) -> Result<Expr, ParseError> {
    match node {
        serde_json::Value::Array(items) => parse_list(items),
        // Scalars at argument position are literals.
        serde_json::Value::Null => Ok(Expr::Literal(Value::Null)),
        serde_json::Value::Bool(b) => Ok(Expr::Literal(Value::Boolean(*b))),
        serde_json::Value::Number(_) | serde_json::Value::String(_) => {
            Ok(Expr::Literal(Value::from(node.clone())))
        }
        serde_json::Value::Object(_) => Err(ParseError::Structure {
            message: "objects are not valid query nodes; use [op, args...] lists".to_string(),
        }),
    }
}

fn parse_list(items: &[serde_json::Value]) -> Result<Expr, ParseError> {
    let Some(head) = items.first() else {
        return Err(ParseError::Structure {
            message: "empty list in query".to_string(),
        });
    };

    let Some(name) = head.as_str() else {
        return Err(ParseError::Structure {
            message: format!("list head must be an operator name, got {}", head),
        });
    };

    if name == "path" {
        return parse_path(&items[1..]);
    }

    let Some(op) = Op::from_name(name) else {
        return Err(ParseError::UnknownOperator {
            name: name.to_string(),
            position: 0,
        });
    };

    let args: Vec<Expr> = items[1..]
        .iter()
        .map(parse_node)
        .collect::<Result<_, _>>()?;

    check_arity(op, args.len())?;
    Ok(Expr::call(op, args))
}

fn parse_path(args: &[serde_json::Value]) -> Result<Expr, ParseError> {
    let [serde_json::Value::String(text)] = args else {
        return Err(ParseError::Structure {
            message: "'path' takes exactly one string argument".to_string(),
        });
    };
    let path = Path::parse(text).map_err(|error| ParseError::InvalidPath {
        error,
        position: 0,
    })?;
    Ok(Expr::Path(path))
}

fn check_arity(op: Op, found: usize) -> Result<(), ParseError> {
    let valid = match op {
        Op::And | Op::Or => found >= 2,
        Op::Not => found == 1,
        op if op.is_comparison() => found == 2,
        _ => found == 1, // value functions
    };
    if valid {
        Ok(())
    } else {
        let expected = match op {
            Op::And | Op::Or => "two or more",
            Op::Not => "exactly one",
            op if op.is_comparison() => "exactly two",
            _ => "exactly one",
        };
        Err(ParseError::Arity {
            op,
            expected,
            found,
        })
    }
}

/// Convenience wrapper: parse the nested-list query from JSON text.
pub fn parse_query_text(text: &str) -> Result<Expr, ParseError> {
    let json: serde_json::Value = serde_json::from_str(text).map_err(|e| ParseError::Structure {
        message: format!("invalid JSON query: {}", e),
    })?;
    parse_query(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn and_requires_two_operands() {
        let query = json!(["and", ["gt?", ["path", "forks"], 100]]);
        assert!(matches!(
            parse_query(&query),
            Err(ParseError::Arity { op: Op::And, .. })
        ));
    }

    #[test]
    fn bare_operator_spelling_accepted() {
        let with_mark = parse_query(&json!(["gt?", ["path", "stars"], 100])).unwrap();
        let without = parse_query(&json!(["gt", ["path", "stars"], 100])).unwrap();
        assert_eq!(with_mark, without);
    }
}
