pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod filter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod path;
pub mod sets;
pub mod sexpr;
pub mod value;

pub use ast::{Expr, Op, Token};
pub use evaluator::{EvalError, eval_predicate, evaluate};
pub use filter::{ErrorMode, FilterReport, RecordError, filter_records};
pub use lexer::{LexError, Lexer};
pub use output::{records_to_json, records_to_json_pretty};
pub use parser::{ParseError, Parser, parse_query};
pub use path::{Path, PathError, Segment};
pub use sets::{Identity, Key, KeyError, KeyPolicy, SetReport, diff, intersect, union};
pub use value::{Value, records_from_json};
