//! Execute filter queries against record collections

use super::CliError;
use crate::{
    ast::Expr,
    filter::{self, ErrorMode, FilterReport},
    parser, sexpr,
    value::{self, Value},
};

/// Which surface syntax the query string is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuerySyntax {
    /// Infix/keyword form: `:language eq? Python AND :stargazers_count gt? 50`
    #[default]
    Infix,
    /// Nested-list form as JSON: `["and", ["eq?", ["path","language"], "Python"], ...]`
    NestedList,
}

/// Options for the filter command
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// The query text
    pub query: String,
    /// Syntax of the query text
    pub syntax: QuerySyntax,
    /// JSON input string (an array of records)
    pub input: Option<String>,
    /// Abort on the first record that fails to evaluate
    pub strict: bool,
}

/// Parse the query in the requested syntax.
pub fn parse_filter_query(query: &str, syntax: QuerySyntax) -> Result<Expr, CliError> {
    let expr = match syntax {
        QuerySyntax::Infix => parser::parse_query(query)?,
        QuerySyntax::NestedList => sexpr::parse_query_text(query)?,
    };
    Ok(expr)
}

/// Execute a filter operation end to end.
pub fn execute_filter(options: &FilterOptions) -> Result<FilterReport, CliError> {
    let predicate = parse_filter_query(&options.query, options.syntax)?;

    let input = options.input.as_ref().ok_or(CliError::NoInput)?;
    let records: Vec<Value> = value::records_from_json(input)?;

    let mode = if options.strict {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    };

    let report = filter::filter_records(&records, &predicate, mode)?;
    Ok(report)
}
