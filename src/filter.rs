//! Applies a parsed predicate to every record in a collection.

use crate::{
    ast::Expr,
    evaluator::{self, EvalError},
    value::Value,
};

/// What to do when evaluating the predicate fails for one record.
///
/// Heterogeneous collections are expected (fields go missing or get renamed
/// across API versions), so the default tolerates per-record failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Exclude the failing record, record the error, keep going
    #[default]
    Lenient,
    /// Abort the whole filter on the first failing record
    Strict,
}

/// An evaluation failure tied to the record that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    /// Index of the record in the input collection
    pub index: usize,
    pub error: EvalError,
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {}: {}", self.index, self.error)
    }
}

impl std::error::Error for RecordError {}

/// Result of a lenient filter run: the matching subsequence plus whatever
/// went wrong along the way.
#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    /// Matching records, in input order
    pub matched: Vec<Value>,
    /// Per-record evaluation failures (empty under [`ErrorMode::Strict`])
    pub errors: Vec<RecordError>,
}

/// Filter a collection, keeping records for which the predicate is `true`.
///
/// Output order follows input order (stable filtering); inputs are never
/// mutated. Under [`ErrorMode::Lenient`] a record whose evaluation raises is
/// excluded and the error collected in the report; under
/// [`ErrorMode::Strict`] the first error aborts the call.
pub fn filter_records(
    records: &[Value],
    predicate: &Expr,
    mode: ErrorMode,
) -> Result<FilterReport, RecordError> {
    let mut report = FilterReport::default();

    for (index, record) in records.iter().enumerate() {
        match evaluator::eval_predicate(predicate, record) {
            Ok(true) => report.matched.push(record.clone()),
            Ok(false) => {}
            Err(error) => {
                let record_error = RecordError { index, error };
                match mode {
                    ErrorMode::Lenient => report.errors.push(record_error),
                    ErrorMode::Strict => return Err(record_error),
                }
            }
        }
    }

    Ok(report)
}
