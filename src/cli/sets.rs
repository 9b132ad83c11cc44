//! Execute set operations across record collections

use super::CliError;
use crate::{
    path::Path,
    sets::{self, Identity, KeyPolicy, SetReport},
    value::Value,
};

/// Which set operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Intersect,
    Diff,
}

/// Options for a set command
#[derive(Debug, Clone)]
pub struct SetOptions {
    pub op: SetOp,
    /// Identity field path (dotted), e.g. `id` or `owner.login`
    pub key: String,
    /// Fail the whole operation if any record has no identity
    pub abort_on_missing_key: bool,
}

impl Default for SetOptions {
    fn default() -> Self {
        SetOptions {
            op: SetOp::Union,
            key: "id".to_string(),
            abort_on_missing_key: false,
        }
    }
}

/// Execute a set operation over already-loaded collections.
pub fn execute_set_op(
    options: &SetOptions,
    collections: &[Vec<Value>],
) -> Result<SetReport, CliError> {
    let identity = Identity::new(Path::parse(&options.key)?);
    let policy = if options.abort_on_missing_key {
        KeyPolicy::Abort
    } else {
        KeyPolicy::Drop
    };

    let report = match options.op {
        SetOp::Union => sets::union(collections, &identity, policy)?,
        SetOp::Intersect => sets::intersect(collections, &identity, policy)?,
        SetOp::Diff => {
            let Some((first, rest)) = collections.split_first() else {
                return Ok(SetReport::default());
            };
            sets::diff(first, rest, &identity, policy)?
        }
    };
    Ok(report)
}
