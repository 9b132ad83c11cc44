//! Identity-keyed set operations over record collections.
//!
//! Two records with the same identity key are "the same repository" for set
//! purposes regardless of other field differences, so a repository fetched
//! at different times (with drifting star counts) still deduplicates. The
//! key comes from a configured field path, `id` by default; there is no
//! process-wide identity configuration, callers pass an [`Identity`] in.

use std::collections::HashSet;

use crate::{path::Path, value::Value};

/// A hashable identity key derived from a record.
///
/// Floats, arrays, objects, and null cannot key a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Integer(n) => write!(f, "{}", n),
            Key::String(s) => write!(f, "{}", s),
            Key::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A record could not produce an identity key.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyError {
    /// The identity path resolved to absent
    Missing { path: String },
    /// The identity path resolved to a value that cannot be a key
    Unsupported { path: String, kind: &'static str },
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::Missing { path } => {
                write!(f, "record has no value at identity path '{}'", path)
            }
            KeyError::Unsupported { path, kind } => {
                write!(f, "identity path '{}' resolved to {}, which cannot key a record", path, kind)
            }
        }
    }
}

impl std::error::Error for KeyError {}

/// Derives a stable key for a record from a configured field path.
#[derive(Debug, Clone)]
pub struct Identity {
    path: Path,
}

impl Identity {
    pub fn new(path: Path) -> Self {
        Identity { path }
    }

    /// The default identity: the GitHub repository `id` field.
    pub fn default_id() -> Self {
        // "id" is a valid non-empty path.
        Identity {
            path: Path::parse("id").expect("'id' is a valid path"),
        }
    }

    pub fn key(&self, record: &Value) -> Result<Key, KeyError> {
        let Some(value) = self.path.resolve(record) else {
            return Err(KeyError::Missing {
                path: self.path.to_string(),
            });
        };
        match value {
            Value::Integer(n) => Ok(Key::Integer(*n)),
            Value::String(s) => Ok(Key::String(s.clone())),
            Value::Boolean(b) => Ok(Key::Boolean(*b)),
            other => Err(KeyError::Unsupported {
                path: self.path.to_string(),
                kind: other.type_name(),
            }),
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Identity::default_id()
    }
}

/// What to do with a record that has no resolvable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Leave the record out of the result and record the failure
    #[default]
    Drop,
    /// Fail the whole set operation on the first unkeyable record
    Abort,
}

/// A record dropped from a set operation because it could not be keyed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Index of the source collection
    pub collection: usize,
    /// Index of the record within that collection
    pub index: usize,
    pub error: KeyError,
}

impl std::fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "collection {}, record {}: {}",
            self.collection, self.index, self.error
        )
    }
}

/// Result of a set operation under [`KeyPolicy::Drop`].
#[derive(Debug, Clone, Default)]
pub struct SetReport {
    /// Resulting records, order-stable per the earliest source collection
    pub records: Vec<Value>,
    /// Records that could not participate (empty under [`KeyPolicy::Abort`])
    pub skipped: Vec<SkippedRecord>,
}

/// Union of N >= 1 collections, deduplicated by key.
///
/// First occurrence wins: iteration goes by collection order, then
/// in-collection order, so divergent field values under the same key resolve
/// to the earliest record seen.
pub fn union(
    collections: &[Vec<Value>],
    identity: &Identity,
    policy: KeyPolicy,
) -> Result<SetReport, SkippedRecord> {
    let mut report = SetReport::default();
    let mut seen: HashSet<Key> = HashSet::new();

    for (collection, records) in collections.iter().enumerate() {
        for (index, record) in records.iter().enumerate() {
            match identity.key(record) {
                Ok(key) => {
                    if seen.insert(key) {
                        report.records.push(record.clone());
                    }
                }
                Err(error) => handle_skip(&mut report, policy, collection, index, error)?,
            }
        }
    }

    Ok(report)
}

/// Intersection of N >= 1 collections: records whose key appears in every
/// collection, field values taken from the first collection, deduplicated.
pub fn intersect(
    collections: &[Vec<Value>],
    identity: &Identity,
    policy: KeyPolicy,
) -> Result<SetReport, SkippedRecord> {
    let Some((first, rest)) = collections.split_first() else {
        return Ok(SetReport::default());
    };

    let mut report = SetReport::default();

    // Key sets of the other collections; membership tests only.
    let mut other_keys: Vec<HashSet<Key>> = Vec::with_capacity(rest.len());
    for (offset, records) in rest.iter().enumerate() {
        let keys = collect_keys(records, identity, policy, offset + 1, &mut report)?;
        other_keys.push(keys);
    }

    let mut seen: HashSet<Key> = HashSet::new();
    for (index, record) in first.iter().enumerate() {
        match identity.key(record) {
            Ok(key) => {
                if other_keys.iter().all(|keys| keys.contains(&key)) && seen.insert(key) {
                    report.records.push(record.clone());
                }
            }
            Err(error) => handle_skip(&mut report, policy, 0, index, error)?,
        }
    }

    Ok(report)
}

/// Records of `first` whose key is absent from every subtrahend collection.
///
/// With no subtrahends this is `first` key-deduplicated.
pub fn diff(
    first: &[Value],
    subtrahends: &[Vec<Value>],
    identity: &Identity,
    policy: KeyPolicy,
) -> Result<SetReport, SkippedRecord> {
    let mut report = SetReport::default();

    let mut excluded: HashSet<Key> = HashSet::new();
    for (offset, records) in subtrahends.iter().enumerate() {
        let keys = collect_keys(records, identity, policy, offset + 1, &mut report)?;
        excluded.extend(keys);
    }

    let mut seen: HashSet<Key> = HashSet::new();
    for (index, record) in first.iter().enumerate() {
        match identity.key(record) {
            Ok(key) => {
                if !excluded.contains(&key) && seen.insert(key) {
                    report.records.push(record.clone());
                }
            }
            Err(error) => handle_skip(&mut report, policy, 0, index, error)?,
        }
    }

    Ok(report)
}

fn collect_keys(
    records: &[Value],
    identity: &Identity,
    policy: KeyPolicy,
    collection: usize,
    report: &mut SetReport,
) -> Result<HashSet<Key>, SkippedRecord> {
    let mut keys = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        match identity.key(record) {
            Ok(key) => {
                keys.insert(key);
            }
            Err(error) => handle_skip(report, policy, collection, index, error)?,
        }
    }
    Ok(keys)
}

fn handle_skip(
    report: &mut SetReport,
    policy: KeyPolicy,
    collection: usize,
    index: usize,
    error: KeyError,
) -> Result<(), SkippedRecord> {
    let skipped = SkippedRecord {
        collection,
        index,
        error,
    };
    match policy {
        KeyPolicy::Drop => {
            report.skipped.push(skipped);
            Ok(())
        }
        KeyPolicy::Abort => Err(skipped),
    }
}
