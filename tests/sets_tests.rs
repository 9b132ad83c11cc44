// tests/sets_tests.rs
//
// Identity-keyed union, intersection, and difference over collections of
// repository records.

use ghjq::path::Path;
use ghjq::sets::{Identity, Key, KeyError, KeyPolicy, diff, intersect, union};
use ghjq::value::Value;
use serde_json::json;

fn repos(entries: &[(i64, &str)]) -> Vec<Value> {
    entries
        .iter()
        .map(|(id, name)| Value::from(json!({"id": id, "name": name})))
        .collect()
}

fn ids(records: &[Value]) -> Vec<i64> {
    records
        .iter()
        .map(|record| match record {
            Value::Object(map) => match map.get("id") {
                Some(Value::Integer(id)) => *id,
                other => panic!("bad id: {:?}", other),
            },
            other => panic!("record is not an object: {:?}", other),
        })
        .collect()
}

fn name_of(record: &Value) -> &str {
    match record {
        Value::Object(map) => match map.get("name") {
            Some(Value::String(s)) => s,
            other => panic!("bad name: {:?}", other),
        },
        other => panic!("record is not an object: {:?}", other),
    }
}

// ============================================================================
// Union
// ============================================================================

#[test]
fn test_union_deduplicates_by_id() {
    let a = repos(&[(1, "one"), (2, "two")]);
    let b = repos(&[(2, "two"), (3, "three")]);
    let report = union(&[a, b], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1, 2, 3]);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_union_first_occurrence_wins() {
    // Same id fetched twice with drifted fields: the earliest record is kept.
    let a = vec![Value::from(json!({"id": 1, "name": "old", "stargazers_count": 10}))];
    let b = vec![Value::from(json!({"id": 1, "name": "new", "stargazers_count": 25}))];
    let report = union(&[a, b], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(report.records.len(), 1);
    assert_eq!(name_of(&report.records[0]), "old");
}

#[test]
fn test_union_with_itself_is_dedup() {
    let a = repos(&[(1, "one"), (2, "two"), (1, "one-again")]);
    let report = union(&[a.clone(), a], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1, 2]);
}

#[test]
fn test_union_single_collection() {
    let a = repos(&[(3, "c"), (1, "a"), (3, "c-dup")]);
    let report = union(&[a], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![3, 1]);
}

// ============================================================================
// Intersection
// ============================================================================

#[test]
fn test_intersect_keeps_common_ids() {
    let a = repos(&[(1, "one"), (2, "two"), (3, "three")]);
    let b = repos(&[(2, "two"), (3, "three"), (4, "four")]);
    let c = repos(&[(3, "three"), (2, "two"), (5, "five")]);
    let report = intersect(&[a, b, c], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![2, 3]);
}

#[test]
fn test_intersect_takes_fields_from_first_collection() {
    let a = vec![Value::from(json!({"id": 7, "name": "mine"}))];
    let b = vec![Value::from(json!({"id": 7, "name": "theirs"}))];
    let report = intersect(&[a, b], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(name_of(&report.records[0]), "mine");
}

#[test]
fn test_intersect_disjoint_is_empty() {
    let a = repos(&[(1, "one")]);
    let b = repos(&[(2, "two")]);
    let report = intersect(&[a, b], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert!(report.records.is_empty());
}

#[test]
fn test_intersect_key_commutativity() {
    let a = repos(&[(1, "a1"), (2, "a2"), (4, "a4")]);
    let b = repos(&[(2, "b2"), (4, "b4"), (9, "b9")]);
    let identity = Identity::default();
    let ab = intersect(&[a.clone(), b.clone()], &identity, KeyPolicy::Drop).unwrap();
    let ba = intersect(&[b, a], &identity, KeyPolicy::Drop).unwrap();
    let mut ab_ids = ids(&ab.records);
    let mut ba_ids = ids(&ba.records);
    ab_ids.sort_unstable();
    ba_ids.sort_unstable();
    assert_eq!(ab_ids, ba_ids);
}

// ============================================================================
// Difference
// ============================================================================

#[test]
fn test_diff_removes_subtrahend_ids() {
    let a = repos(&[(1, "one"), (2, "two"), (3, "three")]);
    let b = repos(&[(2, "two")]);
    let report = diff(&a, &[b], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1, 3]);
}

#[test]
fn test_diff_with_itself_is_empty() {
    let a = repos(&[(1, "one"), (2, "two")]);
    let report = diff(&a, &[a.clone()], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert!(report.records.is_empty());
}

#[test]
fn test_diff_multiple_subtrahends() {
    let a = repos(&[(1, "one"), (2, "two"), (3, "three"), (4, "four")]);
    let b = repos(&[(2, "two")]);
    let c = repos(&[(4, "four"), (5, "five")]);
    let report = diff(&a, &[b, c], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1, 3]);
}

#[test]
fn test_diff_no_subtrahends_deduplicates() {
    let a = repos(&[(1, "one"), (1, "one-dup"), (2, "two")]);
    let report = diff(&a, &[], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1, 2]);
}

// ============================================================================
// Identity keys and policies
// ============================================================================

#[test]
fn test_custom_identity_path() {
    let identity = Identity::new(Path::parse("owner.login").unwrap());
    let a = vec![
        Value::from(json!({"id": 1, "owner": {"login": "alice"}})),
        Value::from(json!({"id": 2, "owner": {"login": "alice"}})),
        Value::from(json!({"id": 3, "owner": {"login": "bob"}})),
    ];
    let report = union(&[a], &identity, KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1, 3]);
}

#[test]
fn test_string_and_boolean_keys() {
    let identity = Identity::new(Path::parse("name").unwrap());
    assert_eq!(
        identity.key(&Value::from(json!({"name": "x"}))),
        Ok(Key::String("x".to_string()))
    );
    let identity = Identity::new(Path::parse("fork").unwrap());
    assert_eq!(
        identity.key(&Value::from(json!({"fork": false}))),
        Ok(Key::Boolean(false))
    );
}

#[test]
fn test_drop_policy_records_skips() {
    let a = vec![
        Value::from(json!({"id": 1})),
        Value::from(json!({"name": "no id here"})),
        Value::from(json!({"id": null})),
    ];
    let report = union(&[a], &Identity::default(), KeyPolicy::Drop).unwrap();
    assert_eq!(ids(&report.records), vec![1]);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].index, 1);
    assert!(matches!(report.skipped[0].error, KeyError::Missing { .. }));
    assert!(matches!(report.skipped[1].error, KeyError::Unsupported { .. }));
}

#[test]
fn test_abort_policy_fails_on_first_unkeyable_record() {
    let a = vec![Value::from(json!({"id": 1}))];
    let b = vec![Value::from(json!({"stars": 9}))];
    let err = union(&[a, b], &Identity::default(), KeyPolicy::Abort).unwrap_err();
    assert_eq!(err.collection, 1);
    assert_eq!(err.index, 0);
}

#[test]
fn test_float_id_is_unsupported() {
    let identity = Identity::default();
    let err = identity.key(&Value::from(json!({"id": 1.5}))).unwrap_err();
    assert_eq!(
        err,
        KeyError::Unsupported {
            path: "id".to_string(),
            kind: "float"
        }
    );
}
