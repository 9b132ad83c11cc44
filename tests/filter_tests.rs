// tests/filter_tests.rs
//
// Evaluation and filtering semantics over a small sample of repository
// records, mirroring the shapes GitHub's API returns.

use ghjq::evaluator::{EvalError, eval_predicate, evaluate};
use ghjq::filter::{ErrorMode, filter_records};
use ghjq::parser::parse_query;
use ghjq::value::Value;
use serde_json::json;

fn sample_repos() -> Vec<Value> {
    let array = json!([
        {
            "id": 1,
            "name": "DataScienceRepo",
            "language": "Python",
            "stargazers_count": 150,
            "forks_count": 30,
            "description": "A data science playground",
            "owner": {"login": "alice", "active": true}
        },
        {
            "id": 2,
            "name": "WebDevRepo",
            "language": "JavaScript",
            "stargazers_count": 40,
            "forks_count": 45,
            "description": "frontend things",
            "owner": {"login": "bob", "active": false}
        },
        {
            "id": 3,
            "name": "StatsLib",
            "language": "Python",
            "stargazers_count": 200,
            "forks_count": 60,
            "description": "statistics for humans",
            "owner": {"login": "carol", "active": true}
        },
        {
            "id": 4,
            "name": "EmptyRepo",
            "language": null,
            "stargazers_count": 0,
            "description": ""
        },
        {
            "id": 5,
            "name": "PolyglotRepo",
            "language": ["Python", "Rust"],
            "stargazers_count": 80,
            "forks_count": 12
        }
    ]);
    match Value::from(array) {
        Value::Array(records) => records,
        _ => unreachable!(),
    }
}

fn matched_ids(records: &[Value], query: &str) -> Vec<i64> {
    let predicate = parse_query(query).unwrap();
    let report = filter_records(records, &predicate, ErrorMode::Lenient).unwrap();
    report
        .matched
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

// ============================================================================
// Comparison operators
// ============================================================================

#[test]
fn test_eq() {
    assert_eq!(matched_ids(&sample_repos(), ":language eq? Python"), vec![1, 3]);
}

#[test]
fn test_neq_includes_missing_fields() {
    // Records 4 (null) and 5 (array) and 2 all differ from "Python";
    // a missing field also counts as "not equal".
    assert_eq!(
        matched_ids(&sample_repos(), ":language neq? Python"),
        vec![2, 4, 5]
    );
}

#[test]
fn test_gt() {
    assert_eq!(
        matched_ids(&sample_repos(), ":stargazers_count gt? 100"),
        vec![1, 3]
    );
}

#[test]
fn test_gte_and_lte() {
    assert_eq!(matched_ids(&sample_repos(), ":forks_count gte? 45"), vec![2, 3]);
    assert_eq!(matched_ids(&sample_repos(), ":forks_count lte? 30"), vec![1, 5]);
}

#[test]
fn test_lt() {
    assert_eq!(
        matched_ids(&sample_repos(), ":stargazers_count lt? 100"),
        vec![2, 4, 5]
    );
}

#[test]
fn test_numeric_cross_type_comparison() {
    assert_eq!(
        matched_ids(&sample_repos(), ":stargazers_count gt? 99.5"),
        vec![1, 3]
    );
}

#[test]
fn test_string_ordering() {
    assert_eq!(matched_ids(&sample_repos(), ":name lt? \"F\""), vec![1, 4]);
}

// ============================================================================
// String and membership operators
// ============================================================================

#[test]
fn test_contains() {
    assert_eq!(matched_ids(&sample_repos(), ":name contains? Repo"), vec![1, 2, 4, 5]);
}

#[test]
fn test_startswith_endswith() {
    assert_eq!(matched_ids(&sample_repos(), ":name startswith? Data"), vec![1]);
    assert_eq!(matched_ids(&sample_repos(), ":name endswith? Lib"), vec![3]);
}

#[test]
fn test_matches_regex() {
    assert_eq!(
        matched_ids(&sample_repos(), ":description matches? \"^A .*\""),
        vec![1]
    );
}

#[test]
fn test_in_array_membership() {
    assert_eq!(matched_ids(&sample_repos(), ":language in? Rust"), vec![5]);
}

#[test]
fn test_lower_case() {
    assert_eq!(
        matched_ids(&sample_repos(), "lower-case :name contains? data"),
        vec![1]
    );
}

// ============================================================================
// Absent vs null policy
// ============================================================================

#[test]
fn test_missing_field_comparison_is_false_not_error() {
    // Records 1-3 and 5 have no "archived" field; record 4 has no forks_count.
    let repos = sample_repos();
    assert_eq!(matched_ids(&repos, ":archived eq? true"), Vec::<i64>::new());
    let report = filter_records(
        &repos,
        &parse_query(":forks_count gt? 0").unwrap(),
        ErrorMode::Lenient,
    )
    .unwrap();
    assert!(report.errors.is_empty());
}

#[test]
fn test_absent_equals_null_literal() {
    // Fixed policy: eq? treats a missing field like an explicit null.
    // Record 4 has language: null; records 1,2,3,5 have non-null languages,
    // and a record with no language field at all would match too.
    let repos = sample_repos();
    assert_eq!(matched_ids(&repos, ":language eq? null"), vec![4]);
    assert_eq!(matched_ids(&repos, ":missing_field eq? null"), vec![1, 2, 3, 4, 5]);
    assert_eq!(matched_ids(&repos, ":missing_field neq? null"), Vec::<i64>::new());
}

#[test]
fn test_absent_propagates_through_string_functions() {
    let repos = sample_repos();
    assert_eq!(
        matched_ids(&repos, "lower-case :missing_field eq? null"),
        vec![1, 2, 3, 4, 5]
    );
}

// ============================================================================
// Logical combinators
// ============================================================================

#[test]
fn test_and() {
    assert_eq!(
        matched_ids(
            &sample_repos(),
            ":language eq? Python AND :stargazers_count gt? 50"
        ),
        vec![1, 3]
    );
}

#[test]
fn test_or() {
    assert_eq!(
        matched_ids(&sample_repos(), ":language eq? JavaScript OR :forks_count gt? 50"),
        vec![2, 3]
    );
}

#[test]
fn test_not() {
    assert_eq!(
        matched_ids(&sample_repos(), "NOT :language eq? Python"),
        vec![2, 4, 5]
    );
}

#[test]
fn test_nested_combinators() {
    assert_eq!(
        matched_ids(
            &sample_repos(),
            ":owner.active eq? true AND (:language eq? Python OR :language eq? JavaScript)"
        ),
        vec![1, 3]
    );
}

#[test]
fn test_short_circuit_masks_type_error() {
    // The right side would be a type error for every record, but the left
    // side of OR already decides for Python repos.
    let repos = sample_repos();
    assert_eq!(
        matched_ids(&repos, ":language eq? Python OR :name gt? 5"),
        vec![1, 3]
    );
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_type_mismatch_excludes_and_records_error() {
    let repos = sample_repos();
    let predicate = parse_query(":stargazers_count gt? \"one hundred\"").unwrap();
    let report = filter_records(&repos, &predicate, ErrorMode::Lenient).unwrap();
    assert!(report.matched.is_empty());
    assert_eq!(report.errors.len(), repos.len());
    assert!(matches!(report.errors[0].error, EvalError::TypeError(_)));
}

#[test]
fn test_contains_on_non_string_is_error() {
    let repos = sample_repos();
    let predicate = parse_query(":stargazers_count contains? \"1\"").unwrap();
    let report = filter_records(&repos, &predicate, ErrorMode::Lenient).unwrap();
    assert!(report.matched.is_empty());
    assert_eq!(report.errors.len(), repos.len());
}

#[test]
fn test_strict_mode_aborts_on_first_error() {
    let repos = sample_repos();
    let predicate = parse_query(":stargazers_count gt? \"one hundred\"").unwrap();
    let err = filter_records(&repos, &predicate, ErrorMode::Strict).unwrap_err();
    assert_eq!(err.index, 0);
}

#[test]
fn test_non_boolean_predicate() {
    let record = Value::from(json!({"name": "x"}));
    let predicate = parse_query(":name").unwrap();
    assert_eq!(
        eval_predicate(&predicate, &record),
        Err(EvalError::NonBooleanPredicate { found: "string" })
    );
}

#[test]
fn test_bad_regex_pattern() {
    let record = Value::from(json!({"name": "x"}));
    let predicate = parse_query(":name matches? \"(\"").unwrap();
    assert!(matches!(
        eval_predicate(&predicate, &record),
        Err(EvalError::BadPattern(_))
    ));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_literal_predicates() {
    let record = Value::from(json!({"anything": 1}));
    let t = parse_query("true").unwrap();
    let f = parse_query("false").unwrap();
    assert_eq!(evaluate(&t, &record), Ok(Some(Value::Boolean(true))));
    assert_eq!(evaluate(&f, &record), Ok(Some(Value::Boolean(false))));
}

#[test]
fn test_filter_is_idempotent() {
    let repos = sample_repos();
    let predicate = parse_query(":stargazers_count gt? 50").unwrap();
    let once = filter_records(&repos, &predicate, ErrorMode::Lenient).unwrap();
    let twice = filter_records(&once.matched, &predicate, ErrorMode::Lenient).unwrap();
    assert_eq!(once.matched, twice.matched);
}

#[test]
fn test_contradiction_is_empty() {
    let repos = sample_repos();
    let predicate = parse_query(":language eq? Python AND NOT :language eq? Python").unwrap();
    let report = filter_records(&repos, &predicate, ErrorMode::Lenient).unwrap();
    assert!(report.matched.is_empty());
}

#[test]
fn test_filter_preserves_input() {
    let repos = sample_repos();
    let before = repos.clone();
    let predicate = parse_query(":stargazers_count gt? 50").unwrap();
    let _ = filter_records(&repos, &predicate, ErrorMode::Lenient).unwrap();
    assert_eq!(repos, before);
}
