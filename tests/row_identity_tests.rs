//! Row identity codec properties.

use kubefan::domain::row::{join, split};
use kubefan::domain::{RowId, MULTI_CONTEXT_SEP};

const CONTEXTS: &[&str] = &[
    "",
    "prod",
    "kind-kind",
    "gke_project_europe-west1_main",
    "arn:aws:eks:us-east-1:123456789012:cluster/core",
    "user@cluster",
];

const PATHS: &[&str] = &["", "node-1", "default/web-0", "kube-system/coredns-5d78c9869d-abcde"];

#[test]
fn join_split_round_trip_for_all_pairs() {
    for context in CONTEXTS {
        for path in PATHS {
            assert!(!context.contains(MULTI_CONTEXT_SEP) && !path.contains(MULTI_CONTEXT_SEP));
            let id = join(context, path);
            assert_eq!(split(&id), (*context, *path), "id {id:?}");
        }
    }
}

#[test]
fn ids_without_separator_are_single_cluster() {
    for path in PATHS {
        assert_eq!(split(path), ("", *path));
        let row = RowId::from(*path);
        assert!(!row.is_multi_context());
    }
}

#[test]
fn row_ids_order_by_context_first() {
    let mut ids = vec![
        RowId::join("b", "default/a"),
        RowId::join("a", "default/z"),
    ];
    ids.sort();
    assert_eq!(ids[0].split().0, "a");
}
