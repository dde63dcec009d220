//! Persisted selection and batch target resolution.

mod support;

use std::fs;

use kubefan::adapter::outbound::selection::FileSelectionStore;
use kubefan::infrastructure::config::settings::Config;
use kubefan::infrastructure::Session;
use kubefan::port::SelectionStore;
use support::kube::{names, write_kubeconfig};

#[test]
fn selection_file_is_newline_delimited() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("selected_contexts");
    let store = FileSelectionStore::new(&path);

    assert!(store.load().unwrap().is_empty());
    store.select_all(&names(&["alpha", "beta", "alpha"])).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nbeta");

    fs::write(&path, "  alpha \n\n gamma\n").unwrap();
    assert_eq!(store.load().unwrap(), names(&["alpha", "gamma"]));

    assert!(!store.toggle("alpha").unwrap());
    assert!(store.toggle("beta").unwrap());
    assert_eq!(store.load().unwrap(), names(&["gamma", "beta"]));
}

#[test]
fn session_targets_follow_selection_and_active_context() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        kubeconfig: Some(write_kubeconfig(dir.path())),
        selection_file: Some(dir.path().join("selected_contexts")),
        ..Config::default()
    };
    let session = Session::build(config).unwrap();

    assert_eq!(session.active_context().as_deref(), Some("alpha"));
    assert_eq!(session.batch_contexts(&[]).unwrap(), names(&["alpha"]));

    session.selection.select_all(&names(&["beta"])).unwrap();
    assert_eq!(session.batch_contexts(&[]).unwrap(), names(&["alpha"]));

    session
        .selection
        .select_all(&names(&["gamma", "beta"]))
        .unwrap();
    assert_eq!(session.batch_contexts(&[]).unwrap(), names(&["gamma", "beta"]));

    assert_eq!(
        session.batch_contexts(&names(&["beta"])).unwrap(),
        names(&["beta"])
    );
}
