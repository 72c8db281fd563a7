use crate::error_kind::ErrorKind;
use crate::fs::MemoryFilesystem;
use crate::generate::Generator;
use crate::store::Context;
use crate::store::Store;
use crate::test_utils::TestProject;

#[test]
fn store_without_config_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("houdini.db"), 1).unwrap();
    store.bootstrap(&Context::new()).unwrap();

    let filesystem = MemoryFilesystem::new();
    let errors = Generator::new(&store, &filesystem)
        .run(&Context::new(), None)
        .unwrap_err();
    assert_eq!(errors.kinds(), vec![ErrorKind::StoreError]);
    assert!(errors.to_string().contains("no project config row"));
}

#[test]
fn empty_project_writes_nothing() {
    let project = TestProject::new();
    let (filesystem, summary) = project.generate();
    assert_eq!(summary.collected(), 0);
    assert_eq!(summary.written(), 0);
    assert!(filesystem.files().is_empty());
}

#[test]
fn zero_workers_still_runs() {
    let project = TestProject::with_documents("query TestQuery { version }");
    let (filesystem, result) = project.try_generate(0);
    assert_eq!(result.unwrap().written(), 1);
    assert!(filesystem.contents(project.config.artifact_path("TestQuery")).is_some());
}
