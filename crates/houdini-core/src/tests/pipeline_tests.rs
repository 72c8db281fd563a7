use crate::error_kind::ErrorKind;
use crate::fs::MemoryFilesystem;
use crate::generate::Generator;
use crate::hash::sha256_hex;
use crate::store::Context;
use crate::test_utils::TestProject;
use serde_json::json;

const DOCUMENTS: &str = r#"
    fragment UserInfo on User {
        firstName
        bestFriend {
            name
        }
    }

    query Viewer {
        viewer {
            ...UserInfo
        }
    }

    query Entities {
        entities {
            ... on User {
                firstName
            }
            ... on Pet {
                name
            }
        }
    }

    mutation AddFriend($id: ID!) {
        addFriend(id: $id) {
            ...UserInfo
        }
    }

    subscription NewUser {
        newUser {
            id
        }
    }
"#;

#[test]
fn generate_writes_one_artifact_per_document() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (filesystem, summary) = project.generate();

    assert!(!summary.cancelled());
    assert_eq!(summary.collected(), 5);
    let names: Vec<&str> = summary.artifacts().iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["AddFriend", "Entities", "NewUser", "UserInfo", "Viewer"]);
    for name in names {
        let module = project.artifact_file(&filesystem, name);
        assert!(module.starts_with("export default {\n"));
    }
    assert!(filesystem.is_dir(project.config.artifact_directory()));
}

#[test]
fn artifact_kinds_follow_document_kinds() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (filesystem, _) = project.generate();

    let kind = |name| project.artifact_json(&filesystem, name)["kind"].clone();
    assert_eq!(kind("AddFriend"), "HoudiniMutation");
    assert_eq!(kind("Entities"), "HoudiniQuery");
    assert_eq!(kind("NewUser"), "HoudiniSubscription");
    assert_eq!(kind("UserInfo"), "HoudiniFragment");

    let mutation = project.artifact_json(&filesystem, "AddFriend");
    assert_eq!(mutation["rootType"], "Mutation");
    assert_eq!(mutation["policy"], "CacheOrNetwork");
    let fragment = project.artifact_json(&filesystem, "UserInfo");
    assert_eq!(fragment["rootType"], "User");
    assert!(fragment.get("policy").is_none());
}

#[test]
fn regenerating_is_byte_identical() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (first, first_summary) = project.generate();
    let (second, second_summary) = project.generate();

    assert_eq!(first_summary, second_summary);
    assert_eq!(first.files(), second.files());
    for path in first.files() {
        assert_eq!(first.contents(&path), second.contents(&path));
    }
}

#[test]
fn worker_count_does_not_change_output() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (single, single_summary) = project.try_generate(1);
    let (many, many_summary) = project.try_generate(4);

    assert_eq!(single_summary.unwrap(), many_summary.unwrap());
    for path in single.files() {
        assert_eq!(single.contents(&path), many.contents(&path));
    }
}

#[test]
fn artifact_hash_covers_the_raw_text() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (filesystem, summary) = project.generate();

    for artifact in summary.artifacts() {
        assert_eq!(artifact.hash(), sha256_hex(artifact.raw()));
        let module = project.artifact_file(&filesystem, artifact.name());
        assert!(module.ends_with(&format!("\"HoudiniHash={}\";\n", artifact.hash())));
    }
}

#[test]
fn printed_text_and_hash_are_stored() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (_, summary) = project.generate();
    let viewer = summary
        .artifacts()
        .iter()
        .find(|artifact| artifact.name() == "Viewer")
        .unwrap();

    let conn = project.store.take(&Context::new()).unwrap();
    let (printed, hash): (String, String) = conn
        .query_row(
            "SELECT printed, hash FROM documents WHERE name = 'Viewer'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(hash, viewer.hash());
    assert!(viewer.raw().starts_with(&printed));
    assert!(!printed.contains("fragment UserInfo"));
}

#[test]
fn abstract_selections_get_a_type_map() {
    let project = TestProject::with_documents(DOCUMENTS);
    let (filesystem, _) = project.generate();
    let artifact = project.artifact_json(&filesystem, "Entities");

    let entities = &artifact["selection"]["fields"]["entities"];
    assert_eq!(entities["abstract"], true);
    let abstract_fields = &entities["selection"]["abstractFields"];
    assert_eq!(abstract_fields["typeMap"], json!({ "Cat": "Pet", "Dog": "Pet" }));

    let user = abstract_fields["fields"]["User"].as_object().unwrap();
    assert!(user.contains_key("__typename"));
    assert!(user.contains_key("firstName"));
    assert!(user.contains_key("id"));
    assert!(!user.contains_key("name"));
    let pet = abstract_fields["fields"]["Pet"].as_object().unwrap();
    assert!(pet.contains_key("name"));
    assert!(!pet.contains_key("firstName"));
}

// =============================================================================
// Tasks
// =============================================================================

#[test]
fn task_limits_emitted_documents_but_collects_their_fragments() {
    let project = TestProject::new();
    project.ingest(
        Some("first"),
        r#"
        fragment UserInfo on User {
            firstName
        }
        "#,
    );
    project.ingest(
        Some("second"),
        r#"
        query Viewer {
            viewer {
                ...UserInfo
            }
        }
        "#,
    );

    let filesystem = MemoryFilesystem::new();
    let summary = Generator::new(&project.store, &filesystem)
        .with_workers(2)
        .run(&Context::new(), Some("second"))
        .unwrap();

    assert_eq!(summary.collected(), 2);
    let names: Vec<&str> = summary.artifacts().iter().map(|a| a.name()).collect();
    assert_eq!(names, vec!["Viewer"]);
    assert!(summary.artifacts()[0].raw().contains("fragment UserInfo on User"));
    assert_eq!(filesystem.files(), vec![project.config.artifact_path("Viewer")]);
}

#[test]
fn unknown_task_writes_nothing() {
    let project = TestProject::with_documents(DOCUMENTS);
    let filesystem = MemoryFilesystem::new();
    let summary = Generator::new(&project.store, &filesystem)
        .run(&Context::new(), Some("missing"))
        .unwrap();

    assert_eq!(summary.written(), 0);
    assert!(filesystem.files().is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn cancelled_run_is_not_an_error() {
    let project = TestProject::with_documents(DOCUMENTS);
    let filesystem = MemoryFilesystem::new();
    let ctx = Context::new();
    ctx.cancel();

    let summary = Generator::new(&project.store, &filesystem)
        .run(&ctx, None)
        .unwrap();
    assert!(summary.cancelled());
    assert_eq!(summary.written(), 0);
    assert!(filesystem.files().is_empty());
}

#[test]
fn failed_rename_leaves_no_partial_artifact() {
    let project = TestProject::with_documents("query TestQuery { version }");
    let filesystem = MemoryFilesystem::new();
    filesystem.set_fail_renames(true);

    let errors = Generator::new(&project.store, &filesystem)
        .run(&Context::new(), None)
        .unwrap_err();
    assert_eq!(errors.kinds(), vec![ErrorKind::FsError]);
    assert!(filesystem.contents(project.config.artifact_path("TestQuery")).is_none());
}

#[test]
fn merge_failures_do_not_stop_other_documents() {
    let project = TestProject::with_documents(
        r#"
        query Good {
            version
        }

        query Bad {
            viewer {
                doesNotExist
            }
        }
        "#,
    );
    let (filesystem, result) = project.try_generate(2);
    let errors = result.unwrap_err();

    assert_eq!(errors.kinds(), vec![ErrorKind::MergeError]);
    assert!(errors.to_string().contains("doesNotExist"));
    assert!(filesystem.contents(project.config.artifact_path("Good")).is_some());
    assert!(filesystem.contents(project.config.artifact_path("Bad")).is_none());
}

#[test]
fn every_failing_document_is_reported() {
    let project = TestProject::with_documents(
        r#"
        query BadOne {
            nope
        }

        query BadTwo {
            viewer {
                ...Missing
            }
        }
        "#,
    );
    let (_, result) = project.try_generate(1);
    let errors = result.unwrap_err();

    assert_eq!(errors.len(), 2);
    let message = errors.to_string();
    assert!(message.starts_with("2 error(s) while generating artifacts"));
    assert!(message.contains("[MergeError]"));
    assert!(message.contains("Missing"));
}
