use crate::artifact::EmitError;
use crate::collect::CollectError;
use crate::error_kind::ErrorKind;
use crate::generate::GenerateError;
use crate::generate::GenerateErrors;
use crate::generate::GenerateSummary;
use crate::store::StoreError;

#[test]
fn kinds_follow_the_failing_stage() {
    let errors = GenerateErrors(vec![
        GenerateError::Collect(CollectError::UnknownValueKind {
            value_id: 7,
            kind: "Tuple".to_string(),
        }),
        GenerateError::Emit(EmitError::MissingArtifactInput {
            name: "Viewer".to_string(),
        }),
        GenerateError::Store(StoreError::MissingConfig),
        GenerateError::Collect(CollectError::Store(StoreError::Cancelled)),
    ]);
    assert_eq!(
        errors.kinds(),
        vec![
            ErrorKind::ShapeError,
            ErrorKind::MissingArtifactInput,
            ErrorKind::StoreError,
            ErrorKind::StoreError,
        ],
    );
}

#[test]
fn display_lists_every_error_with_its_kind() {
    let errors = GenerateErrors::from(vec![
        EmitError::MissingArtifactInput {
            name: "First".to_string(),
        },
        EmitError::Store(StoreError::EmptyPool),
    ]);
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.to_string(),
        concat!(
            "2 error(s) while generating artifacts\n",
            "  [MissingArtifactInput] cannot emit an artifact for 'First': ",
            "the document was not collected\n",
            "  [StoreError] a store connection pool needs at least one connection",
        ),
    );
}

#[test]
fn only_cancellations() {
    assert!(!GenerateError::only_cancellations(&[]));
    assert!(GenerateError::only_cancellations(&[
        GenerateError::Store(StoreError::Cancelled),
        GenerateError::Emit(EmitError::Store(StoreError::Cancelled)),
    ]));
    assert!(!GenerateError::only_cancellations(&[
        GenerateError::Store(StoreError::Cancelled),
        GenerateError::Store(StoreError::MissingConfig),
    ]));
}

#[test]
fn empty_summary() {
    let summary = GenerateSummary::default();
    assert!(!summary.cancelled());
    assert_eq!(summary.collected(), 0);
    assert_eq!(summary.written(), 0);
    assert!(summary.artifacts().is_empty());
}
