use crate::document::Document;
use std::collections::BTreeMap;

/// Every document of a task plus the fragments it depends on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectedDocuments {
    pub(crate) documents: BTreeMap<String, Document>,
    pub(crate) task_documents: Vec<String>,
}
impl CollectedDocuments {
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.documents.get(name)
    }

    pub fn documents(&self) -> &BTreeMap<String, Document> {
        &self.documents
    }

    pub fn into_documents(self) -> BTreeMap<String, Document> {
        self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Names of the documents that belong to the task, sorted. Fragments
    /// collected only because a task document spreads them are excluded.
    pub fn task_documents(&self) -> &[String] {
        self.task_documents.as_slice()
    }
}
