use crate::document::Document;
use crate::merge::Pagination;
use std::collections::BTreeMap;

/// A document after flattening.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedDocument {
    pub(crate) document: Document,
    pub(crate) pagination: Option<Pagination>,
}
impl MergedDocument {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }
}

/// A merged document plus the printed form of every fragment it reaches,
/// keyed by printed name.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedSet {
    pub(crate) document: MergedDocument,
    pub(crate) fragments: BTreeMap<String, Document>,
}
impl MergedSet {
    pub fn document(&self) -> &MergedDocument {
        &self.document
    }

    pub fn fragments(&self) -> &BTreeMap<String, Document> {
        &self.fragments
    }
}
