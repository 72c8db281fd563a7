/// The four kinds of executable document persisted in `documents.kind`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DocumentKind {
    Fragment,
    Mutation,
    Query,
    Subscription,
}
impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Fragment => "fragment",
            DocumentKind::Mutation => "mutation",
            DocumentKind::Query => "query",
            DocumentKind::Subscription => "subscription",
        }
    }

    /// The `kind` tag written into the artifact.
    pub fn artifact_kind(&self) -> &'static str {
        match self {
            DocumentKind::Fragment => "HoudiniFragment",
            DocumentKind::Mutation => "HoudiniMutation",
            DocumentKind::Query => "HoudiniQuery",
            DocumentKind::Subscription => "HoudiniSubscription",
        }
    }

    pub fn is_operation(&self) -> bool {
        !matches!(self, DocumentKind::Fragment)
    }

    pub fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "fragment" => DocumentKind::Fragment,
            "mutation" => DocumentKind::Mutation,
            "query" => DocumentKind::Query,
            "subscription" => DocumentKind::Subscription,
            _ => return None,
        })
    }
}
