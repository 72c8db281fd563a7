/// Directives the pipeline consumes itself. They never reach the printed
/// documents.
pub(crate) const INTERNAL_DIRECTIVES: [&str; 19] = [
    "allLists",
    "append",
    "arguments",
    "blocking",
    "blocking_disable",
    "cache",
    "componentField",
    "dedupe",
    "list",
    "loading",
    "mask_disable",
    "mask_enable",
    "paginate",
    "parentID",
    "prepend",
    "required",
    "when",
    "when_not",
    "with",
];

/// Directives defined by GraphQL itself. Printed as written.
pub(crate) const BUILTIN_DIRECTIVES: [&str; 4] = ["deprecated", "include", "skip", "specifiedBy"];

pub(crate) const BUILTIN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];
