//! SQL used by the collector. Every batch query binds `?1` to a JSON array
//! of document ids and expands it with `json_each`.

/// Task documents plus every fragment they reach through spreads, and every
/// fragment declaring a component field.
///
/// `?1` is the task id, or `NULL` for every document.
pub(crate) const TARGET_DOCUMENTS: &str = "
WITH RECURSIVE
task_documents(id) AS (
    SELECT documents.id
    FROM documents
    LEFT JOIN raw_documents ON raw_documents.id = documents.raw_document
    WHERE ?1 IS NULL OR raw_documents.current_task = ?1
),
referenced_fragments(name) AS (
    SELECT selections.field_name
    FROM selection_refs refs
    JOIN selections ON selections.id = refs.child_id
    WHERE selections.kind = 'fragment'
      AND refs.document IN (SELECT id FROM task_documents)
    UNION
    SELECT selections.field_name
    FROM referenced_fragments
    JOIN documents ON documents.name = referenced_fragments.name
    JOIN selection_refs refs ON refs.document = documents.id
    JOIN selections ON selections.id = refs.child_id
    WHERE selections.kind = 'fragment'
)
SELECT
    documents.id,
    documents.name,
    documents.id IN (SELECT id FROM task_documents) AS is_task
FROM documents
WHERE documents.id IN (SELECT id FROM task_documents)
   OR (documents.kind = 'fragment'
       AND documents.name IN (SELECT name FROM referenced_fragments))
   OR (documents.kind = 'fragment'
       AND documents.id IN (
           SELECT document FROM document_directives WHERE directive = 'componentField'
       ))
ORDER BY documents.id
";

pub(crate) const DOCUMENTS: &str = "
SELECT id, name, kind, type_condition
FROM documents
WHERE id IN (SELECT value FROM json_each(?1))
ORDER BY id
";

/// The selection forest of every document in the batch, parents before
/// children. Arguments and directives are aggregated into JSON arrays.
pub(crate) const SELECTION_TREE: &str = "
WITH RECURSIVE selection_tree(id, parent_id, document, path_index, depth) AS (
    SELECT refs.child_id, NULL, refs.document, refs.path_index, 0
    FROM selection_refs refs
    WHERE refs.parent_id IS NULL
      AND refs.document IN (SELECT value FROM json_each(?1))
    UNION ALL
    SELECT refs.child_id, refs.parent_id, refs.document, refs.path_index, tree.depth + 1
    FROM selection_tree tree
    JOIN selection_refs refs
      ON refs.parent_id = tree.id AND refs.document = tree.document
)
SELECT
    tree.document,
    tree.id,
    tree.parent_id,
    selections.field_name,
    selections.alias,
    selections.kind,
    json((
        SELECT json_group_array(
            json_object('name', args.name, 'value', args.value) ORDER BY args.id
        )
        FROM selection_arguments args
        WHERE args.selection_id = tree.id
    )) AS arguments,
    json((
        SELECT json_group_array(
            json_object(
                'name', directives.directive,
                'arguments', json((
                    SELECT json_group_array(
                        json_object('name', dargs.name, 'value', dargs.value)
                        ORDER BY dargs.id
                    )
                    FROM selection_directive_arguments dargs
                    WHERE dargs.parent = directives.id
                ))
            ) ORDER BY directives.id
        )
        FROM selection_directives directives
        WHERE directives.selection_id = tree.id
    )) AS directives
FROM selection_tree tree
JOIN selections ON selections.id = tree.id
ORDER BY tree.document, tree.depth, tree.parent_id, tree.path_index
";

pub(crate) const DOCUMENT_VARIABLES: &str = "
SELECT
    vars.document,
    vars.name,
    vars.type,
    vars.type_modifiers,
    vars.default_value,
    json((
        SELECT json_group_array(
            json_object(
                'name', directives.directive,
                'arguments', json((
                    SELECT json_group_array(
                        json_object('name', dargs.name, 'value', dargs.value)
                        ORDER BY dargs.id
                    )
                    FROM document_variable_directive_arguments dargs
                    WHERE dargs.parent = directives.id
                ))
            ) ORDER BY directives.id
        )
        FROM document_variable_directives directives
        WHERE directives.parent = vars.id
    )) AS directives
FROM document_variables vars
WHERE vars.document IN (SELECT value FROM json_each(?1))
ORDER BY vars.document, vars.id
";

pub(crate) const DOCUMENT_DIRECTIVES: &str = "
SELECT
    directives.document,
    directives.directive,
    json((
        SELECT json_group_array(
            json_object('name', dargs.name, 'value', dargs.value) ORDER BY dargs.id
        )
        FROM document_directive_arguments dargs
        WHERE dargs.parent = directives.id
    )) AS arguments
FROM document_directives directives
WHERE directives.document IN (SELECT value FROM json_each(?1))
ORDER BY directives.document, directives.id
";

/// Every value row reachable from the requested roots, parents first.
pub(crate) const VALUE_TREE: &str = "
WITH RECURSIVE value_tree(id, kind, raw, parent, name, depth, position) AS (
    SELECT values_.id, values_.kind, values_.raw, NULL, NULL, 0, 0
    FROM argument_values values_
    WHERE values_.id IN (SELECT value FROM json_each(?1))
    UNION ALL
    SELECT values_.id, values_.kind, values_.raw, children.parent, children.name,
           tree.depth + 1, children.id
    FROM value_tree tree
    JOIN argument_value_children children ON children.parent = tree.id
    JOIN argument_values values_ ON values_.id = children.value
)
SELECT id, kind, raw, parent, name
FROM value_tree
ORDER BY depth, parent, position
";
