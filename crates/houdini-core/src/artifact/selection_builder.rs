use crate::artifact::js_value::js_value;
use crate::artifact::js_value::tagged_value;
use crate::artifact::js_value::JsObject;
use crate::artifact::key_raw::key_raw;
use crate::artifact::list_operations;
use crate::artifact::loading::FieldLoading;
use crate::config::ProjectConfig;
use crate::document::Directive;
use crate::document::FieldSelection;
use crate::document::FragmentSpread;
use crate::document::Selection;
use crate::merge::abstract_selection;
use crate::merge::common_selections;
use crate::merge::ComponentFields;
use crate::merge::PaginationDirection;
use crate::merge::PaginationMethod;
use crate::schema::FieldDefinition;
use crate::schema::SchemaIndex;

/// What a built selection record reports to the field that owns it.
#[derive(Default)]
pub(crate) struct SelectionSummary {
    /// A field inside one of the abstract branches is `@required`, or is
    /// itself an abstract field carrying one.
    pub(crate) abstract_has_required: bool,
    pub(crate) record: JsObject,
}

/// Builds the `selection` records of an artifact.
pub(crate) struct SelectionBuilder<'a> {
    pub(crate) component_fields: &'a ComponentFields,
    pub(crate) config: &'a ProjectConfig,
    pub(crate) has_components: bool,
    pub(crate) has_local_loading: bool,
    pub(crate) schema: &'a SchemaIndex,
}
impl<'a> SelectionBuilder<'a> {
    pub(crate) fn new(
        schema: &'a SchemaIndex,
        config: &'a ProjectConfig,
        component_fields: &'a ComponentFields,
    ) -> Self {
        Self {
            component_fields,
            config,
            has_components: false,
            has_local_loading: false,
            schema,
        }
    }

    /// The record for `selections`, read as a selection set on
    /// `parent_type`. `loading` carries the cascade of an ancestor's
    /// `@loading`; `loads_branches` is set when the owning field's loading
    /// continues into its branches.
    pub(crate) fn build(
        &mut self,
        parent_type: &str,
        selections: &[Selection],
        loading: Option<&FieldLoading>,
        loads_branches: bool,
    ) -> SelectionSummary {
        let mut summary = SelectionSummary::default();
        let branching = abstract_selection(self.schema, parent_type, selections);

        let common = common_selections(parent_type, selections);
        let mut fields = self.field_records(parent_type, &common, loading).0;
        for spread in spreads(selections) {
            if let Some(component) = self.component_record(parent_type, spread) {
                fields.insert(component.0, component.1);
            }
        }
        summary.record.insert("fields".to_string(), fields.into());

        let fragments: JsObject = spreads(selections)
            .filter(|spread| !spread.inlined() && spread.component_field().is_none())
            .map(|spread| (spread.fragment_name().to_string(), fragment_record(spread)))
            .collect();
        if !fragments.is_empty() {
            summary.record.insert("fragments".to_string(), fragments.into());
        }

        if let Some(branching) = branching {
            let mut per_type = JsObject::new();
            for (type_name, branch) in &branching.fields {
                let (records, has_required) = self.field_records(type_name, branch, loading);
                summary.abstract_has_required |= has_required;
                per_type.insert(type_name.clone(), records.into());
            }
            let type_map: JsObject = branching
                .type_map
                .iter()
                .map(|(concrete, branch)| (concrete.clone(), branch.as_str().into()))
                .collect();

            let mut abstract_fields = JsObject::new();
            abstract_fields.insert("fields".to_string(), per_type.into());
            abstract_fields.insert("typeMap".to_string(), type_map.into());
            summary
                .record
                .insert("abstractFields".to_string(), abstract_fields.into());

            if loading.is_some() || loads_branches {
                let loading_types: Vec<serde_json::Value> = branching
                    .fields
                    .keys()
                    .map(|type_name| type_name.as_str().into())
                    .collect();
                summary
                    .record
                    .insert("loadingTypes".to_string(), loading_types.into());
            }
        }
        summary
    }

    /// Field records keyed by response key, and whether any of them is
    /// `@required`.
    fn field_records(
        &mut self,
        parent_type: &str,
        selections: &[Selection],
        loading: Option<&FieldLoading>,
    ) -> (JsObject, bool) {
        let schema = self.schema;
        let mut records = JsObject::new();
        let mut has_required = false;
        for selection in selections {
            let Selection::Field(field) = selection else {
                continue;
            };
            let Some(definition) = schema.field(parent_type, field.field_name()) else {
                tracing::warn!(
                    "no definition for `{parent_type}.{}`; left out of the artifact",
                    field.field_name(),
                );
                continue;
            };
            let record = self.field_record(field, definition, loading);
            has_required |= field.directive("required").is_some()
                || record.contains_key("abstractHasRequired");
            records.insert(field.response_key().to_string(), record.into());
        }
        (records, has_required)
    }

    fn field_record(
        &mut self,
        field: &FieldSelection,
        definition: &FieldDefinition,
        inherited_loading: Option<&FieldLoading>,
    ) -> JsObject {
        let paginated = field
            .directive("paginate")
            .and_then(|_| PaginationMethod::for_field(definition));
        let loading = FieldLoading::resolve(self.schema, field, definition, inherited_loading);
        if field.directive("loading").is_some() {
            self.has_local_loading = true;
        }

        let mut record = JsObject::new();
        record.insert("type".to_string(), definition.type_name().into());
        record.insert(
            "keyRaw".to_string(),
            key_raw(field, Some(definition), paginated).into(),
        );
        if definition.nullable() {
            record.insert("nullable".to_string(), true.into());
        }

        let directives: Vec<serde_json::Value> = field
            .directives()
            .iter()
            .filter(|directive| !self.schema.is_internal_directive(directive.name()))
            .filter(|directive| !directive.name().ends_with("_delete"))
            .map(directive_record)
            .collect();
        if !directives.is_empty() {
            record.insert("directives".to_string(), directives.into());
        }

        let operations = list_operations::operations(self.schema, self.config, field);
        if !operations.is_empty() {
            record.insert("operations".to_string(), operations.into());
        }
        if let Some((list, filters)) =
            list_operations::list_record(self.schema, field, definition, paginated)
        {
            record.insert("list".to_string(), list.into());
            if !filters.is_empty() {
                record.insert("filters".to_string(), filters.into());
            }
        }
        if let Some(method) = paginated {
            record.insert("updates".to_string(), updates(method, definition).into());
        }

        let mut abstract_has_required = false;
        if !field.selections().is_empty() {
            let child_loading = loading.as_ref().and_then(FieldLoading::cascade);
            let loads_branches = loading.as_ref().is_some_and(FieldLoading::continues);
            let summary = self.build(
                definition.type_name(),
                field.selections(),
                child_loading,
                loads_branches,
            );
            abstract_has_required = summary.abstract_has_required;
            record.insert("selection".to_string(), summary.record.into());
        }
        if self.schema.is_abstract(definition.type_name()) {
            record.insert("abstract".to_string(), true.into());
        }
        if abstract_has_required {
            record.insert("abstractHasRequired".to_string(), true.into());
        }
        if field.directive("required").is_some() {
            record.insert("required".to_string(), true.into());
        }
        if let Some(loading) = &loading {
            record.insert("loading".to_string(), loading.record().into());
        }
        record.insert("visible".to_string(), field.visible().into());
        record
    }

    fn component_record(
        &mut self,
        parent_type: &str,
        spread: &FragmentSpread,
    ) -> Option<(String, serde_json::Value)> {
        let field_name = spread.component_field()?;
        let component_fields = self.component_fields;
        let component = component_fields.lookup(self.schema, parent_type, field_name)?;
        self.has_components = true;

        let variables: JsObject = spread
            .variant()
            .map(|variant| variant.arguments())
            .unwrap_or_default()
            .iter()
            .map(|arg| (arg.name().to_string(), tagged_value(arg.value())))
            .collect();
        let mut details = JsObject::new();
        details.insert("prop".to_string(), component.prop().into());
        details.insert(
            "key".to_string(),
            format!("{}.{}", component.type_name(), component.field()).into(),
        );
        details.insert("fragment".to_string(), component.fragment().into());
        details.insert("variables".to_string(), variables.into());

        let mut record = JsObject::new();
        record.insert("type".to_string(), "Component".into());
        record.insert("keyRaw".to_string(), field_name.into());
        record.insert("component".to_string(), details.into());
        record.insert("visible".to_string(), spread.visible().into());
        Some((field_name.to_string(), record.into()))
    }
}

fn spreads(selections: &[Selection]) -> impl Iterator<Item = &FragmentSpread> {
    selections.iter().filter_map(|selection| match selection {
        Selection::FragmentSpread(spread) => Some(spread),
        _ => None,
    })
}

fn fragment_record(spread: &FragmentSpread) -> serde_json::Value {
    let arguments: JsObject = spread
        .variant()
        .map(|variant| variant.arguments())
        .unwrap_or_default()
        .iter()
        .map(|arg| (arg.name().to_string(), tagged_value(arg.value())))
        .collect();
    let mut record = JsObject::new();
    record.insert("arguments".to_string(), arguments.into());
    record.into()
}

fn directive_record(directive: &Directive) -> serde_json::Value {
    let arguments: JsObject = directive
        .arguments()
        .iter()
        .map(|arg| (arg.name().to_string(), js_value(arg.value())))
        .collect();
    let mut record = JsObject::new();
    record.insert("name".to_string(), directive.name().into());
    record.insert("arguments".to_string(), arguments.into());
    record.into()
}

fn updates(method: PaginationMethod, definition: &FieldDefinition) -> Vec<serde_json::Value> {
    let updates: &[&str] = match (method, PaginationDirection::for_field(definition)) {
        (PaginationMethod::Offset, _) | (_, PaginationDirection::Forward) => &["append"],
        (_, PaginationDirection::Backward) => &["prepend"],
        (_, PaginationDirection::Both) => &["append", "prepend"],
    };
    updates.iter().map(|update| (*update).into()).collect()
}
