use crate::artifact::input_builder::input_section;
use crate::artifact::js_value::JsObject;
use crate::artifact::loading::FieldLoading;
use crate::artifact::selection_builder::SelectionBuilder;
use crate::artifact::Artifact;
use crate::config::CachePolicy;
use crate::config::ProjectConfig;
use crate::document::Document;
use crate::document::DocumentKind;
use crate::document::Value;
use crate::hash::sha256_hex;
use crate::merge::MergedSet;
use crate::merge::Merger;
use crate::merge::Pagination;
use crate::print::Printer;

/// Turns a merged document into its artifact.
#[derive(Clone, Copy, Debug)]
pub struct ArtifactBuilder<'a> {
    config: &'a ProjectConfig,
    merger: &'a Merger<'a>,
}
impl<'a> ArtifactBuilder<'a> {
    pub fn new(config: &'a ProjectConfig, merger: &'a Merger<'a>) -> Self {
        Self { config, merger }
    }

    pub fn build(&self, set: &MergedSet) -> Artifact {
        let raw = Printer::new(self.merger.schema()).print_set(set);
        let hash = sha256_hex(&raw);
        let merged = set.document();
        let document = merged.document();
        let schema = self.merger.schema();

        let root_type = match document.kind() {
            DocumentKind::Fragment => document
                .type_condition()
                .unwrap_or(schema.query_type())
                .to_string(),
            kind => schema.root_type(kind).to_string(),
        };
        let document_loading = FieldLoading::for_document(document);
        let mut selections =
            SelectionBuilder::new(schema, self.config, self.merger.component_fields());
        let selection = selections.build(
            &root_type,
            document.selections(),
            document_loading.as_ref(),
            document_loading.as_ref().is_some_and(FieldLoading::continues),
        );

        let mut record = JsObject::new();
        record.insert("name".to_string(), document.name().into());
        record.insert("kind".to_string(), document.kind().artifact_kind().into());
        record.insert("hash".to_string(), hash.as_str().into());
        record.insert("raw".to_string(), raw.as_str().into());
        record.insert("rootType".to_string(), root_type.into());
        record.insert(
            "stripVariables".to_string(),
            document.strip_variables().to_vec().into(),
        );
        record.insert("selection".to_string(), selection.record.into());
        record.insert("pluginData".to_string(), JsObject::new().into());

        if let Some(input) = input_section(schema, document) {
            record.insert("input".to_string(), input.into());
        }
        if let Some(dedupe) = self.dedupe(document, merged.pagination()) {
            record.insert("dedupe".to_string(), dedupe.into());
        }
        if let Some(pagination) = merged.pagination() {
            record.insert("refetch".to_string(), self.refetch(pagination).into());
        }
        if document_loading.is_some() {
            record.insert("enableLoadingState".to_string(), "global".into());
        } else if selections.has_local_loading {
            record.insert("enableLoadingState".to_string(), "local".into());
        }
        if selections.has_components {
            record.insert("hasComponents".to_string(), true.into());
        }
        if document.kind().is_operation() {
            let cache = document.directive("cache");
            let policy = cache
                .and_then(|cache| cache.argument("policy"))
                .and_then(Value::as_str)
                .and_then(CachePolicy::parse)
                .unwrap_or(self.config.default_cache_policy);
            let partial = cache
                .and_then(|cache| cache.argument("partial"))
                .and_then(Value::as_bool)
                .unwrap_or(self.config.default_partial);
            record.insert("policy".to_string(), policy.as_str().into());
            record.insert("partial".to_string(), partial.into());
        }

        Artifact {
            hash,
            name: document.name().to_string(),
            raw,
            record,
        }
    }

    fn dedupe(&self, document: &Document, pagination: Option<&Pagination>) -> Option<JsObject> {
        let mut dedupe = JsObject::new();
        if let Some(directive) = document.directive("dedupe") {
            let cancel_first = directive
                .argument("cancelFirst")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let match_mode = directive
                .argument("match")
                .and_then(Value::as_str)
                .unwrap_or("Operation");
            dedupe.insert(
                "cancel".to_string(),
                if cancel_first { "first" } else { "last" }.into(),
            );
            dedupe.insert("match".to_string(), match_mode.into());
            return Some(dedupe);
        }
        if document.kind() == DocumentKind::Query
            && pagination.is_some()
            && !self.config.suppress_pagination_deduplication
        {
            dedupe.insert("cancel".to_string(), "last".into());
            dedupe.insert("match".to_string(), "Variables".into());
            return Some(dedupe);
        }
        None
    }

    fn refetch(&self, pagination: &Pagination) -> JsObject {
        let mode = pagination.mode.unwrap_or(self.config.default_paginate_mode);
        let mut refetch = JsObject::new();
        refetch.insert("path".to_string(), pagination.field_path.clone().into());
        refetch.insert("method".to_string(), pagination.method.as_str().into());
        refetch.insert("pageSize".to_string(), pagination.page_size.into());
        refetch.insert("embedded".to_string(), pagination.embedded.into());
        refetch.insert("targetType".to_string(), pagination.target_type.as_str().into());
        refetch.insert("paginated".to_string(), true.into());
        refetch.insert("direction".to_string(), pagination.direction.as_str().into());
        refetch.insert("mode".to_string(), mode.as_str().into());
        refetch
    }
}
