use crate::collect::queries;
use crate::collect::CollectError;
use crate::document::Value;
use crate::document::ValueKind;
use crate::store::Context;
use crate::store::PooledConnection;
use std::collections::BTreeSet;
use std::collections::HashMap;

#[derive(Debug)]
struct ValueRow {
    children: Vec<(Option<String>, i64)>,
    kind: ValueKind,
    raw: String,
}

/// Value rows loaded for one batch, keyed by id. Trees are materialized on
/// demand by [`ValueTable::resolve`].
#[derive(Debug, Default)]
pub(crate) struct ValueTable {
    rows: HashMap<i64, ValueRow>,
}
impl ValueTable {
    pub(crate) fn load(
        ctx: &Context,
        conn: &PooledConnection<'_>,
        ids: &BTreeSet<i64>,
    ) -> Result<Self, CollectError> {
        let mut table = ValueTable::default();
        if ids.is_empty() {
            return Ok(table);
        }
        let ids_json = serde_json::to_string(ids).map_err(|source| CollectError::Encoding {
            column: "argument_values.id",
            owner: "value batch".to_string(),
            source,
        })?;

        conn.step_query(ctx, queries::VALUE_TREE, [ids_json], |row| {
            let id: i64 = row.get(0)?;
            let kind: String = row.get(1)?;
            let raw: Option<String> = row.get(2)?;
            let parent: Option<i64> = row.get(3)?;
            let name: Option<String> = row.get(4)?;

            let kind = ValueKind::parse(&kind).ok_or(CollectError::UnknownValueKind {
                value_id: id,
                kind: kind.clone(),
            })?;
            table.rows.entry(id).or_insert_with(|| ValueRow {
                children: vec![],
                kind,
                raw: raw.unwrap_or_default(),
            });
            if let Some(parent) = parent {
                let parent_row = table
                    .rows
                    .get_mut(&parent)
                    .ok_or(CollectError::MissingValue { value_id: parent })?;
                if !parent_row.children.iter().any(|(_, child)| *child == id) {
                    parent_row.children.push((name, id));
                }
            }
            Ok::<(), CollectError>(())
        })?;

        tracing::trace!("loaded {} value rows for {} roots", table.rows.len(), ids.len());
        Ok(table)
    }

    pub(crate) fn resolve(&self, id: i64) -> Result<Value, CollectError> {
        let row = self
            .rows
            .get(&id)
            .ok_or(CollectError::MissingValue { value_id: id })?;
        match row.kind {
            ValueKind::List => Ok(Value::List(
                row.children
                    .iter()
                    .map(|(_, child)| self.resolve(*child))
                    .collect::<Result<_, _>>()?,
            )),
            ValueKind::Object => {
                let mut fields = Vec::with_capacity(row.children.len());
                for (name, child) in &row.children {
                    let name = name
                        .clone()
                        .ok_or(CollectError::UnnamedObjectField { value_id: *child })?;
                    fields.push((name, self.resolve(*child)?));
                }
                Ok(Value::Object(fields))
            },
            kind => Ok(Value::scalar(kind, &row.raw).unwrap_or(Value::Null)),
        }
    }
}
