use crate::config::ProjectConfig;
use crate::document::DocumentKind;
use crate::schema::ArgumentDefinition;
use crate::schema::FieldDefinition;
use crate::schema::TypeKind;
use crate::store::StoreError;
use indexmap::IndexMap;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::LazyLock;

static TYPENAME_FIELD: LazyLock<FieldDefinition> =
    LazyLock::new(|| FieldDefinition::new("__typename", "String", "!"));

/// Read-only view of the schema tables, loaded once per generate run and
/// shared by every worker.
#[derive(Clone, Debug, Default)]
pub struct SchemaIndex {
    default_keys: Vec<String>,
    fields: HashMap<String, IndexMap<String, FieldDefinition>>,
    interfaces: HashMap<String, BTreeSet<String>>,
    internal_directives: HashSet<String>,
    keys: HashMap<String, Vec<String>>,
    mutation_type: String,
    possible_types: HashMap<String, BTreeSet<String>>,
    query_type: String,
    runtime_scalars: BTreeMap<String, String>,
    subscription_type: String,
    types: HashMap<String, TypeKind>,
}
impl SchemaIndex {
    pub fn load(conn: &Connection, config: &ProjectConfig) -> Result<Self, StoreError> {
        let mut index = SchemaIndex {
            default_keys: config.default_keys.clone(),
            mutation_type: "Mutation".to_string(),
            query_type: "Query".to_string(),
            runtime_scalars: config.runtime_scalars.clone(),
            subscription_type: "Subscription".to_string(),
            ..Default::default()
        };

        let mut stmt = conn.prepare("SELECT name, kind, operation FROM types")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            let kind: String = row.get(1)?;
            let operation: Option<String> = row.get(2)?;
            let kind = TypeKind::parse(&kind).ok_or_else(|| StoreError::InvalidConfig {
                setting: "types.kind",
                value: kind.clone(),
            })?;
            match operation.as_deref() {
                Some("query") => index.query_type = name.clone(),
                Some("mutation") => index.mutation_type = name.clone(),
                Some("subscription") => index.subscription_type = name.clone(),
                _ => (),
            }
            index.types.insert(name, kind);
        }

        let mut field_parents: HashMap<String, (String, String)> = HashMap::new();
        let mut stmt = conn.prepare(
            "SELECT id, parent, name, type, type_modifiers, default_value
             FROM type_fields ORDER BY rowid",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let parent: String = row.get(1)?;
            let name: String = row.get(2)?;
            let mut field = FieldDefinition::new(
                name.clone(),
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            );
            field.default_value = row.get(5)?;
            field_parents.insert(id, (parent.clone(), name.clone()));
            index.fields.entry(parent).or_default().insert(name, field);
        }

        let mut stmt = conn.prepare(
            "SELECT field, name, type, type_modifiers, default_value
             FROM field_argument_definitions ORDER BY id",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let field_id: String = row.get(0)?;
            let Some((parent, field_name)) = field_parents.get(&field_id) else {
                tracing::warn!("argument definition for unknown field `{field_id}` skipped");
                continue;
            };
            let argument = ArgumentDefinition {
                default_value: row.get(4)?,
                name: row.get(1)?,
                type_modifiers: row.get(3)?,
                type_name: row.get(2)?,
            };
            if let Some(field) = index
                .fields
                .get_mut(parent)
                .and_then(|fields| fields.get_mut(field_name))
            {
                field.arguments.insert(argument.name.clone(), argument);
            }
        }

        let mut stmt = conn.prepare("SELECT type, member FROM possible_types")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            index
                .possible_types
                .entry(row.get(0)?)
                .or_default()
                .insert(row.get(1)?);
        }

        let mut stmt = conn.prepare("SELECT parent, interface_type FROM implemented_interfaces")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            index
                .interfaces
                .entry(row.get(0)?)
                .or_default()
                .insert(row.get(1)?);
        }

        let mut stmt = conn.prepare("SELECT name, keys FROM type_configs")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            let keys: String = row.get(1)?;
            let keys: Vec<String> = serde_json::from_str(&keys).map_err(|_| {
                StoreError::InvalidConfig {
                    setting: "type_configs.keys",
                    value: keys.clone(),
                }
            })?;
            index.keys.insert(name, keys);
        }

        let mut stmt = conn.prepare("SELECT name FROM directives WHERE internal = 1")?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            index.internal_directives.insert(row.get(0)?);
        }

        tracing::debug!(
            "loaded schema index with {} types and {} internal directives",
            index.types.len(),
            index.internal_directives.len(),
        );
        Ok(index)
    }

    /// Looks up a field, including the implicit `__typename`.
    pub fn field(&self, parent_type: &str, field_name: &str) -> Option<&FieldDefinition> {
        if field_name == "__typename" && self.is_composite(parent_type) {
            return Some(&TYPENAME_FIELD);
        }
        self.fields.get(parent_type)?.get(field_name)
    }

    pub fn fields(&self, type_name: &str) -> Option<&IndexMap<String, FieldDefinition>> {
        self.fields.get(type_name)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Whether `type_name` declares `interface` among its interfaces.
    pub fn implements(&self, type_name: &str, interface: &str) -> bool {
        self.interfaces
            .get(type_name)
            .is_some_and(|interfaces| interfaces.contains(interface))
    }

    pub fn is_abstract(&self, type_name: &str) -> bool {
        self.type_kind(type_name).is_some_and(|kind| kind.is_abstract())
    }

    pub fn is_composite(&self, type_name: &str) -> bool {
        self.type_kind(type_name).is_some_and(|kind| kind.is_composite())
    }

    pub fn is_internal_directive(&self, name: &str) -> bool {
        self.internal_directives.contains(name)
    }

    /// True when every concrete type `sub` may resolve to is also one
    /// `sup` may resolve to. Reflexive.
    pub fn is_supertype_of(&self, sup: &str, sub: &str) -> bool {
        if sup == sub {
            return true;
        }
        let sub_types = self.possible_concrete_types(sub);
        if sub_types.is_empty() {
            return false;
        }
        let sup_types = self.possible_concrete_types(sup);
        sub_types.is_subset(&sup_types)
    }

    /// The key fields used to identify records of `type_name`.
    ///
    /// Empty when the type does not declare every configured key.
    pub fn keys_for(&self, type_name: &str) -> Vec<String> {
        let keys = self.keys.get(type_name).unwrap_or(&self.default_keys);
        let declares_all = keys
            .iter()
            .all(|key| self.field(type_name, key).is_some());
        if declares_all { keys.clone() } else { vec![] }
    }

    /// The element type of a connection, if `type_name` follows the
    /// `edges { node }` shape.
    pub fn connection_node_type(&self, type_name: &str) -> Option<&str> {
        let edges = self.field(type_name, "edges")?;
        let node = self.field(edges.type_name(), "node")?;
        Some(node.type_name())
    }

    /// Object types `type_name` may resolve to at runtime.
    pub fn possible_concrete_types(&self, type_name: &str) -> BTreeSet<String> {
        match self.type_kind(type_name) {
            Some(TypeKind::Object) => BTreeSet::from([type_name.to_string()]),
            Some(TypeKind::Interface) | Some(TypeKind::Union) => self
                .possible_types
                .get(type_name)
                .map(|members| {
                    members
                        .iter()
                        .filter(|member| self.type_kind(member) == Some(TypeKind::Object))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            _ => BTreeSet::new(),
        }
    }

    pub fn root_type(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Mutation => self.mutation_type.as_str(),
            DocumentKind::Subscription => self.subscription_type.as_str(),
            DocumentKind::Fragment | DocumentKind::Query => self.query_type.as_str(),
        }
    }

    pub fn query_type(&self) -> &str {
        self.query_type.as_str()
    }

    /// The schema scalar a runtime scalar is sent as.
    pub fn runtime_scalar(&self, name: &str) -> Option<&str> {
        self.runtime_scalars.get(name).map(String::as_str)
    }

    pub fn runtime_scalars(&self) -> &BTreeMap<String, String> {
        &self.runtime_scalars
    }

    pub fn type_kind(&self, type_name: &str) -> Option<TypeKind> {
        self.types.get(type_name).copied()
    }
}
