use crate::config::ProjectConfig;
use crate::ingest::ast_conversion::type_parts;
use crate::ingest::internal_directives::BUILTIN_DIRECTIVES;
use crate::ingest::internal_directives::BUILTIN_SCALARS;
use crate::ingest::internal_directives::INTERNAL_DIRECTIVES;
use crate::ingest::Ingest;
use crate::ingest::IngestError;
use crate::schema::TypeKind;
use crate::store::Context;
use graphql_parser::schema as ast;
use inherent::inherent;
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, IngestError>;

#[derive(Clone, Debug)]
struct ArgumentRow {
    default_value: Option<String>,
    name: String,
    type_modifiers: String,
    type_name: String,
}

#[derive(Clone, Debug)]
struct FieldRow {
    arguments: Vec<ArgumentRow>,
    default_value: Option<String>,
    name: String,
    parent: String,
    type_modifiers: String,
    type_name: String,
}

/// Loads schema SDL into the `types`, `type_fields`,
/// `field_argument_definitions`, `possible_types`,
/// `implemented_interfaces`, `type_configs` and `directives` tables.
///
/// Type extensions are folded into the type they extend. Beyond resolving
/// names nothing is validated.
#[derive(Debug)]
pub struct SchemaIngest {
    default_keys: Vec<String>,
    directives: BTreeMap<String, bool>,
    fields: Vec<FieldRow>,
    interfaces: BTreeSet<(String, String)>,
    keys: BTreeMap<String, Vec<String>>,
    operations: BTreeMap<&'static str, String>,
    possible_types: BTreeSet<(String, String)>,
    str_load_counter: u16,
    types: BTreeMap<String, TypeKind>,
}
impl SchemaIngest {
    pub fn new(config: &ProjectConfig) -> Self {
        Self {
            default_keys: config.default_keys.clone(),
            directives: BTreeMap::new(),
            fields: vec![],
            interfaces: BTreeSet::new(),
            keys: BTreeMap::new(),
            operations: BTreeMap::new(),
            possible_types: BTreeSet::new(),
            str_load_counter: 0,
            types: BTreeMap::new(),
        }
    }

    pub fn load_str(mut self, file_path: Option<PathBuf>, content: &str) -> Result<Self> {
        let file_path = match file_path {
            Some(file_path) => file_path,
            None => {
                let ctr = self.str_load_counter;
                self.str_load_counter += 1;
                PathBuf::from(format!("str://{ctr}"))
            },
        };
        let ast_doc = ast::parse_schema::<String>(content)
            .map_err(|err| IngestError::ParseError {
                file: file_path.clone(),
                err: err.to_string(),
            })?
            .into_static();
        for def in ast_doc.definitions {
            self.visit_definition(file_path.as_path(), def)?;
        }
        Ok(self)
    }

    /// Overrides the configured default keys for one type.
    pub fn with_keys(mut self, type_name: impl Into<String>, keys: Vec<String>) -> Self {
        self.keys.insert(type_name.into(), keys);
        self
    }

    fn add_fields(&mut self, parent: &str, fields: &[ast::Field<'static, String>]) {
        for field in fields {
            let (type_name, type_modifiers) = type_parts(&field.field_type);
            self.fields.push(FieldRow {
                arguments: field.arguments.iter().map(argument_row).collect(),
                default_value: None,
                name: field.name.clone(),
                parent: parent.to_string(),
                type_modifiers,
                type_name,
            });
        }
    }

    fn add_input_fields(&mut self, parent: &str, fields: &[ast::InputValue<'static, String>]) {
        for field in fields {
            let argument = argument_row(field);
            self.fields.push(FieldRow {
                arguments: vec![],
                default_value: argument.default_value,
                name: argument.name,
                parent: parent.to_string(),
                type_modifiers: argument.type_modifiers,
                type_name: argument.type_name,
            });
        }
    }

    fn add_implementations(&mut self, type_name: &str, interfaces: &[String]) {
        for interface in interfaces {
            self.interfaces
                .insert((type_name.to_string(), interface.clone()));
            self.possible_types
                .insert((interface.clone(), type_name.to_string()));
        }
    }

    fn visit_type_def(&mut self, def: ast::TypeDefinition<'static, String>) {
        match def {
            ast::TypeDefinition::Enum(enum_type) => {
                self.types.insert(enum_type.name, TypeKind::Enum);
            },
            ast::TypeDefinition::InputObject(input) => {
                self.add_input_fields(&input.name, &input.fields);
                self.types.insert(input.name, TypeKind::InputObject);
            },
            ast::TypeDefinition::Interface(interface) => {
                self.add_fields(&interface.name, &interface.fields);
                self.add_implementations(&interface.name, &interface.implements_interfaces);
                self.types.insert(interface.name, TypeKind::Interface);
            },
            ast::TypeDefinition::Object(object) => {
                self.add_fields(&object.name, &object.fields);
                self.add_implementations(&object.name, &object.implements_interfaces);
                self.types.insert(object.name, TypeKind::Object);
            },
            ast::TypeDefinition::Scalar(scalar) => {
                self.types.insert(scalar.name, TypeKind::Scalar);
            },
            ast::TypeDefinition::Union(union_type) => {
                for member in &union_type.types {
                    self.possible_types
                        .insert((union_type.name.clone(), member.clone()));
                }
                self.types.insert(union_type.name, TypeKind::Union);
            },
        }
    }

    fn visit_type_extension(&mut self, ext: ast::TypeExtension<'static, String>) {
        match ext {
            ast::TypeExtension::InputObject(input) => {
                self.add_input_fields(&input.name, &input.fields);
            },
            ast::TypeExtension::Interface(interface) => {
                self.add_fields(&interface.name, &interface.fields);
                self.add_implementations(&interface.name, &interface.implements_interfaces);
            },
            ast::TypeExtension::Object(object) => {
                self.add_fields(&object.name, &object.fields);
                self.add_implementations(&object.name, &object.implements_interfaces);
            },
            ast::TypeExtension::Union(union_type) => {
                for member in &union_type.types {
                    self.possible_types
                        .insert((union_type.name.clone(), member.clone()));
                }
            },
            ast::TypeExtension::Enum(_) | ast::TypeExtension::Scalar(_) => (),
        }
    }

    fn check_references(&self) -> Result<()> {
        let mut referenced: Vec<(&String, String)> = vec![];
        for field in &self.fields {
            let owner = format!("{}.{}", field.parent, field.name);
            referenced.push((&field.type_name, owner.clone()));
            for argument in &field.arguments {
                referenced.push((&argument.type_name, format!("{owner}({})", argument.name)));
            }
        }
        for (abstract_type, member) in &self.possible_types {
            referenced.push((member, abstract_type.clone()));
        }
        for (parent, interface) in &self.interfaces {
            referenced.push((interface, parent.clone()));
        }
        match referenced
            .into_iter()
            .find(|(type_name, _)| !self.types.contains_key(*type_name))
        {
            Some((type_name, referenced_by)) => Err(IngestError::UnknownType {
                referenced_by,
                type_name: type_name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// `<Type>_delete` for every object type that declares all of its keys.
    fn delete_directives(&self) -> Vec<String> {
        self.types
            .iter()
            .filter(|(_, kind)| **kind == TypeKind::Object)
            .filter(|(name, _)| !self.operations.values().any(|root| root == *name))
            .filter(|(name, _)| {
                let keys = self.keys.get(*name).unwrap_or(&self.default_keys);
                !keys.is_empty()
                    && keys.iter().all(|key| {
                        self.fields
                            .iter()
                            .any(|field| field.parent == **name && field.name == *key)
                    })
            })
            .map(|(name, _)| format!("{name}_delete"))
            .collect()
    }
}

#[inherent]
impl Ingest for SchemaIngest {
    type AstDefinition = ast::Definition<'static, String>;

    pub fn visit_definition(
        &mut self,
        _file_path: &Path,
        def: ast::Definition<'static, String>,
    ) -> Result<()> {
        match def {
            ast::Definition::DirectiveDefinition(directive) => {
                self.directives.entry(directive.name).or_insert(false);
            },
            ast::Definition::SchemaDefinition(schema) => {
                if let Some(query) = schema.query {
                    self.operations.insert("query", query);
                }
                if let Some(mutation) = schema.mutation {
                    self.operations.insert("mutation", mutation);
                }
                if let Some(subscription) = schema.subscription {
                    self.operations.insert("subscription", subscription);
                }
            },
            ast::Definition::TypeDefinition(def) => self.visit_type_def(def),
            ast::Definition::TypeExtension(ext) => self.visit_type_extension(ext),
        }
        Ok(())
    }

    pub fn write(mut self, ctx: &Context, conn: &Connection) -> Result<usize> {
        for scalar in BUILTIN_SCALARS {
            self.types
                .entry(scalar.to_string())
                .or_insert(TypeKind::Scalar);
        }
        for (operation, default_root) in [
            ("query", "Query"),
            ("mutation", "Mutation"),
            ("subscription", "Subscription"),
        ] {
            if !self.operations.contains_key(operation) && self.types.contains_key(default_root) {
                self.operations.insert(operation, default_root.to_string());
            }
        }
        self.check_references()?;
        for name in BUILTIN_DIRECTIVES {
            self.directives.insert(name.to_string(), false);
        }
        for name in INTERNAL_DIRECTIVES {
            self.directives.insert(name.to_string(), true);
        }
        for name in self.delete_directives() {
            self.directives.insert(name, true);
        }

        ctx.check()?;
        let tx = conn.unchecked_transaction()?;
        {
            let mut insert_type = tx.prepare(
                "INSERT OR REPLACE INTO types (name, kind, operation) VALUES (?1, ?2, ?3)",
            )?;
            for (name, kind) in &self.types {
                let operation = self
                    .operations
                    .iter()
                    .find(|(_, root)| *root == name)
                    .map(|(operation, _)| *operation);
                insert_type.execute(rusqlite::params![name, kind.as_str(), operation])?;
            }

            let mut insert_field = tx.prepare(
                "INSERT OR REPLACE INTO type_fields
                    (id, parent, name, type, type_modifiers, default_value)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            let mut insert_argument = tx.prepare(
                "INSERT OR REPLACE INTO field_argument_definitions
                    (field, name, type, type_modifiers, default_value)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for field in &self.fields {
                ctx.check()?;
                let id = format!("{}.{}", field.parent, field.name);
                insert_field.execute(rusqlite::params![
                    id,
                    field.parent,
                    field.name,
                    field.type_name,
                    field.type_modifiers,
                    field.default_value,
                ])?;
                for argument in &field.arguments {
                    insert_argument.execute(rusqlite::params![
                        id,
                        argument.name,
                        argument.type_name,
                        argument.type_modifiers,
                        argument.default_value,
                    ])?;
                }
            }

            let mut insert_possible = tx.prepare(
                "INSERT OR IGNORE INTO possible_types (type, member) VALUES (?1, ?2)",
            )?;
            for (abstract_type, member) in &self.possible_types {
                insert_possible.execute([abstract_type, member])?;
            }
            let mut insert_interface = tx.prepare(
                "INSERT OR IGNORE INTO implemented_interfaces (parent, interface_type)
                 VALUES (?1, ?2)",
            )?;
            for (parent, interface) in &self.interfaces {
                insert_interface.execute([parent, interface])?;
            }

            let mut insert_keys = tx.prepare(
                "INSERT OR REPLACE INTO type_configs (name, keys) VALUES (?1, ?2)",
            )?;
            for (name, keys) in &self.keys {
                let keys = serde_json::to_string(keys).map_err(|err| IngestError::ParseError {
                    file: PathBuf::from("type_configs"),
                    err: err.to_string(),
                })?;
                insert_keys.execute([name, &keys])?;
            }

            let mut insert_directive = tx.prepare(
                "INSERT OR REPLACE INTO directives (name, internal) VALUES (?1, ?2)",
            )?;
            for (name, internal) in &self.directives {
                insert_directive.execute(rusqlite::params![name, internal])?;
            }
        }
        tx.commit()?;

        tracing::debug!(
            "ingested {} types, {} fields and {} directives",
            self.types.len(),
            self.fields.len(),
            self.directives.len(),
        );
        Ok(self.types.len())
    }
}

fn argument_row(input: &ast::InputValue<'static, String>) -> ArgumentRow {
    let (type_name, type_modifiers) = type_parts(&input.value_type);
    ArgumentRow {
        default_value: input.default_value.as_ref().map(|value| value.to_string()),
        name: input.name.clone(),
        type_modifiers,
        type_name,
    }
}
