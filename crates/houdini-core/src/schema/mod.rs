mod argument_definition;
mod field_definition;
mod schema_index;
mod type_kind;

pub use argument_definition::ArgumentDefinition;
pub use field_definition::FieldDefinition;
pub use schema_index::SchemaIndex;
pub use type_kind::TypeKind;
