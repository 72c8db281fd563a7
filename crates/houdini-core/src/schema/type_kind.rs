/// The `types.kind` column.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeKind {
    Enum,
    InputObject,
    Interface,
    Object,
    Scalar,
    Union,
}
impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Object => "OBJECT",
            TypeKind::Scalar => "SCALAR",
            TypeKind::Union => "UNION",
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Union)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Object | TypeKind::Union)
    }

    pub fn parse(kind: &str) -> Option<Self> {
        Some(match kind {
            "ENUM" => TypeKind::Enum,
            "INPUT_OBJECT" => TypeKind::InputObject,
            "INTERFACE" => TypeKind::Interface,
            "OBJECT" => TypeKind::Object,
            "SCALAR" => TypeKind::Scalar,
            "UNION" => TypeKind::Union,
            _ => return None,
        })
    }
}
