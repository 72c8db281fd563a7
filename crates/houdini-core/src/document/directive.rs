use crate::document::argument::arguments_equal;
use crate::document::argument::sorted_arguments;
use crate::document::Argument;
use crate::document::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Directive {
    pub(crate) arguments: Vec<Argument>,
    pub(crate) name: String,
}
impl Directive {
    pub fn new(name: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Self {
            arguments,
            name: name.into(),
        }
    }

    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|arg| arg.name() == name)
            .map(|arg| arg.value())
    }

    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Same name and the same argument set, in any order.
    pub fn same_as(&self, other: &Directive) -> bool {
        self.name == other.name && arguments_equal(&self.arguments, &other.arguments)
    }

    /// A stable textual key for grouping selections by their directives.
    pub(crate) fn signature(&self) -> String {
        let args: Vec<String> = sorted_arguments(&self.arguments)
            .into_iter()
            .map(|arg| format!("{}: {}", arg.name(), arg.value().canonical()))
            .collect();
        format!("@{}({})", self.name, args.join(", "))
    }
}

/// Appends each directive of `incoming` that is not already present.
pub(crate) fn merge_directives(existing: &mut Vec<Directive>, incoming: Vec<Directive>) {
    for directive in incoming {
        if !existing.iter().any(|d| d.same_as(&directive)) {
            existing.push(directive);
        }
    }
}

pub(crate) fn find_directive<'a>(
    directives: &'a [Directive],
    name: &str,
) -> Option<&'a Directive> {
    directives.iter().find(|d| d.name() == name)
}
