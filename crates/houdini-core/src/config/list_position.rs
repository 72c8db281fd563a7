use serde::Deserialize;
use serde::Serialize;

/// Where list operations insert new records when a spread names neither
/// `@prepend` nor `@append`.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListPosition {
    First,
    #[default]
    Last,
}
impl ListPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListPosition::First => "first",
            ListPosition::Last => "last",
        }
    }

    pub fn parse(position: &str) -> Option<Self> {
        match position {
            "first" => Some(ListPosition::First),
            "last" => Some(ListPosition::Last),
            _ => None,
        }
    }
}
