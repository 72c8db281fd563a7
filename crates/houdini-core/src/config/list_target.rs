use serde::Deserialize;
use serde::Serialize;

/// Which lists an insert operation applies to by default.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ListTarget {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "NULL")]
    Null,
}
impl ListTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListTarget::All => "all",
            ListTarget::Null => "NULL",
        }
    }

    pub fn parse(target: &str) -> Option<Self> {
        match target {
            "all" => Some(ListTarget::All),
            "NULL" => Some(ListTarget::Null),
            _ => None,
        }
    }
}
