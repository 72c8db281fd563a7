use serde::Deserialize;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PaginateMode {
    #[default]
    Infinite,
    SinglePage,
}
impl PaginateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaginateMode::Infinite => "Infinite",
            PaginateMode::SinglePage => "SinglePage",
        }
    }

    pub fn parse(mode: &str) -> Option<Self> {
        match mode {
            "Infinite" => Some(PaginateMode::Infinite),
            "SinglePage" => Some(PaginateMode::SinglePage),
            _ => None,
        }
    }
}
