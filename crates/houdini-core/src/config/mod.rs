mod cache_policy;
mod list_position;
mod list_target;
mod paginate_mode;
mod project_config;

pub use cache_policy::CachePolicy;
pub use list_position::ListPosition;
pub use list_target::ListTarget;
pub use paginate_mode::PaginateMode;
pub use project_config::ProjectConfig;

#[cfg(test)]
mod tests;
