#[allow(clippy::module_inception)]
mod artifact;
mod artifact_builder;
mod emit_error;
mod emitter;
mod input_builder;
mod js_value;
mod key_raw;
mod list_operations;
mod loading;
mod selection_builder;

pub use artifact::Artifact;
pub use artifact_builder::ArtifactBuilder;
pub use emit_error::EmitError;
pub use emitter::Emitter;
