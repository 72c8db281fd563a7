mod generate_error;
mod generate_errors;
mod generate_summary;
mod generator;

pub use generate_error::GenerateError;
pub use generate_errors::GenerateErrors;
pub use generate_summary::GenerateSummary;
pub use generator::Generator;

#[cfg(test)]
mod tests;
