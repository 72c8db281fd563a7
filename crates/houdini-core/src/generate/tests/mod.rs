mod generate_errors_tests;
mod generator_tests;
