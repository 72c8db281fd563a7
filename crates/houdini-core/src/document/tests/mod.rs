mod type_modifiers_tests;
mod value_tests;
