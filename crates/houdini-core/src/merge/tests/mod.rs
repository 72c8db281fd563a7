mod merger_tests;
mod pagination_tests;
