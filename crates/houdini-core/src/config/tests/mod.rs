mod project_config_tests;
