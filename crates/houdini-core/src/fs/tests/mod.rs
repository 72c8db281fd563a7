mod memory_filesystem_tests;
mod os_filesystem_tests;
