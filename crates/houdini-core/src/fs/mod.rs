mod filesystem;
mod memory_filesystem;
mod os_filesystem;

pub use filesystem::Filesystem;
pub use memory_filesystem::MemoryFilesystem;
pub use os_filesystem::OsFilesystem;

#[cfg(test)]
mod tests;
