use crate::fs::filesystem::temp_sibling;
use crate::fs::Filesystem;
use std::fs;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// [`Filesystem`] backed by the host filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFilesystem;
impl Filesystem for OsFilesystem {
    fn mkdir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(fs::File::create(path)?))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(fs::File::open(path)?))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let tmp = temp_sibling(path)?;
        let result = (|| {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(contents)?;
            file.sync_all()?;
            fs::rename(&tmp, path)
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}
