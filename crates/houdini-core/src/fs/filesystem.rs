use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// The output side of the pipeline. Paths are POSIX-style.
pub trait Filesystem: Send + Sync {
    /// Creates `path` and every missing parent. Succeeds if it exists.
    fn mkdir_all(&self, path: &Path) -> io::Result<()>;

    /// Opens `path` for writing, truncating any existing content.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut contents = String::new();
        self.open(path)?.read_to_string(&mut contents)?;
        Ok(contents)
    }

    /// Replaces `path` with `contents` so that readers observe either the
    /// previous file or the complete new one.
    ///
    /// The data goes to a hidden sibling (`.<name>.tmp`) first and is then
    /// renamed over the destination.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let tmp = temp_sibling(path)?;
        {
            let mut writer = self.create(&tmp)?;
            writer.write_all(contents)?;
            writer.flush()?;
        }
        self.rename(&tmp, path)
    }
}

pub(crate) fn temp_sibling(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy())))
}
