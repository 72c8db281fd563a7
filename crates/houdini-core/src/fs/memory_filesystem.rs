use crate::fs::Filesystem;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::io;
use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

#[derive(Debug, Default)]
struct MemoryState {
    directories: BTreeSet<PathBuf>,
    fail_renames: bool,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// An in-memory [`Filesystem`]. Clones share the same tree.
#[derive(Clone, Debug, Default)]
pub struct MemoryFilesystem {
    state: Arc<Mutex<MemoryState>>,
}
impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    pub fn contents_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.contents(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.lock().directories.contains(path.as_ref())
    }

    /// Every file path, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    /// Makes every subsequent rename fail, which lets callers observe what
    /// an interrupted atomic write leaves behind.
    pub fn set_fail_renames(&self, fail: bool) {
        self.lock().fail_renames = fail;
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
impl Filesystem for MemoryFilesystem {
    fn mkdir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                state.directories.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !state.directories.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ));
            }
        }
        state.files.insert(path.to_path_buf(), vec![]);
        Ok(Box::new(MemoryWriter {
            buffer: vec![],
            path: path.to_path_buf(),
            state: Arc::clone(&self.state),
        }))
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        match self.lock().files.get(path) {
            Some(bytes) => Ok(Box::new(Cursor::new(bytes.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut state = self.lock();
        if state.fail_renames {
            return Err(io::Error::other(format!(
                "rename of {} refused",
                from.display(),
            )));
        }
        let bytes = state.files.remove(from).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", from.display()),
            )
        })?;
        state.files.insert(to.to_path_buf(), bytes);
        Ok(())
    }
}

struct MemoryWriter {
    buffer: Vec<u8>,
    path: PathBuf,
    state: Arc<Mutex<MemoryState>>,
}
impl MemoryWriter {
    fn commit(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.files.insert(self.path.clone(), self.buffer.clone());
    }
}
impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.commit();
        Ok(())
    }
}
impl Drop for MemoryWriter {
    fn drop(&mut self) {
        self.commit();
    }
}
