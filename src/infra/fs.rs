use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// The two filesystem operations the matcher is allowed to perform.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

pub struct LocalFs;

impl FileSystem for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

/// Never renames anything, but remembers the renames it would have done so
/// later existence checks see the same tree a real run would.
#[derive(Debug, Default)]
pub struct DryRunFs {
    created: RefCell<HashSet<PathBuf>>,
    vacated: RefCell<HashSet<PathBuf>>,
}

impl FileSystem for DryRunFs {
    fn exists(&self, path: &Path) -> bool {
        if self.created.borrow().contains(path) {
            return true;
        }
        if self.vacated.borrow().contains(path) {
            return false;
        }
        path.exists()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        info!("  [dry run] would rename {:?} -> {:?}", from, to);
        self.created.borrow_mut().remove(from);
        self.vacated.borrow_mut().insert(from.to_path_buf());
        self.vacated.borrow_mut().remove(to);
        self.created.borrow_mut().insert(to.to_path_buf());
        Ok(())
    }
}
