use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use super::reconcile::StackMetadata;
use super::Result;

/// Stack metadata exported to a local directory
///
/// Documents are laid out as `stacks/{name}.yml` and `stacksets/{name}.yml`
/// under the root, one per stack or stack set.
#[derive(Clone, Debug)]
pub struct FileMetadata {
    root: PathBuf,
}

impl FileMetadata {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FileMetadata { root: root.as_ref().to_path_buf() }
    }

    fn read(&self, dir: &str, name: &str) -> Result<String> {
        let pth = self.root.join(dir).join(format!("{}.yml", name));
        if !pth.is_file() {
            bail!("no metadata found at {}", pth.display());
        }
        trace!("Reading metadata from {}", pth.display());
        let mut f = File::open(&pth)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        Ok(data)
    }
}

impl StackMetadata for FileMetadata {
    fn fetch_by_stack_name(&self, name: &str) -> Result<String> {
        self.read("stacks", name)
    }

    fn fetch_by_stack_set_name(&self, name: &str) -> Result<String> {
        self.read("stacksets", name)
    }
}
