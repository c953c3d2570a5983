use std::path::Path;

/// Abstraction for filesystem presence checks during interpreter discovery.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// Probe that checks the real filesystem.
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
