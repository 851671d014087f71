use std::fs;
use std::io;
use std::path::Path;

/// Answers whether `name` is currently taken inside `directory`.
///
/// Implementations must report the live state; the resolver does no caching
/// and leaves case folding to the probe.
pub trait DirectoryProbe: Send + Sync {
    fn exists(&self, directory: &Path, name: &str) -> io::Result<bool>;
}

impl<F> DirectoryProbe for F
where
    F: Fn(&Path, &str) -> io::Result<bool> + Send + Sync,
{
    fn exists(&self, directory: &Path, name: &str) -> io::Result<bool> {
        self(directory, name)
    }
}

/// Probe backed by the local filesystem.
///
/// Uses `symlink_metadata`, so a dangling symlink still counts as taken.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl DirectoryProbe for FsProbe {
    fn exists(&self, directory: &Path, name: &str) -> io::Result<bool> {
        match fs::symlink_metadata(directory.join(name)) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fs_probe_sees_files_and_directories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "x").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        assert!(FsProbe.exists(temp.path(), "a.txt").unwrap());
        assert!(FsProbe.exists(temp.path(), "sub").unwrap());
        assert!(!FsProbe.exists(temp.path(), "b.txt").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_taken() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("link")).unwrap();
        assert!(FsProbe.exists(temp.path(), "link").unwrap());
    }

    #[test]
    fn closures_act_as_probes() {
        let probe = |_: &Path, name: &str| Ok::<_, io::Error>(name == "taken");
        assert!(probe.exists(Path::new("/any"), "taken").unwrap());
        assert!(!probe.exists(Path::new("/any"), "free").unwrap());
    }
}
