use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use naming_logging::{naming_debug, naming_info};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::mime::MimeExtensionTable;
use crate::paths::contains;
use crate::probe::DirectoryProbe;
use crate::resolve::UniqueNameResolver;
use crate::types::{ResolveError, ResolvedName};

/// How often a freshly resolved name may be lost to a concurrent writer before giving up.
pub const MAX_CREATE_RACES: u32 = 8;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot place files in {}: {reason}", .dir.display())]
    TargetDir { dir: PathBuf, reason: String },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("failed to write resolved file: {0}")]
    Io(#[from] io::Error),
    #[error("lost {attempts} creation races in a row")]
    RaceLost { attempts: u32 },
}

/// Make `dir` ready to receive resolved names: create it with its parents if
/// absent, then check that an entry can actually be created inside.
///
/// A non-directory already at `dir` is refused.
pub fn prepare_target_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::TargetDir {
        dir: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(unusable("exists and is not a directory".into())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|e| unusable(e.to_string()))?;
            naming_debug!("created target directory {}", dir.display());
        }
        Err(err) => return Err(unusable(err.to_string())),
    }
    NamedTempFile::new_in(dir).map_err(|e| unusable(format!("not writable: {e}")))?;
    Ok(())
}

/// A file that did not exist before this call created it.
#[derive(Debug)]
pub struct CreatedFile {
    pub file: File,
    pub path: PathBuf,
    pub name: ResolvedName,
}

/// Resolve a free name and create it with exclusive-create semantics.
///
/// Another writer may take the name between the probe and the create; the
/// name is then resolved again, up to [`MAX_CREATE_RACES`] times.
pub fn create_unique_file<P, M>(
    resolver: &UniqueNameResolver<P, M>,
    dir: &Path,
    mime_type: Option<&str>,
    display_name: &str,
) -> Result<CreatedFile, PersistError>
where
    P: DirectoryProbe,
    M: MimeExtensionTable,
{
    prepare_target_dir(dir)?;

    for _ in 0..MAX_CREATE_RACES {
        let name = resolver.resolve_unique(dir, mime_type, display_name)?;
        let path = name.path_in(dir);
        debug_assert!(contains(dir, &path), "{} escaped {}", path.display(), dir.display());
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                naming_info!("created {}", path.display());
                return Ok(CreatedFile { file, path, name });
            }
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                naming_debug!("lost race for {}, resolving again", path.display());
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(PersistError::RaceLost {
        attempts: MAX_CREATE_RACES,
    })
}

/// Writes whole files under freshly resolved names, never replacing an existing entry.
///
/// Content goes to a temp file first and is moved into place without
/// clobbering, so a reader never sees a partial file under the final name.
pub struct UniqueFileWriter<P, M> {
    dir: PathBuf,
    resolver: UniqueNameResolver<P, M>,
}

impl<P: DirectoryProbe, M: MimeExtensionTable> UniqueFileWriter<P, M> {
    pub fn new(dir: PathBuf, resolver: UniqueNameResolver<P, M>) -> Self {
        Self { dir, resolver }
    }

    pub fn write(
        &self,
        mime_type: Option<&str>,
        display_name: &str,
        content: &[u8],
    ) -> Result<PathBuf, PersistError> {
        prepare_target_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        for _ in 0..MAX_CREATE_RACES {
            let name = self
                .resolver
                .resolve_unique(&self.dir, mime_type, display_name)?;
            let target = name.path_in(&self.dir);
            debug_assert!(contains(&self.dir, &target));
            match tmp.persist_noclobber(&target) {
                Ok(_) => {
                    naming_info!("wrote {} bytes to {}", content.len(), target.display());
                    return Ok(target);
                }
                Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                    naming_debug!("lost race for {}, resolving again", target.display());
                    tmp = err.file;
                }
                Err(err) => return Err(PersistError::Io(err.error)),
            }
        }
        Err(PersistError::RaceLost {
            attempts: MAX_CREATE_RACES,
        })
    }
}
