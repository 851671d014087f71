use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Display name split into the part that may be changed and the extension that may not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameParts {
    pub base: String,
    /// Without the leading dot; `None` when the name gets no extension.
    pub extension: Option<String>,
}

impl NameParts {
    pub fn new(base: impl Into<String>, extension: Option<&str>) -> Self {
        Self {
            base: base.into(),
            extension: extension.map(str::to_string),
        }
    }

    /// `base[ (n)][.ext]`, with no disambiguator when `counter` is 0.
    pub fn render(&self, counter: u32) -> String {
        let mut name = self.base.clone();
        if counter > 0 {
            name.push_str(&format!(" ({counter})"));
        }
        if let Some(ext) = &self.extension {
            name.push('.');
            name.push_str(ext);
        }
        name
    }
}

/// Name that was free in the target directory at the last probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    name: String,
    counter: u32,
}

impl ResolvedName {
    pub(crate) fn new(name: String, counter: u32) -> Self {
        Self { name, counter }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn into_string(self) -> String {
        self.name
    }

    /// Disambiguation counter used; 0 when the plain name was free.
    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn path_in(&self, directory: &Path) -> PathBuf {
        directory.join(&self.name)
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("directory probe failed: {0}")]
    Probe(#[from] io::Error),
    #[error("no free name for {name:?} after {attempts} attempts")]
    DisambiguationExhausted { name: String, attempts: u32 },
}
