use std::path::Path;

use naming_logging::{naming_debug, naming_trace, naming_warn};

use crate::mime::{is_directory_mime, BuiltinMimeTable, MimeExtensionTable};
use crate::policy::{NamingPolicy, PolicyError, PLACEHOLDER_NAME};
use crate::probe::{DirectoryProbe, FsProbe};
use crate::sanitize::{replace_invalid_chars, sanitize};
use crate::types::{NameParts, ResolveError, ResolvedName};

/// Picks a filename that is valid for the target volume and free in the target directory.
///
/// The resolver holds no state between calls: the same inputs against an
/// unchanged directory give the same name. A free name is only free at
/// probe time; callers that create the file must use exclusive creation
/// and resolve again if they lose the race (see [`crate::create_unique_file`]).
#[derive(Debug, Clone)]
pub struct UniqueNameResolver<P = FsProbe, M = BuiltinMimeTable> {
    probe: P,
    table: M,
    policy: NamingPolicy,
}

impl UniqueNameResolver {
    /// Filesystem probe, built-in MIME table, 255-byte names.
    pub fn with_defaults() -> Self {
        Self {
            probe: FsProbe,
            table: BuiltinMimeTable,
            policy: NamingPolicy::default(),
        }
    }
}

impl Default for UniqueNameResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<P: DirectoryProbe, M: MimeExtensionTable> UniqueNameResolver<P, M> {
    /// Fails when `policy.max_length` cannot hold a name at the highest counter.
    pub fn new(probe: P, table: M, policy: NamingPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            probe,
            table,
            policy,
        })
    }

    pub fn policy(&self) -> &NamingPolicy {
        &self.policy
    }

    /// Resolve a name for `display_name` inside `directory`.
    ///
    /// With a MIME type the extension is reconciled against the type's known
    /// extensions; without one the name's own trailing `.suffix` is used.
    pub fn resolve_unique(
        &self,
        directory: &Path,
        mime_type: Option<&str>,
        display_name: &str,
    ) -> Result<ResolvedName, ResolveError> {
        let parts = self.split_display_name(mime_type, display_name);
        naming_debug!(
            "resolving {display_name:?} ({}) as base {:?} ext {:?} in {}",
            mime_type.unwrap_or("no mime type"),
            parts.base,
            parts.extension,
            directory.display()
        );

        let max_attempts = self.policy.max_attempts;
        for counter in 0..=max_attempts {
            let candidate = self.fit(&parts, counter).render(counter);
            if !self.probe.exists(directory, &candidate)? {
                return Ok(ResolvedName::new(candidate, counter));
            }
            naming_trace!("{candidate:?} already exists");
        }

        let name = self.fit(&parts, 0).render(0);
        naming_warn!(
            "gave up on {name:?} in {} after {} collisions",
            directory.display(),
            max_attempts
        );
        Err(ResolveError::DisambiguationExhausted {
            name,
            attempts: max_attempts.saturating_add(1),
        })
    }

    /// Resolve using the extension already present in `display_name`.
    pub fn resolve_unique_mimeless(
        &self,
        directory: &Path,
        display_name: &str,
    ) -> Result<ResolvedName, ResolveError> {
        self.resolve_unique(directory, None, display_name)
    }

    /// Decide which part of `display_name` is the extension, before any sanitizing.
    pub fn split_display_name(&self, mime_type: Option<&str>, display_name: &str) -> NameParts {
        let Some(mime_type) = mime_type else {
            return split_trailing_extension(display_name);
        };
        if is_directory_mime(mime_type) {
            return NameParts::new(display_name, None);
        }

        let mut extensions = self.table.extensions_for(mime_type);
        extensions.retain(|ext| !ext.is_empty());
        let Some(canonical) = extensions.first() else {
            return NameParts::new(display_name, None);
        };

        match display_name.rsplit_once('.') {
            Some((base, ext)) if extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) => {
                NameParts::new(base, Some(ext))
            }
            _ => NameParts::new(display_name, Some(canonical.as_str())),
        }
    }

    // The extension is kept whole or, when it cannot fit next to the widest
    // counter, folded into the base; the base gets whatever `counter` leaves.
    fn fit(&self, parts: &NameParts, counter: u32) -> NameParts {
        let measure = self.policy.measure;
        let max_length = self.policy.max_length;
        let dot = measure.of_char('.');

        let (base, extension) = match &parts.extension {
            Some(ext) => {
                let cleaned = replace_invalid_chars(ext);
                let reserve = self.policy.disambiguator_reserve();
                if dot + measure.of_str(&cleaned) + reserve + 1 <= max_length {
                    (parts.base.clone(), Some(cleaned))
                } else {
                    let base = if parts.base.is_empty() {
                        PLACEHOLDER_NAME
                    } else {
                        parts.base.as_str()
                    };
                    (format!("{base}.{ext}"), None)
                }
            }
            None => (parts.base.clone(), None),
        };

        let ext_len = extension
            .as_deref()
            .map_or(0, |ext| dot + measure.of_str(ext));
        let counter_len = if counter > 0 {
            format!(" ({counter})").len()
        } else {
            0
        };
        let base_budget = max_length.saturating_sub(ext_len + counter_len);

        NameParts {
            base: sanitize(&base, base_budget, measure),
            extension,
        }
    }
}

// A leading dot marks a hidden file, not an extension.
fn split_trailing_extension(display_name: &str) -> NameParts {
    match display_name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() && !ext.is_empty() => NameParts::new(base, Some(ext)),
        _ => NameParts::new(display_name, None),
    }
}
