//! Naming engine: filesystem-safe names and collision-free resolution.
mod mime;
mod paths;
mod persist;
mod policy;
mod probe;
mod resolve;
mod sanitize;
mod trim;
mod types;

pub use mime::{
    is_directory_mime, normalize_mime, BuiltinMimeTable, MimeExtensionTable,
    DIRECTORY_MIME_TYPES, MIME_TYPE_DEFAULT,
};
pub use paths::contains;
pub use persist::{
    create_unique_file, prepare_target_dir, CreatedFile, PersistError, UniqueFileWriter,
    MAX_CREATE_RACES,
};
pub use policy::{
    is_reserved_alias, is_valid_char, LengthMeasure, NamingPolicy, PolicyError,
    MAX_FILENAME_BYTES, PLACEHOLDER_NAME, REPLACEMENT_CHAR, RESERVED_ALIASES,
};
pub use probe::{DirectoryProbe, FsProbe};
pub use resolve::UniqueNameResolver;
pub use sanitize::{build_valid, is_valid, sanitize};
pub use trim::{trim_name, ELLIPSIS, MAX_TRIM_EXTENSION_CHARS};
pub use types::{NameParts, ResolveError, ResolvedName};
