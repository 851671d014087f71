use std::path::{Component, Path, PathBuf};

/// Whether `path` is `dir` itself or lies beneath it.
///
/// Compares components after lexically folding `.` and `..`, so `/sdcard`
/// does not contain `/sdcard.txt` and trailing slashes make no difference.
/// Symlinks are not followed.
pub fn contains(dir: &Path, path: &Path) -> bool {
    lexical(path).starts_with(lexical(dir))
}

fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `/..` is still `/`.
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}
