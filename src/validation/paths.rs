use std::path::{Component, Path, PathBuf};

/// Resolve a CLI-supplied path against `base`.
///
/// Purely lexical: `.` is dropped, `..` removes the previous component (never above
/// the root) and symlinks are left alone. An absolute `input` ignores `base`.
pub fn resolve_path(base: &Path, input: &str) -> PathBuf {
    normalize(&base.join(input))
}

fn normalize(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => resolved.push(part),
        }
    }
    resolved
}
