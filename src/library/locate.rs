use std::path::{Path, PathBuf};

const RESOURCES_DIR: &str = "Resources";

/// Look for a `Resources` directory next to `start` or next to one of its
/// first `max_parents` ancestors.
pub fn locate_resources_dir(start: &Path, max_parents: usize) -> Option<PathBuf> {
    start
        .ancestors()
        .take(max_parents + 1)
        .map(|dir| dir.join(RESOURCES_DIR))
        .find(|candidate| candidate.is_dir())
}

/// Resolve where the playlist file lives.
///
/// An explicit `configured` path always wins. Otherwise the file is placed in
/// the nearest `Resources` directory above `cwd`; `None` means no library
/// location exists.
pub fn locate_playlist_file(
    configured: Option<&Path>,
    cwd: &Path,
    file_name: &str,
    max_parents: usize,
) -> Option<PathBuf> {
    if let Some(p) = configured {
        return Some(p.to_path_buf());
    }
    locate_resources_dir(cwd, max_parents).map(|dir| dir.join(file_name))
}
