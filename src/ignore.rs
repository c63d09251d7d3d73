use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Read the newline-delimited list of solar system IDs to suppress.
///
/// These must be the system IDs, not the system names. No path means an
/// empty set, and a read failure degrades to an empty set with a warning
/// rather than refusing to start.
pub fn load_ignore_list(path: Option<&Path>) -> HashSet<String> {
    let Some(path) = path else {
        return HashSet::new();
    };

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("could not read ignore list {}: {}", path.display(), e);
            return HashSet::new();
        }
    };

    let ignored: HashSet<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!("read {} ignored systems", ignored.len());
    ignored
}
