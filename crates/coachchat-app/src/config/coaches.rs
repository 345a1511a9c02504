use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use coachchat_types::Coach;

/// Discover coaches from a directory of persona files.
///
/// Every `*.json` file that is not hidden and parses as JSON becomes a coach,
/// in file-name order. Unreadable or malformed files are skipped with a
/// warning.
pub fn discover_coaches(dir: &Path) -> Result<Vec<Coach>> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list coach directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            !name.starts_with('.') && path.extension().and_then(|e| e.to_str()) == Some("json")
        })
        .collect();
    files.sort();

    let mut coaches = Vec::with_capacity(files.len());
    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping coach file {}: {}", path.display(), e);
                continue;
            }
        };
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&content) {
            log::warn!("Skipping coach file {}: invalid JSON: {}", path.display(), e);
            continue;
        }

        coaches.push(Coach::from_file_stem(stem));
    }

    log::debug!("Discovered {} coaches in {}", coaches.len(), dir.display());
    Ok(coaches)
}

/// Find a coach by display name or URL name, ignoring case
pub fn find_coach<'a>(coaches: &'a [Coach], query: &str) -> Option<&'a Coach> {
    let query = query.trim().to_lowercase();
    let compact = query.replace(' ', "");
    coaches
        .iter()
        .find(|c| c.name.to_lowercase() == query || c.url_name == compact)
}
