// Session persistence: save/restore every workspace across restarts.
// The file holds a `SessionRecord` as pretty JSON; splitter sizes are not kept.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tyle_layout::SessionRecord;

// ──────────────────────────────────────────────
// Session file I/O
// ──────────────────────────────────────────────

pub fn session_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tyle")
        .join("session.json")
}

pub fn save_session_to(record: &SessionRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create session directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(record).context("Failed to serialize session")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write session to {}", path.display()))?;

    log::info!("Saved session ({} workspaces) to {}", record.workspaces.len(), path.display());
    Ok(())
}

/// `Ok(None)` when the file is missing or empty; an error when it exists but
/// cannot be read or parsed.
pub fn load_session_from(path: &Path) -> Result<Option<SessionRecord>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(None);
    }

    let record: SessionRecord = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse session from {}", path.display()))?;

    log::info!("Loaded session ({} workspaces) from {}", record.workspaces.len(), path.display());
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tyle_core::Orientation;
    use tyle_layout::{NodeRecord, WorkspaceRecord};

    fn sample_session() -> SessionRecord {
        let mut record = SessionRecord {
            current_workspace: 2,
            ..Default::default()
        };
        record.workspaces.insert(
            2,
            WorkspaceRecord {
                tiling_mode: "bsp".to_string(),
                active_index: 1,
                tree: Some(NodeRecord::split(
                    Orientation::Horizontal,
                    vec![
                        NodeRecord::tile(vec!["https://a.example".to_string()]),
                        NodeRecord::tile(vec!["https://b.example".to_string()]),
                    ],
                )),
            },
        );
        record
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp = tempdir().unwrap();
        let result = load_session_from(&temp.path().join("nonexistent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.json");
        std::fs::write(&path, "  \n").unwrap();
        assert!(load_session_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("corrupt.json");
        std::fs::write(&path, "{\"workspaces\": [[[").unwrap();
        assert!(load_session_from(&path).is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("session.json");

        let record = sample_session();
        save_session_to(&record, &path).unwrap();
        let loaded = load_session_from(&path).unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_legacy_layout() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("session.json");
        std::fs::write(
            &path,
            r#"{
                "current_workspace_idx": 3,
                "workspaces": {
                    "3": {
                        "tiling_mode": "horizontal",
                        "active_tile_index": 0,
                        "tree": {"type": "splitter", "orientation": "H",
                                 "children": [{"type": "tile", "tabs": ["https://x.example"]}]}
                    }
                }
            }"#,
        )
        .unwrap();

        let loaded = load_session_from(&path).unwrap().unwrap();
        assert_eq!(loaded.current_workspace, 3);
        let tree = loaded.workspaces[&3].tree.as_ref().unwrap();
        assert_eq!(tree.children[0].items, vec!["https://x.example".to_string()]);
    }
}
