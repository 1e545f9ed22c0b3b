//! GPU-offload prefix transformation
//!
//! The core of the tool: decides, per launch command value, whether and how
//! to add, remove, or replace a GPU-offload wrapper prefix, and applies the
//! decision across a batch of registered applications through the desktop
//! file store.
//!
//! Prefix detection is on a logical-token basis: a wrapper command only
//! counts as present when it is followed by a separator or the end of the
//! value, so a command that merely starts with the same characters
//! (`primusrun2`) is never mistaken for a wrapper.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::constants::desktop::EXTENSION;
use crate::constants::prefix::{KNOWN, SEPARATOR};
use crate::desktop::Directory;
use crate::entry::Entry;

/// Whether a launch command value already starts with any known
/// GPU-offload wrapper
pub fn is_gpu_enabled(value: &str) -> bool {
    KNOWN.iter().any(|prefix| starts_with_token(value, prefix))
}

/// True when `value` starts with `token` as a whole leading word
fn starts_with_token(value: &str, token: &str) -> bool {
    match value.strip_prefix(token) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Strip the leading known wrapper (and its separator) from `value`.
/// Known wrappers are checked in a fixed priority order; the first match
/// wins. Returns `None` when no wrapper is present.
fn strip_known_prefix(value: &str) -> Option<String> {
    for prefix in KNOWN {
        if let Some(rest) = value.strip_prefix(prefix) {
            if rest.is_empty() {
                return Some(String::new());
            }
            if let Some(rest) = rest.strip_prefix(SEPARATOR) {
                return Some(rest.to_string());
            }
        }
    }

    None
}

/// Compute the next launch command for one value under the given policy.
///
/// An empty `prefix` is a revert request: strip any known wrapper. A
/// non-empty `prefix` ensures a wrapper is present; with `strict` set, a
/// different known wrapper is replaced by the requested one instead of
/// being left alone. Returns `None` when the value needs no change, which
/// makes the function idempotent under a fixed policy.
pub fn transform_value(value: &str, prefix: &str, strict: bool) -> Option<String> {
    if prefix.is_empty() {
        return strip_known_prefix(value);
    }

    if !is_gpu_enabled(value) {
        return Some(format!("{prefix}{SEPARATOR}{value}"));
    }

    // It doesn't matter which wrapper is present
    if !strict {
        return None;
    }

    // The requested wrapper is already in place
    if starts_with_token(value, prefix) {
        return None;
    }

    // A different known wrapper is present: strip it, then re-apply the
    // requested one to the now wrapper-free value
    let Some(stripped) = strip_known_prefix(value) else {
        // Cannot happen while is_gpu_enabled and strip_known_prefix agree
        // on the known set; treated as a self-check failure, not a no-op
        warn!(value, "wrapper detected but could not be stripped, leaving value unchanged");
        return None;
    };

    transform_value(&stripped, prefix, false)
}

/// Applies or removes a GPU-offload prefix across batches of registered
/// applications
pub struct Transformer {
    dir: Directory,
}

impl Transformer {
    pub fn new(dir: Directory) -> Self {
        Self { dir }
    }

    /// Ensure `prefix` is present on every launch command of the given
    /// entries. Returns the names of the entries that were actually
    /// modified.
    pub fn apply(&self, entries: &[Entry], prefix: &str, strict: bool) -> Result<Vec<String>> {
        self.transform(entries, prefix, strict)
    }

    /// Strip any known GPU-offload prefix from the given entries.
    /// Returns the names of the entries that were actually modified.
    pub fn revert(&self, entries: &[Entry]) -> Result<Vec<String>> {
        self.transform(entries, "", false)
    }

    /// One batch: load all files, compute per-file updates, save only the
    /// files that changed. Any failure aborts the whole batch and discards
    /// partial progress; the caller gets either the full result list or an
    /// error, never both.
    fn transform(&self, entries: &[Entry], prefix: &str, strict: bool) -> Result<Vec<String>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = entries.iter().map(|e| e.name().to_string()).collect();

        let mut files = self
            .dir
            .load_files(&names)
            .context("failed to load desktop entries")?;

        let mut results = Vec::new();
        let mut to_save = Vec::new();

        for (idx, file) in files.iter_mut().enumerate() {
            let current = file
                .get_values()
                .context("failed to read launch commands")?;

            if current.is_empty() {
                continue;
            }

            let mut next = BTreeMap::new();

            for (group, value) in &current {
                if let Some(next_value) = transform_value(value, prefix, strict) {
                    next.insert(group.clone(), next_value);
                }
            }

            if next.is_empty() {
                continue;
            }

            // One name per file, no matter how many groups changed
            let name = file.name().strip_suffix(EXTENSION).unwrap_or(file.name());
            results.push(name.to_string());

            file.set_values(&next);
            to_save.push(idx);
        }

        self.dir
            .save_files(to_save.iter().map(|&idx| &files[idx]))
            .context("failed to save desktop entries")?;

        info!(modified = results.len(), total = entries.len(), "transformed desktop entries");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::prefix::{OPTIRUN, PRIMUSRUN};
    use std::fs;
    use tempfile::TempDir;

    // --- single-value transform ---

    #[test]
    fn test_plain_add() {
        let next = transform_value("myapp --flag", OPTIRUN, false).unwrap();
        assert_eq!(next, "optirun myapp --flag");

        let next = transform_value("myapp --flag", OPTIRUN, true).unwrap();
        assert_eq!(next, "optirun myapp --flag");
    }

    #[test]
    fn test_lenient_no_op() {
        assert_eq!(transform_value("optirun myapp", PRIMUSRUN, false), None);
        assert_eq!(transform_value("primusrun myapp", PRIMUSRUN, false), None);
    }

    #[test]
    fn test_strict_replacement() {
        let next = transform_value("optirun myapp", PRIMUSRUN, true).unwrap();
        assert_eq!(next, "primusrun myapp");
    }

    #[test]
    fn test_strict_same_prefix_no_op() {
        assert_eq!(transform_value("primusrun myapp", PRIMUSRUN, true), None);
    }

    #[test]
    fn test_revert() {
        let next = transform_value("primusrun myapp", "", false).unwrap();
        assert_eq!(next, "myapp");

        let next = transform_value("optirun myapp --flag", "", false).unwrap();
        assert_eq!(next, "myapp --flag");
    }

    #[test]
    fn test_revert_without_prefix_is_no_op() {
        assert_eq!(transform_value("myapp", "", false), None);
    }

    #[test]
    fn test_bare_wrapper_strips_to_empty() {
        let next = transform_value("primusrun", "", false).unwrap();
        assert_eq!(next, "");
    }

    #[test]
    fn test_token_boundary() {
        // A longer command that merely starts with a wrapper's characters
        assert!(!is_gpu_enabled("primusrun2 myapp"));
        assert!(!is_gpu_enabled("optirunner"));
        assert_eq!(transform_value("primusrun2 myapp", "", false), None);

        let next = transform_value("primusrun2 myapp", OPTIRUN, true).unwrap();
        assert_eq!(next, "optirun primusrun2 myapp");
    }

    #[test]
    fn test_is_gpu_enabled() {
        assert!(is_gpu_enabled("primusrun myapp"));
        assert!(is_gpu_enabled("optirun myapp"));
        assert!(is_gpu_enabled("optirun"));
        assert!(!is_gpu_enabled("myapp"));
        assert!(!is_gpu_enabled(""));
    }

    #[test]
    fn test_idempotence() {
        let policies = [
            (PRIMUSRUN, false),
            (PRIMUSRUN, true),
            (OPTIRUN, true),
            ("", false),
        ];
        let values = ["myapp --flag", "optirun myapp", "primusrun myapp", "primusrun"];

        for (prefix, strict) in policies {
            for value in values {
                if let Some(next) = transform_value(value, prefix, strict) {
                    assert_eq!(
                        transform_value(&next, prefix, strict),
                        None,
                        "second pass changed {value:?} again under ({prefix:?}, {strict})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_add_then_strip_round_trip() {
        for value in ["myapp", "myapp --flag %u", "env FOO=1 myapp"] {
            let added = transform_value(value, PRIMUSRUN, false).unwrap();
            let stripped = transform_value(&added, "", false).unwrap();
            assert_eq!(stripped, value);
        }
    }

    #[test]
    fn test_known_prefixes_are_mutually_non_prefixing() {
        for a in KNOWN {
            for b in KNOWN {
                if a != b {
                    assert!(!starts_with_token(a, b), "{b:?} is a token prefix of {a:?}");
                }
            }
        }
    }

    // --- batch transform against a real directory ---

    fn write_desktop(dir: &TempDir, name: &str, exec: &str) {
        let contents = format!("[Desktop Entry]\nName={name}\nExec={exec}\nType=Application\n");
        fs::write(dir.path().join(format!("{name}.desktop")), contents).unwrap();
    }

    fn read_exec(dir: &TempDir, name: &str) -> String {
        let contents = fs::read_to_string(dir.path().join(format!("{name}.desktop"))).unwrap();
        contents
            .lines()
            .find_map(|line| line.strip_prefix("Exec="))
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_empty_entries_is_no_op() {
        // Deliberately not a real directory: an empty batch must return
        // before touching the store
        let transformer = Transformer::new(Directory::new("/nonexistent"));
        assert!(transformer.apply(&[], PRIMUSRUN, false).unwrap().is_empty());
        assert!(transformer.revert(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_apply_and_revert_batch() {
        let tmp = TempDir::new().unwrap();
        write_desktop(&tmp, "firefox", "firefox %u");
        write_desktop(&tmp, "steam", "steam");

        let entries = vec![Entry::new("firefox"), Entry::new("steam")];
        let transformer = Transformer::new(Directory::new(tmp.path()));

        let modified = transformer.apply(&entries, PRIMUSRUN, false).unwrap();
        assert_eq!(modified, vec!["firefox", "steam"]);
        assert_eq!(read_exec(&tmp, "firefox"), "primusrun firefox %u");
        assert_eq!(read_exec(&tmp, "steam"), "primusrun steam");

        // Second pass is a no-op
        let modified = transformer.apply(&entries, PRIMUSRUN, false).unwrap();
        assert!(modified.is_empty());

        let modified = transformer.revert(&entries).unwrap();
        assert_eq!(modified, vec!["firefox", "steam"]);
        assert_eq!(read_exec(&tmp, "firefox"), "firefox %u");
        assert_eq!(read_exec(&tmp, "steam"), "steam");
    }

    #[test]
    fn test_strict_switch_replaces_other_wrapper() {
        let tmp = TempDir::new().unwrap();
        write_desktop(&tmp, "blender", "optirun blender");

        let entries = vec![Entry::new("blender")];
        let transformer = Transformer::new(Directory::new(tmp.path()));

        let modified = transformer.apply(&entries, PRIMUSRUN, true).unwrap();
        assert_eq!(modified, vec!["blender"]);
        assert_eq!(read_exec(&tmp, "blender"), "primusrun blender");
    }

    #[test]
    fn test_file_without_launch_command_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let contents = "[Desktop Entry]\nName=Settings\nType=Application\n";
        fs::write(tmp.path().join("settings.desktop"), contents).unwrap();
        let before = fs::metadata(tmp.path().join("settings.desktop")).unwrap().modified().unwrap();

        let transformer = Transformer::new(Directory::new(tmp.path()));
        let modified = transformer.apply(&[Entry::new("settings")], PRIMUSRUN, false).unwrap();

        assert!(modified.is_empty());
        let after = fs::metadata(tmp.path().join("settings.desktop")).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_single_report_for_multi_group_file() {
        let tmp = TempDir::new().unwrap();
        let contents = "\
[Desktop Entry]
Name=Firefox
Exec=firefox %u

[Desktop Action PrivateWindow]
Name=New Private Window
Exec=firefox --private-window
";
        fs::write(tmp.path().join("firefox.desktop"), contents).unwrap();

        let transformer = Transformer::new(Directory::new(tmp.path()));
        let modified = transformer.apply(&[Entry::new("firefox")], OPTIRUN, false).unwrap();

        // Both groups changed, one name reported
        assert_eq!(modified, vec!["firefox"]);
        let written = fs::read_to_string(tmp.path().join("firefox.desktop")).unwrap();
        assert!(written.contains("Exec=optirun firefox %u"));
        assert!(written.contains("Exec=optirun firefox --private-window"));
    }

    #[test]
    fn test_malformed_entry_mid_batch_discards_progress() {
        let tmp = TempDir::new().unwrap();
        write_desktop(&tmp, "firefox", "firefox %u");
        let contents = "[Desktop Entry]\nName=Broken\nnot a key\n";
        fs::write(tmp.path().join("zbroken.desktop"), contents).unwrap();

        // The well-formed file is processed first; the parse failure on the
        // second file must abort the batch before anything is saved
        let entries = vec![Entry::new("firefox"), Entry::new("zbroken")];
        let transformer = Transformer::new(Directory::new(tmp.path()));

        assert!(transformer.apply(&entries, PRIMUSRUN, false).is_err());
        assert_eq!(read_exec(&tmp, "firefox"), "firefox %u");
    }

    #[test]
    fn test_missing_entry_fails_whole_batch() {
        let tmp = TempDir::new().unwrap();
        write_desktop(&tmp, "firefox", "firefox %u");

        let entries = vec![Entry::new("firefox"), Entry::new("ghost")];
        let transformer = Transformer::new(Directory::new(tmp.path()));

        assert!(transformer.apply(&entries, PRIMUSRUN, false).is_err());
        // The readable file was not modified either
        assert_eq!(read_exec(&tmp, "firefox"), "firefox %u");
    }
}
