//! Desktop entry file store
//!
//! Maps registered application names to their `.desktop` files in one
//! applications directory, exposes the launch command values per group,
//! and persists files back to disk. Parsing keeps the raw lines around so
//! a save only rewrites the launch command lines and leaves comments,
//! ordering, and unrelated keys untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::constants::desktop::{COMMENT, EXTENSION, LAUNCH_KEY};
use crate::error::StoreError;

/// One applications directory (usually `~/.local/share/applications`)
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the desktop entry file for a single application name
    /// (extension is appended here)
    pub fn load_file(&self, name: &str) -> Result<DesktopFile, StoreError> {
        let file_name = format!("{name}{EXTENSION}");
        let path = self.path.join(&file_name);
        let contents = fs::read_to_string(&path)
            .map_err(|source| StoreError::io("read desktop entry", &path, source))?;

        Ok(DesktopFile {
            name: file_name,
            path,
            lines: contents.lines().map(String::from).collect(),
        })
    }

    /// Load the desktop entry files for a batch of application names.
    ///
    /// The batch is atomic on the read side: the first unreadable or
    /// missing file fails the whole call and no partial result is
    /// returned. An empty name list yields an empty result.
    pub fn load_files(&self, names: &[String]) -> Result<Vec<DesktopFile>, StoreError> {
        let mut files = Vec::with_capacity(names.len());

        for name in names {
            files.push(self.load_file(name)?);
        }

        Ok(files)
    }

    /// Persist the given files, in order. Stops at the first write failure;
    /// files already written stay written (no rollback).
    pub fn save_files<'a>(
        &self,
        files: impl IntoIterator<Item = &'a DesktopFile>,
    ) -> Result<(), StoreError> {
        for file in files {
            fs::write(&file.path, file.render())
                .map_err(|source| StoreError::io("write desktop entry", &file.path, source))?;
            debug!(file = %file.name, "saved desktop entry");
        }

        Ok(())
    }
}

/// An in-memory desktop entry file
#[derive(Debug)]
pub struct DesktopFile {
    name: String,
    path: PathBuf,
    lines: Vec<String>,
}

impl DesktopFile {
    /// On-disk file name, including the extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Launch command values relevant to this tool: the `Exec` value of
    /// each group in the file, keyed by group name. A file without any
    /// launch command yields an empty map, which is valid.
    pub fn get_values(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let mut values = BTreeMap::new();
        let mut group: Option<String> = None;

        for (idx, raw) in self.lines.iter().enumerate() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }

            if let Some(header) = parse_group_header(line) {
                group = Some(header.to_string());
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(StoreError::Parse {
                    path: self.path.clone(),
                    line: idx + 1,
                    reason: format!("expected 'Key=Value', found {line:?}"),
                });
            };

            if key.trim_end() == LAUNCH_KEY {
                // Keys outside any group are ignored rather than rejected
                if let Some(group) = &group {
                    values.insert(group.clone(), value.to_string());
                }
            }
        }

        Ok(values)
    }

    /// Rewrite the launch command of each named group, in memory only.
    /// Keys are group names as returned by [`get_values`](Self::get_values);
    /// groups not present in `next` keep their current command line.
    pub fn set_values(&mut self, next: &BTreeMap<String, String>) {
        let mut group: Option<String> = None;

        for raw in self.lines.iter_mut() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }

            if let Some(header) = parse_group_header(line) {
                group = Some(header.to_string());
                continue;
            }

            let is_launch_key = line
                .split_once('=')
                .is_some_and(|(key, _)| key.trim_end() == LAUNCH_KEY);

            if is_launch_key {
                if let Some(value) = group.as_ref().and_then(|g| next.get(g)) {
                    *raw = format!("{LAUNCH_KEY}={value}");
                }
            }
        }
    }

    fn render(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            let mut contents = self.lines.join("\n");
            contents.push('\n');
            contents
        }
    }
}

fn parse_group_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}
