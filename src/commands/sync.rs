//! `sync`: re-apply the active prefix to every registered application
//!
//! Package upgrades overwrite desktop entry files; sync repairs them.

use anyhow::Result;

use super::surface;
use crate::desktop::Directory;
use crate::entry::Entry;
use crate::registry::Registry;
use crate::transform::Transformer;

pub fn run(registry: &Registry) -> Result<()> {
    if registry.entries.is_empty() {
        println!("no applications registered");
        return Ok(());
    }

    let entries: Vec<Entry> = registry.entries.iter().map(Entry::new).collect();
    let transformer = Transformer::new(Directory::new(&registry.directory));

    let modified = transformer
        .apply(&entries, &registry.prefix, false)
        .map_err(|err| surface(err, "failed to sync applications"))?;

    if modified.is_empty() {
        println!("all entries already up to date");
    }
    for name in &modified {
        println!("updated {name}");
    }

    Ok(())
}
