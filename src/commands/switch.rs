//! `switch`: change the active wrapper and re-apply it strictly

use anyhow::{Result, bail};

use super::surface;
use crate::constants::prefix::KNOWN;
use crate::desktop::Directory;
use crate::entry::Entry;
use crate::registry::Registry;
use crate::transform::Transformer;

pub fn run(registry: &mut Registry, prefix: &str) -> Result<()> {
    if !KNOWN.contains(&prefix) {
        bail!("unknown prefix {prefix:?}, expected one of: {}", KNOWN.join(", "));
    }

    let entries: Vec<Entry> = registry.entries.iter().map(Entry::new).collect();
    let transformer = Transformer::new(Directory::new(&registry.directory));

    // Strict: entries wrapped by the other known prefix are rewritten
    let modified = transformer
        .apply(&entries, prefix, true)
        .map_err(|err| surface(err, "failed to switch prefix"))?;

    registry.prefix = prefix.to_string();
    registry
        .save()
        .map_err(|err| surface(err, "failed to switch prefix"))?;

    for name in &modified {
        println!("updated {name}");
    }
    println!("prefix set to {prefix}");

    Ok(())
}
