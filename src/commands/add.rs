//! `add`: register applications and enable the GPU-offload prefix

use anyhow::Result;

use super::surface;
use crate::desktop::Directory;
use crate::entry::Entry;
use crate::registry::Registry;
use crate::transform::Transformer;

pub fn run(registry: &mut Registry, names: &[String]) -> Result<()> {
    let entries: Vec<Entry> = names.iter().map(Entry::new).collect();
    let transformer = Transformer::new(Directory::new(&registry.directory));

    // Lenient: an entry already wrapped by any known prefix is fine as-is
    let modified = transformer
        .apply(&entries, &registry.prefix, false)
        .map_err(|err| surface(err, "failed to add application"))?;

    for entry in &entries {
        registry.add(entry.name());
    }

    registry
        .save()
        .map_err(|err| surface(err, "failed to add application"))?;

    for name in &modified {
        println!("enabled {} for {name}", registry.prefix);
    }
    println!("registered {} application(s)", entries.len());

    Ok(())
}
