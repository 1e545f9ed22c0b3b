//! `remove`: restore launch commands and unregister applications

use anyhow::Result;

use super::surface;
use crate::desktop::Directory;
use crate::entry::Entry;
use crate::registry::Registry;
use crate::transform::Transformer;

pub fn run(registry: &mut Registry, names: &[String]) -> Result<()> {
    let entries: Vec<Entry> = names.iter().map(Entry::new).collect();
    let transformer = Transformer::new(Directory::new(&registry.directory));

    let modified = transformer
        .revert(&entries)
        .map_err(|err| surface(err, "failed to remove application"))?;

    for entry in &entries {
        if !registry.remove(entry.name()) {
            println!("{} was not registered", entry.name());
        }
    }

    registry
        .save()
        .map_err(|err| surface(err, "failed to remove application"))?;

    for name in &modified {
        println!("restored {name}");
    }

    Ok(())
}
