//! `list`: show registered applications and their offload status
//!
//! Read-only: probes each entry's desktop file without mutating it.

use anyhow::Result;

use crate::desktop::Directory;
use crate::registry::Registry;
use crate::transform::is_gpu_enabled;

pub fn run(registry: &Registry) -> Result<()> {
    if registry.entries.is_empty() {
        println!("no applications registered");
        return Ok(());
    }

    println!("prefix: {}", registry.prefix);
    let dir = Directory::new(&registry.directory);

    for name in &registry.entries {
        let status = match dir.load_file(name) {
            Ok(file) => match file.get_values() {
                Ok(values) if values.values().any(|value| is_gpu_enabled(value)) => "on",
                Ok(_) => "off",
                Err(_) => "unreadable",
            },
            Err(_) => "missing",
        };
        println!("  [{status}] {name}");
    }

    Ok(())
}
