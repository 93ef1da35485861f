//! Status command: cache file and index summary.

use std::fs;

use anyhow::Result;
use chrono::{DateTime, Local};
use positionals::PositionalManager;

pub fn run(manager: &PositionalManager) -> Result<()> {
    let cache = manager.cache();
    let snapshot = manager.snapshot();

    println!("Source:   {}", manager.config().source_url);
    println!("Cache:    {}", cache.path().display());
    match fs::metadata(cache.path()) {
        Ok(meta) => {
            println!("Size:     {} bytes", meta.len());
            if let Ok(modified) = meta.modified() {
                let modified: DateTime<Local> = modified.into();
                println!("Modified: {}", modified.format("%Y-%m-%d %H:%M:%S"));
            }
        }
        Err(_) => println!("Size:     (no cache file)"),
    }
    println!(
        "Index:    {} actions, {} entries",
        snapshot.len(),
        snapshot.row_count()
    );

    Ok(())
}
