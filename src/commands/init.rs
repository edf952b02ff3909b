use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::storage::LocalStore;

pub const DATA_DIR: &str = ".tickety";
pub const STORE_FILE: &str = "local.db";

pub fn run(path: &Path) -> Result<()> {
    let data_dir = path.join(DATA_DIR);

    if data_dir.exists() {
        println!("Already initialized at {}", path.display());
        return Ok(());
    }

    fs::create_dir_all(&data_dir).context("Failed to create .tickety directory")?;
    LocalStore::open(&data_dir.join(STORE_FILE))?;
    println!("Created {}", data_dir.display());

    println!("\nNext steps:");
    println!("  tickety login user user123 --role user      # Log in");
    println!("  tickety request --name \"...\" ...            # Submit a request");

    Ok(())
}
