//! The `skillradar init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("skillradar.toml");
    if path.exists() {
        println!("skillradar.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created skillradar.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit skillradar.toml if the API is not on localhost:8000");
    println!("  2. Run: skillradar register --name \"Ada Lovelace\" --skills Java,SQL");
    println!("  3. Run: skillradar show-test --test-id <test id>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# skillradar configuration

# Remote candidate API (SKILLRADAR_API_URL overrides this)
api_url = "http://localhost:8000"

# Where local candidates and tests are stored
data_dir = "./skillradar-data"

request_timeout_secs = 30
"#;
