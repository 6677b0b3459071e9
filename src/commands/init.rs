use crate::config::RegionConfig;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(super::DEFAULT_CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let defaults = RegionConfig::default().to_toml_string()?;
    let contents = format!("# forestwatch configuration\n\n{defaults}");

    fs::write(&config_path, contents)?;
    println!("Created {} configuration file", super::DEFAULT_CONFIG_FILE);

    Ok(())
}
