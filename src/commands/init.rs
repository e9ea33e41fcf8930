use std::path::{Path, PathBuf};

use crate::{
    InitArgs,
    config::{CompendiumConfig, DEFAULT_CONFIG_FILE},
};

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    let config_file = write_default_config(&path, args.create).await?;
    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    Ok(())
}

/// Write a default config file into `path`, never replacing an existing one.
async fn write_default_config(path: &Path, create: bool) -> Result<PathBuf, anyhow::Error> {
    if !path.exists() {
        if create {
            tokio::fs::create_dir_all(path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(DEFAULT_CONFIG_FILE);
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {config_file}",
            config_file = config_file.display()
        ));
    }

    println!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&CompendiumConfig::default())?;
    tokio::fs::write(&config_file, config_text).await?;

    Ok(config_file)
}
