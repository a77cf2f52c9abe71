use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use hugo2wxr::config::{read_config, Config};

use crate::{Args, CFG_FILE_NAME};

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));

    let candidates = [
        exe_dir,
        env::current_dir().ok(),
        dirs::config_dir(),
    ];

    candidates.into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Config file (if any), then command line overrides
pub(crate) fn open_config(args: &Args) -> Result<Config> {
    let config_path = args.config_path.clone().or_else(get_config_path);

    let mut config = match config_path {
        Some(config_path) => {
            println!("Reading config from {}", config_path.display());
            read_config(&config_path)
                .with_context(|| format!("Could not load {}", config_path.display()))?
        }
        None => Config::default(),
    };

    if let Some(ref input) = args.input {
        config.paths.content_dir = input.clone();
    }
    if let Some(ref output) = args.output {
        config.paths.output_file = output.clone();
    }
    if let Some(ref title) = args.site_title {
        config.site.title = title.clone();
    }
    if let Some(ref url) = args.site_url {
        config.site.url = url.clone();
    }
    if let Some(ref description) = args.site_description {
        config.site.description = description.clone();
    }
    if let Some(ref author) = args.author {
        config.defaults.author = author.clone();
    }

    Ok(config)
}
