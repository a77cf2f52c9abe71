use std::io::ErrorKind;
use std::path::PathBuf;
use std::{env, fs, io};

use serde::Deserialize;

/// Site the posts are imported into
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteInfo {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        SiteInfo {
            title: "OpenSourceBox".to_string(),
            url: "http://opensourcebox.com".to_string(),
            description: "OpenSourceBox Blog".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub content_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            content_dir: PathBuf::from("osbBlog/content"),
            output_file: PathBuf::from("wordpress-import.xml"),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Defaults {
    pub author: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            author: "admin".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

fn default_log_to_console() -> bool {
    true
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteInfo,
    pub paths: Paths,
    pub defaults: Defaults,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    if !path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    match (exe_dir, path.to_str()) {
        (Some(exe_dir), Some(str_path)) => {
            PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy()))
        }
        _ => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        content_dir: parse_path(cfg.paths.content_dir),
        output_file: parse_path(cfg.paths.output_file),
    };

    if let Some(ref mut log) = cfg.log {
        log.location = log.location.take().map(parse_path);
    }

    Ok(cfg)
}

pub fn read_config(cfg_path: &PathBuf) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
