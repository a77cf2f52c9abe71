use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spdlog::{error, warn};

use hugo2wxr::converter::{convert, ConvertOptions};
use hugo2wxr::logger::configure_logger;

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "hugo2wxr.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. Defaults to hugo2wxr.toml next to the executable, in the current dir or in the user config dir
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Hugo content directory
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// WXR file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    site_title: Option<String>,

    #[arg(long)]
    site_url: Option<String>,

    #[arg(long)]
    site_description: Option<String>,

    /// Author of posts without one
    #[arg(short, long)]
    author: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_next_steps(output_file: &str) {
    println!();
    println!("Next steps:");
    println!("1. Install WordPress");
    println!("2. Log in to WordPress admin");
    println!("3. Go to Tools > Import");
    println!("4. Install 'WordPress Importer' if needed");
    println!("5. Upload {}", output_file);
    println!("6. Map authors and import attachments");
    println!("7. Click 'Submit' to import");
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match open_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!("Please run hugo2wxr --help");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = configure_logger(&config, args.verbose) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    println!("{}", "=".repeat(60));
    println!("Hugo to WordPress Converter");
    println!("{}", "=".repeat(60));
    println!();

    let options = ConvertOptions {
        content_dir: &config.paths.content_dir,
        output_file: &config.paths.output_file,
        site: &config.site,
        default_author: &config.defaults.author,
    };

    match convert(&options) {
        Ok(summary) => {
            if !summary.failed.is_empty() {
                warn!("{} files could not be converted", summary.failed.len());
            }
            print_next_steps(&config.paths.output_file.display().to_string());
            println!();
            println!("Done!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(1)
        }
    }
}
