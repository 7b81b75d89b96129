//! Command-line arguments for wim-submit

use clap::Parser;
use std::path::PathBuf;
use wim_common::config::PathOverrides;

/// Command-line arguments for wim-submit
#[derive(Parser, Debug)]
#[command(name = "wim-submit")]
#[command(about = "Submit the Women in Mathematics dataset to Storywrangler")]
#[command(version)]
pub struct Args {
    /// Storywrangler API URL (default: http://localhost:8000)
    #[arg(long, env = "WIM_API_URL")]
    pub api_url: Option<String>,

    /// Only submit metadata, skip text ingestion
    #[arg(long)]
    pub metadata_only: bool,

    /// Only submit texts, skip metadata
    #[arg(long)]
    pub texts_only: bool,

    /// TOML config file (default: ~/.config/women-in-math/config.toml)
    #[arg(long, env = "WIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root folder containing the adapter/ stage folder
    #[arg(short, long, env = "WIM_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Folder holding dataset.json and texts.json (default: <root>/adapter/output)
    #[arg(short, long, env = "WIM_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            root_folder: self.root_folder.clone(),
            output_dir: self.output_dir.clone(),
            ..Default::default()
        }
    }
}
