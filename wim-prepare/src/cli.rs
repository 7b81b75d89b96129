//! Command-line arguments for wim-prepare

use clap::Parser;
use std::path::PathBuf;
use wim_common::config::PathOverrides;

/// Command-line arguments for wim-prepare
#[derive(Parser, Debug)]
#[command(name = "wim-prepare")]
#[command(about = "Prepare the Women in Mathematics dataset for Storywrangler")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: ~/.config/women-in-math/config.toml)
    #[arg(long, env = "WIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root folder containing join/, extract/ and adapter/ stage folders
    #[arg(short, long, env = "WIM_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// Folder holding personal.csv (default: <root>/join/output)
    #[arg(long, env = "WIM_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Folder holding biography .txt files (default: <root>/extract/output)
    #[arg(long, env = "WIM_TEXT_DIR")]
    pub text_dir: Option<PathBuf>,

    /// Folder receiving dataset.json and texts.json (default: <root>/adapter/output)
    #[arg(short, long, env = "WIM_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    pub fn path_overrides(&self) -> PathOverrides {
        PathOverrides {
            root_folder: self.root_folder.clone(),
            data_dir: self.data_dir.clone(),
            text_dir: self.text_dir.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_flags() {
        let args = Args::try_parse_from([
            "wim-prepare",
            "--root-folder",
            "/srv/wim",
            "--text-dir",
            "/tmp/texts",
        ])
        .unwrap();

        let overrides = args.path_overrides();
        assert_eq!(overrides.root_folder, Some(PathBuf::from("/srv/wim")));
        assert_eq!(overrides.text_dir, Some(PathBuf::from("/tmp/texts")));
    }
}
