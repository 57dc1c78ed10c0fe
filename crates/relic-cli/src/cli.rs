use std::path::PathBuf;

use clap::Parser;
use relic_config::RelicConfig;

/// Top-level CLI parser for the `relic` binary.
#[derive(Debug, Parser)]
#[command(
    name = "relic",
    version,
    about = "Rank the most downloaded Python 2 only PyPI packages by GitHub stars"
)]
pub struct Cli {
    /// Maximum number of packages to list
    #[arg(short = 'n', long)]
    pub num_packages: Option<usize>,

    /// Output JSON file
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,

    /// Classification cache file
    #[arg(short = 'c', long = "cache")]
    pub cache_path: Option<PathBuf>,

    /// Override file (`name -> [] | [owner, name, url]`)
    #[arg(long = "overrides")]
    pub overrides_path: Option<PathBuf>,

    /// Classify from release metadata only, without the classifier oracle
    #[arg(long)]
    pub no_oracle: bool,

    /// Quiet mode (no progress bar, no summary, errors only)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply explicitly passed flags on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut RelicConfig) {
        if let Some(num_packages) = self.num_packages {
            config.general.num_packages = num_packages;
        }
        if let Some(outfile) = &self.outfile {
            config.general.outfile.clone_from(outfile);
        }
        if let Some(cache_path) = &self.cache_path {
            config.general.cache_path.clone_from(cache_path);
        }
        if let Some(overrides_path) = &self.overrides_path {
            config.general.overrides_path.clone_from(overrides_path);
        }
        if self.no_oracle {
            config.classify.use_oracle = false;
        }
    }
}
