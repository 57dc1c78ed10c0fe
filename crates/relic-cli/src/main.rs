use anyhow::Context;
use clap::Parser;
use relic_cache::{ClassificationCache, OverrideTable};
use relic_pipeline::{Classifier, Resolver, top_legacy_packages};
use relic_registry::{RegistryClient, TroveOracle};

mod bootstrap;
mod cli;
mod output;
mod progress;

use progress::Progress;

fn main() {
    if let Err(error) = run() {
        eprintln!("relic error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config(&cli)?;
    let client = RegistryClient::new(bootstrap::endpoints(&config.registry))
        .context("failed to build HTTP client")?;

    let overrides = OverrideTable::load(&config.general.overrides_path)
        .with_context(|| {
            format!(
                "failed to load overrides from {}",
                config.general.overrides_path.display()
            )
        })?
        .with_skip_prefixes(config.classify.skip_prefixes.clone());
    tracing::debug!(entries = overrides.len(), "override table loaded");
    let mut cache = ClassificationCache::open(&config.general.cache_path).with_context(|| {
        format!(
            "failed to open classification cache at {}",
            config.general.cache_path.display()
        )
    })?;
    tracing::debug!(
        path = %cache.path().display(),
        entries = cache.len(),
        "classification cache ready"
    );

    let candidates = client
        .top_packages()
        .context("failed to fetch top package listing")?;

    let limit = config.general.num_packages;
    let oracle = TroveOracle;
    let classifier = Classifier::new(
        &overrides,
        &mut cache,
        &client,
        config.classify.use_oracle.then_some(&oracle),
        config.classify.runtime_tags(),
    );
    let resolver = Resolver::new(&client, config.registry.github_url.clone());

    let progress = Progress::bar(limit as u64, "resolving", !cli.quiet);
    let packages = top_legacy_packages(candidates, classifier, resolver, limit, |slot, package| {
        tracing::info!(slot, limit, package = %package.name, stars = package.stars, "slot filled");
        progress.advance(&package.name);
    });
    if packages.len() < limit {
        progress.finish_err(&format!("found {} of {limit}", packages.len()));
    } else {
        progress.finish_ok("done");
    }

    cache
        .close()
        .context("failed to save classification cache")?;
    output::write_json(&config.general.outfile, &packages)?;

    if !cli.quiet {
        print!("{}", output::render_ranking(&packages));
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RELIC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
