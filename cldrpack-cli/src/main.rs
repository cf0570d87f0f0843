use std::path::PathBuf;

use clap::Parser;
use cldrpack::{BuildConfig, Dataset, pipeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reshape CLDR JSON data into compact per-locale files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root; the default directories are resolved against it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Where the archive is downloaded and extracted [default: <root>/source-data]
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Where the generated files are written [default: <root>/code/data]
    #[arg(long)]
    destination_dir: Option<PathBuf>,

    /// Where the plural test fixtures are written [default: <root>/tests/dataFiles]
    #[arg(long)]
    fixtures_dir: Option<PathBuf>,

    /// Write indented JSON
    #[arg(long)]
    debug: bool,

    /// Use the full CLDR archive instead of the modern-coverage one
    #[arg(long)]
    full: bool,

    /// Delete the extracted archive after a successful run
    #[arg(long)]
    post_clean: bool,

    /// Never download; the archive or its extracted data must already exist
    #[arg(long)]
    offline: bool,

    /// Locale whose files are used when a locale lacks one
    #[arg(long, default_value = "en")]
    fallback_locale: String,
}

impl Args {
    fn into_config(self) -> BuildConfig {
        let mut config = BuildConfig::new(&self.root)
            .with_dataset(if self.full {
                Dataset::Full
            } else {
                Dataset::Modern
            })
            .with_pretty(self.debug)
            .with_post_clean(self.post_clean)
            .with_offline(self.offline)
            .with_fallback_locale(self.fallback_locale);
        if let Some(dir) = self.source_dir {
            config = config.with_source_dir(dir);
        }
        if let Some(dir) = self.destination_dir {
            config = config.with_destination_dir(dir);
        }
        if let Some(dir) = self.fixtures_dir {
            config = config.with_fixtures_dir(dir);
        }
        config
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cldrpack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Args::parse().into_config();
    tracing::debug!("Configuration: {:?}", config);

    match pipeline::run(&config) {
        Ok(report) => {
            tracing::info!(
                "Wrote {} files for {} locales and {} fixture files",
                report.files_written,
                report.locales,
                report.fixtures_written
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
