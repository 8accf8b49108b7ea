// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, bail, WrapErr};
use uuid::Uuid;

use crate::catalog::{CatalogBuilder, SourceUrls, VersionFamily};
use crate::channels::{self, ChannelQuery};
use crate::checker::{summarize, InstalledSoftware, UpdateChecker, VerdictRecord};
use crate::config::consts::{DEFAULT_CATALOG_FILE, DEFAULT_VERDICTS_FILE};
use crate::config::options::{AppOptions, ExportFormat};
use crate::config::Settings;
use crate::core::net::{HttpFetcher, PageFetcher};
use crate::data::DataSet;
use crate::file::{self, Written};
use crate::inventory;
use crate::store::CachingFetcher;

#[derive(Debug, Parser)]
#[command(name = "office_channel", version, about = "Check installed Office builds against their update channel")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: ./office_channel.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Serve release pages from the local store when present
    #[arg(long, global = true)]
    pub cache: bool,

    /// With --cache: fetch anyway and overwrite the stored pages
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Output file or directory (default: stdout)
    #[arg(short, long, global = true)]
    pub out: Option<PathBuf>,

    /// csv or tsv
    #[arg(long, global = true)]
    pub format: Option<ExportFormat>,

    /// Leave the header row out of the export
    #[arg(long, global = true)]
    pub no_headers: bool,

    /// Debug-level logging to the store's debug.log
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the update-channel directory
    Channels {
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Scrape and export a release catalog
    Catalog {
        /// legacy (2016) or current (365)
        #[arg(long, default_value = "current")]
        family: String,
    },
    /// Compare installed builds with the latest build of a channel
    Check {
        /// Channel display name or GUID
        #[arg(long)]
        channel: String,
        /// Inventory file (csv/tsv, `-` for stdin)
        #[arg(long, conflicts_with_all = ["computer", "client_version"])]
        inventory: Option<PathBuf>,
        #[arg(long, requires = "client_version")]
        computer: Option<String>,
        /// Installed client version, e.g. 16.0.14701.20164
        #[arg(long, requires = "computer")]
        client_version: Option<String>,
        #[arg(long)]
        computer_id: Option<String>,
    },
}

/// Defaults, then the settings file, then flags.
pub fn resolve_options(cli: &Cli) -> eyre::Result<AppOptions> {
    let mut opts = AppOptions::default();
    Settings::load(cli.config.as_deref())?.apply(&mut opts)?;

    opts.source.cache_pages |= cli.cache;
    opts.source.refresh = cli.refresh;
    if let Some(out) = &cli.out { opts.export.out = Some(out.clone()); }
    if let Some(format) = cli.format { opts.export.format = format; }
    if cli.no_headers { opts.export.include_headers = false; }
    Ok(opts)
}

pub fn run(cli: Cli) -> eyre::Result<()> {
    let opts = resolve_options(&cli)?;
    crate::log::init(&opts.store.dir, cli.verbose)
        .wrap_err_with(|| format!("cannot open log in {}", opts.store.dir.display()))?;

    match cli.command {
        Command::Channels { name, id } => list_channels(&opts, name.as_deref(), id),
        Command::Catalog { family } => export_catalog(&opts, &family),
        Command::Check { channel, inventory: list, computer, client_version, computer_id } => {
            let items = match (list, computer, client_version) {
                (Some(path), _, _) => inventory::load(&path)?,
                (None, Some(name), Some(version)) => {
                    vec![InstalledSoftware::new(&name, computer_id.as_deref().unwrap_or(""), &version)]
                }
                _ => bail!("check needs --inventory FILE, or --computer NAME with --client-version VERSION"),
            };
            check(&opts, &channel, items)
        }
    }
}

type DynFetcher = Box<dyn PageFetcher + Send + Sync>;

fn fetcher(opts: &AppOptions) -> eyre::Result<DynFetcher> {
    let http = HttpFetcher::new(Duration::from_secs(opts.source.timeout_secs))?;
    Ok(if opts.source.cache_pages {
        Box::new(CachingFetcher::new(http, opts.store.pages_dir()).refresh(opts.source.refresh))
    } else {
        Box::new(http)
    })
}

fn builder(opts: &AppOptions) -> eyre::Result<CatalogBuilder<DynFetcher>> {
    Ok(CatalogBuilder::new(fetcher(opts)?, SourceUrls::from(opts.source.clone())))
}

fn list_channels(opts: &AppOptions, name: Option<&str>, id: Option<Uuid>) -> eyre::Result<()> {
    let query = match (name, id) {
        (Some(n), _) => ChannelQuery::Name(n),
        (None, Some(i)) => ChannelQuery::Id(i),
        (None, None) => ChannelQuery::All,
    };
    let mut ds = DataSet::new(&["Name", "Parameter", "Id"]);
    for c in channels::lookup(query) {
        ds.push(cells![c.name, c.parameter, c.id]);
    }
    report(file::write_export(&opts.export, "channels", &ds)?);
    Ok(())
}

fn export_catalog(opts: &AppOptions, family: &str) -> eyre::Result<()> {
    let family: VersionFamily = family.parse()?;
    let catalog = builder(opts)?.build(family)?;
    report(file::write_export(&opts.export, &catalog_stem(family), &DataSet::from(&catalog))?);
    Ok(())
}

/// Default export name for a family; every alias of a family lands on the same file.
fn catalog_stem(family: VersionFamily) -> String {
    join!(DEFAULT_CATALOG_FILE, "_", family.name())
}

fn check(opts: &AppOptions, channel: &str, items: Vec<InstalledSoftware>) -> eyre::Result<()> {
    let checker = UpdateChecker::new(builder(opts)?);
    let results: Vec<_> = checker
        .evaluate(channel, items)
        .wrap_err("cannot build the current release catalog; no verdicts produced")?
        .collect();
    let summary = summarize(&results);

    let mut verdicts: Vec<VerdictRecord> = Vec::with_capacity(results.len());
    for r in results {
        match r {
            Ok(v) => verdicts.push(v),
            Err(e) => {
                logw!("Skipped: {e}");
                eprintln!("Skipped: {e}");
            }
        }
    }

    report(file::write_export(&opts.export, DEFAULT_VERDICTS_FILE, &DataSet::from(verdicts.as_slice()))?);
    eprintln!(
        "{} up to date, {} require update, {} indeterminate, {} skipped",
        summary.up_to_date, summary.requires_update, summary.indeterminate, summary.skipped
    );
    Ok(())
}

fn report(written: Written) {
    if let Written::File(path) = written {
        eprintln!("Wrote {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("office_channel").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&["catalog", "--family", "2016", "--format", "tsv", "--no-headers", "--cache"]).unwrap();
        let opts = resolve_options(&cli).unwrap();
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert!(!opts.export.include_headers);
        assert!(opts.source.cache_pages);
        assert!(matches!(cli.command, Command::Catalog { ref family } if family == "2016"));
    }

    #[test]
    fn check_takes_a_file_or_a_single_machine() {
        assert!(parse(&["check", "--channel", "Beta Channel", "--inventory", "fleet.csv"]).is_ok());
        assert!(parse(&["check", "--channel", "Beta Channel", "--computer", "PC1", "--client-version", "16.0.1.2"]).is_ok());
        assert!(parse(&["check", "--channel", "Beta Channel", "--computer", "PC1"]).is_err());
        assert!(parse(&["check", "--channel", "X", "--inventory", "f.csv", "--computer", "PC1", "--client-version", "1.2"]).is_err());
    }

    #[test]
    fn catalog_file_follows_the_family_not_its_alias() {
        let stem = |alias: &str| catalog_stem(alias.parse().unwrap());
        assert_eq!(stem("365"), "catalog_current");
        assert_eq!(stem("M365"), stem("current"));
        assert_eq!(stem("2016"), "catalog_legacy");
    }

    #[test]
    fn channel_id_must_be_a_guid() {
        assert!(parse(&["channels", "--id", "not-a-guid"]).is_err());
        assert!(parse(&["channels", "--id", "5440fd1f-7ecb-4221-8110-145efaa6372f"]).is_ok());
    }
}
