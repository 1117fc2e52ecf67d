use crate::aggregate;
use crate::config::{ResolvedConfig, ResolvedConfigFile};
use crate::errors::{AppError, AppResult};
use crate::export;
use crate::ingest::{fetch_datasets, load_dir, CancelFlag};
use crate::model::Record;
use crate::pipeline::{filter_and_sort, YearFilter};
use crate::token;
use crate::utils::format_amount;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use tracing::info;

// CLI metadata constants
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Parses command-line arguments and executes the selected command.
///
/// Subcommands:
/// - `report`: aggregated totals (per year, per month, top outlets)
/// - `az`: alphabetical outlet index, optionally narrowed to one letter
/// - `search`: filtered, ordered detail listing
/// - `export`: write the filtered listing as CSV or spreadsheet HTML
/// - `link`: encode/decode shareable deep links for an outlet
/// - `toml`: run a report using a TOML configuration file
///
/// Every data-bearing subcommand loads the record collection once (from the
/// configured URLs, or a local directory when `--data-dir` is given) and
/// passes it to the pure aggregation and pipeline functions.
pub async fn cli() -> AppResult<()> {
    let cmd = Command::new("pauta-cli")
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .subcommand(
            Command::new("report")
                .about("Print aggregated allocation totals")
                .after_help("Example:\n  pauta-cli report --data-dir data/ --year 2023")
                .arg(data_dir_arg())
                .arg(year_arg()),
        )
        .subcommand(
            Command::new("az")
                .about("Print the alphabetical outlet index")
                .arg(data_dir_arg())
                .arg(year_arg())
                .arg(
                    Arg::new("letter")
                        .short('l')
                        .long("letter")
                        .help("Single bucket to show: A-Z, or '#' for names not starting with a letter")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("search")
                .about("Search and list allocation records")
                .after_help("Example:\n  pauta-cli search -q \"canal\" -y 2023")
                .arg(data_dir_arg())
                .arg(year_arg())
                .arg(query_arg()),
        )
        .subcommand(
            Command::new("export")
                .about("Export the filtered listing to a file")
                .arg(data_dir_arg())
                .arg(year_arg())
                .arg(query_arg())
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Output format: 'csv' or 'xls'")
                        .default_value("csv")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("out_dir")
                        .short('o')
                        .long("out-dir")
                        .help("Directory the export file is written to")
                        .default_value(".")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("link")
                .about("Encode or decode shareable outlet deep links")
                .arg(
                    Arg::new("outlet")
                        .short('m')
                        .long("outlet")
                        .help("Outlet name to encode into a share URL")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("decode")
                        .short('d')
                        .long("decode")
                        .help("Share token or full URL to decode")
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("toml")
                .about("Run a report using a TOML configuration file")
                .arg(
                    Arg::new("config")
                        .help("Path to the TOML config file")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        );

    let mut cmd_for_help = cmd.clone();
    let matches = cmd.get_matches();

    match matches.subcommand() {
        Some(("report", sub)) => {
            let config = config_from_args(sub);
            let year_filter = parse_year_arg(sub)?;
            let records = load_records(&config).await?;
            run_report(&records, year_filter, &config);
        }
        Some(("az", sub)) => {
            let config = config_from_args(sub);
            let year_filter = parse_year_arg(sub)?;
            let letter = match sub.get_one::<String>("letter") {
                Some(l) => Some(parse_letter(l)?),
                None => None,
            };
            let records = load_records(&config).await?;
            run_az(&records, year_filter, letter);
        }
        Some(("search", sub)) => {
            let config = config_from_args(sub);
            let year_filter = parse_year_arg(sub)?;
            let query = sub.get_one::<String>("query").cloned().unwrap_or_default();
            let records = load_records(&config).await?;
            run_search(&records, &query, year_filter);
        }
        Some(("export", sub)) => {
            let config = config_from_args(sub);
            let year_filter = parse_year_arg(sub)?;
            let query = sub.get_one::<String>("query").cloned().unwrap_or_default();
            let format = sub.get_one::<String>("format").expect("format has default");
            let out_dir = sub.get_one::<PathBuf>("out_dir").expect("out_dir has default");
            let records = load_records(&config).await?;
            run_export(&records, &query, year_filter, format, out_dir).await?;
        }
        Some(("link", sub)) => {
            run_link(
                sub.get_one::<String>("outlet").map(|s| s.as_str()),
                sub.get_one::<String>("decode").map(|s| s.as_str()),
                &ResolvedConfig::default(),
            )?;
        }
        Some(("toml", sub)) => {
            let config_path = sub
                .get_one::<PathBuf>("config")
                .expect("config is required");
            let file_config = ResolvedConfigFile::from_toml_file(config_path)?;
            let year_filter: YearFilter = file_config
                .year
                .parse()
                .map_err(|_| AppError::InvalidInput(format!("Invalid year: {}", file_config.year)))?;
            let records = load_records(&file_config.resolved).await?;
            run_report(&records, year_filter, &file_config.resolved);
            if !file_config.query.is_empty() {
                run_search(&records, &file_config.query, year_filter);
            }
        }
        _ => {
            cmd_for_help
                .print_help()
                .map_err(|e| AppError::IoError(format!("Failed to print help: {e}")))?;
        }
    }

    Ok(())
}

fn data_dir_arg() -> Arg<'static> {
    Arg::new("data_dir")
        .long("data-dir")
        .help("Load datasets from a local directory instead of fetching")
        .value_parser(clap::value_parser!(PathBuf))
}

fn year_arg() -> Arg<'static> {
    Arg::new("year")
        .short('y')
        .long("year")
        .help("Year scope: 'all' or a year like 2023")
        .default_value("all")
        .action(ArgAction::Set)
}

fn query_arg() -> Arg<'static> {
    Arg::new("query")
        .short('q')
        .long("query")
        .help("Free-text search over outlet, provider, resolution, and month")
        .action(ArgAction::Set)
}

fn config_from_args(sub: &clap::ArgMatches) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();
    if let Some(dir) = sub.get_one::<PathBuf>("data_dir") {
        config.data_dir = Some(dir.clone());
    }
    config
}

fn parse_year_arg(sub: &clap::ArgMatches) -> AppResult<YearFilter> {
    let raw = sub.get_one::<String>("year").expect("year has default");
    raw.parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid year: {raw}")))
}

fn parse_letter(raw: &str) -> AppResult<char> {
    let trimmed = raw.trim();
    match trimmed.chars().next() {
        Some(c) if trimmed.chars().count() == 1 && (c.is_ascii_alphabetic() || c == '#') => {
            Ok(c.to_ascii_uppercase())
        }
        _ => Err(AppError::InvalidInput(format!(
            "Letter must be A-Z or '#', got: {raw}"
        ))),
    }
}

/// Loads the record collection from the configured source.
///
/// A local data directory takes precedence; otherwise the datasets are
/// fetched over HTTP. Either way partial data is acceptable and an empty
/// collection is a valid outcome.
async fn load_records(config: &ResolvedConfig) -> AppResult<Vec<Record>> {
    if let Some(dir) = &config.data_dir {
        return load_dir(dir).await;
    }
    let client = reqwest::Client::new();
    let cancel = CancelFlag::new();
    let records = fetch_datasets(&client, &cancel, config).await?;
    Ok(records.unwrap_or_default())
}

fn run_report(records: &[Record], year_filter: YearFilter, config: &ResolvedConfig) {
    info!(records = records.len(), "Building report");

    let years = aggregate::available_years(records);
    println!(
        "Años disponibles: {}",
        years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("\nTotales por año");
    for t in aggregate::totals_by_year(records) {
        println!("  {}  {}", t.year, format_amount(t.total));
    }

    match year_filter {
        YearFilter::Year(year) => {
            println!("\nTotales por mes ({year})");
            for m in aggregate::totals_by_month_of_year(records, year) {
                println!("  {:<12} {}", m.month, format_amount(m.total));
            }
        }
        YearFilter::All => {
            println!("\nTotales por mes (todos los años)");
            for m in aggregate::totals_by_month(records) {
                println!("  {:<12} {}", m.month, format_amount(m.total));
            }
        }
    }

    println!("\nTop {} medios", config.top_n);
    for (i, rollup) in aggregate::top_outlets(records, config.top_n).iter().enumerate() {
        println!(
            "  {:>3}. {:<40} {}",
            i + 1,
            rollup.outlet,
            format_amount(rollup.total)
        );
    }

    println!(
        "\nProveedores distintos: {}",
        aggregate::distinct_providers(records, year_filter)
    );
}

fn run_az(records: &[Record], year_filter: YearFilter, letter: Option<char>) {
    let cards = aggregate::alphabetical_index(records, year_filter);
    let cards = aggregate::filter_bucket(&cards, letter);
    info!(cards = cards.len(), "Alphabetical index built");
    for card in &cards {
        println!(
            "  {:<40} {}",
            card.rollup.outlet,
            format_amount(card.criterion)
        );
    }
}

fn run_search(records: &[Record], query: &str, year_filter: YearFilter) {
    let results = filter_and_sort(records, query, year_filter);
    info!(matches = results.len(), query = query, "Search completed");
    for r in &results {
        println!(
            "  {:<40} {:<30} {:<12} {:<4} {}",
            r.outlet,
            r.provider,
            r.month,
            r.year,
            format_amount(r.amount)
        );
    }
    println!("  {} registro(s)", results.len());
}

async fn run_export(
    records: &[Record],
    query: &str,
    year_filter: YearFilter,
    format: &str,
    out_dir: &std::path::Path,
) -> AppResult<()> {
    let results = filter_and_sort(records, query, year_filter);
    let (body, file_name) = match format {
        "csv" => (
            export::to_csv(&results),
            export::export_file_name(year_filter, "csv"),
        ),
        "xls" => (
            export::to_spreadsheet_html(&results),
            export::export_file_name(year_filter, "xls"),
        ),
        other => {
            return Err(AppError::InvalidInput(format!(
                "Unknown export format: {other} (expected 'csv' or 'xls')"
            )))
        }
    };
    let path = out_dir.join(&file_name);
    tokio::fs::write(&path, body).await?;
    info!(file = %path.display(), records = results.len(), "Export written");
    println!("Exportado: {}", path.display());
    Ok(())
}

fn run_link(
    outlet: Option<&str>,
    decode_input: Option<&str>,
    config: &ResolvedConfig,
) -> AppResult<()> {
    match (outlet, decode_input) {
        (Some(name), None) => {
            let url = token::share_url(&config.share_base_url, name)?;
            println!("{url}");
            Ok(())
        }
        (None, Some(input)) => {
            // Accept either a bare token or a full share URL.
            let decoded = if input.contains("://") {
                token::outlet_from_url(input)
            } else {
                token::decode(input)
            };
            match decoded {
                Some(name) => {
                    println!("{name}");
                    Ok(())
                }
                None => Err(AppError::InvalidInput(
                    "Token did not decode to an outlet".into(),
                )),
            }
        }
        _ => Err(AppError::InvalidInput(
            "Pass exactly one of --outlet or --decode".into(),
        )),
    }
}
