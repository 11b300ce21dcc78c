use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tabled::{settings::Style, Table, Tabled};

use reportdesk::config::{config_dir, load_config, resolve_output_dir, CONFIG_TEMPLATE};
use reportdesk::error::{ReportError, Result};
use reportdesk::export::{
    export_filename, output_path, write_csv, write_html, ExportFormat, PrintDocument,
};
use reportdesk::model::FilterSelection;
use reportdesk::pdf::generate_report_pdf;
use reportdesk::report::{LookupKind, Report, ReportKind};
use reportdesk::service::ReportService;

#[derive(Parser)]
#[command(name = "reportdesk")]
#[command(version, about = "Billing and finance reports from the back-office API", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.reportdesk)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Backend base URL, overriding api.base_url from config.toml
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ExportArgs {
    /// Export the report (can be repeated: --export csv --export pdf)
    #[arg(short, long, value_enum)]
    export: Vec<ExportFormat>,

    /// Output file or directory for the export (default: output_dir/<generated name>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Open exported files with the system default viewer
    #[arg(long)]
    open: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// List the codes available for a filter
    Lookups {
        #[arg(value_enum)]
        kind: LookupKind,
    },

    /// Debt age analysis for an area and bill cycle
    Age {
        /// Area code
        #[arg(short, long)]
        area: Option<String>,

        /// Bill cycle code
        #[arg(short, long)]
        bill_cycle: Option<String>,

        /// Time period: 0-6, 7-12, 1-2, 2-3, 3-4, 4-5, >5, All
        #[arg(short, long)]
        period: Option<String>,

        /// Customer type code
        #[arg(long)]
        customer_type: Option<String>,

        /// Province code
        #[arg(long)]
        province: Option<String>,

        /// Region code
        #[arg(long)]
        region: Option<String>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Ordinary and bulk debtor summaries
    Debtors {
        /// Area code
        #[arg(short, long)]
        area: Option<String>,

        /// Province code
        #[arg(long)]
        province: Option<String>,

        /// Region code
        #[arg(long)]
        region: Option<String>,

        /// Customer type code
        #[arg(long)]
        customer_type: Option<String>,

        /// Bill cycle code
        #[arg(short, long)]
        bill_cycle: Option<String>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Trial balance by account, optionally split by cost center
    TrialBalance {
        /// Company id
        #[arg(long)]
        company: Option<String>,

        #[arg(short, long)]
        year: Option<u32>,

        #[arg(short, long)]
        month: Option<u32>,

        /// Cost center to show as a column (can be repeated)
        #[arg(long = "cost-center", value_name = "CODE")]
        cost_centers: Vec<String>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Material stock balances at a location
    Stock {
        /// Cost center / store location
        #[arg(short, long)]
        location: Option<String>,

        /// Restrict to one material code
        #[arg(long)]
        material: Option<String>,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Solar customer counts and energy totals
    Solar {
        /// Area code
        #[arg(short, long)]
        area: Option<String>,

        #[arg(short, long)]
        year: Option<u32>,

        #[arg(short, long)]
        month: Option<u32>,

        /// Net metering type
        #[arg(long)]
        net_type: Option<String>,

        #[command(flatten)]
        export: ExportArgs,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("Hint: {hint}");
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };
    let base_url = cli.base_url.as_deref();

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Lookups { kind } => cmd_lookups(&cfg_dir, base_url, kind),
        Commands::Age {
            area,
            bill_cycle,
            period,
            customer_type,
            province,
            region,
            export,
        } => {
            let selection = FilterSelection {
                area,
                province,
                region,
                bill_cycle,
                period,
                customer_type,
                ..Default::default()
            };
            cmd_report(&cfg_dir, base_url, ReportKind::AgeAnalysis, selection, &export)
        }
        Commands::Debtors {
            area,
            province,
            region,
            customer_type,
            bill_cycle,
            export,
        } => {
            let selection = FilterSelection {
                area,
                province,
                region,
                customer_type,
                bill_cycle,
                ..Default::default()
            };
            cmd_report(&cfg_dir, base_url, ReportKind::DebtorsAnalysis, selection, &export)
        }
        Commands::TrialBalance {
            company,
            year,
            month,
            cost_centers,
            export,
        } => {
            let selection = FilterSelection {
                company,
                year,
                month,
                cost_centers,
                ..Default::default()
            };
            cmd_report(&cfg_dir, base_url, ReportKind::TrialBalance, selection, &export)
        }
        Commands::Stock {
            location,
            material,
            export,
        } => {
            let selection = FilterSelection {
                location,
                material,
                ..Default::default()
            };
            cmd_report(&cfg_dir, base_url, ReportKind::MaterialStock, selection, &export)
        }
        Commands::Solar {
            area,
            year,
            month,
            net_type,
            export,
        } => {
            let selection = FilterSelection {
                area,
                year,
                month,
                net_type,
                ..Default::default()
            };
            cmd_report(&cfg_dir, base_url, ReportKind::SolarAnalytics, selection, &export)
        }
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized reportdesk config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Look up filter codes:      reportdesk lookups areas");
    println!();
    println!("Then run a report:");
    println!("  reportdesk age --area <code> --bill-cycle <cycle> --period All --export csv");

    Ok(())
}

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "CODE")]
    code: String,
    #[tabled(rename = "NAME")]
    name: String,
}

/// Print the codes for one filter
fn cmd_lookups(cfg_dir: &Path, base_url: Option<&str>, kind: LookupKind) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let service = ReportService::new(&config, base_url);
    let options = service.lookup(kind)?;

    if options.is_empty() {
        println!("No entries returned.");
        return Ok(());
    }

    let rows: Vec<LookupRow> = options
        .into_iter()
        .map(|o| LookupRow {
            code: o.code,
            name: o.name,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    Ok(())
}

/// Fetch a report, print it, then run the requested exports
fn cmd_report(
    cfg_dir: &Path,
    base_url: Option<&str>,
    kind: ReportKind,
    selection: FilterSelection,
    export: &ExportArgs,
) -> Result<()> {
    // Validation errors come before config or network problems.
    kind.query(&selection)?;

    let config = load_config(cfg_dir)?;
    let service = ReportService::new(&config, base_url);
    let report = service.run(kind, selection)?;

    println!("{}", kind.title());
    for (label, value) in report.selection.describe() {
        println!("  {label}: {value}");
    }
    println!();
    println!("{}", report.render());

    if export.export.is_empty() {
        return Ok(());
    }
    if report.is_empty() {
        println!("Nothing to export.");
        return Ok(());
    }

    let now = chrono::Local::now();
    let generated = now.format("%Y-%m-%d %H:%M").to_string();
    let output_dir = resolve_output_dir(&config.export.output_dir, cfg_dir);
    // A single --output names the file; with several formats it must be a directory.
    let explicit = match (&export.output, export.export.len()) {
        (Some(p), 1) => Some(p.clone()),
        (Some(p), _) => {
            std::fs::create_dir_all(p)?;
            Some(p.clone())
        }
        (None, _) => None,
    };

    for format in &export.export {
        let filename = export_filename(kind, &report.selection, now.date_naive(), *format);
        let path = output_path(explicit.as_deref(), &output_dir, &filename);
        write_export(&report, *format, &config.report.organization, &generated, &path)?;
        println!("  Saved: {}", path.display());
        if export.open {
            open_path(&path)?;
        }
    }

    Ok(())
}

fn write_export(
    report: &Report,
    format: ExportFormat,
    organization: &str,
    generated: &str,
    path: &Path,
) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(report, generated, path),
        ExportFormat::Html => {
            write_html(&PrintDocument::from_report(report, organization, generated), path)
        }
        ExportFormat::Pdf => {
            generate_report_pdf(&PrintDocument::from_report(report, organization, generated), path)
        }
    }
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
