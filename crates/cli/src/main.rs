//! # fichas-cli
//!
//! Command-line viewer for the maintenance-plan workbook.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fichas_core::export::DEFAULT_EXPORT_FILE;
use fichas_core::{
    export_csv, export_csv_file, Column, Dataset, DatasetCache, ExportOptions, FichasError,
    MaintenanceTask, SourceLocator, TaskFilter, TrainingFilter, DEFAULT_MARKER,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Widest a column may get in table output.
const MAX_CELL_WIDTH: usize = 48;

/// fichas - search the maintenance plan
#[derive(Parser)]
#[command(name = "fichas")]
#[command(author, version, about = "Search and filter maintenance-plan workbooks", long_about = None)]
struct Cli {
    /// Workbook to load (skips discovery)
    #[arg(long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory searched for the workbook
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Case-insensitive text the workbook file name must contain
    #[arg(long = "marker", default_value = DEFAULT_MARKER)]
    marker: String,

    /// Search text, matched against task and failure mode
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Keep only these specialists (repeatable)
    #[arg(long = "specialist", value_name = "VALUE")]
    specialists: Vec<String>,

    /// Keep only these periodicities (repeatable)
    #[arg(long = "periodicity", value_name = "VALUE")]
    periodicities: Vec<String>,

    /// Keep only these criticalities (repeatable)
    #[arg(long = "criticality", value_name = "VALUE")]
    criticalities: Vec<String>,

    /// Training requirement
    #[arg(short = 't', long = "training", value_enum, ignore_case = true, default_value = "all")]
    training: TrainingArg,

    /// Output format (table, csv, json)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Export the filtered view to a CSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Omit the byte-order mark from exported files
    #[arg(long = "no-bom")]
    no_bom: bool,

    /// List the available filter values and exit
    #[arg(long = "facets")]
    facets: bool,

    /// Start REPL mode
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Aligned table output (default)
    #[default]
    Table,
}

/// Training filter as typed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum TrainingArg {
    All,
    S,
    N,
}

impl From<TrainingArg> for TrainingFilter {
    fn from(arg: TrainingArg) -> Self {
        match arg {
            TrainingArg::All => TrainingFilter::All,
            TrainingArg::S => TrainingFilter::Required,
            TrainingArg::N => TrainingFilter::NotRequired,
        }
    }
}

impl Cli {
    fn task_filter(&self) -> TaskFilter {
        let mut filter = TaskFilter::new().with_training(self.training.into());
        if let Some(search) = &self.search {
            filter = filter.with_search(search.as_str());
        }
        if !self.specialists.is_empty() {
            filter = filter.with_specialists(self.specialists.iter().map(String::as_str));
        }
        if !self.periodicities.is_empty() {
            filter = filter.with_periodicities(self.periodicities.iter().map(String::as_str));
        }
        if !self.criticalities.is_empty() {
            filter = filter.with_criticalities(self.criticalities.iter().map(String::as_str));
        }
        filter
    }

    fn cache(&self) -> DatasetCache {
        match &self.file {
            Some(path) => DatasetCache::for_path(path),
            None => DatasetCache::new(SourceLocator::new(&self.dir).with_marker(self.marker.as_str())),
        }
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions::default().with_bom(!self.no_bom)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let mut cache = cli.cache();

    if cli.interactive {
        let mut session = Session {
            filter: cli.task_filter(),
            format: cli.format,
            export: cli.export_options(),
        };
        return run_repl(&mut cache, &mut session);
    }

    let Some(dataset) = load(&mut cache)? else {
        return Ok(());
    };

    if cli.facets {
        print_facets(&dataset);
        return Ok(());
    }

    let view = dataset.filter(&cli.task_filter());
    tracing::debug!(total = dataset.len(), shown = view.len(), "applied filters");
    if let Some(output) = &cli.output {
        tracing::info!(path = %output.display(), rows = view.len(), "exporting view");
        export_csv_file(view.iter().copied(), output, &cli.export_options())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        eprintln!(
            "{} {} tasks to {}",
            "Exported".green().bold(),
            view.len(),
            output.display()
        );
    } else {
        print_view(&view, cli.format)?;
    }

    Ok(())
}

/// Get the dataset, turning "no workbook" into an empty result.
fn load(cache: &mut DatasetCache) -> Result<Option<Arc<Dataset>>> {
    match cache.get() {
        Ok(dataset) => {
            if dataset.is_empty() {
                eprintln!("{}", "No maintenance tasks found in the workbook.".yellow());
            }
            Ok(Some(dataset))
        }
        Err(err @ FichasError::SourceNotFound { .. }) => {
            eprintln!("{} {err}", "No data:".yellow().bold());
            Ok(None)
        }
        Err(err) => Err(err).context("Could not load the maintenance plan"),
    }
}

/// Mutable REPL state.
#[derive(Debug)]
struct Session {
    filter: TaskFilter,
    format: OutputFormat,
    export: ExportOptions,
}

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    Show,
    Facets,
    Reload,
    Reset,
    Search(Option<String>),
    Specialists(Option<Vec<String>>),
    Periodicities(Option<Vec<String>>),
    Criticalities(Option<Vec<String>>),
    Training(TrainingFilter),
    Format(OutputFormat),
    Export(PathBuf),
}

/// Parse one REPL line. Text without a leading ':' is a search.
fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Search(non_empty(line)));
    };

    let (name, arg) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(name, arg)| (name, arg.trim()));

    match name {
        "quit" | "q" | "exit" => Ok(Command::Quit),
        "help" | "h" | "?" => Ok(Command::Help),
        "show" | "s" => Ok(Command::Show),
        "facets" => Ok(Command::Facets),
        "reload" => Ok(Command::Reload),
        "reset" => Ok(Command::Reset),
        "search" => Ok(Command::Search(non_empty(arg))),
        "esp" => Ok(Command::Specialists(value_list(arg))),
        "freq" => Ok(Command::Periodicities(value_list(arg))),
        "crit" => Ok(Command::Criticalities(value_list(arg))),
        "form" => match arg.to_ascii_lowercase().as_str() {
            "" | "all" | "todos" => Ok(Command::Training(TrainingFilter::All)),
            "s" => Ok(Command::Training(TrainingFilter::Required)),
            "n" => Ok(Command::Training(TrainingFilter::NotRequired)),
            other => Err(format!("Unknown training value: {other} (use all, s or n)")),
        },
        "format" => match arg.to_ascii_lowercase().as_str() {
            "table" => Ok(Command::Format(OutputFormat::Table)),
            "csv" => Ok(Command::Format(OutputFormat::Csv)),
            "json" => Ok(Command::Format(OutputFormat::Json)),
            other => Err(format!("Unknown format: {other}")),
        },
        "export" => Ok(Command::Export(PathBuf::from(if arg.is_empty() {
            DEFAULT_EXPORT_FILE
        } else {
            arg
        }))),
        _ => Err(format!("Unknown command: {line}")),
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Comma-separated facet values; empty means "all values".
fn value_list(arg: &str) -> Option<Vec<String>> {
    let values: Vec<String> = arg
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    (!values.is_empty()).then_some(values)
}

impl Session {
    /// Apply a filter-changing command. Returns false for anything else.
    fn update(&mut self, command: &Command) -> bool {
        match command {
            Command::Reset => self.filter = TaskFilter::new(),
            Command::Search(text) => self.filter.search.clone_from(text),
            Command::Specialists(values) => {
                self.filter.specialists = values.as_ref().map(|v| v.iter().cloned().collect());
            }
            Command::Periodicities(values) => {
                self.filter.periodicities = values.as_ref().map(|v| v.iter().cloned().collect());
            }
            Command::Criticalities(values) => {
                self.filter.criticalities = values.as_ref().map(|v| v.iter().cloned().collect());
            }
            Command::Training(training) => self.filter.training = *training,
            Command::Format(format) => self.format = *format,
            _ => return false,
        }
        true
    }
}

/// Run the REPL.
fn run_repl(cache: &mut DatasetCache, session: &mut Session) -> Result<()> {
    println!(
        "{} {} - Interactive Mode",
        "fichas".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "Type {} for help, {} to exit\n",
        ":help".yellow(),
        ":quit".yellow()
    );

    if let Some(dataset) = load(cache)? {
        println!("{} {} tasks loaded", "✓".green().bold(), dataset.len());
        for skipped in dataset.skipped() {
            println!("  {} {skipped}", "skipped:".dimmed());
        }
    }

    let mut rl = DefaultEditor::new()?;
    let history_path = dirs_history_path();

    // Load history if available
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        let prompt = "fichas> ".green().bold().to_string();

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let command = match parse_command(line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{} {e}", "Error:".red().bold());
                        continue;
                    }
                };

                if command == Command::Quit {
                    break;
                }
                if let Err(e) = execute(cache, session, command) {
                    println!("{} {e:#}", "Error:".red().bold());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                println!("{} {e}", "Error:".red().bold());
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }

    Ok(())
}

fn execute(cache: &mut DatasetCache, session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Quit => return Ok(()),
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Reload => {
            tracing::info!(path = ?cache.cached_path(), "reloading workbook");
            cache.refresh();
            if let Some(dataset) = load(cache)? {
                println!("{} {} tasks loaded", "✓".green().bold(), dataset.len());
            }
            return Ok(());
        }
        Command::Export(ref path) => {
            let Some(dataset) = load(cache)? else {
                return Ok(());
            };
            let view = dataset.filter(&session.filter);
            tracing::info!(path = %path.display(), rows = view.len(), "exporting view");
            export_csv_file(view.iter().copied(), path, &session.export)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {} tasks to {}",
                "Exported".green().bold(),
                view.len(),
                path.display()
            );
            return Ok(());
        }
        Command::Facets => {
            if let Some(dataset) = load(cache)? {
                print_facets(&dataset);
            }
            return Ok(());
        }
        Command::Show => {}
        ref other => {
            session.update(other);
        }
    }

    if let Some(dataset) = load(cache)? {
        print_view(&dataset.filter(&session.filter), session.format)?;
    }
    Ok(())
}

/// Get the history file path.
fn dirs_history_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|mut p| {
        p.push("fichas");
        let _ = std::fs::create_dir_all(&p);
        p.push("history.txt");
        p
    })
}

/// Print a filtered view in the specified format.
fn print_view(view: &[&MaintenanceTask], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if view.is_empty() {
                println!("(no matching tasks)");
            } else {
                print!("{}", render_table(view));
            }
            println!("{}", format!("Showing {} maintenance tasks.", view.len()).dimmed());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        OutputFormat::Csv => {
            let stdout = std::io::stdout();
            export_csv(
                view.iter().copied(),
                stdout.lock(),
                &ExportOptions::default().with_bom(false),
            )?;
        }
    }
    Ok(())
}

/// Lay out records as an aligned text table.
fn render_table(view: &[&MaintenanceTask]) -> String {
    let mut widths = Column::ALL.map(|c| c.label().chars().count());
    for record in view {
        for (width, value) in widths.iter_mut().zip(record.values()) {
            *width = (*width).max(value.chars().count()).min(MAX_CELL_WIDTH);
        }
    }

    let mut out = String::new();
    let header: Vec<String> = Column::ALL
        .iter()
        .zip(widths)
        .map(|(column, width)| format!("{:<width$}", column.label()))
        .collect();
    out.push_str(&header.join(" | ").bold().to_string());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for record in view {
        let cells: Vec<String> = record
            .values()
            .iter()
            .zip(widths)
            .map(|(value, width)| format!("{:<width$}", truncate(value, width)))
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

/// Shorten `text` to at most `width` characters, marking the cut with '…'.
/// Line breaks inside cells are flattened.
fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Print the distinct values of each filterable column.
fn print_facets(dataset: &Dataset) {
    for column in [
        Column::Equipment,
        Column::Specialist,
        Column::Periodicity,
        Column::Criticality,
        Column::RequiresTraining,
    ] {
        let values = if column == Column::Equipment {
            dataset.equipment()
        } else {
            dataset.distinct(column)
        };
        println!("{}: {}", column.label().cyan().bold(), values.join(", "));
    }
}

/// Print REPL help.
fn print_help() {
    println!("{}", "fichas REPL Commands:".cyan().bold());
    println!("  {}    Show this help", ":help, :h, :?".yellow());
    println!("  {}  Exit the REPL", ":quit, :q, :exit".yellow());
    println!("  {}        Show the current selection", ":show, :s".yellow());
    println!("  {}     Search task and failure mode", ":search TEXT".yellow());
    println!("  {}      Filter specialists (empty = all)", ":esp A,B".yellow());
    println!("  {}     Filter periodicities (empty = all)", ":freq A,B".yellow());
    println!("  {}     Filter criticalities (empty = all)", ":crit A,B".yellow());
    println!("  {}  Training requirement", ":form all|s|n".yellow());
    println!("  {}            Clear all filters", ":reset".yellow());
    println!("  {}           List filter values", ":facets".yellow());
    println!("  {} Output format", ":format table|csv|json".yellow());
    println!("  {}    Export selection to CSV", ":export [FILE]".yellow());
    println!("  {}           Re-read the workbook", ":reload".yellow());
    println!();
    println!("Any other text is used as a search.");
}
