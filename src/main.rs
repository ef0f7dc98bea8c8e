use clap::{Parser, Subcommand};
use codewisdom::cli_output::{OutputFormat, print_no_files_message, render_json, render_text, take_top};
use codewisdom::{AnalyzeOptions, Config, Language, default_config_toml, run_analysis};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// codewisdom - per-file Legacy Code Index for mixed-language codebases
#[derive(Parser, Debug)]
#[command(name = "codewisdom", version, about = "Rank source files by Legacy Code Index, worst first")]
struct Cli {
    /// Use specified config file instead of defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show only the N worst files
    #[arg(long)]
    top: Option<usize>,

    /// Only analyze one language (c, cpp, python, java, rust, go, javascript, typescript)
    #[arg(long, value_parser = parse_language)]
    lang: Option<Language>,

    /// Path prefix to skip, relative to PATH (repeatable)
    #[arg(long = "ignore", value_name = "PREFIX")]
    ignore: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// File or directory to analyze
    #[arg(default_value = ".")]
    path: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the default configuration as TOML
    Defaults,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_id(s).ok_or_else(|| {
        let ids: Vec<&str> = Language::ALL.iter().map(|l| l.id()).collect();
        format!("unknown language '{s}' (expected one of: {})", ids.join(", "))
    })
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    // Ignore BrokenPipe panics when output is piped to `head` and the like
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if matches!(cli.command, Some(Commands::Defaults)) {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    config.ignore.extend(cli.ignore.iter().cloned());

    run_analyze(&cli, &config)
}

fn run_analyze(cli: &Cli, config: &Config) -> ExitCode {
    let root = Path::new(&cli.path);
    let opts = AnalyzeOptions {
        lang_filter: cli.lang,
        ignore_prefixes: &config.ignore,
        scoring: &config.scoring,
    };
    let summary = match run_analysis(root, &opts) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let ranked = take_top(summary.ranked(), cli.top);
    match cli.format {
        OutputFormat::Json => match render_json(&ranked) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => {
            if summary.reports.is_empty() {
                print_no_files_message(cli.lang, root);
            } else {
                match render_text(&ranked, &config.report, !cli.no_color) {
                    Ok(text) => print!("{text}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            }
        }
    }
    ExitCode::SUCCESS
}
