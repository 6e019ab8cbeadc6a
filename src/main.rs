use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use goatcov::cli;
use goatcov::config::{parse_exclude, Config, OutputMode};
use goatcov::report::LinkTemplate;

/// goatcov — per-function coverage reports and diffs for Go programs.
#[derive(Parser)]
#[command(name = "goatcov", version, about)]
struct Cli {
    /// Coverage profile, as created by "go test -coverprofile".
    #[arg(long, default_value = "coverage")]
    profile: PathBuf,

    /// Diff against a previously generated profile.
    #[arg(long)]
    diff: Option<PathBuf>,

    /// Source directory.
    #[arg(long, default_value = ".")]
    src: PathBuf,

    /// Prefixes to exclude, matched against the full package path with the filename.
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Output as HTML.
    #[arg(long)]
    html: bool,

    /// Output as JSON.
    #[arg(long, conflicts_with = "html")]
    json: bool,

    /// Link to files in HTML output: a URL with {path}, or github:owner/repo.
    #[arg(long)]
    link: Option<String>,

    /// Log progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let output = if self.html {
            OutputMode::Html
        } else if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        Config {
            profile: self.profile,
            diff: self.diff,
            src: self.src,
            exclude: parse_exclude(&self.exclude),
            output,
            link: self.link.as_deref().map(LinkTemplate::parse),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn usage() {
    eprintln!("{}", Cli::command().render_help());
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(cli::normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);
    let config = cli.into_config();

    match cli::run(&config) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e:#}");
            usage();
            ExitCode::FAILURE
        }
    }
}
