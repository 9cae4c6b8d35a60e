use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::error;

use mdpdf::{ChromePrinter, Config, Conversion, Paper};

/// Exit status for usage errors and a missing input file.
const USAGE_EXIT: u8 = 1;

#[derive(Parser)]
#[command(name = "mdpdf")]
#[command(version, about = "Convert Markdown files to PDF")]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Input Markdown file (alternative to the positional argument)
    #[arg(long, value_name = "FILE", conflicts_with = "input")]
    markdown: Option<PathBuf>,

    /// Output PDF file (defaults to input name with .pdf extension)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTML file used as the page footer; enables header and footer
    #[arg(long, value_name = "FILE")]
    footer_template: Option<PathBuf>,

    /// TOML file with page, template and browser settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Paper size (overrides the config file)
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
    Legal,
}

impl From<PaperArg> for Paper {
    fn from(paper: PaperArg) -> Self {
        match paper {
            PaperArg::A4 => Paper::A4,
            PaperArg::Letter => Paper::Letter,
            PaperArg::Legal => Paper::Legal,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.print().is_err() {
                init_logging(false);
                error!("{e}");
            }
            return if e.use_stderr() {
                ExitCode::from(USAGE_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    let Some(input) = cli.input.or(cli.markdown) else {
        error!("No markdown file given");
        return ExitCode::from(USAGE_EXIT);
    };

    let mut config = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::default(),
    };
    if let Some(paper) = cli.paper {
        config.page.paper = paper.into();
        config.page.width = None;
        config.page.height = None;
    }

    let footer = cli
        .footer_template
        .as_deref()
        .and_then(mdpdf::load_footer_template);

    let mut conversion = Conversion::new(input, config.print_config(footer));
    if let Some(output) = cli.output {
        conversion = conversion.with_output(output);
    }

    let printer = ChromePrinter::new(config.browser.clone());
    match conversion.run(&printer) {
        Ok(pdf) => {
            println!("Created {}", pdf.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
