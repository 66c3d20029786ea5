use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use docletfix::{
    DEFAULT_MAX_LENGTH, IndentPolicy, LengthOptions, ParseOptions, SourceDocument, check_length,
    fix_text, read_source, rewrite,
};
use rayon::prelude::*;
use regex::Regex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    version,
    about = "Reflow long lines, comments and doclets in TypeScript and JavaScript sources"
)]
struct Cli {
    /// Rewrite files in place
    #[arg(long = "in-place", requires = "files", conflicts_with = "check")]
    in_place: bool,
    /// Report lines wider than the limit instead of fixing them
    #[arg(long = "check")]
    check: bool,
    /// Log what the formatter does to standard error
    #[arg(short, long)]
    verbose: bool,
    #[command(flatten)]
    opts: FormatOpts,
    /// Source files to fix
    files: Vec<PathBuf>,
}

#[derive(clap::Args, Clone)]
struct FormatOpts {
    /// Maximum width of a line
    #[arg(long = "max-length", default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,
    /// Never report or fix lines matching this regular expression
    #[arg(long = "ignore-pattern")]
    ignore_pattern: Option<String>,
    /// How the indentation in front of block comments is normalized
    #[arg(long = "indent", value_enum, default_value_t = IndentArg::Even)]
    indent: IndentArg,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum IndentArg {
    /// Round down to an even number of columns
    Even,
    /// Keep the indentation as found
    Exact,
}

impl FormatOpts {
    fn parse_options(&self) -> ParseOptions {
        let indent = match self.indent {
            IndentArg::Even => IndentPolicy::EvenStep,
            IndentArg::Exact => IndentPolicy::Exact,
        };
        ParseOptions { indent }
    }

    fn length_options(&self) -> anyhow::Result<LengthOptions> {
        let ignore_pattern = self
            .ignore_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("invalid --ignore-pattern")?;
        Ok(LengthOptions {
            max_length: self.max_length,
            ignore_pattern,
        })
    }
}

/// What processing one input produced, in input order.
enum Outcome {
    Fixed(String),
    Reported(Vec<String>),
    Rewritten,
}

fn report(
    name: &str,
    text: &str,
    parse: ParseOptions,
    length: &LengthOptions,
) -> anyhow::Result<Vec<String>> {
    let doc = SourceDocument::parse_with(name, text, parse)?;
    Ok(check_length(&doc, length)
        .into_iter()
        .map(|d| format!("{name}:{}:{}: {}", d.line, d.column + 1, d.message))
        .collect())
}

fn process(cli: &Cli, path: &Path, length: &LengthOptions) -> anyhow::Result<Outcome> {
    let parse = cli.opts.parse_options();
    if cli.in_place {
        rewrite(path, parse, length)?;
        return Ok(Outcome::Rewritten);
    }
    let name = path.to_string_lossy();
    let text = read_source(path)?;
    if cli.check {
        return Ok(Outcome::Reported(report(&name, &text, parse, length)?));
    }
    Ok(Outcome::Fixed(fix_text(&name, &text, parse, length)?))
}

/// Entry point for the command-line tool that reflows over-long source lines.
///
/// Reads standard input when no files are given. With `--check` nothing is
/// fixed; every over-long line is printed as `file:line:column: message` and
/// the command fails when any was found.
///
/// # Examples
///
/// ```sh
/// # Print a reflowed file
/// docletfix src/index.ts
///
/// # Reflow files in place at 100 columns
/// docletfix --max-length 100 --in-place src/*.ts
///
/// # Report long lines from standard input
/// cat src/index.ts | docletfix --check
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let length = cli.opts.length_options()?;

    let outcomes = if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        let parse = cli.opts.parse_options();
        let outcome = if cli.check {
            Outcome::Reported(report("<stdin>", &input, parse, &length)?)
        } else {
            Outcome::Fixed(fix_text("<stdin>", &input, parse, &length)?)
        };
        vec![outcome]
    } else {
        cli.files
            .par_iter()
            .map(|path| process(&cli, path, &length))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut reported = 0;
    for outcome in outcomes {
        match outcome {
            Outcome::Fixed(text) => print!("{text}"),
            Outcome::Reported(lines) => {
                reported += lines.len();
                for line in lines {
                    println!("{line}");
                }
            }
            Outcome::Rewritten => {}
        }
    }

    if reported > 0 {
        anyhow::bail!("{reported} line(s) exceed the limit of {} characters", length.max_length);
    }
    Ok(())
}
