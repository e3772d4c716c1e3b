//! CLI tool to validate, inspect, and edit `.env` files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use envfile_rs::{EnvParser, Error, ParseOptions};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "envfile")]
#[command(about = "Validate, inspect, and edit .env files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envfile validate .env .env.local\n  envfile show .env\n  envfile get .env DB_HOST\n  envfile set .env APP_NAME \"My App\" --quote\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ParseArgs {
    /// Leave ${NAME} markers unexpanded
    #[arg(long)]
    raw: bool,

    /// Treat empty unquoted values as null
    #[arg(long, env = "ENVFILE_EMPTY_AS_NULL")]
    empty_as_null: bool,
}

impl ParseArgs {
    const fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .raw(self.raw)
            .empty_as_null(self.empty_as_null)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check that env file(s) parse
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// List every variable with its inferred type
    Show {
        file: PathBuf,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Print the value of one variable
    Get {
        file: PathBuf,
        key: String,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Print the file in canonical KEY=VALUE form
    Fmt {
        file: PathBuf,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Set a variable and write the file back
    Set {
        file: PathBuf,
        key: String,
        value: String,
        /// Store the value as a quoted string
        #[arg(long)]
        quote: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { files, parse } => {
            let mut had_error = false;
            for path in &files {
                match open_parsed(path, &parse) {
                    Ok(parser) => {
                        let count = parser.get_envs().map_or(0, envfile_rs::EnvMap::len);
                        eprintln!("{}: valid ({count} variable(s))", path.display());
                    }
                    Err(e) => {
                        eprintln!("{}: {e}", path.display());
                        had_error = true;
                    }
                }
            }
            if had_error {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Commands::Show { file, parse } => report(&file, show(&file, &parse)),
        Commands::Get { file, key, parse } => match get(&file, &key, &parse) {
            Ok(code) => code,
            Err(e) => report(&file, Err(e)),
        },
        Commands::Fmt { file, parse } => report(&file, fmt_file(&file, &parse)),
        Commands::Set {
            file,
            key,
            value,
            quote,
        } => report(&file, set(&file, &key, &value, quote)),
    }
}

fn report(path: &Path, result: Result<(), Error>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}

fn open_parsed(path: &Path, parse: &ParseArgs) -> Result<EnvParser, Error> {
    let options = parse.options();
    let mut parser = EnvParser::open(path)?.with_options(options);
    parser.parse(options.raw)?;
    Ok(parser)
}

fn show(path: &Path, parse: &ParseArgs) -> Result<(), Error> {
    let parser = open_parsed(path, parse)?;
    for (key, value) in parser.get_envs()?.iter() {
        println!(
            "{key}\t{}\t{}",
            value.type_name(),
            value.to_string().escape_debug()
        );
    }
    Ok(())
}

fn get(path: &Path, key: &str, parse: &ParseArgs) -> Result<ExitCode, Error> {
    let parser = open_parsed(path, parse)?;
    if let Some(value) = parser.get_envs()?.get(key) {
        println!("{}", value.to_env_string());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}: {key} is not set", path.display());
        Ok(ExitCode::FAILURE)
    }
}

fn fmt_file(path: &Path, parse: &ParseArgs) -> Result<(), Error> {
    let parser = open_parsed(path, parse)?;
    println!("{}", envfile_rs::format(parser.get_envs()?));
    Ok(())
}

fn set(path: &Path, key: &str, value: &str, quote: bool) -> Result<(), Error> {
    let mut parser = EnvParser::open(path)?;
    let written = parser.write(key, value, quote)?;
    eprintln!("{}: wrote {written} byte(s)", path.display());
    Ok(())
}
