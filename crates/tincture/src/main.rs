//! Tincture - generate utility CSS for an HTML document
//!
//! Usage: tincture [OPTIONS] <INPUT|->

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tincture::Tincture;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_CONFIG_DIR: &str = "config";

/// Parsed command line
struct Options {
    config_dir: PathBuf,
    input: String,
    output: Option<PathBuf>,
    css_only: bool,
}

enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("tincture");

    let options = match parse_args(&args[1.min(args.len())..]) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_usage(program);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("Tincture {}", VERSION);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {}\n", e);
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut config_dir = PathBuf::from(DEFAULT_CONFIG_DIR);
    let mut output = None;
    let mut css_only = false;
    let mut input = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--config" | "-c" => {
                let dir = iter.next().ok_or("--config requires a directory")?;
                config_dir = PathBuf::from(dir);
            }
            "--output" | "-o" => {
                let file = iter.next().ok_or("--output requires a file")?;
                output = Some(PathBuf::from(file));
            }
            "--css" => css_only = true,
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown option '{}'", flag));
            }
            path => {
                if input.replace(path.to_string()).is_some() {
                    return Err("only one input may be given".to_string());
                }
            }
        }
    }

    let input = input.ok_or("no input given")?;
    Ok(Command::Run(Options {
        config_dir,
        input,
        output,
        css_only,
    }))
}

fn print_usage(program: &str) {
    println!(
        r#"Tincture {} - utility CSS for HTML documents

USAGE:
    {} [OPTIONS] <INPUT|->

OPTIONS:
    -h, --help            Print this help message
    -V, --version         Print version information
    -c, --config <DIR>    Configuration directory (default: ./{})
    -o, --output <FILE>   Write the result to FILE instead of stdout
    --css                 Print only the generated stylesheet

EXAMPLES:
    {} page.html
    {} --css -c site/config page.html
    cat page.html | {} - > styled.html
"#,
        VERSION, program, DEFAULT_CONFIG_DIR, program, program, program
    );
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let tincture = Tincture::from_config_dir(&options.config_dir)?;

    let markup = if options.input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(&options.input)
            .map_err(|e| format!("Failed to read {}: {}", options.input, e))?
    };

    let result = if options.css_only {
        tincture.stylesheet(&markup)
    } else {
        tincture.parse(&markup)
    };

    match &options.output {
        Some(path) => {
            fs::write(path, &result)
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            log::info!("Wrote {} bytes to {}", result.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(result.as_bytes())?;
            if options.css_only {
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}
