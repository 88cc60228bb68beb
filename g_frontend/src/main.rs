use g_frontend::config::runtime::{RuntimeConfig, MAX_VERBOSITY};
use g_frontend::driver::{Driver, DriverError, RunSummary};
use g_frontend::logging::{self, Reporter};
use std::env;
use std::io::{self, Write};

#[derive(Debug, Default)]
struct CliOptions {
    inputs: Vec<String>,
    include_dirs: Vec<String>,
    verbosity: Option<u8>,
    config_file: Option<String>,
    dump_tokens: bool,
    dump_symbols: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("gfront");

    let options = match parse_options(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("       {} --help", program);
            std::process::exit(1);
        }
    };

    if options.help {
        print_help(program);
        return Ok(());
    }
    if options.inputs.is_empty() {
        eprintln!("Usage: {} [options] <input.g>...", program);
        eprintln!("       {} --help", program);
        std::process::exit(1);
    }

    let mut config = match &options.config_file {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::from_env()?,
    };
    // -i directories are searched in the order given
    for dir in options.include_dirs.iter().rev() {
        config.imports.add_directory(dir);
    }
    if let Some(verbosity) = options.verbosity {
        config.logging.verbosity = verbosity;
    }

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    let mut failed = false;
    for input in &options.inputs {
        match process_input(input, &config, &options) {
            Ok(summary) => {
                println!("{}: {}", input, summary);
                failed |= !summary.is_clean();
            }
            Err(error) => {
                for line in failure_report(&error) {
                    eprintln!("{}", line);
                }
                failed = true;
            }
        }
    }

    let totals = logging::get_processing_summary();
    if options.inputs.len() > 1 && (totals.has_errors() || totals.has_warnings()) {
        println!(
            "total: errors: {} warnings: {} in {} source(s)",
            totals.total_errors, totals.total_warnings, totals.total_files
        );
    }

    if logging::config::use_cargo_style_output() {
        logging::print_cargo_style_summary();
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn process_input(
    input: &str,
    config: &RuntimeConfig,
    options: &CliOptions,
) -> Result<RunSummary, DriverError> {
    let mut driver = Driver::new(config, Reporter::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.dump_tokens {
        return driver.dump_tokens(input, &mut out);
    }

    let summary = driver.run(input)?;
    if options.dump_symbols {
        driver.write_symbols(&mut out)?;
        out.flush().map_err(DriverError::output)?;
    }
    Ok(summary)
}

/// Lines printed for a run that stopped. The reporter has already echoed every failure except
/// output errors.
fn failure_report(error: &DriverError) -> Vec<String> {
    let mut lines = Vec::new();
    if let DriverError::Output { .. } = error {
        lines.push(format!("Error: {}", error));
    }
    lines.push(format!("  code: {}", error.error_code()));
    lines
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                options.help = true;
            }
            "-i" | "--include" => {
                let dir = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a directory", args[i]))?;
                options.include_dirs.push(dir.clone());
                i += 1;
            }
            "-v" | "--verbose" => {
                let raw = args
                    .get(i + 1)
                    .ok_or_else(|| format!("{} requires a number", args[i]))?;
                let level = raw
                    .parse::<u8>()
                    .map_err(|_| format!("invalid verbosity '{}'", raw))?;
                options.verbosity = Some(level.min(MAX_VERBOSITY));
                i += 1;
            }
            "--config" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| "--config requires a file".to_string())?;
                options.config_file = Some(path.clone());
                i += 1;
            }
            "--tokens" => {
                options.dump_tokens = true;
            }
            "--symbols" => {
                options.dump_symbols = true;
            }
            other if other.starts_with('-') => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            input => options.inputs.push(input.to_string()),
        }
        i += 1;
    }

    Ok(options)
}

fn print_help(program_name: &str) {
    println!("G front end v{}", env!("CARGO_PKG_VERSION"));
    println!("Scanner and symbol table for G sources and their imports");
    println!();
    println!("USAGE:");
    println!("    {} [options] <input.g>...", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    -i, --include DIR   Search DIR for imports (repeatable, searched in order)");
    println!("    -v, --verbose N     Verbosity from 0 to {}", MAX_VERBOSITY);
    println!("    --config FILE       Load preferences from a TOML file");
    println!("    --tokens            Print every scanned token instead of declaring symbols");
    println!("    --symbols           Print the symbol table after the run");
    println!();
    println!("ENVIRONMENT:");
    println!("    G_INCLUDE           Extra import directories, searched after -i");
    println!("    G_CONFIG_FILE       Preferences file used when --config is absent");
    println!();
    println!("EXAMPLES:");
    println!("    {} main.g", program_name);
    println!("    {} -i lib -i vendor main.g --symbols", program_name);
    println!("    {} --tokens shapes.g", program_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use g_frontend::lexical::ScannerError;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options =
            parse_options(&args(&["-i", "lib", "main.g", "-v", "12", "--symbols", "-i", "x"]))
                .unwrap();
        assert_eq!(options.inputs, vec!["main.g"]);
        assert_eq!(options.include_dirs, vec!["lib", "x"]);
        assert_eq!(options.verbosity, Some(12));
        assert!(options.dump_symbols);
        assert!(!options.dump_tokens);
    }

    #[test]
    fn test_verbosity_is_capped() {
        let options = parse_options(&args(&["-v", "200", "a.g"])).unwrap();
        assert_eq!(options.verbosity, Some(MAX_VERBOSITY));
    }

    #[test]
    fn test_reported_failures_are_not_repeated() {
        let nested = DriverError::from(ScannerError::NestingTooDeep { depth: 15 });
        assert_eq!(failure_report(&nested), vec!["  code: E027"]);

        let output = DriverError::Output {
            message: "broken pipe".to_string(),
        };
        assert_eq!(
            failure_report(&output),
            vec![
                "Error: Cannot write output: broken pipe".to_string(),
                "  code: E011".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_option_values() {
        assert!(parse_options(&args(&["-i"])).is_err());
        assert!(parse_options(&args(&["a.g", "-v"])).is_err());
        assert!(parse_options(&args(&["-v", "loud"])).is_err());
    }
}
