use jls_compiler::config::runtime::RuntimeConfig;
use jls_compiler::pipeline::{PipelineOutput, PipelineResult};
use jls_compiler::syntax::Verdict;
use jls_compiler::tokens::{render_listing, write_listing};
use jls_compiler::{batch, logging, pipeline};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const STDIN_ARGUMENT: &str = "-";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file|directory|-> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);

    let mut runtime = match &options.config_path {
        Some(path) => RuntimeConfig::load(path).unwrap_or_else(|error| {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }),
        None => RuntimeConfig::default(),
    };
    if options.trace {
        runtime.syntax.record_trace = true;
    }

    logging::config::init_runtime_preferences(runtime.logging.clone())?;
    match &options.log_file {
        Some(path) => {
            let service = logging::service::create_file_backed_service(path)?;
            logging::init_global_logging_with_service(Arc::new(service))?;
        }
        None => logging::init_global_logging()?,
    }

    pipeline::validate_pipeline()?;

    let input = args[1].as_str();
    let input_path = Path::new(input);

    let clean = if input == STDIN_ARGUMENT {
        run_single(pipeline::process_stdin(&runtime), &options, &runtime)
    } else if input_path.is_file() {
        let result = if options.from_tokens {
            pipeline::process_listing_file(input_path, &runtime)
        } else {
            pipeline::process_file_with_config(input_path, &runtime)
        };
        run_single(result, &options, &runtime)
    } else if input_path.is_dir() {
        let mut batch_config = options.batch.clone();
        batch_config.runtime = runtime;
        process_directory_batch(input_path, &batch_config, options.quiet)
    } else {
        eprintln!("Error: Input must be a source file, a directory, or '-' for stdin");
        eprintln!("  Input: {}", input_path.display());
        false
    };

    if !clean {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    println!("JLS Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Lexical scanner and LL(1) predictive parser for a Java-like language");
    println!();
    println!("USAGE:");
    println!(
        "    {} <file> [options]               # Scan and parse one file",
        program_name
    );
    println!(
        "    {} - [options]                    # Scan and parse standard input",
        program_name
    );
    println!(
        "    {} <directory> [options]          # Process a directory",
        program_name
    );
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --trace             Print the parse trace");
    println!("    --json              Print the result as JSON");
    println!("    --tokens-out FILE   Write the token listing to FILE");
    println!("    --from-tokens       Treat <file> as a token listing and only parse it");
    println!("    --config FILE       Load runtime preferences from a TOML file");
    println!("    --log-file FILE     Also write log events to FILE");
    println!("    --sequential        Force sequential processing (no parallelism)");
    println!("    --threads N         Set maximum number of threads (default: auto)");
    println!("    --no-recursive      Don't search subdirectories");
    println!("    --max-files N       Limit maximum files to process");
    println!("    --fail-fast         Stop at the first file that is not accepted");
    println!("    --quiet             Suppress the token listing and progress output");
    println!();
    println!("EXIT STATUS:");
    println!("    0 when every input is accepted without lexical errors, 1 otherwise");
    println!();
    println!("EXAMPLES:");
    println!(
        "    {} Main.java --trace               # Listing, trace and verdict",
        program_name
    );
    println!(
        "    {} Main.java --tokens-out tok.txt  # Save the token listing",
        program_name
    );
    println!(
        "    {} tok.txt --from-tokens           # Parse a saved listing",
        program_name
    );
    println!(
        "    {} src/ --threads 4 --fail-fast    # Batch with early exit",
        program_name
    );
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
    println!();

    println!("BATCH PROCESSING CAPABILITIES:");
    println!("    {}", batch::get_batch_info().summary());
}

#[derive(Debug, Clone, Default)]
struct CliOptions {
    trace: bool,
    json: bool,
    quiet: bool,
    from_tokens: bool,
    tokens_out: Option<PathBuf>,
    config_path: Option<PathBuf>,
    log_file: Option<PathBuf>,
    batch: batch::BatchConfig,
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        batch: batch::BatchConfig {
            progress_reporting: true,
            ..batch::BatchConfig::default()
        },
        ..CliOptions::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" => options.trace = true,
            "--json" => options.json = true,
            "--from-tokens" => options.from_tokens = true,
            "--tokens-out" | "--config" | "--log-file" => {
                if let Some(value) = args.get(i + 1) {
                    let path = Some(PathBuf::from(value));
                    match args[i].as_str() {
                        "--tokens-out" => options.tokens_out = path,
                        "--config" => options.config_path = path,
                        _ => options.log_file = path,
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: {} requires a file path", args[i]);
                }
            }
            "--sequential" => {
                options.batch.max_threads = 1;
            }
            "--threads" => {
                if let Some(value) = args.get(i + 1) {
                    if let Ok(threads) = value.parse::<usize>() {
                        options.batch.max_threads = threads.max(1);
                    } else {
                        eprintln!("Warning: Invalid thread count '{}', using default", value);
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --threads requires a number");
                }
            }
            "--no-recursive" => {
                options.batch.recursive = false;
            }
            "--max-files" => {
                if let Some(value) = args.get(i + 1) {
                    if let Ok(max_files) = value.parse::<usize>() {
                        options.batch.max_files = Some(max_files);
                    } else {
                        eprintln!("Warning: Invalid max files '{}', ignoring", value);
                    }
                    i += 1;
                } else {
                    eprintln!("Warning: --max-files requires a number");
                }
            }
            "--fail-fast" => {
                options.batch.fail_fast = true;
            }
            "--quiet" => {
                options.quiet = true;
                options.batch.progress_reporting = false;
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

/// Report one input; returns whether it was accepted cleanly
fn run_single(
    result: Result<PipelineResult, pipeline::PipelineError>,
    options: &CliOptions,
    runtime: &RuntimeConfig,
) -> bool {
    let result = match result {
        Ok(result) => result,
        Err(error) => {
            eprintln!("FAILED: {}", error);
            logging::print_cargo_style_summary();
            return false;
        }
    };

    if let Some(path) = &options.tokens_out {
        if result.from_listing {
            eprintln!("Warning: --tokens-out ignored for a token listing input");
        } else if let Err(error) = write_listing(path, &result.scan) {
            eprintln!("FAILED: {}", error);
            return false;
        }
    }

    if options.json {
        match PipelineOutput::from_result(&result, options.trace).to_json() {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("FAILED: cannot serialize result: {}", error);
                return false;
            }
        }
    } else {
        print_single_result(&result, options, runtime);
    }

    logging::print_cargo_style_summary();
    result.is_clean()
}

fn print_single_result(result: &PipelineResult, options: &CliOptions, runtime: &RuntimeConfig) {
    if !options.quiet && !result.from_listing {
        print!("{}", render_listing(&result.scan));
        println!();
    }

    if options.trace {
        print!("{}", result.parse.trace.render(runtime.syntax.trace_column_width));
        println!();
    }

    match &result.parse.verdict {
        Verdict::Accept => println!("ACCEPT"),
        Verdict::Reject(error) => println!("REJECT: {}", error),
    }

    if result.has_lexical_errors() {
        println!(
            "{} lexical error(s) in {}",
            result.scan.errors.len(),
            result.file_metadata.path.display()
        );
    }
}

/// Returns whether every discovered file was accepted cleanly
fn process_directory_batch(dir_path: &Path, config: &batch::BatchConfig, quiet: bool) -> bool {
    if !quiet {
        println!("Starting batch processing: {}", dir_path.display());
        println!(
            "Configuration: {} threads, recursive={}, fail_fast={}",
            config.max_threads, config.recursive, config.fail_fast
        );
        if let Some(max_files) = config.max_files {
            println!("File limit: {} files maximum", max_files);
        }
    }

    match batch::process_directory_with_config(dir_path, config) {
        Ok(results) => {
            print_batch_results(&results);
            logging::print_cargo_style_summary();
            results.all_accepted()
        }
        Err(error) => {
            eprintln!("Batch processing failed: {}", error);
            logging::print_cargo_style_summary();
            false
        }
    }
}

fn print_batch_results(results: &batch::BatchResults) {
    let stats = results.stats();

    println!("\nBatch Processing Summary:");
    println!("  Files discovered: {}", results.files_discovered);
    println!("  Files processed: {}", results.files_processed);
    println!(
        "  Accepted: {} ({:.1}%)",
        results.accepted_count(),
        results.acceptance_rate() * 100.0
    );
    println!("  Rejected: {}", results.rejected_count());
    println!("  Failed: {}", results.failure_count());
    println!(
        "  Total time: {:.2}s",
        results.processing_duration.as_secs_f64()
    );
    if stats.total_tokens_processed > 0 {
        println!("  Tokens: {} ({:.0} tokens/sec)", stats.total_tokens_processed, stats.token_rate());
    }

    if !results.rejected_files.is_empty() {
        println!("\nRejected Files:");
        for (file_path, result) in &results.rejected_files {
            println!("  {}: {}", file_path.display(), get_rejection_summary(result));
        }
    }

    if !results.failed_files.is_empty() {
        println!("\nFailed Files:");
        for (file_path, error) in &results.failed_files {
            println!("  {}: {}", file_path.display(), error);
        }
    }
}

fn get_rejection_summary(result: &PipelineResult) -> String {
    match &result.parse.verdict {
        Verdict::Reject(error) => format!("REJECT: {}", error),
        Verdict::Accept => format!("{} lexical error(s)", result.scan.errors.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_batch_options() {
        let options = parse_options(&args(&[
            "--threads",
            "4",
            "--fail-fast",
            "--no-recursive",
            "--max-files",
            "20",
        ]));
        assert_eq!(options.batch.max_threads, 4);
        assert!(options.batch.fail_fast);
        assert!(!options.batch.recursive);
        assert_eq!(options.batch.max_files, Some(20));
        assert!(options.batch.progress_reporting);
    }

    #[test]
    fn test_parse_single_file_options() {
        let options = parse_options(&args(&[
            "--trace",
            "--json",
            "--tokens-out",
            "tokens.txt",
            "--config",
            "jls.toml",
            "--quiet",
        ]));
        assert!(options.trace);
        assert!(options.json);
        assert!(options.quiet);
        assert!(!options.batch.progress_reporting);
        assert_eq!(options.tokens_out, Some(PathBuf::from("tokens.txt")));
        assert_eq!(options.config_path, Some(PathBuf::from("jls.toml")));
        assert!(options.log_file.is_none());
    }

    #[test]
    fn test_parse_options_invalid() {
        let options = parse_options(&args(&["--threads", "invalid", "--unknown-option", "--tokens-out"]));
        assert_ne!(options.batch.max_threads, 0);
        assert!(options.tokens_out.is_none());
    }

    #[test]
    fn test_sequential_option() {
        let options = parse_options(&args(&["--sequential", "--from-tokens"]));
        assert_eq!(options.batch.max_threads, 1);
        assert!(options.from_tokens);
    }

    #[test]
    fn test_rejection_summary() {
        let result = pipeline::process_source("int x = 1", "inline");
        assert!(get_rejection_summary(&result).starts_with("REJECT: expected ';'"));

        let lexical = pipeline::process_source("x = 1; #", "inline");
        assert_eq!(get_rejection_summary(&lexical), "1 lexical error(s)");
    }
}
