//! CLI binary for the ArduPilot log parser
//!
//! This provides the command-line interface for the parser library.

use anyhow::{anyhow, Context, Result};
use ardupilot_log_parser::{
    parse_byte_value, parse_id_list, parse_log_file, parse_name_list, FilterSpec, FrameHeader,
    ExportOptions, ParseOptions, ParseResult,
};
use clap::{Arg, Command};
use glob::glob;
use regex::Regex;
use std::path::{Path, PathBuf};

fn build_command() -> Command {
    Command::new("ArduPilot Log Parser")
        .version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("VERGEN_GIT_SHA"),
            ")"
        ))
        .about("Extract messages from ArduPilot DataFlash binary logs. Output to various formats.")
        .arg(
            Arg::new("files")
                .help("Log files to parse (.BIN, .LOG extensions supported, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .help("Frame header bytes, e.g. 0xA3,0x95 or \"163 149\"")
                .value_name("H0,H1")
                .default_value("0xA3,0x95"),
        )
        .arg(
            Arg::new("messages")
                .long("messages")
                .help("Only extract these message names (comma separated, e.g. ATT,GPS)")
                .value_name("NAMES")
                .conflicts_with("ids"),
        )
        .arg(
            Arg::new("ids")
                .long("ids")
                .help("Only extract these message type ids (comma separated)")
                .value_name("IDS"),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export the format table and one CSV per message type (.fmt.csv, .NAME.csv)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export a JSON summary of the parse (requires the json feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for exported files (default: same as input file)")
                .value_name("DIR"),
        )
}

/// Parse a header argument such as `0xA3,0x95`, `163 149` or `0xA3:0x95`
fn parse_header_arg(text: &str) -> Result<FrameHeader> {
    let pattern = Regex::new(r"^\s*(0[xX][0-9a-fA-F]{1,2}|\d{1,3})\s*[,:\s]\s*(0[xX][0-9a-fA-F]{1,2}|\d{1,3})\s*$")?;
    let captures = pattern
        .captures(text)
        .ok_or_else(|| anyhow!("Header must be two byte values, got '{}'", text))?;
    let first = parse_byte_value(&captures[1])?;
    let second = parse_byte_value(&captures[2])?;
    Ok(FrameHeader::new(first, second))
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_ascii_lowercase();
            ext_lower == "bin" || ext_lower == "log"
        })
        .unwrap_or(false)
}

fn collect_paths(file_patterns: &[&String], debug: bool) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();
    for pattern in file_patterns {
        if debug {
            println!("Processing pattern: {pattern}");
        }

        let paths: Vec<_> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        if debug {
                            println!("Glob pattern '{pattern}' matched {} files", paths.len());
                        }
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![Path::new(pattern.as_str()).to_path_buf()]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            if !has_log_extension(&path) {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            if debug {
                println!("Added valid file: {path:?}");
            }
            valid_paths.push(path);
        }
    }
    valid_paths
}

fn print_summary(result: &ParseResult) {
    println!("  Header:        {}", result.header);
    println!("  FMT length:    {}", result.fmt_record_length);
    println!("  Formats:       {}", result.format_count());
    println!("  Messages:      {}", result.total_message_count);
    for (format, instances) in result.active_formats() {
        println!(
            "    {:<4} id {:>3} len {:>3}: {:>8}",
            format.name,
            format.type_id,
            format.record_length,
            instances.len()
        );
    }
    for warning in &result.warnings {
        println!("  Warning: {warning}");
    }
}

fn export_result(
    result: &ParseResult,
    path: &Path,
    export_options: &ExportOptions,
) -> Result<()> {
    #[cfg(feature = "csv")]
    {
        if export_options.csv {
            let report = ardupilot_log_parser::export_to_csv(result, path, export_options)
                .with_context(|| format!("CSV export failed for {path:?}"))?;
            println!("  Exported {} CSV file(s)", report.files_written());
        }
    }

    #[cfg(feature = "json")]
    {
        if let Some(json_path) = ardupilot_log_parser::export_to_json(result, path, export_options)
            .with_context(|| format!("JSON export failed for {path:?}"))?
        {
            println!("  Exported: {}", json_path.display());
        }
    }

    #[cfg(not(feature = "json"))]
    {
        if export_options.json {
            eprintln!("Warning: JSON export requested but the json feature is not enabled");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    let header_arg = matches
        .get_one::<String>("header")
        .map(String::as_str)
        .unwrap_or("0xA3,0x95");
    let header = parse_header_arg(header_arg)?;

    let filter = if let Some(names) = matches.get_one::<String>("messages") {
        FilterSpec::ByName(parse_name_list(names))
    } else if let Some(ids) = matches.get_one::<String>("ids") {
        FilterSpec::ByTypeId(parse_id_list(ids).context("Invalid --ids value")?)
    } else {
        FilterSpec::None
    };
    let parse_options = ParseOptions::with_filter(filter);

    let export_options = ExportOptions {
        csv: matches.get_flag("csv"),
        json: matches.get_flag("json"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };

    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|values| values.collect())
        .unwrap_or_default();

    if debug {
        println!("Input patterns: {file_patterns:?}");
        println!("Parse options: {parse_options:?}");
    }

    let valid_paths = collect_paths(&file_patterns, debug);
    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .BIN, .LOG (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match parse_log_file(path, header, &parse_options, debug) {
            Ok(result) => {
                print_summary(&result);
                if let Err(e) = export_result(&result, path, &export_options) {
                    eprintln!("Error exporting {filename}: {e:#}");
                }
                processed_files += 1;
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("This could be due to:");
        eprintln!("  - Files not being ArduPilot DataFlash logs");
        eprintln!("  - A frame header that does not match the log (see --header)");
        eprintln!("  - Corrupted or empty files");
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_arg_forms() {
        assert_eq!(parse_header_arg("0xA3,0x95").unwrap(), FrameHeader::ARDUPILOT);
        assert_eq!(parse_header_arg("163 149").unwrap(), FrameHeader::ARDUPILOT);
        assert_eq!(parse_header_arg(" 0xa3 : 0x95 ").unwrap(), FrameHeader::ARDUPILOT);
        assert!(parse_header_arg("0xA3").is_err());
        assert!(parse_header_arg("300,1").is_err());
    }

    #[test]
    fn test_log_extensions() {
        assert!(has_log_extension(Path::new("00000042.BIN")));
        assert!(has_log_extension(Path::new("flight.log")));
        assert!(!has_log_extension(Path::new("flight.bbl")));
        assert!(!has_log_extension(Path::new("noext")));
    }

    #[test]
    fn test_command_parses_filters() {
        let matches = build_command()
            .try_get_matches_from(["ardupilot_log_parser", "--messages", "ATT,GPS", "a.bin"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("messages").map(String::as_str),
            Some("ATT,GPS")
        );
        assert!(build_command()
            .try_get_matches_from(["x", "--messages", "ATT", "--ids", "5", "a.bin"])
            .is_err());
    }
}
