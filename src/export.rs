//! Export functionality for parsed logs
//!
//! Renders a [`ParseResult`] into files: a CSV of the format table, one CSV
//! per extracted message type, and a JSON summary.

use crate::error::{LogError, Result};
use crate::types::*;
use std::path::{Path, PathBuf};

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    pub output_dir: Option<String>,
}

/// Files written by an export run
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub format_csv_path: Option<PathBuf>,
    pub message_csv_paths: Vec<PathBuf>,
    pub json_path: Option<PathBuf>,
}

impl ExportReport {
    pub fn files_written(&self) -> usize {
        self.format_csv_path.iter().count()
            + self.message_csv_paths.len()
            + self.json_path.iter().count()
    }
}

/// Output directory and file stem for exports of `input_path`.
///
/// Uses `output_dir` when set, otherwise the input's parent directory, and
/// creates the directory if it does not exist yet.
pub fn compute_export_paths(
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<(PathBuf, String)> {
    let output_dir = match &export_options.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    std::fs::create_dir_all(&output_dir)?;

    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| LogError::Export(format!("No usable file name in {:?}", input_path)))?
        .to_string();

    Ok((output_dir, stem))
}

/// File-system safe version of a message name
fn message_file_tag(format: &FormatRecord) -> String {
    let tag: String = format
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if tag.is_empty() {
        format!("type{}", format.type_id)
    } else {
        tag
    }
}

/// Write the format table as `<stem>.fmt.csv`
#[cfg(feature = "csv")]
pub fn export_format_table_csv(result: &ParseResult, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(["type", "length", "name", "format", "labels", "count"])?;
    for (index, format) in result.formats.iter().enumerate() {
        writer.write_record([
            format.type_id.to_string(),
            format.record_length.to_string(),
            format.name.clone(),
            format.format_codes.clone(),
            format.field_labels.clone(),
            result.message_count(index).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one `<stem>.<NAME>.csv` per type that produced instances.
///
/// Rows carry the instance offset and its payload as hex. Names declared
/// more than once get the format-table index appended.
#[cfg(feature = "csv")]
pub fn export_messages_csv(
    result: &ParseResult,
    output_dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut used_tags = std::collections::HashSet::new();

    for (index, format) in result.formats.iter().enumerate() {
        let instances = &result.instances_by_format[index];
        if instances.is_empty() {
            continue;
        }

        let tag = message_file_tag(format);
        let file_name = if used_tags.insert(tag.clone()) {
            format!("{}.{}.csv", stem, tag)
        } else {
            format!("{}.{}.{}.csv", stem, tag, index)
        };
        let path = output_dir.join(file_name);

        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["offset", "payload"])?;
        for instance in instances {
            writer.write_record([
                instance.byte_offset.to_string(),
                crate::conversion::payload_to_hex(&instance.payload),
            ])?;
        }
        writer.flush()?;
        written.push(path);
    }

    Ok(written)
}

/// Export the format table and every extracted message type to CSV
#[cfg(feature = "csv")]
pub fn export_to_csv(
    result: &ParseResult,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();
    if !export_options.csv {
        return Ok(report);
    }

    let (output_dir, stem) = compute_export_paths(input_path, export_options)?;

    let fmt_path = output_dir.join(format!("{}.fmt.csv", stem));
    export_format_table_csv(result, &fmt_path)?;
    report.format_csv_path = Some(fmt_path);
    report.message_csv_paths = export_messages_csv(result, &output_dir, &stem)?;

    Ok(report)
}

/// JSON summary of a parse: format table, per-type names, counts and
/// offsets, plus the aggregate totals.
#[cfg(feature = "json")]
pub fn result_to_json(result: &ParseResult) -> serde_json::Value {
    use serde_json::json;

    let formats: Vec<_> = result
        .formats
        .iter()
        .map(|f| {
            json!({
                "type": f.type_id,
                "length": f.record_length,
                "name": f.name,
                "format": f.format_codes,
                "labels": f.field_labels,
            })
        })
        .collect();
    let counts: Vec<usize> = (0..result.format_count())
        .map(|i| result.message_count(i))
        .collect();
    let offsets: Vec<Vec<usize>> = (0..result.format_count()).map(|i| result.offsets(i)).collect();
    let warnings: Vec<String> = result.warnings.iter().map(|w| w.to_string()).collect();

    json!({
        "fmt_messages": formats,
        "message_names": result.format_names(),
        "message_counts": counts,
        "message_indices": offsets,
        "total_messages": result.total_message_count,
        "fmt_length": result.fmt_record_length,
        "warnings": warnings,
    })
}

/// Write the JSON summary as `<stem>.json`
#[cfg(feature = "json")]
pub fn export_to_json(
    result: &ParseResult,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if !export_options.json {
        return Ok(None);
    }

    let (output_dir, stem) = compute_export_paths(input_path, export_options)?;
    let path = output_dir.join(format!("{}.json", stem));
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &result_to_json(result))?;
    Ok(Some(path))
}
