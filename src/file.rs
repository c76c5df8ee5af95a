// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::write_rows;
use crate::data::Envelope;
use crate::error::ScrapeError;

const JSON_INDENT: &[u8] = b"    ";

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Config(format!(
            "Path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/// Pretty-printed JSON envelope. Create/truncate.
pub fn write_json(path: &Path, envelope: &Envelope) -> Result<(), ScrapeError> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(JSON_INDENT));
    envelope.serialize(&mut ser)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Flattened CSV, header row included. Returns the number of data rows.
pub fn write_csv(path: &Path, envelope: &Envelope) -> Result<usize, ScrapeError> {
    ensure_parent(path)?;
    let out = BufWriter::new(File::create(path)?);
    write_rows(out, envelope)
}

/// Write every configured format. Returns the paths written, in format order.
pub fn export_envelope(export: &ExportOptions, envelope: &Envelope) -> Result<Vec<PathBuf>, ScrapeError> {
    ensure_directory(&export.out_dir)?;
    let mut written = Vec::with_capacity(export.formats.len());
    for &format in &export.formats {
        let path = export.path_for(format);
        match format {
            ExportFormat::Json => {
                write_json(&path, envelope)?;
                info!(path = %path.display(), calls = envelope.records.len(), "wrote JSON");
            }
            ExportFormat::Csv => {
                let rows = write_csv(&path, envelope)?;
                info!(path = %path.display(), rows, "wrote CSV");
            }
        }
        written.push(path);
    }
    Ok(written)
}
