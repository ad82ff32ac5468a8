//! Metadata tables: ordered rows of key to string-value mappings plus
//! column descriptors. Values are kept verbatim; no type inference
//! happens here.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// One metadata record, keyed by column.
pub type MetadataRow = HashMap<String, String>;

/// Column descriptor; the first column's key is the join identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Parsed metadata file contents, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataTable {
    pub columns: Vec<Column>,
    pub rows: Vec<MetadataRow>,
}

/// Read a metadata table from a CSV file, or TSV when the extension says so.
pub fn read_table(path: &Path) -> Result<MetadataTable> {
    let delimiter = match path.extension().and_then(|ext| ext.to_str()) {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    };

    let reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("failed to read metadata file: {}", path.display()))?;

    table_from_reader(reader)
        .with_context(|| format!("failed to parse metadata file: {}", path.display()))
}

fn table_from_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<MetadataTable> {
    let headers = reader.headers().context("failed to read header row")?;
    let columns: Vec<Column> = headers.iter().map(Column::new).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to read record")?;
        let mut row = MetadataRow::new();
        for (column, value) in columns.iter().zip(record.iter()) {
            row.insert(column.key.clone(), value.to_string());
        }
        rows.push(row);
    }

    Ok(MetadataTable { columns, rows })
}
