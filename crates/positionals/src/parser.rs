//! CSV parsing into a [`PositionalIndex`].
//!
//! Columns are located by header name, so the sheet may reorder them freely.
//! Parsing is all-or-nothing: the first bad row fails the whole table and the
//! caller decides what to keep.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::config::ColumnSchema;
use crate::error::{Error, Result};
use crate::index::PositionalIndex;
use crate::model::PositionalRecord;

/// Only this exact literal counts as a hit
const HIT_LITERAL: &str = "TRUE";

/// Resolved column positions
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    id: usize,
    action_name: usize,
    action_position: usize,
    percent: usize,
    is_hit: usize,
    comment: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord, schema: &ColumnSchema) -> Result<Self> {
        let find = |name: &str| {
            headers.iter().position(|h| {
                h.trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(name.trim())
            })
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| {
                Error::malformed(Some(1), format!("missing column \"{}\"", name))
            })
        };

        Ok(Self {
            id: require(schema.id.as_str())?,
            action_name: require(schema.action_name.as_str())?,
            action_position: require(schema.action_position.as_str())?,
            percent: require(schema.percent.as_str())?,
            is_hit: require(schema.is_hit.as_str())?,
            comment: find(schema.comment.as_str()),
        })
    }
}

/// `"TRUE"` and nothing else
pub fn parse_hit(value: &str) -> bool {
    value == HIT_LITERAL
}

fn parse_u32(record: &StringRecord, idx: usize, column: &str, line: Option<u64>) -> Result<u32> {
    let value = record.get(idx).unwrap_or("");
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| Error::malformed(line, format!("invalid {} \"{}\": {}", column, value, e)))
}

fn parse_record(
    record: &StringRecord,
    columns: &ColumnMap,
    schema: &ColumnSchema,
) -> Result<PositionalRecord> {
    let line = record.position().map(|p| p.line());
    let text = |idx: usize| record.get(idx).unwrap_or("").to_string();

    Ok(PositionalRecord {
        action_id: parse_u32(record, columns.id, &schema.id, line)?,
        action_name: text(columns.action_name),
        action_position: text(columns.action_position),
        percent: parse_u32(record, columns.percent, &schema.percent, line)?,
        is_hit: parse_hit(record.get(columns.is_hit).unwrap_or("")),
        comment: columns.comment.map(text).unwrap_or_default(),
    })
}

/// Parse a whole table from `reader`.
///
/// `source` is only used to label I/O errors.
pub fn parse_table<R: Read>(
    reader: R,
    schema: &ColumnSchema,
    source: &Path,
) -> Result<PositionalIndex> {
    // Only headers are trimmed; cell text is kept verbatim
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| Error::from_csv(e, source))?
        .clone();
    if headers.is_empty() {
        return Err(Error::malformed(Some(1), "missing header row"));
    }
    let columns = ColumnMap::resolve(&headers, schema)?;

    let mut index = PositionalIndex::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = result.map_err(|e| Error::from_csv(e, source))?;
        // Sheet exports pad with rows of empty cells
        if record.iter().all(|f| f.trim().is_empty()) {
            skipped += 1;
            continue;
        }
        index.insert(parse_record(&record, &columns, schema)?);
    }

    debug!(
        "Parsed {} actions ({} entries, {} blank rows skipped)",
        index.len(),
        index.row_count(),
        skipped
    );
    Ok(index)
}

/// Parse a table held in memory
pub fn parse_str(text: &str, schema: &ColumnSchema) -> Result<PositionalIndex> {
    parse_table(text.as_bytes(), schema, Path::new("<memory>"))
}
