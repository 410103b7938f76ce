//! Batch cleanup of a Jira CSV export.
//!
//! Columns whose header names a registered schema are compound fields: each
//! cell is disambiguated, escalated once if needed, and its datetime slots are
//! normalized. Columns listed as date columns are normalized directly. The
//! corrected table is written back out; other cells pass through untouched.

use std::io::{Read, Write};

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use indicatif::ProgressBar;
use jmig_fields::{Disambiguator, Escalation, Outcome, ValidatorTable};
use jmig_model::{FieldLocation, FieldType, OnUnresolved, Repair, Schema, SchemaRegistry};
use jmig_temporal::{FormatSpec, TemporalError, normalize};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::check_target_format;
use crate::logging::redact_value;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub format: FormatSpec,
    pub date_columns: Vec<String>,
    pub on_unresolved: OnUnresolved,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            format: FormatSpec::round_trip(),
            date_columns: Vec::new(),
            on_unresolved: OnUnresolved::Abort,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Compound,
    Date,
}

/// Per-column counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnStats {
    pub column: String,
    pub kind: ColumnKind,
    /// Non-empty cells seen.
    pub cells: usize,
    pub resolved: usize,
    /// Resolved cells whose text changed.
    pub rewritten: usize,
    /// Resolved through escaping or a recovery rule.
    pub repaired: usize,
    /// Resolved from an operator or lookup correction.
    pub escalated: usize,
    pub skipped: usize,
}

impl ColumnStats {
    fn new(column: &str, kind: ColumnKind) -> Self {
        Self {
            column: column.to_string(),
            kind,
            cells: 0,
            resolved: 0,
            rewritten: 0,
            repaired: 0,
            escalated: 0,
            skipped: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub rows: usize,
    pub columns: Vec<ColumnStats>,
}

impl ScanReport {
    pub fn rewritten(&self) -> usize {
        self.columns.iter().map(|stats| stats.rewritten).sum()
    }

    pub fn skipped(&self) -> usize {
        self.columns.iter().map(|stats| stats.skipped).sum()
    }
}

enum Column<'a> {
    Compound(Disambiguator<'a>),
    Date,
    Passthrough,
}

/// Result of processing one cell.
enum Cell {
    Unchanged,
    Rewritten(String),
    Skipped,
}

pub struct Scanner<'a> {
    registry: &'a SchemaRegistry,
    validators: &'a ValidatorTable,
    escalation: &'a dyn Escalation,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(
        registry: &'a SchemaRegistry,
        validators: &'a ValidatorTable,
        escalation: &'a dyn Escalation,
        options: ScanOptions,
    ) -> Result<Self> {
        check_target_format(&options.format)?;
        Ok(Self {
            registry,
            validators,
            escalation,
            options,
        })
    }

    /// Reads a CSV export from `reader` and writes the corrected table to
    /// `writer`.
    ///
    /// # Errors
    ///
    /// CSV errors, a schema without validators, and (under
    /// [`OnUnresolved::Abort`]) the first value that cannot be resolved.
    /// Nothing is written when the run aborts.
    pub fn scan<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        progress: &ProgressBar,
    ) -> Result<ScanReport> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = csv_reader.headers().context("read CSV header")?.clone();
        let records = csv_reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .context("read CSV records")?;

        let columns = self.classify_columns(&headers)?;
        let mut report = ScanReport {
            rows: records.len(),
            columns: Vec::new(),
        };
        let mut stats: Vec<Option<ColumnStats>> = headers
            .iter()
            .zip(&columns)
            .map(|(header, column)| match column {
                Column::Compound(_) => Some(ColumnStats::new(header, ColumnKind::Compound)),
                Column::Date => Some(ColumnStats::new(header, ColumnKind::Date)),
                Column::Passthrough => None,
            })
            .collect();
        info!(
            rows = records.len(),
            columns = stats.iter().flatten().count(),
            "scanning export"
        );

        progress.set_length(records.len() as u64);
        let mut output = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let row = index + 1;
            let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
            for (position, value) in record.iter().enumerate() {
                let (Some(column), Some(Some(stats))) =
                    (columns.get(position), stats.get_mut(position))
                else {
                    continue;
                };
                if value.is_empty() {
                    continue;
                }
                stats.cells += 1;
                let location = FieldLocation {
                    row,
                    column: stats.column.clone(),
                };
                let cell = match column {
                    Column::Compound(splitter) => {
                        self.compound_cell(splitter, value, &location, stats)?
                    }
                    Column::Date => self.date_cell(value, &location, stats)?,
                    Column::Passthrough => Cell::Unchanged,
                };
                match cell {
                    Cell::Rewritten(text) => {
                        stats.rewritten += 1;
                        cells[position] = text;
                    }
                    Cell::Skipped => stats.skipped += 1,
                    Cell::Unchanged => {}
                }
            }
            output.push(StringRecord::from(cells));
            progress.inc(1);
        }

        let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);
        csv_writer.write_record(&headers).context("write CSV header")?;
        for record in &output {
            csv_writer.write_record(record).context("write CSV record")?;
        }
        csv_writer.flush().context("flush CSV output")?;

        report.columns = stats.into_iter().flatten().collect();
        info!(
            rows = report.rows,
            rewritten = report.rewritten(),
            skipped = report.skipped(),
            "scan complete"
        );
        Ok(report)
    }

    fn classify_columns(&self, headers: &StringRecord) -> Result<Vec<Column<'a>>> {
        headers
            .iter()
            .map(|header| {
                if let Some(schema) = self.registry.get(header) {
                    debug!(column = header, schema = %schema.describe(), "compound column");
                    let splitter = Disambiguator::new(schema.clone(), self.validators)
                        .with_context(|| format!("schema for column {header:?}"))?;
                    Ok(Column::Compound(splitter))
                } else if self.is_date_column(header) {
                    debug!(column = header, "date column");
                    Ok(Column::Date)
                } else {
                    Ok(Column::Passthrough)
                }
            })
            .collect()
    }

    fn is_date_column(&self, header: &str) -> bool {
        is_listed_column(&self.options.date_columns, header)
    }

    fn compound_cell(
        &self,
        splitter: &Disambiguator<'_>,
        raw: &str,
        location: &FieldLocation,
        stats: &mut ColumnStats,
    ) -> Result<Cell> {
        let outcome = splitter.resolve_with(raw, Some(location), self.escalation);
        let mut decomposition = match outcome {
            Outcome::Resolved(decomposition) => decomposition,
            unresolved => {
                let diagnostic = unresolved.diagnostic().unwrap_or_default();
                return self.unresolved(location, raw, diagnostic);
            }
        };

        let datetimes: Vec<(String, String)> = decomposition
            .values()
            .iter()
            .filter(|typed| typed.field_type == FieldType::Datetime)
            .map(|typed| (typed.field_name.clone(), typed.content()))
            .collect();
        for (name, value) in datetimes {
            match normalize(&value, &self.options.format) {
                Ok(normalized) => {
                    decomposition.set(&name, normalized);
                }
                Err(error) => return self.date_error(location, &value, error),
            }
        }

        stats.resolved += 1;
        match decomposition.repair() {
            Repair::Escaped { .. } | Repair::Recovered { .. } => stats.repaired += 1,
            Repair::Supplied => stats.escalated += 1,
            Repair::None => {}
        }
        let text = decomposition.to_field();
        trace!(
            %location,
            before = redact_value(raw),
            after = redact_value(&text),
            repair = ?decomposition.repair(),
            "compound field"
        );
        Ok(if text == raw {
            Cell::Unchanged
        } else {
            Cell::Rewritten(text)
        })
    }

    fn date_cell(
        &self,
        raw: &str,
        location: &FieldLocation,
        stats: &mut ColumnStats,
    ) -> Result<Cell> {
        match normalize(raw, &self.options.format) {
            Ok(normalized) => {
                stats.resolved += 1;
                trace!(%location, before = redact_value(raw), after = %normalized, "date");
                Ok(if normalized == raw {
                    Cell::Unchanged
                } else {
                    Cell::Rewritten(normalized)
                })
            }
            Err(error) => self.date_error(location, raw, error),
        }
    }

    fn date_error(
        &self,
        location: &FieldLocation,
        value: &str,
        error: TemporalError,
    ) -> Result<Cell> {
        match error {
            TemporalError::Empty | TemporalError::Unrecognized { .. } => {
                self.unresolved(location, value, &error.to_string())
            }
            other => Err(other).with_context(|| format!("normalize date at {location}")),
        }
    }

    fn unresolved(&self, location: &FieldLocation, raw: &str, diagnostic: &str) -> Result<Cell> {
        match self.options.on_unresolved {
            OnUnresolved::Abort => {
                bail!(
                    "unresolved value at {location}: {diagnostic} (value: {})",
                    redact_value(raw)
                )
            }
            OnUnresolved::Skip => {
                warn!(
                    %location,
                    value = redact_value(raw),
                    diagnostic,
                    "skipping unresolved value"
                );
                Ok(Cell::Skipped)
            }
        }
    }
}

/// Case- and padding-insensitive header match.
pub fn is_listed_column(columns: &[String], header: &str) -> bool {
    let header = header.trim();
    columns
        .iter()
        .any(|column| column.trim().eq_ignore_ascii_case(header))
}

/// Schema lookup for a single header, used by `split`.
pub fn schema_for<'r>(registry: &'r SchemaRegistry, name: &str) -> Result<&'r Schema> {
    match registry.get(name) {
        Some(schema) => Ok(schema),
        None => {
            let known: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
            bail!("unknown schema {name:?} (known: {})", known.join(", "))
        }
    }
}
