use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{info, info_span};

use jmig_cli::config::{Config, check_target_format};
use jmig_cli::prompt::PromptEscalation;
use jmig_cli::render::{render_candidates, render_outcome};
use jmig_cli::scan::{ScanOptions, ScanReport, Scanner, schema_for};
use jmig_fields::{Disambiguator, Escalation, EscalationRequest, NoEscalation, default_table};
use jmig_temporal::{FormatSpec, candidate};

use crate::cli::{DateArgs, ScanArgs, SplitArgs};
use crate::summary::apply_table_style;

pub struct ScanResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: ScanReport,
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Flag first, then config file, then the round-trip default.
fn target_format(flag: Option<&str>, config: &Config) -> Result<FormatSpec> {
    let format = match flag {
        Some(pattern) => {
            FormatSpec::new(pattern).with_context(|| format!("--format {pattern:?}"))?
        }
        None => config.format.clone().unwrap_or_default(),
    };
    check_target_format(&format)?;
    Ok(format)
}

/// Returns true when every value was recognized.
pub fn run_date(args: &DateArgs, config: &Config) -> Result<bool> {
    let format = target_format(args.format.as_deref(), config)?;
    let candidates: Vec<_> = args
        .values
        .iter()
        .map(|value| candidate(value, &format))
        .collect();
    print!("{}", render_candidates(&candidates));
    Ok(candidates
        .iter()
        .all(|candidate| candidate.canonical.is_some()))
}

/// Returns true when the field resolved.
pub fn run_split(args: &SplitArgs, config: &Config) -> Result<bool> {
    let registry = config.registry()?;
    let schema = schema_for(&registry, &args.schema)?;
    let splitter = Disambiguator::new(schema.clone(), default_table())?;
    let outcome = splitter.disambiguate(&args.value);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_outcome(&outcome));
    }
    Ok(outcome.is_resolved())
}

pub fn run_schemas(config: &Config) -> Result<()> {
    let registry = config.registry()?;
    let mut table = Table::new();
    table.set_header(vec!["Schema", "Fields"]);
    apply_table_style(&mut table);
    for (name, schema) in registry.iter() {
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                if field.name == field.field_type.as_str() {
                    field.name.clone()
                } else {
                    format!("{} ({})", field.name, field.field_type)
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
        table.add_row(vec![name.to_string(), fields]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_scan(args: &ScanArgs, config: &Config) -> Result<ScanResult> {
    let span = info_span!("scan", input = %args.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let registry = config.registry()?;
    let mut date_columns = config.date_columns.clone();
    date_columns.extend(args.date_columns.iter().cloned());
    let options = ScanOptions {
        format: target_format(args.format.as_deref(), config)?,
        date_columns,
        on_unresolved: args
            .on_unresolved
            .map_or(config.on_unresolved, Into::into),
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("migrated.csv"));

    let progress = progress_bar();
    let interactive = !(args.unattended || config.unattended) && io::stdin().is_terminal();
    let prompt;
    let escalation: &dyn Escalation = if interactive {
        prompt = Suspended {
            inner: PromptEscalation::stdio(),
            progress: &progress,
        };
        &prompt
    } else {
        &NoEscalation
    };

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("open {}", args.input.display()))?;
    let scanner = Scanner::new(&registry, default_table(), escalation, options)?;
    let mut buffer = Vec::new();
    let result = scanner.scan(file, &mut buffer, &progress);
    progress.finish_and_clear();
    let report = result?;

    std::fs::write(&output, buffer).with_context(|| format!("write {}", output.display()))?;
    info!(
        output = %output.display(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote cleaned export"
    );
    Ok(ScanResult {
        input: args.input.clone(),
        output,
        report,
    })
}

fn progress_bar() -> ProgressBar {
    let progress = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} rows") {
        progress.set_style(style.progress_chars("=> "));
    }
    progress
}

/// Hides the progress bar while the operator answers a prompt.
struct Suspended<'a, E> {
    inner: E,
    progress: &'a ProgressBar,
}

impl<E: Escalation> Escalation for Suspended<'_, E> {
    fn correct(&self, request: &EscalationRequest<'_>) -> Option<String> {
        self.progress.suspend(|| self.inner.correct(request))
    }
}
