use std::{
    env, fmt,
    fs::File,
    io::{self, BufWriter, Read, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use chemflow_analysis::{dashboard::DashboardConfig, record::EquipmentRecord};
use tracing_subscriber::{
    EnvFilter,
    filter::{LevelFilter, ParseError},
};

/// Destination of a command's JSON document
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::create(path)?;
        output.write_json(value)?;
        tracing::info!("Wrote JSON to {output}");
        Ok(())
    }

    fn create(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Output::Stdout(io::stdout().lock()));
        };
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {self}"))?;
        writeln!(self).with_context(|| format!("Failed to write JSON to {self}"))?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {self}"))?;
        Ok(())
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout(_) => f.write_str("stdout"),
            Output::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

/// Sets up the stderr log subscriber.
///
/// `RUST_LOG` takes the usual filter directives (`debug`,
/// `chemflow_analysis=debug,warn`, ...) and defaults to `info`. An invalid
/// value is reported and replaced by the default. Stdout stays reserved for
/// command output.
pub fn init_logging() {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, invalid) = match log_filter(directives.as_deref()) {
        Ok(filter) => (filter, None),
        Err(err) => (default_log_filter(), Some(err)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    if let Some(err) = invalid {
        tracing::warn!("Ignoring invalid {}: {err}", EnvFilter::DEFAULT_ENV);
    }
}

fn log_filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => Ok(default_log_filter()),
    }
}

fn default_log_filter() -> EnvFilter {
    EnvFilter::default().add_directive(DEFAULT_LOG_LEVEL.into())
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// On-disk layout of an equipment dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// Comma-separated values with an `Equipment Name,Type,...` header row
    Csv,
    /// A JSON array of record objects
    Json,
}

impl RecordFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unsupported dataset file (expected .csv or .json): {}",
                path.display()
            ),
        }
    }
}

/// Read an equipment dataset from a CSV or JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened, has an unsupported extension,
/// or is not a valid dataset
pub fn read_records_file<P>(path: P) -> anyhow::Result<Vec<EquipmentRecord>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = RecordFormat::from_path(path)?;
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
    let records = read_records(format, io::BufReader::new(file))
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn read_records<R>(format: RecordFormat, reader: R) -> anyhow::Result<Vec<EquipmentRecord>>
where
    R: Read,
{
    match format {
        RecordFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
            reader
                .deserialize::<EquipmentRecord>()
                .enumerate()
                .map(|(i, row)| row.with_context(|| format!("Invalid CSV row {}", i + 1)))
                .collect()
        }
        RecordFormat::Json => Ok(serde_json::from_reader(reader)?),
    }
}

/// Read dashboard options from a JSON file, or use the defaults
pub fn read_config_file(path: Option<&Path>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => read_json_file("config", path),
        None => Ok(DashboardConfig::default()),
    }
}
