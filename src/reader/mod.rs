//! Module for reading the survey dataset into Arrow record batches.
//!
//! Parquet is the primary format; CSV exports are read with schema inference.

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::SchemaRef;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{Result, SurveyError};
use crate::utils::DEFAULT_BATCH_SIZE;
use crate::utils::logging::{log_read_complete, log_read_start};

/// Supported on-disk dataset formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Parquet,
    Csv,
}

impl DatasetFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("parquet") => Ok(Self::Parquet),
            Some("csv") => Ok(Self::Csv),
            _ => Err(SurveyError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// An in-memory table: a schema and the record batches that follow it
#[derive(Debug, Clone)]
pub struct RawTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl RawTable {
    /// Build a table, checking that every batch follows `schema`
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        validate_schemas(&schema, &batches)?;
        Ok(Self { schema, batches })
    }

    /// Build a table from at least one batch, taking the schema from the first
    pub fn from_batches(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(SurveyError::Arrow(ArrowError::SchemaError(
                "Cannot infer a schema from zero record batches".to_string(),
            )));
        };
        let schema = first.schema();
        Self::new(schema, batches)
    }

    #[must_use]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    #[must_use]
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

/// Reads a tabular dataset into memory
#[derive(Debug, Clone)]
pub struct DatasetReader {
    batch_size: usize,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Read the whole file into memory
    pub fn read(&self, path: &Path) -> Result<RawTable> {
        let start = Instant::now();
        log_read_start(path);

        let table = match DatasetFormat::from_path(path)? {
            DatasetFormat::Parquet => self.read_parquet(path)?,
            DatasetFormat::Csv => self.read_csv(path)?,
        };

        log_read_complete(path, table.num_rows(), start.elapsed());
        Ok(table)
    }

    fn read_parquet(&self, path: &Path) -> Result<RawTable> {
        let file = safe_open_file(path, "survey dataset")?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
        let schema = builder.schema().clone();
        let reader = builder.with_batch_size(self.batch_size).build()?;

        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        RawTable::new(schema, batches)
    }

    fn read_csv(&self, path: &Path) -> Result<RawTable> {
        let mut file = safe_open_file(path, "survey dataset")?;
        let format = Format::default().with_header(true);
        let (schema, records) = format.infer_schema(&mut file, None)?;
        log::debug!("Inferred CSV schema from {records} records: {schema:?}");
        file.rewind()?;

        let schema = Arc::new(schema);
        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_format(format)
            .with_batch_size(self.batch_size)
            .build(file)?;

        let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
        RawTable::new(schema, batches)
    }
}

/// Read a dataset with default settings
pub fn read_dataset(path: &Path) -> Result<RawTable> {
    DatasetReader::new().read(path)
}

/// Check that every batch has the table's schema
fn validate_schemas(schema: &SchemaRef, batches: &[RecordBatch]) -> Result<()> {
    for batch in batches {
        if batch.schema_ref().fields() != schema.fields() {
            return Err(SurveyError::Arrow(ArrowError::SchemaError(format!(
                "Inconsistent schema across batches: {:?} vs {:?}",
                schema.fields(),
                batch.schema_ref().fields()
            ))));
        }
    }

    Ok(())
}
