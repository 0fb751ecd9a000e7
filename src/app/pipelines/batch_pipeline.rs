use crate::config::toml_config::BatchConfig;
use crate::core::{BatchOutcome, Estimator, ExtractedRow, Pipeline, QuoteRequest, Storage};
use crate::domain::model::{QuoteRecord, RejectedQuote};
use crate::utils::error::{EstimateError, Result};
use crate::utils::validation::Validate;
use chrono::Utc;

pub const CSV_OUTPUT: &str = "quotes.csv";
pub const JSON_OUTPUT: &str = "quotes.json";
pub const REJECTED_OUTPUT: &str = "rejected.csv";

const REQUIRED_COLUMNS: [&str; 2] = ["inventory_description", "distance_miles"];

/// Reads quote requests from a CSV file and writes one estimate per valid row.
pub struct CsvQuotePipeline<S: Storage, E: Estimator> {
    storage: S,
    estimator: E,
    input_file: String,
    write_csv: bool,
    write_json: bool,
}

impl<S: Storage, E: Estimator> CsvQuotePipeline<S, E> {
    pub fn new(storage: S, estimator: E, input_file: impl Into<String>, batch: &BatchConfig) -> Self {
        Self {
            storage,
            estimator,
            input_file: input_file.into(),
            write_csv: batch.writes_csv(),
            write_json: batch.writes_json(),
        }
    }

    async fn quote(&self, line: usize, request: QuoteRequest) -> std::result::Result<QuoteRecord, RejectedQuote> {
        if let Err(e) = request.validate() {
            return Err(RejectedQuote {
                line,
                reason: e.user_friendly_message(),
            });
        }

        match self.estimator.estimate(&request.to_input()).await {
            Ok(result) => Ok(QuoteRecord::new(&request, &result, Utc::now())),
            Err(e) => {
                tracing::warn!("Estimate failed for line {}: {}", line, e);
                Err(RejectedQuote {
                    line,
                    reason: e.user_friendly_message(),
                })
            }
        }
    }
}

fn to_csv<T: serde::Serialize>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| EstimateError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, E: Estimator> Pipeline for CsvQuotePipeline<S, E> {
    async fn extract(&self) -> Result<Vec<ExtractedRow>> {
        tracing::debug!("Reading quote requests from: {}", self.input_file);
        let data = self.storage.read_file(&self.input_file).await?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_slice());

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(EstimateError::invalid_input(
                    "input_file",
                    self.input_file.clone(),
                    format!("Missing required column '{}'", column),
                ));
            }
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            let parsed = record
                .deserialize::<QuoteRequest>(Some(&headers))
                .map_err(|e| format!("Could not parse row: {}", e));
            rows.push((line, parsed));
        }

        Ok(rows)
    }

    async fn transform(&self, rows: Vec<ExtractedRow>) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();

        for (line, parsed) in rows {
            let request = match parsed {
                Ok(request) => request,
                Err(reason) => {
                    tracing::warn!("Skipping line {}: {}", line, reason);
                    outcome.rejected.push(RejectedQuote { line, reason });
                    continue;
                }
            };

            match self.quote(line, request).await {
                Ok(record) => outcome.records.push(record),
                Err(rejected) => {
                    tracing::warn!("Skipping line {}: {}", rejected.line, rejected.reason);
                    outcome.rejected.push(rejected);
                }
            }
        }

        Ok(outcome)
    }

    async fn load(&self, outcome: BatchOutcome) -> Result<String> {
        let mut primary = None;

        if self.write_csv {
            self.storage
                .write_file(CSV_OUTPUT, &to_csv(&outcome.records)?)
                .await?;
            primary = primary.or(Some(CSV_OUTPUT));
        }

        if self.write_json {
            let json = serde_json::to_vec_pretty(&outcome.records)?;
            self.storage.write_file(JSON_OUTPUT, &json).await?;
            primary = primary.or(Some(JSON_OUTPUT));
        }

        if !outcome.rejected.is_empty() {
            self.storage
                .write_file(REJECTED_OUTPUT, &to_csv(&outcome.rejected)?)
                .await?;
        }

        primary
            .map(str::to_string)
            .ok_or_else(|| EstimateError::ConfigValidationError {
                field: "batch.output_formats".to_string(),
                message: "No output format selected".to_string(),
            })
    }
}
