use crate::domain::model::{BatchOutcome, EstimateInput, EstimateResult, QuoteRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Anything that can turn an inventory description and distance into an estimate.
#[async_trait]
pub trait Estimator: Send + Sync {
    async fn estimate(&self, input: &EstimateInput) -> Result<EstimateResult>;
}

/// A parsed input row: its 1-based line number and the request, or why it failed to parse.
pub type ExtractedRow = (usize, std::result::Result<QuoteRequest, String>);

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ExtractedRow>>;
    async fn transform(&self, rows: Vec<ExtractedRow>) -> Result<BatchOutcome>;
    async fn load(&self, outcome: BatchOutcome) -> Result<String>;
}
