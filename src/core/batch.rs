use crate::core::Pipeline;
use crate::utils::error::Result;

/// Summary of a finished batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub output_path: String,
    pub quoted: usize,
    pub rejected: usize,
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<BatchReport> {
        tracing::info!("🚚 Starting batch quote run");

        let rows = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} quote requests", rows.len());

        let outcome = self.pipeline.transform(rows).await?;
        let quoted = outcome.records.len();
        let rejected = outcome.rejected.len();
        tracing::info!("🧮 Estimated {} quotes, rejected {}", quoted, rejected);

        let output_path = self.pipeline.load(outcome).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(BatchReport {
            output_path,
            quoted,
            rejected,
        })
    }
}
