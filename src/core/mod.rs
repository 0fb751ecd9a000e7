pub mod batch;
pub mod catalog;
pub mod estimator;
pub mod quote_flow;

pub use crate::domain::model::{BatchOutcome, EstimateInput, EstimateResult, QuoteRequest};
pub use crate::domain::ports::{Estimator, ExtractedRow, Pipeline, Storage};
pub use crate::utils::error::Result;
