pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::pipelines::batch_pipeline::CsvQuotePipeline;
pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::EstimatorFileConfig;
pub use crate::core::{
    batch::{BatchEngine, BatchReport},
    estimator::{compute_estimate, generate_moving_estimate, KeywordEstimator, PricingConfig},
    quote_flow::{QuoteSession, QuoteStep},
};
pub use crate::domain::model::{EstimateInput, EstimateResult, LocationType, PriceRange, QuoteRequest};
pub use crate::domain::ports::Estimator;
pub use crate::utils::error::{EstimateError, Result};
