pub mod batch_pipeline;
