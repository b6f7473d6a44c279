//! Engine module tests.

mod batch_tests;
#[cfg(feature = "json")]
mod json_pipeline_tests;
