
mod pipeline_tests;
