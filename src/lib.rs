pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod workbook;
// cmd and reports belong to the binary (main.rs).
