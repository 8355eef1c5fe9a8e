// Engine library root: workbook loading, indicator evaluation and the gRPC service.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod models;
pub mod services;
