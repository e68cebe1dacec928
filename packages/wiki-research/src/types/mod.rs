//! Data types shared by the pipeline and its consumers.

pub mod article;
pub mod config;
pub mod research;
