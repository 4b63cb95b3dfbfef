// src/lib.rs
//! Research pipeline: intent classification, LLM-backed web and LinkedIn
//! search, profile scraping, tabular assembly and markdown reporting.

pub mod agents;
pub mod cli;
pub mod core;
pub mod data;
pub mod linkedin;
pub mod llm;
pub mod logging;
pub mod report;
pub mod types;
pub mod web;
pub mod workflow;

pub use web::start_web_server;
pub use workflow::{Workflow, WorkflowResults};
