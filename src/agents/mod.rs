// src/agents/mod.rs
pub mod intent;
pub mod query_generator;
pub mod requirements;
pub mod response_parser;
pub mod task_executor;
pub mod task_tracker;
pub mod web_search;

pub use intent::TaskKind;
pub use requirements::ParsedRequest;
pub use response_parser::AiAnalysis;
pub use task_executor::TaskExecutor;
pub use task_tracker::{TaskStatus, TaskTracker, TaskType, TaskUpdate};
pub use web_search::{SearchSettings, WebSearcher};
