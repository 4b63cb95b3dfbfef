// src/core/mod.rs
//! Configuration and persistence services shared by every pipeline step

pub mod config_manager;
pub mod fs_ops;
pub mod output_store;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use output_store::OutputStore;
