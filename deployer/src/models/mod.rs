//! Wire models for the orchestration platform

pub mod autoscaling;
pub mod logs;
pub mod service;
pub mod task;
pub mod task_definition;
pub mod timestamp;
