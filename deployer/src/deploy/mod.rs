//! Deployment orchestration: registration, rollback resolution, autoscaling
//! suspension, one-off tasks and convergence waits

pub mod autoscaling;
pub mod register;
pub mod rollback;
pub mod status;
pub mod task;
pub mod waiter;
