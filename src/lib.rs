pub mod chance;
pub mod config;
pub mod consts;
pub mod error;
pub mod event;
pub mod handlers;
pub mod invoke;
pub mod lambda;
pub mod logging;
pub mod orchestrator;
