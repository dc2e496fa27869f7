mod command;
mod config;
mod error;
mod observer;
mod runner;
mod stack;

pub use command::{Command, CommandFlags, parse_script};
pub use config::{
    EngineConfig, LoggingConfig, ProjectConfig, StackConfig, load_project_config,
};
pub use error::{CoreError, StackError};
pub use observer::{NoopObserver, Observation, Observer, TracingObserver};
pub use runner::run;
pub use stack::{Fifth, Stack};
