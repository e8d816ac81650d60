pub mod demo;
mod runner;

pub use demo::TemplateGame;
pub use runner::{run, RunOptions, RunOutput, RunnerHost};
