pub mod commands;
pub mod options;
pub mod prompt;
pub mod run;
pub mod state;
