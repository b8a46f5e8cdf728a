//! Configuration: settings file and definition files

pub mod definitions;
pub mod settings;
