/// Scene configuration file.
pub mod config;
