pub mod apply;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod inspect;
pub mod matcher;
pub mod report;
pub mod scanner;
