pub mod cli;
pub mod config;
pub mod coverage;
pub mod diff;
pub mod error;
pub mod funcs;
pub mod locate;
pub mod model;
pub mod overview;
pub mod profile;
pub mod report;
