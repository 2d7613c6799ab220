pub mod app;
pub mod catalog;
pub mod config;
pub mod dimension;
pub mod error;
pub mod identity;
pub mod io;
pub mod paths;
pub mod report;
pub mod response;
pub mod result;
pub mod score;
pub mod session;
pub mod storage;
pub mod submission;

pub use error::{InsightError, Result};
