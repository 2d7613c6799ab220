pub mod assess;
pub mod config;
pub mod export;
pub mod history;
pub mod home;
pub mod login;
pub mod tools;
