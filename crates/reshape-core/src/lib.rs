#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod document;
pub mod error;
pub mod version;

pub use config::Config;
pub use document::Document;
pub use error::Error;
pub use version::VERSION;
