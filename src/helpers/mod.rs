//! Date and URL helpers shared by the loader and the commands

pub mod date;
pub mod url;

pub use date::{format_date, parse_date_string, relative_date};
pub use url::{permalink, url_for};
