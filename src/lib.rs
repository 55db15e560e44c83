//! RMB amounts in capital Chinese numerals (人民币大写金额), with a small
//! conversion history and an HTTP front end.

pub mod capital;
pub mod config;
pub mod constants;
pub mod errors;
pub mod history;
pub mod server;

pub use capital::{ChineseAmount, Outcome, convert};
pub use errors::ConversionError;
