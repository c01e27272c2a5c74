//! Terminal front end: command handlers and output formatting. Not part of the library API.

pub mod handlers;
mod print;
