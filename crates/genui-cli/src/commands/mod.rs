pub mod chat;
pub mod extract;
pub mod init;
pub mod parse;
pub mod prompt;
mod utils;
