pub mod classify;
pub mod parse;
