pub mod dump;
pub mod output;
