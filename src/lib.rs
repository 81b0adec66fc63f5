pub mod cli;
pub mod essence;
