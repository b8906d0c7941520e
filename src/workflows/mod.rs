pub mod matcher;
pub mod renamer;
pub mod report;
