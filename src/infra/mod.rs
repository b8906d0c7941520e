pub mod fs;
pub mod walk;
