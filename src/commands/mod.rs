pub mod preview;
pub mod project;
