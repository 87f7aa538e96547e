pub mod cgpa;
pub mod compute;
pub mod interactive;
pub mod theme;
