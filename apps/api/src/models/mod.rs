pub mod recommendation;
pub mod resume;
pub mod student;
