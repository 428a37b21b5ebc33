pub mod attendance;
pub mod student;
