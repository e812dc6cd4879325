pub mod json_body;
pub mod teacher;
