// crates/registrar-cli/src/commands/mod.rs
//
// Command module declarations for the Registrar CLI.

pub mod course;
pub mod demo;
pub mod enroll;
pub mod status;
pub mod student;
