// crates/registrar-core/src/lib.rs
//
// registrar-core: Core records, error taxonomy, and the enrollment registry.
//
// This is the leaf crate that the RPC layer, daemon, and CLI depend on.
// It defines the Student and Course records, the error codes carried over
// the wire, the EnrollmentStore trait, and its in-memory implementation.

pub mod error;
pub mod record;
pub mod registry;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use registrar_core::Student;`

pub use error::{ErrorCode, RegistryError};
pub use record::{Course, Student};
pub use registry::{EnrollmentRegistry, RegistryStats};
pub use traits::EnrollmentStore;
