//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Reads take `&PgPool`; writes take `&mut PgConnection` so the orchestrator
//! can span several repositories with a single transaction (pass `&mut *tx`).

pub mod annotation_repo;
pub mod label_keybind_repo;
pub mod task_repo;
pub mod user_repo;

pub use annotation_repo::AnnotationRepo;
pub use label_keybind_repo::LabelKeybindRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
