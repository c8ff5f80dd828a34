//! Editing for exam tests.
//!
//! - [`algebra`]: pure, path-addressed operations from one test snapshot to
//!   the next
//! - [`renumber`]: contiguous question numbering across parts
//! - [`Edit`] and [`apply`]: the command set, renumbering after structural
//!   edits
//! - [`EditSession`]: a working copy with dirty tracking and gated saves

pub mod algebra;
mod edit;
mod error;
mod patch;
mod renumber;
mod session;
mod tracker;

pub use algebra::{
    add_group, add_part, add_question, add_question_to_group, ensure_parts_through, remove_group,
    remove_last_part, remove_question, remove_question_from_group, rename_part, update_group,
    update_metadata, update_question, update_question_in_group,
};
pub use edit::{Edit, apply};
pub use error::{EditError, Result};
pub use patch::{GroupPatch, MetadataPatch, QuestionPatch};
pub use renumber::{renumber, renumber_all};
pub use session::{EditSession, SessionError};
