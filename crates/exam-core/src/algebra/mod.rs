//! Hierarchical update algebra.
//!
//! Every operation takes a test snapshot and returns a new one; the input is
//! never modified. Cloning a [`Test`] only clones the `Arc` handles of its
//! parts, and `Arc::make_mut` then copies the nodes on the path down to the
//! edit. Siblings of the edited node stay shared with the input.
//!
//! Operations do not renumber. [`crate::apply`] pairs each structural edit
//! with [`crate::renumber`].

mod group;
mod part;
mod question;

use std::sync::Arc;

use exam_model::{Part, PartContent, PartKind, PartOrdinal, Question, QuestionGroup, Test};

use crate::error::{EditError, Result};

pub use group::{
    add_group, add_question_to_group, remove_group, remove_question_from_group, update_group,
    update_question_in_group,
};
pub use part::{add_part, ensure_parts_through, remove_last_part, rename_part, update_metadata};
pub use question::{add_question, remove_question, update_question};

fn part_index(test: &Test, ordinal: PartOrdinal) -> Result<usize> {
    test.part_index(ordinal)
        .ok_or(EditError::PartNotFound(ordinal.get()))
}

/// Number for a question appended to the part at `index`: one past the
/// highest number in that part and every part before it.
fn next_question_number(test: &Test, index: usize) -> u32 {
    test.parts[..=index]
        .iter()
        .filter_map(|part| part.max_question_number())
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

/// Copy `test` and let `edit` change the part at `index` in the copy.
fn with_part<F>(test: &Test, index: usize, edit: F) -> Result<Test>
where
    F: FnOnce(&mut Part) -> Result<()>,
{
    let mut next = test.clone();
    edit(Arc::make_mut(&mut next.parts[index]))?;
    Ok(next)
}

fn flat_questions_mut(part: &mut Part) -> Result<&mut Vec<Arc<Question>>> {
    let ordinal = part.ordinal.get();
    match &mut part.content {
        PartContent::Flat { questions } => Ok(questions),
        PartContent::Grouped { .. } => Err(EditError::ShapeMismatch {
            part: ordinal,
            expected: PartKind::Flat,
            found: PartKind::Grouped,
        }),
    }
}

fn groups_mut(part: &mut Part) -> Result<&mut Vec<Arc<QuestionGroup>>> {
    let ordinal = part.ordinal.get();
    match &mut part.content {
        PartContent::Grouped { groups } => Ok(groups),
        PartContent::Flat { .. } => Err(EditError::ShapeMismatch {
            part: ordinal,
            expected: PartKind::Grouped,
            found: PartKind::Flat,
        }),
    }
}

fn check_question_index(part: u8, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::QuestionIndexOutOfRange { part, index, len })
    }
}

fn check_group_index(part: u8, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::GroupIndexOutOfRange { part, index, len })
    }
}
