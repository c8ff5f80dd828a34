//! Operations on grouped parts and the questions inside their groups.

use std::sync::Arc;

use exam_model::{PartOrdinal, Question, QuestionGroup, Test};
use tracing::debug;

use super::{
    check_group_index, check_question_index, groups_mut, next_question_number, part_index,
    with_part,
};
use crate::error::Result;
use crate::patch::{GroupPatch, QuestionPatch};

/// Append an empty group to a grouped part.
pub fn add_group(test: &Test, part: PartOrdinal) -> Result<Test> {
    let position = part_index(test, part)?;
    let next = with_part(test, position, |node| {
        groups_mut(node)?.push(Arc::new(QuestionGroup::default()));
        Ok(())
    })?;
    debug!(part = part.get(), "added group");
    Ok(next)
}

/// Patch the shared context of the group at `index`.
pub fn update_group(
    test: &Test,
    part: PartOrdinal,
    index: usize,
    patch: &GroupPatch,
) -> Result<Test> {
    let position = part_index(test, part)?;
    with_part(test, position, |node| {
        let groups = groups_mut(node)?;
        check_group_index(part.get(), index, groups.len())?;
        patch.apply_to(&mut Arc::make_mut(&mut groups[index]).group_context);
        Ok(())
    })
}

/// Remove the group at `index` together with its questions.
pub fn remove_group(test: &Test, part: PartOrdinal, index: usize) -> Result<Test> {
    let position = part_index(test, part)?;
    let next = with_part(test, position, |node| {
        let groups = groups_mut(node)?;
        check_group_index(part.get(), index, groups.len())?;
        groups.remove(index);
        Ok(())
    })?;
    debug!(part = part.get(), index, "removed group");
    Ok(next)
}

/// Append a blank question to the group at `group`.
pub fn add_question_to_group(test: &Test, part: PartOrdinal, group: usize) -> Result<Test> {
    let position = part_index(test, part)?;
    let number = next_question_number(test, position);
    let next = with_part(test, position, |node| {
        let groups = groups_mut(node)?;
        check_group_index(part.get(), group, groups.len())?;
        Arc::make_mut(&mut groups[group])
            .questions
            .push(Arc::new(Question::blank(part, number)));
        Ok(())
    })?;
    debug!(
        part = part.get(),
        group,
        question_number = number,
        "added question to group"
    );
    Ok(next)
}

/// Patch the question at `index` within the group at `group`.
pub fn update_question_in_group(
    test: &Test,
    part: PartOrdinal,
    group: usize,
    index: usize,
    patch: &QuestionPatch,
) -> Result<Test> {
    let position = part_index(test, part)?;
    with_part(test, position, |node| {
        let groups = groups_mut(node)?;
        check_group_index(part.get(), group, groups.len())?;
        let questions = &mut Arc::make_mut(&mut groups[group]).questions;
        check_question_index(part.get(), index, questions.len())?;
        patch.apply_to(Arc::make_mut(&mut questions[index]))
    })
}

/// Remove the question at `index` within the group at `group`. The group
/// stays even when it becomes empty.
pub fn remove_question_from_group(
    test: &Test,
    part: PartOrdinal,
    group: usize,
    index: usize,
) -> Result<Test> {
    let position = part_index(test, part)?;
    let next = with_part(test, position, |node| {
        let groups = groups_mut(node)?;
        check_group_index(part.get(), group, groups.len())?;
        let questions = &mut Arc::make_mut(&mut groups[group]).questions;
        check_question_index(part.get(), index, questions.len())?;
        questions.remove(index);
        Ok(())
    })?;
    debug!(part = part.get(), group, index, "removed question from group");
    Ok(next)
}
