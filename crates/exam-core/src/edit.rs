//! Edit commands.
//!
//! [`Edit`] names every update algebra operation. [`apply`] runs one and
//! renumbers from the touched part when the edit adds or removes questions,
//! so a test built only through `apply` keeps contiguous numbering.

use exam_model::{PartOrdinal, Test};

use crate::algebra;
use crate::error::Result;
use crate::patch::{GroupPatch, MetadataPatch, QuestionPatch};
use crate::renumber::{renumber, renumber_all};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    AddPart,
    EnsurePartsThrough(PartOrdinal),
    RenamePart {
        part: PartOrdinal,
        name: String,
    },
    RemoveLastPart,
    UpdateMetadata(MetadataPatch),

    AddQuestion {
        part: PartOrdinal,
    },
    UpdateQuestion {
        part: PartOrdinal,
        index: usize,
        patch: QuestionPatch,
    },
    RemoveQuestion {
        part: PartOrdinal,
        index: usize,
    },

    AddGroup {
        part: PartOrdinal,
    },
    UpdateGroup {
        part: PartOrdinal,
        index: usize,
        patch: GroupPatch,
    },
    RemoveGroup {
        part: PartOrdinal,
        index: usize,
    },
    AddQuestionToGroup {
        part: PartOrdinal,
        group: usize,
    },
    UpdateQuestionInGroup {
        part: PartOrdinal,
        group: usize,
        index: usize,
        patch: QuestionPatch,
    },
    RemoveQuestionFromGroup {
        part: PartOrdinal,
        group: usize,
        index: usize,
    },

    /// Renumber the whole test from 1.
    RenumberAll,
}

impl Edit {
    /// Part whose questions are added or removed by this edit.
    pub fn renumbers_from(&self) -> Option<PartOrdinal> {
        match self {
            Edit::AddQuestion { part }
            | Edit::RemoveQuestion { part, .. }
            | Edit::RemoveGroup { part, .. }
            | Edit::AddQuestionToGroup { part, .. }
            | Edit::RemoveQuestionFromGroup { part, .. } => Some(*part),
            _ => None,
        }
    }

    /// Short name for logs and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Edit::AddPart => "add part",
            Edit::EnsurePartsThrough(_) => "ensure parts",
            Edit::RenamePart { .. } => "rename part",
            Edit::RemoveLastPart => "remove last part",
            Edit::UpdateMetadata(_) => "update metadata",
            Edit::AddQuestion { .. } => "add question",
            Edit::UpdateQuestion { .. } => "update question",
            Edit::RemoveQuestion { .. } => "remove question",
            Edit::AddGroup { .. } => "add group",
            Edit::UpdateGroup { .. } => "update group",
            Edit::RemoveGroup { .. } => "remove group",
            Edit::AddQuestionToGroup { .. } => "add question to group",
            Edit::UpdateQuestionInGroup { .. } => "update question in group",
            Edit::RemoveQuestionFromGroup { .. } => "remove question from group",
            Edit::RenumberAll => "renumber",
        }
    }
}

/// Apply `edit` to `test`, renumbering afterwards when questions were added
/// or removed.
pub fn apply(test: &Test, edit: &Edit) -> Result<Test> {
    let next = match edit {
        Edit::AddPart => algebra::add_part(test)?,
        Edit::EnsurePartsThrough(ordinal) => algebra::ensure_parts_through(test, *ordinal)?,
        Edit::RenamePart { part, name } => algebra::rename_part(test, *part, name.as_str())?,
        Edit::RemoveLastPart => algebra::remove_last_part(test)?,
        Edit::UpdateMetadata(patch) => algebra::update_metadata(test, patch)?,
        Edit::AddQuestion { part } => algebra::add_question(test, *part)?,
        Edit::UpdateQuestion { part, index, patch } => {
            algebra::update_question(test, *part, *index, patch)?
        }
        Edit::RemoveQuestion { part, index } => algebra::remove_question(test, *part, *index)?,
        Edit::AddGroup { part } => algebra::add_group(test, *part)?,
        Edit::UpdateGroup { part, index, patch } => {
            algebra::update_group(test, *part, *index, patch)?
        }
        Edit::RemoveGroup { part, index } => algebra::remove_group(test, *part, *index)?,
        Edit::AddQuestionToGroup { part, group } => {
            algebra::add_question_to_group(test, *part, *group)?
        }
        Edit::UpdateQuestionInGroup {
            part,
            group,
            index,
            patch,
        } => algebra::update_question_in_group(test, *part, *group, *index, patch)?,
        Edit::RemoveQuestionFromGroup { part, group, index } => {
            algebra::remove_question_from_group(test, *part, *group, *index)?
        }
        Edit::RenumberAll => return Ok(renumber_all(test)),
    };

    match edit.renumbers_from() {
        Some(part) => renumber(&next, part),
        None => Ok(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordinal(value: u32) -> PartOrdinal {
        PartOrdinal::new(value).unwrap()
    }

    fn numbers(test: &Test) -> Vec<u32> {
        test.parts
            .iter()
            .flat_map(|part| part.questions().map(|q| q.question_number).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn adding_to_an_earlier_part_shifts_later_parts() {
        let edits = [
            Edit::EnsurePartsThrough(ordinal(2)),
            Edit::AddQuestion { part: ordinal(2) },
            Edit::AddQuestion { part: ordinal(2) },
            Edit::AddQuestion { part: ordinal(1) },
        ];
        let test = edits
            .iter()
            .try_fold(Test::new("Sample", 120).unwrap(), |test, edit| {
                apply(&test, edit)
            })
            .unwrap();
        assert_eq!(numbers(&test), vec![1, 2, 3]);
        assert_eq!(test.parts[0].flat_questions().unwrap().len(), 1);
    }

    #[test]
    fn removing_closes_the_gap() {
        let mut test = apply(
            &Test::new("Sample", 120).unwrap(),
            &Edit::EnsurePartsThrough(ordinal(1)),
        )
        .unwrap();
        for _ in 0..3 {
            test = apply(&test, &Edit::AddQuestion { part: ordinal(1) }).unwrap();
        }
        let test = apply(
            &test,
            &Edit::RemoveQuestion {
                part: ordinal(1),
                index: 0,
            },
        )
        .unwrap();
        assert_eq!(numbers(&test), vec![1, 2]);
    }

    #[test]
    fn renumber_targets() {
        assert_eq!(
            Edit::AddQuestion { part: ordinal(1) }.renumbers_from(),
            Some(ordinal(1))
        );
        assert_eq!(Edit::AddGroup { part: ordinal(3) }.renumbers_from(), None);
        assert_eq!(Edit::AddPart.renumbers_from(), None);
    }
}
