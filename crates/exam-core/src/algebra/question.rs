//! Operations on flat parts.

use std::sync::Arc;

use exam_model::{PartOrdinal, Question, Test};
use tracing::debug;

use super::{check_question_index, flat_questions_mut, next_question_number, part_index, with_part};
use crate::error::Result;
use crate::patch::QuestionPatch;

/// Append a blank question to a flat part.
pub fn add_question(test: &Test, part: PartOrdinal) -> Result<Test> {
    let index = part_index(test, part)?;
    let number = next_question_number(test, index);
    let next = with_part(test, index, |node| {
        flat_questions_mut(node)?.push(Arc::new(Question::blank(part, number)));
        Ok(())
    })?;
    debug!(part = part.get(), question_number = number, "added question");
    Ok(next)
}

/// Patch the question at `index` of a flat part.
pub fn update_question(
    test: &Test,
    part: PartOrdinal,
    index: usize,
    patch: &QuestionPatch,
) -> Result<Test> {
    let position = part_index(test, part)?;
    with_part(test, position, |node| {
        let questions = flat_questions_mut(node)?;
        check_question_index(part.get(), index, questions.len())?;
        patch.apply_to(Arc::make_mut(&mut questions[index]))
    })
}

/// Remove the question at `index` of a flat part.
pub fn remove_question(test: &Test, part: PartOrdinal, index: usize) -> Result<Test> {
    let position = part_index(test, part)?;
    let next = with_part(test, position, |node| {
        let questions = flat_questions_mut(node)?;
        check_question_index(part.get(), index, questions.len())?;
        questions.remove(index);
        Ok(())
    })?;
    debug!(part = part.get(), index, "removed question");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use exam_model::{AnswerLabel, PartKind};

    use super::*;
    use crate::algebra::ensure_parts_through;
    use crate::error::EditError;

    fn ordinal(value: u32) -> PartOrdinal {
        PartOrdinal::new(value).unwrap()
    }

    fn base() -> Test {
        ensure_parts_through(&Test::new("Sample", 120).unwrap(), ordinal(3)).unwrap()
    }

    #[test]
    fn add_uses_part_policy() {
        let test = add_question(&base(), ordinal(2)).unwrap();
        let question = &test.part(ordinal(2)).unwrap().flat_questions().unwrap()[0];
        assert_eq!(question.options.len(), 3);
        assert_eq!(question.correct_answer, AnswerLabel::A);
        assert_eq!(question.question_number, 1);
        assert_eq!(
            question.skill_tags.as_ref().and_then(|tags| tags.part.as_deref()),
            Some("2")
        );
    }

    #[test]
    fn new_number_follows_earlier_parts() {
        let test = add_question(&base(), ordinal(1)).unwrap();
        let test = add_question(&test, ordinal(1)).unwrap();
        let test = add_question(&test, ordinal(2)).unwrap();
        let numbers: Vec<u32> = test
            .parts
            .iter()
            .flat_map(|part| part.questions().map(|q| q.question_number).collect::<Vec<_>>())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn grouped_part_rejects_flat_operations() {
        let test = base();
        let err = add_question(&test, ordinal(3)).unwrap_err();
        assert_eq!(
            err,
            EditError::ShapeMismatch {
                part: 3,
                expected: PartKind::Flat,
                found: PartKind::Grouped,
            }
        );
        assert!(matches!(
            remove_question(&test, ordinal(3), 0),
            Err(EditError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn out_of_range_and_missing_part() {
        let test = base();
        assert_eq!(
            remove_question(&test, ordinal(1), 0),
            Err(EditError::QuestionIndexOutOfRange {
                part: 1,
                index: 0,
                len: 0
            })
        );
        assert_eq!(
            add_question(&test, ordinal(5)),
            Err(EditError::PartNotFound(5))
        );
    }

    #[test]
    fn update_leaves_input_untouched() {
        let before = add_question(&base(), ordinal(1)).unwrap();
        let patch = QuestionPatch::default().with_text("Look at the picture.");
        let after = update_question(&before, ordinal(1), 0, &patch).unwrap();

        let text = |test: &Test| {
            test.part(ordinal(1)).unwrap().flat_questions().unwrap()[0]
                .question_text
                .clone()
        };
        assert_eq!(text(&before), None);
        assert_eq!(text(&after).as_deref(), Some("Look at the picture."));
    }
}
