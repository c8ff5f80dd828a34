//! Question renumbering.
//!
//! Numbers run contiguously across the test in reading order. Renumbering a
//! part also renumbers every later part, starting one past the highest
//! number used before the part. Nodes whose numbers are already right keep
//! their `Arc`.

use std::sync::Arc;

use exam_model::{PartContent, PartOrdinal, Question, Test};
use tracing::debug;

use crate::error::{EditError, Result};

/// Renumber `part` and every part after it.
pub fn renumber(test: &Test, part: PartOrdinal) -> Result<Test> {
    let index = test
        .part_index(part)
        .ok_or(EditError::PartNotFound(part.get()))?;
    Ok(renumber_from(test, index))
}

/// Renumber the whole test from 1.
pub fn renumber_all(test: &Test) -> Test {
    renumber_from(test, 0)
}

fn renumber_from(test: &Test, start: usize) -> Test {
    let mut number = test.parts[..start]
        .iter()
        .filter_map(|part| part.max_question_number())
        .max()
        .unwrap_or(0)
        .saturating_add(1);
    let first = number;

    let mut next = test.clone();
    let mut rewritten = 0usize;
    for part in next.parts.iter_mut().skip(start) {
        if already_numbered(part.questions(), number) {
            number = number.saturating_add(count(part.questions()));
            continue;
        }
        rewritten += 1;
        match &mut Arc::make_mut(part).content {
            PartContent::Flat { questions } => renumber_questions(questions, &mut number),
            PartContent::Grouped { groups } => {
                for group in groups {
                    if already_numbered(group.questions.iter().map(|q| &**q), number) {
                        number = number.saturating_add(count(group.questions.iter()));
                    } else {
                        renumber_questions(&mut Arc::make_mut(group).questions, &mut number);
                    }
                }
            }
        }
    }

    debug!(
        from_part = start + 1,
        first_number = first,
        parts_rewritten = rewritten,
        "renumbered questions"
    );
    next
}

fn already_numbered<'a>(questions: impl Iterator<Item = &'a Question>, start: u32) -> bool {
    questions.enumerate().all(|(offset, question)| {
        u32::try_from(offset)
            .ok()
            .and_then(|offset| start.checked_add(offset))
            == Some(question.question_number)
    })
}

fn count<T>(items: impl Iterator<Item = T>) -> u32 {
    u32::try_from(items.count()).unwrap_or(u32::MAX)
}

fn renumber_questions(questions: &mut [Arc<Question>], number: &mut u32) {
    for question in questions {
        if question.question_number != *number {
            Arc::make_mut(question).question_number = *number;
        }
        *number = number.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use exam_model::{Part, QuestionGroup};

    use super::*;

    fn numbers(test: &Test) -> Vec<u32> {
        test.parts
            .iter()
            .flat_map(|part| part.questions().map(|q| q.question_number).collect::<Vec<_>>())
            .collect()
    }

    fn flat(ordinal: u32, numbers: &[u32]) -> Arc<Part> {
        let ordinal = PartOrdinal::new(ordinal).unwrap();
        Arc::new(Part {
            ordinal,
            name: ordinal.default_name(),
            content: PartContent::Flat {
                questions: numbers
                    .iter()
                    .map(|n| Arc::new(Question::blank(ordinal, *n)))
                    .collect(),
            },
        })
    }

    fn grouped(ordinal: u32, groups: &[&[u32]]) -> Arc<Part> {
        let ordinal = PartOrdinal::new(ordinal).unwrap();
        Arc::new(Part {
            ordinal,
            name: ordinal.default_name(),
            content: PartContent::Grouped {
                groups: groups
                    .iter()
                    .map(|numbers| {
                        Arc::new(QuestionGroup {
                            group_context: Default::default(),
                            questions: numbers
                                .iter()
                                .map(|n| Arc::new(Question::blank(ordinal, *n)))
                                .collect(),
                        })
                    })
                    .collect(),
            },
        })
    }

    fn test_with(parts: Vec<Arc<Part>>) -> Test {
        let mut test = Test::new("Renumber", 120).unwrap();
        test.parts = parts;
        test
    }

    #[test]
    fn closes_gaps_and_duplicates() {
        let test = test_with(vec![
            flat(1, &[1, 2, 4]),
            flat(2, &[4, 4]),
            grouped(3, &[&[9, 10], &[], &[2]]),
        ]);
        assert_eq!(numbers(&renumber_all(&test)), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn starts_after_earlier_parts() {
        let test = test_with(vec![flat(1, &[1, 2, 3]), flat(2, &[10, 11])]);
        let renumbered = renumber(&test, PartOrdinal::new(2).unwrap()).unwrap();
        assert_eq!(numbers(&renumbered), vec![1, 2, 3, 4, 5]);
        assert!(Arc::ptr_eq(&test.parts[0], &renumbered.parts[0]));
    }

    #[test]
    fn correct_numbers_keep_their_nodes() {
        let test = test_with(vec![flat(1, &[1, 2]), grouped(3, &[&[3], &[5]])]);
        let renumbered = renumber_all(&test);
        assert!(Arc::ptr_eq(&test.parts[0], &renumbered.parts[0]));

        let before = test.parts[1].groups().unwrap();
        let after = renumbered.parts[1].groups().unwrap();
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        assert!(!Arc::ptr_eq(&before[1], &after[1]));
        assert_eq!(after[1].questions[0].question_number, 4);

        let unchanged = renumber_all(&renumbered);
        assert!(Arc::ptr_eq(&renumbered.parts[1], &unchanged.parts[1]));
    }

    #[test]
    fn largest_number_does_not_overflow() {
        let test = test_with(vec![flat(1, &[u32::MAX]), flat(2, &[7])]);
        let renumbered = renumber(&test, PartOrdinal::new(2).unwrap()).unwrap();
        assert_eq!(numbers(&renumbered), vec![u32::MAX, u32::MAX]);
        assert_eq!(numbers(&renumber_all(&test)), vec![1, 2]);
    }

    #[test]
    fn missing_part_is_an_error() {
        let test = test_with(vec![flat(1, &[1])]);
        assert_eq!(
            renumber(&test, PartOrdinal::new(4).unwrap()),
            Err(EditError::PartNotFound(4))
        );
        assert_eq!(renumber_all(&Test::new("Empty", 10).unwrap()).parts.len(), 0);
    }
}
