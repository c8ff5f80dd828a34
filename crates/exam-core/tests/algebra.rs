use std::sync::Arc;

use exam_core::{
    Edit, EditError, GroupPatch, QuestionPatch, add_group, add_question, add_question_to_group,
    apply, ensure_parts_through, remove_question, update_question,
};
use exam_model::{AnswerLabel, PartOrdinal, Test, total_questions};
use exam_validate::validate;
use proptest::prelude::*;

fn ordinal(value: u32) -> PartOrdinal {
    PartOrdinal::new(value).expect("ordinal")
}

fn sample() -> Test {
    Test::new("Sample", 120).expect("test")
}

fn apply_all(test: Test, edits: &[Edit]) -> Test {
    edits
        .iter()
        .fold(test, |test, edit| apply(&test, edit).expect("edit applies"))
}

#[test]
fn three_option_part_gets_three_blank_options() {
    let test = ensure_parts_through(&sample(), ordinal(2)).unwrap();
    let test = add_question(&test, ordinal(2)).unwrap();

    let part = test.part(ordinal(2)).expect("part 2");
    let questions = part.flat_questions().expect("flat");
    assert_eq!(questions.len(), 1);
    let labels: Vec<char> = questions[0].option_labels().map(|l| l.as_char()).collect();
    assert_eq!(labels, vec!['A', 'B', 'C']);
    assert_eq!(questions[0].correct_answer, AnswerLabel::A);
}

#[test]
fn grouped_part_gets_a_four_option_question() {
    let test = ensure_parts_through(&sample(), ordinal(3)).unwrap();
    let test = add_group(&test, ordinal(3)).unwrap();
    let test = add_question_to_group(&test, ordinal(3), 0).unwrap();

    let groups = test.part(ordinal(3)).expect("part 3").groups().expect("grouped");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].questions.len(), 1);
    assert_eq!(groups[0].questions[0].options.len(), 4);
}

#[test]
fn shape_mismatch_is_an_error() {
    let test = ensure_parts_through(&sample(), ordinal(3)).unwrap();
    assert!(matches!(
        add_question(&test, ordinal(3)),
        Err(EditError::ShapeMismatch { part: 3, .. })
    ));
    assert!(matches!(
        add_group(&test, ordinal(1)),
        Err(EditError::ShapeMismatch { part: 1, .. })
    ));
}

#[test]
fn add_then_remove_restores_the_test() {
    let original = apply_all(
        sample(),
        &[
            Edit::EnsurePartsThrough(ordinal(2)),
            Edit::AddQuestion { part: ordinal(1) },
            Edit::AddQuestion { part: ordinal(1) },
            Edit::AddQuestion { part: ordinal(2) },
        ],
    );

    let added = add_question(&original, ordinal(1)).unwrap();
    let restored = remove_question(&added, ordinal(1), 2).unwrap();
    assert_eq!(restored, original);

    let added = apply(&original, &Edit::AddQuestion { part: ordinal(1) }).unwrap();
    assert_eq!(
        added.part(ordinal(2)).unwrap().flat_questions().unwrap()[0].question_number,
        4
    );
    let restored = apply(
        &added,
        &Edit::RemoveQuestion {
            part: ordinal(1),
            index: 2,
        },
    )
    .unwrap();
    assert_eq!(restored, original);
}

#[test]
fn updates_share_untouched_nodes() {
    let original = apply_all(
        sample(),
        &[
            Edit::EnsurePartsThrough(ordinal(2)),
            Edit::AddQuestion { part: ordinal(1) },
            Edit::AddQuestion { part: ordinal(1) },
            Edit::AddQuestion { part: ordinal(2) },
        ],
    );

    let patch = QuestionPatch::default().with_text("Look at the picture.");
    let updated = update_question(&original, ordinal(1), 0, &patch).unwrap();

    assert!(Arc::ptr_eq(&original.parts[1], &updated.parts[1]));
    assert!(!Arc::ptr_eq(&original.parts[0], &updated.parts[0]));

    let before = original.parts[0].flat_questions().unwrap();
    let after = updated.parts[0].flat_questions().unwrap();
    assert!(!Arc::ptr_eq(&before[0], &after[0]));
    assert!(Arc::ptr_eq(&before[1], &after[1]));
    assert_eq!(before[0].question_text, None);
}

#[test]
fn unknown_option_label_is_rejected() {
    let test = apply_all(
        sample(),
        &[
            Edit::EnsurePartsThrough(ordinal(2)),
            Edit::AddQuestion { part: ordinal(2) },
        ],
    );
    let d = AnswerLabel::new('D').unwrap();
    let patch = QuestionPatch::default().with_correct_answer(d);
    assert_eq!(
        update_question(&test, ordinal(2), 0, &patch),
        Err(EditError::UnknownOption(d))
    );
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    let part = (1u32..=7).prop_map(ordinal);
    let index = 0usize..4;
    let label = (0usize..5).prop_map(|i| AnswerLabel::nth(i).expect("label"));
    prop_oneof![
        Just(Edit::AddPart),
        part.clone().prop_map(Edit::EnsurePartsThrough),
        Just(Edit::RemoveLastPart),
        part.clone().prop_map(|part| Edit::AddQuestion { part }),
        (part.clone(), index.clone()).prop_map(|(part, index)| Edit::RemoveQuestion { part, index }),
        (part.clone(), index.clone(), label.clone()).prop_map(|(part, index, label)| {
            Edit::UpdateQuestion {
                part,
                index,
                patch: QuestionPatch::default()
                    .with_correct_answer(label)
                    .with_option(label, "changed"),
            }
        }),
        part.clone().prop_map(|part| Edit::AddGroup { part }),
        (part.clone(), index.clone()).prop_map(|(part, index)| Edit::RemoveGroup { part, index }),
        (part.clone(), index.clone()).prop_map(|(part, index)| Edit::UpdateGroup {
            part,
            index,
            patch: GroupPatch {
                transcript: Some(Some("M: Good morning.".into())),
                ..GroupPatch::default()
            },
        }),
        (part.clone(), index.clone())
            .prop_map(|(part, group)| Edit::AddQuestionToGroup { part, group }),
        (part.clone(), index.clone(), index.clone()).prop_map(|(part, group, index)| {
            Edit::RemoveQuestionFromGroup { part, group, index }
        }),
        (part, index.clone(), index, label).prop_map(|(part, group, index, label)| {
            Edit::UpdateQuestionInGroup {
                part,
                group,
                index,
                patch: QuestionPatch::default().with_correct_answer(label),
            }
        }),
    ]
}

proptest! {
    #[test]
    fn edit_sequences_never_break_structure(edits in prop::collection::vec(edit_strategy(), 0..40)) {
        let mut test = sample();
        for edit in &edits {
            // Rejected edits leave the test as it was.
            if let Ok(next) = apply(&test, edit) {
                test = next;
            }
        }

        let report = validate(&test);
        let structural: Vec<_> = report.structural().collect();
        prop_assert!(structural.is_empty(), "structural issues: {:?}", structural);

        let per_part: usize = test
            .parts
            .iter()
            .map(|part| exam_model::part_question_count(part))
            .sum();
        prop_assert_eq!(total_questions(&test), per_part);
    }
}
