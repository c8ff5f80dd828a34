//! Tests for exam-model types.

use std::sync::Arc;

use exam_model::{
    AnswerLabel, AnswerOption, ContentTags, Difficulty, Media, Part, PartContent, PartOrdinal,
    Question, QuestionGroup, Test, part_question_count, total_questions,
};
use proptest::prelude::*;

fn ordinal(value: u32) -> PartOrdinal {
    PartOrdinal::new(value).expect("ordinal")
}

fn sample_test() -> Test {
    let mut test = Test::new("Sample", 120).expect("test");
    let mut question = Question::blank(ordinal(1), 1);
    question.question_text = Some("Look at the picture.".to_string());
    question.media = Some(Media {
        image_urls: vec!["https://cdn.example/p1.png".to_string()],
        ..Media::default()
    });
    question.content_tags = Some(ContentTags {
        difficulty: Some(Difficulty::B1),
        domain: vec!["office".to_string()],
        ..ContentTags::default()
    });
    test.parts.push(Arc::new(Part {
        ordinal: ordinal(1),
        name: "Part 1".to_string(),
        content: PartContent::Flat {
            questions: vec![Arc::new(question)],
        },
    }));
    test.parts.push(Arc::new(Part {
        ordinal: ordinal(3),
        name: "Part 3".to_string(),
        content: PartContent::Grouped {
            groups: vec![Arc::new(QuestionGroup {
                group_context: Media {
                    audio_url: Some("https://cdn.example/p3.mp3".to_string()),
                    transcript: Some("<p>W: Hello.</p>".to_string()),
                    ..Media::default()
                },
                questions: vec![Arc::new(Question::blank(ordinal(3), 2))],
            })],
        },
    }));
    test
}

#[test]
fn test_serializes_and_deserializes() {
    let test = sample_test();
    let json = serde_json::to_string(&test).expect("serialize test");
    let round: Test = serde_json::from_str(&json).expect("deserialize test");
    assert_eq!(round, test);
}

#[test]
fn answer_label_serializes_as_single_character() {
    let option = AnswerOption::new(AnswerLabel::A, "a desk");
    let json = serde_json::to_value(&option).expect("serialize option");
    assert_eq!(json["label"], "A");
    assert!(serde_json::from_str::<AnswerOption>(r#"{"label":"a","text":""}"#).is_err());
}

#[test]
fn counts_agree_between_part_and_test() {
    let test = sample_test();
    assert_eq!(part_question_count(&test.parts[0]), 1);
    assert_eq!(part_question_count(&test.parts[1]), 1);
    assert_eq!(total_questions(&test), 2);
}

fn arb_part() -> impl Strategy<Value = Part> {
    (1u32..=7, prop::collection::vec(0usize..5, 0..6)).prop_map(|(raw, sizes)| {
        let ordinal = ordinal(raw);
        let content = if ordinal.shape().kind == exam_model::PartKind::Flat {
            PartContent::Flat {
                questions: (0..sizes.iter().sum::<usize>())
                    .map(|_| Arc::new(Question::blank(ordinal, 1)))
                    .collect(),
            }
        } else {
            PartContent::Grouped {
                groups: sizes
                    .iter()
                    .map(|size| {
                        Arc::new(QuestionGroup {
                            group_context: Media::default(),
                            questions: (0..*size)
                                .map(|_| Arc::new(Question::blank(ordinal, 1)))
                                .collect(),
                        })
                    })
                    .collect(),
            }
        };
        Part {
            ordinal,
            name: ordinal.default_name(),
            content,
        }
    })
}

proptest! {
    #[test]
    fn total_is_sum_of_part_counts(parts in prop::collection::vec(arb_part(), 0..7)) {
        let mut test = Test::new("Generated", 45).unwrap();
        test.parts = parts.into_iter().map(Arc::new).collect();
        let by_part: usize = test.parts.iter().map(|part| part_question_count(part)).sum();
        prop_assert_eq!(total_questions(&test), by_part);
        let walked: usize = test.parts.iter().map(|part| part.questions().count()).sum();
        prop_assert_eq!(walked, by_part);
    }
}
