use std::sync::Arc;

use exam_ingest::{ImportError, read_test_csv, template_csv, write_test_csv};
use exam_model::{
    AnswerLabel, ContentTags, Difficulty, Media, Part, PartContent, PartOrdinal, Question,
    QuestionGroup, SkillTags, Test,
};

fn base() -> Test {
    Test::new("Imported", 120).expect("test")
}

fn ordinal(value: u32) -> PartOrdinal {
    PartOrdinal::new(value).expect("ordinal")
}

fn header() -> String {
    let template = String::from_utf8(template_csv()).expect("utf8");
    template.lines().next().unwrap_or_default().to_string()
}

fn sheet(rows: &[&str]) -> Vec<u8> {
    let mut text = header();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text.into_bytes()
}

/// Cells for a row, by column name; unnamed columns stay empty.
fn row(cells: &[(&str, &str)]) -> String {
    header()
        .split(',')
        .map(|column| {
            cells
                .iter()
                .find(|(name, _)| *name == column)
                .map(|(_, value)| value.to_string())
                .unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[test]
fn template_header_lists_every_column() {
    insta::assert_snapshot!(header(), @"part,part_name,group,question_number,question_text,option_a,option_b,option_c,option_d,correct_answer,explanation,audio_url,image_urls,passage_html,transcript,translation,group_audio_url,group_image_urls,group_passage_html,group_transcript,group_translation,difficulty,domain,genre,setting,style,skill_part,skills");
}

#[test]
fn template_imports_cleanly() {
    let test = read_test_csv(&template_csv(), &base()).expect("template imports");
    assert_eq!(test.title, "Imported");
    assert_eq!(test.parts.len(), 3);
    assert_eq!(test.parts[0].name, "Part 1: Photographs");
    assert_eq!(exam_model::total_questions(&test), 3);

    let part2 = test.part(ordinal(2)).expect("part 2");
    assert_eq!(part2.flat_questions().expect("flat")[0].options.len(), 3);

    let part3 = test.part(ordinal(3)).expect("part 3");
    let group = &part3.groups().expect("grouped")[0];
    assert_eq!(
        group.group_context.transcript.as_deref(),
        Some("W: The shipment is late again. M: I'll call the supplier.")
    );
    let skills = &group.questions[0]
        .skill_tags
        .as_ref()
        .expect("skill tags")
        .skills;
    assert_eq!(skills, &vec!["main-idea".to_string(), "inference".to_string()]);
}

#[test]
fn export_then_import_reproduces_the_test() {
    let part1 = ordinal(1);
    let part3 = ordinal(3);

    let mut first = Question::blank(part1, 1);
    first.question_text = Some("Look at the picture, then choose.".into());
    first.options[2].text = "They're \"shaking hands\".".into();
    first.correct_answer = AnswerLabel::new('C').expect("label");
    first.media = Some(Media {
        audio_url: Some("https://cdn.example.com/a/1.mp3".into()),
        image_urls: vec!["https://cdn.example.com/i/1.jpg".into(), "https://cdn.example.com/i/2.jpg".into()],
        ..Media::default()
    });
    first.content_tags = Some(ContentTags {
        difficulty: Some(Difficulty::B2),
        domain: vec!["office".into()],
        ..ContentTags::default()
    });

    let mut grouped_question = Question::blank(part3, 3);
    grouped_question.explanation = Some("Line 1\nLine 2".into());
    grouped_question.skill_tags = Some(SkillTags {
        part: Some("3".into()),
        skills: vec!["inference".into()],
    });

    let mut test = base();
    test.declared_question_count = 4;
    test.parts = vec![
        Arc::new(Part {
            ordinal: part1,
            name: "Photographs".into(),
            content: PartContent::Flat {
                questions: vec![Arc::new(first), Arc::new(Question::blank(part1, 2))],
            },
        }),
        Arc::new(Part::new(ordinal(2))),
        Arc::new(Part {
            ordinal: part3,
            name: part3.default_name(),
            content: PartContent::Grouped {
                groups: vec![
                    Arc::new(QuestionGroup {
                        group_context: Media {
                            transcript: Some("M: Hello, is this the front desk?".into()),
                            ..Media::default()
                        },
                        questions: vec![
                            Arc::new(grouped_question),
                            Arc::new(Question::blank(part3, 4)),
                        ],
                    }),
                    Arc::new(QuestionGroup::default()),
                ],
            },
        }),
    ];

    let bytes = write_test_csv(&test).expect("export");
    let imported = read_test_csv(&bytes, &test).expect("import");
    assert_eq!(imported, test);
}

#[test]
fn content_whitespace_survives_a_round_trip() {
    let part1 = ordinal(1);
    let part3 = ordinal(3);

    let mut flat = Question::blank(part1, 1);
    flat.question_text = Some("<p>Look</p>\n".into());
    flat.options[1].text = "  a man is reading  ".into();
    flat.explanation = Some("\tSee the desk.\n".into());

    let mut test = base();
    test.parts = vec![
        Arc::new(Part {
            ordinal: part1,
            name: " Photographs ".into(),
            content: PartContent::Flat {
                questions: vec![Arc::new(flat)],
            },
        }),
        Arc::new(Part::new(ordinal(2))),
        Arc::new(Part {
            ordinal: part3,
            name: part3.default_name(),
            content: PartContent::Grouped {
                groups: vec![Arc::new(QuestionGroup {
                    group_context: Media {
                        passage_html: Some("  <p>Memo</p>\n".into()),
                        transcript: Some(" M: Hi. ".into()),
                        ..Media::default()
                    },
                    questions: vec![Arc::new(Question::blank(part3, 2))],
                })],
            },
        }),
    ];

    let bytes = write_test_csv(&test).expect("export");
    let imported = read_test_csv(&bytes, &test).expect("import");
    assert_eq!(imported, test);
}

#[test]
fn padded_structural_cells_are_trimmed() {
    let bytes = sheet(&[&row(&[
        ("part", " 1 "),
        ("question_number", " 1 "),
        ("correct_answer", " b "),
        ("question_text", "  Where is he?  "),
    ])]);
    let test = read_test_csv(&bytes, &base()).expect("import");
    let question = &test.parts[0].flat_questions().expect("flat")[0];
    assert_eq!(question.question_number, 1);
    assert_eq!(question.correct_answer, AnswerLabel::new('B').expect("label"));
    assert_eq!(question.question_text.as_deref(), Some("  Where is he?  "));
}

#[test]
fn largest_question_number_is_a_row_error() {
    let bytes = sheet(&[&row(&[
        ("part", "1"),
        ("question_number", "4294967295"),
        ("correct_answer", "A"),
    ])]);
    let err = read_test_csv(&bytes, &base()).expect_err("rejected");
    let errors = err.row_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, Some(2));
    assert_eq!(errors[0].column.as_deref(), Some("question_number"));
}

#[test]
fn part_name_must_match_its_part() {
    let bytes = sheet(&[
        &row(&[("part", "1"), ("part_name", "Part 1: Photographs")]),
        &row(&[("part", "2"), ("part_name", "Part 5")]),
    ]);
    let err = read_test_csv(&bytes, &base()).expect_err("rejected");
    let errors = err.row_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].row, Some(3));
    assert_eq!(errors[0].column.as_deref(), Some("part_name"));
}

#[test]
fn row_problems_are_reported_together() {
    let bytes = sheet(&[
        &row(&[("part", "9"), ("question_number", "1"), ("correct_answer", "A")]),
        &row(&[
            ("part", "1"),
            ("group", "1"),
            ("question_number", "1"),
            ("correct_answer", "A"),
        ]),
        &row(&[("part", "2"), ("question_number", "1"), ("option_d", "extra"), ("correct_answer", "A")]),
        &row(&[("part", "5"), ("question_number", "x")]),
    ]);

    let err = read_test_csv(&bytes, &base()).expect_err("rejected");
    let errors = err.row_errors();
    let located: Vec<(Option<usize>, Option<&str>)> = errors
        .iter()
        .map(|error| (error.row, error.column.as_deref()))
        .collect();
    assert_eq!(
        located,
        vec![
            (Some(2), Some("part")),
            (Some(3), Some("group")),
            (Some(4), Some("option_d")),
            (Some(5), Some("question_number")),
            (Some(5), Some("correct_answer")),
        ]
    );
}

#[test]
fn structural_issues_point_at_rows() {
    let bytes = sheet(&[
        &row(&[("part", "1"), ("question_number", "1"), ("correct_answer", "A")]),
        &row(&[("part", "1"), ("question_number", "2"), ("correct_answer", "E")]),
        &row(&[("part", "1"), ("question_number", "4"), ("correct_answer", "b")]),
    ]);

    let err = read_test_csv(&bytes, &base()).expect_err("rejected");
    let errors = err.row_errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].row, Some(3));
    assert_eq!(errors[0].column.as_deref(), Some("correct_answer"));
    assert_eq!(errors[1].row, Some(4));
    assert_eq!(errors[1].column.as_deref(), Some("question_number"));
    assert_eq!(
        errors[1].message,
        "Question numbering jumps from 2 to 4 in Part 1 (expected 3)"
    );
}

#[test]
fn headers_are_case_insensitive_and_extra_columns_ignored() {
    let text = "Part,Question Number,Correct_Answer,Option A,Notes\n1,1,a,Hello,ignored\n";
    let test = read_test_csv(text.as_bytes(), &base()).expect("import");
    let question = &test.parts[0].flat_questions().expect("flat")[0];
    assert_eq!(question.options.len(), 4);
    assert_eq!(question.options[0].text, "Hello");
    assert_eq!(question.correct_answer, AnswerLabel::A);
}

#[test]
fn missing_columns_are_rejected() {
    let err = read_test_csv(b"part,question_text\n1,Hi\n", &base()).expect_err("rejected");
    assert!(matches!(err, ImportError::MissingColumns(columns) if columns.len() == 2));
}

#[test]
fn empty_part_and_group_rows() {
    let bytes = sheet(&[
        &row(&[("part", "1")]),
        &row(&[("part", "2")]),
        &row(&[("part", "3"), ("group", "a")]),
    ]);
    let test = read_test_csv(&bytes, &base()).expect("import");
    assert_eq!(test.parts.len(), 3);
    assert_eq!(exam_model::total_questions(&test), 0);
    assert_eq!(test.parts[2].groups().expect("grouped").len(), 1);
}
