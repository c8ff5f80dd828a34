//! Correct-answer reference checks.

use exam_model::Test;

use crate::issue::Issue;

/// Check that each question's correct answer is one of its option labels.
pub fn check(test: &Test) -> Vec<Issue> {
    let mut issues = Vec::new();

    for part in &test.parts {
        for question in part.questions() {
            if !question.has_option(question.correct_answer) {
                issues.push(Issue::InvalidCorrectAnswer {
                    part: part.ordinal.get(),
                    question_number: question.question_number,
                    answer: question.correct_answer,
                    labels: question.option_labels().collect(),
                });
            }
        }
    }

    issues
}
