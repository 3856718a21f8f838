// src/grading.rs

use std::collections::{BTreeSet, HashMap};

use crate::config::WRONG_ANSWER_PENALTY;

/// Answer key for one question: the set of choice ids flagged correct.
#[derive(Debug, Clone)]
pub struct QuestionKey {
    pub question_id: i64,
    pub correct_choice_ids: Vec<i64>,
}

/// One row to persist into `user_answers`.
///
/// A question answered with N choices produces N rows, all carrying the
/// same `is_correct`/`points_earned`. An unanswered question produces a
/// single row with `choice_id = None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAnswer {
    pub question_id: i64,
    pub choice_id: Option<i64>,
    pub is_correct: bool,
    pub points_earned: i32,
}

/// Aggregate outcome of grading one attempt.
#[derive(Debug, Clone)]
pub struct GradedAttempt {
    pub score: i32,
    pub correct_answers: i32,
    pub incorrect_answers: i32,
    pub total_questions: i32,
    pub answers: Vec<GradedAnswer>,
}

/// Grades one submitted attempt against every question of the difficulty.
///
/// Each question is scored by exact-set comparison of the selected choice
/// ids against the answer key: a full match earns `points_per_question`,
/// any mismatch (subset, superset, disjoint, overlap) costs the flat
/// wrong-answer penalty, and no selection at all scores zero. Questions
/// absent from `submitted` are treated as unanswered, so the totals always
/// cover the whole difficulty, not just the questions the user was shown.
/// Selections for question ids outside `questions` are ignored.
///
/// The total score may go negative.
pub fn grade_attempt(
    questions: &[QuestionKey],
    submitted: &HashMap<i64, Vec<i64>>,
    points_per_question: i32,
) -> GradedAttempt {
    let mut score = 0;
    let mut correct_answers = 0;
    let mut answers = Vec::new();

    for question in questions {
        // Duplicate ids in the submission collapse into one selection.
        let selected: BTreeSet<i64> = submitted
            .get(&question.question_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();

        if selected.is_empty() {
            // Sentinel row: unanswered, zero points.
            answers.push(GradedAnswer {
                question_id: question.question_id,
                choice_id: None,
                is_correct: false,
                points_earned: 0,
            });
            continue;
        }

        let key: BTreeSet<i64> = question.correct_choice_ids.iter().copied().collect();

        // A question whose choices are all flagged incorrect has an empty
        // key, which no non-empty selection can ever match.
        let is_correct = selected == key;
        let points_earned = if is_correct {
            correct_answers += 1;
            points_per_question
        } else {
            WRONG_ANSWER_PENALTY
        };
        score += points_earned;

        for choice_id in selected {
            answers.push(GradedAnswer {
                question_id: question.question_id,
                choice_id: Some(choice_id),
                is_correct,
                points_earned,
            });
        }
    }

    let total_questions = questions.len() as i32;

    GradedAttempt {
        score,
        correct_answers,
        incorrect_answers: total_questions - correct_answers,
        total_questions,
        answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(question_id: i64, correct: &[i64]) -> QuestionKey {
        QuestionKey {
            question_id,
            correct_choice_ids: correct.to_vec(),
        }
    }

    #[test]
    fn exact_match_earns_full_points() {
        let questions = vec![key(1, &[10, 11])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![11, 10]); // order must not matter

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, 10);
        assert_eq!(graded.correct_answers, 1);
        assert_eq!(graded.incorrect_answers, 0);
        assert_eq!(graded.total_questions, 1);
        assert_eq!(graded.answers.len(), 2);
        for row in &graded.answers {
            assert!(row.is_correct);
            assert_eq!(row.points_earned, 10);
        }
    }

    #[test]
    fn partial_overlap_is_wrong() {
        // Key is {10, 11}; a proper subset earns no partial credit.
        let questions = vec![key(1, &[10, 11])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![10]);

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, -2);
        assert_eq!(graded.correct_answers, 0);
        assert_eq!(
            graded.answers,
            vec![GradedAnswer {
                question_id: 1,
                choice_id: Some(10),
                is_correct: false,
                points_earned: -2,
            }]
        );
    }

    #[test]
    fn superset_and_disjoint_are_wrong() {
        let questions = vec![key(1, &[10]), key(2, &[20])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![10, 11]); // correct plus an extra
        submitted.insert(2, vec![21]); // fully disjoint

        let graded = grade_attempt(&questions, &submitted, 5);

        assert_eq!(graded.score, -4);
        assert_eq!(graded.correct_answers, 0);
        assert_eq!(graded.incorrect_answers, 2);
        assert!(graded.answers.iter().all(|r| !r.is_correct));
        assert!(graded.answers.iter().all(|r| r.points_earned == -2));
    }

    #[test]
    fn unanswered_question_produces_single_sentinel_row() {
        let questions = vec![key(1, &[10]), key(2, &[20])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![10]);
        // No entry at all for question 2.

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, 10);
        assert_eq!(graded.correct_answers, 1);
        assert_eq!(graded.total_questions, 2);

        let sentinel: Vec<_> = graded
            .answers
            .iter()
            .filter(|r| r.question_id == 2)
            .collect();
        assert_eq!(sentinel.len(), 1);
        assert_eq!(sentinel[0].choice_id, None);
        assert!(!sentinel[0].is_correct);
        assert_eq!(sentinel[0].points_earned, 0);
    }

    #[test]
    fn empty_selection_list_counts_as_unanswered() {
        let questions = vec![key(1, &[10])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![]);

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, 0);
        assert_eq!(graded.answers.len(), 1);
        assert_eq!(graded.answers[0].choice_id, None);
    }

    #[test]
    fn duplicate_selected_ids_collapse() {
        let questions = vec![key(1, &[10])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![10, 10]);

        let graded = grade_attempt(&questions, &submitted, 7);

        assert_eq!(graded.score, 7);
        assert_eq!(graded.answers.len(), 1);
        assert!(graded.answers[0].is_correct);
    }

    #[test]
    fn total_score_may_go_negative() {
        let questions = vec![key(1, &[10]), key(2, &[20]), key(3, &[30])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![11]);
        submitted.insert(2, vec![21]);
        submitted.insert(3, vec![31]);

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, -6);
        assert_eq!(graded.correct_answers, 0);
        assert_eq!(graded.incorrect_answers, 3);
    }

    #[test]
    fn question_with_no_correct_choice_is_always_wrong_when_answered() {
        let questions = vec![key(1, &[])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![10]);

        let graded = grade_attempt(&questions, &submitted, 10);
        assert_eq!(graded.score, -2);
        assert!(!graded.answers[0].is_correct);

        // Unanswered it falls back to the sentinel path.
        let graded = grade_attempt(&questions, &HashMap::new(), 10);
        assert_eq!(graded.score, 0);
        assert_eq!(graded.answers[0].choice_id, None);
    }

    #[test]
    fn selections_for_unknown_questions_are_ignored() {
        let questions = vec![key(1, &[10])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![10]);
        submitted.insert(999, vec![1, 2, 3]);

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, 10);
        assert_eq!(graded.total_questions, 1);
        assert!(graded.answers.iter().all(|r| r.question_id == 1));
    }

    #[test]
    fn mixed_attempt_matches_expected_totals() {
        // Q1 key {A}, Q2 key {B, C}, 10 points per question.
        // Q1 answered correctly, Q2 answered with only B.
        let questions = vec![key(1, &[100]), key(2, &[200, 201])];
        let mut submitted = HashMap::new();
        submitted.insert(1, vec![100]);
        submitted.insert(2, vec![200]);

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.score, 8);
        assert_eq!(graded.correct_answers, 1);
        assert_eq!(graded.incorrect_answers, 1);
        assert_eq!(graded.total_questions, 2);
        assert_eq!(
            graded.answers,
            vec![
                GradedAnswer {
                    question_id: 1,
                    choice_id: Some(100),
                    is_correct: true,
                    points_earned: 10,
                },
                GradedAnswer {
                    question_id: 2,
                    choice_id: Some(200),
                    is_correct: false,
                    points_earned: -2,
                },
            ]
        );
    }

    #[test]
    fn counts_always_cover_the_whole_difficulty() {
        let questions = vec![key(1, &[10]), key(2, &[20]), key(3, &[30]), key(4, &[40])];
        let mut submitted = HashMap::new();
        submitted.insert(2, vec![20]);

        let graded = grade_attempt(&questions, &submitted, 10);

        assert_eq!(graded.total_questions, 4);
        assert_eq!(
            graded.correct_answers + graded.incorrect_answers,
            graded.total_questions
        );
        // Three sentinels plus the one answered row.
        assert_eq!(graded.answers.len(), 4);
    }
}
