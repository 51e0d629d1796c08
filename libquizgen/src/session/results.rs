//! Quiz scoring

use serde::Serialize;

use crate::types::{option_label, QuizQuestion};

pub const NOT_ANSWERED: &str = "Not answered";

/// How one question went
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    /// 1-based position in the quiz
    pub number: usize,
    pub question: String,
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub correct_text: String,
    pub is_correct: bool,
    /// Present only for questions answered incorrectly or not at all
    pub explanation: Option<String>,
    selected_text: Option<String>,
}

impl QuestionOutcome {
    fn new(number: usize, question: &QuizQuestion, selected: Option<usize>) -> Self {
        let is_correct = selected.is_some_and(|answer| question.is_correct(answer));

        Self {
            number,
            question: question.question.clone(),
            selected,
            correct_answer: question.correct_answer,
            correct_text: question.correct_option().to_string(),
            is_correct,
            explanation: (!is_correct).then(|| question.explanation.clone()),
            selected_text: selected.and_then(|i| question.option(i)).map(str::to_string),
        }
    }

    /// `"B. Paris"`, or "Not answered"
    pub fn your_answer(&self) -> String {
        match (self.selected, &self.selected_text) {
            (Some(index), Some(text)) => format!("{}. {}", option_label(index), text),
            _ => NOT_ANSWERED.to_string(),
        }
    }

    /// `"C. Rome"`
    pub fn correct_answer_label(&self) -> String {
        format!("{}. {}", option_label(self.correct_answer), self.correct_text)
    }

    /// Explanation worth displaying, if any
    pub fn shown_explanation(&self) -> Option<&str> {
        self.explanation.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Score and per-question breakdown of a finished quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResults {
    pub score: usize,
    pub total: usize,
    pub outcomes: Vec<QuestionOutcome>,
}

impl QuizResults {
    /// Score `answers` against `questions`
    ///
    /// Answers are matched by position; missing entries count as not answered.
    pub fn compile(questions: &[QuizQuestion], answers: &[Option<usize>]) -> Self {
        let outcomes: Vec<QuestionOutcome> = questions
            .iter()
            .enumerate()
            .map(|(i, question)| {
                QuestionOutcome::new(i + 1, question, answers.get(i).copied().flatten())
            })
            .collect();

        let score = outcomes.iter().filter(|o| o.is_correct).count();

        Self {
            score,
            total: questions.len(),
            outcomes,
        }
    }

    /// Percentage rounded to one decimal place
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let raw = self.score as f64 / self.total as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }

    /// Percentage with exactly one decimal, e.g. `"66.7"`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}", self.percentage())
    }

    pub fn incorrect(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("Pick {}", correct),
            options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
            correct_answer: correct,
            explanation: format!("It was {}", correct),
        }
    }

    #[test]
    fn test_two_of_three() {
        let questions = vec![question(0), question(1), question(2)];
        let results = QuizResults::compile(&questions, &[Some(0), Some(0), Some(2)]);

        assert_eq!(results.score, 2);
        assert_eq!(results.total, 3);
        assert_eq!(results.percentage_label(), "66.7");
    }

    #[test]
    fn test_explanation_only_for_incorrect() {
        let questions = vec![question(0), question(1)];
        let results = QuizResults::compile(&questions, &[Some(0), Some(3)]);

        assert_eq!(results.outcomes[0].explanation, None);
        assert_eq!(results.outcomes[1].explanation.as_deref(), Some("It was 1"));
        assert_eq!(results.outcomes[1].your_answer(), "D. z");
        assert_eq!(results.outcomes[1].correct_answer_label(), "B. x");
        assert_eq!(results.incorrect().count(), 1);
    }

    #[test]
    fn test_unanswered_question() {
        let questions = vec![question(2)];
        let results = QuizResults::compile(&questions, &[None]);

        let outcome = &results.outcomes[0];
        assert!(!outcome.is_correct);
        assert_eq!(outcome.your_answer(), "Not answered");
        assert!(outcome.explanation.is_some());
    }

    #[test]
    fn test_short_answer_list_counts_as_unanswered() {
        let questions = vec![question(0), question(0)];
        let results = QuizResults::compile(&questions, &[Some(0)]);
        assert_eq!(results.score, 1);
        assert_eq!(results.outcomes[1].selected, None);
    }

    #[test]
    fn test_percentage_formatting() {
        let questions: Vec<_> = (0..8).map(|_| question(0)).collect();
        let mut answers = vec![Some(0); 8];
        assert_eq!(QuizResults::compile(&questions, &answers).percentage_label(), "100.0");

        answers[0] = Some(1);
        // 7 / 8 = 87.5
        assert_eq!(QuizResults::compile(&questions, &answers).percentage_label(), "87.5");

        assert_eq!(QuizResults::compile(&[], &[]).percentage_label(), "0.0");
    }
}
