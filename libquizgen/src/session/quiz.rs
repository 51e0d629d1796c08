//! Question-by-question quiz interaction

use crate::session::results::QuizResults;
use crate::session::Progress;
use crate::types::QuizQuestion;

/// How an option should be shown for the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    /// Nothing answered yet; the option can be picked
    Open,
    /// The correct option, revealed after answering
    Correct,
    /// The option the user picked, when it was wrong
    Incorrect,
    /// Any other option once the question is answered
    Locked,
}

/// Walks forward through a quiz, recording one answer per question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRunner {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<usize>>,
    current: usize,
}

impl QuizRunner {
    /// Start a quiz; `None` if there are no questions
    pub fn new(questions: Vec<QuizQuestion>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }

        let answers = vec![None; questions.len()];
        Some(Self {
            questions,
            answers,
            current: 0,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current]
    }

    /// Answer recorded for the current question
    pub fn selected(&self) -> Option<usize> {
        self.answers[self.current]
    }

    pub fn is_answered(&self) -> bool {
        self.selected().is_some()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// Record `option` for the current question
    ///
    /// Returns `false` when the question was already answered or `option`
    /// does not exist; the first answer is final.
    pub fn select(&mut self, option: usize) -> bool {
        if self.is_answered() || option >= self.current_question().options.len() {
            return false;
        }

        let correct = self.current_question().is_correct(option);
        tracing::debug!(question = self.current + 1, option, correct, "Answer recorded");
        self.answers[self.current] = Some(option);
        true
    }

    pub fn can_advance(&self) -> bool {
        self.is_answered() && !self.is_last()
    }

    pub fn can_finish(&self) -> bool {
        self.is_answered() && self.is_last()
    }

    /// Move to the next question if the current one is answered
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn option_state(&self, option: usize) -> OptionState {
        match self.selected() {
            None => OptionState::Open,
            Some(_) if self.current_question().is_correct(option) => OptionState::Correct,
            Some(selected) if selected == option => OptionState::Incorrect,
            Some(_) => OptionState::Locked,
        }
    }

    /// Explanation, once the current question is answered
    pub fn revealed_explanation(&self) -> Option<&str> {
        self.is_answered()
            .then(|| self.current_question().explanation.as_str())
    }

    /// Position of the current question; the percentage counts completed questions
    pub fn progress(&self) -> Progress {
        Progress::new(self.current + 1, self.total(), self.current)
    }

    /// Score the quiz; only possible once the last question is answered
    pub fn finish(&self) -> Option<QuizResults> {
        self.can_finish()
            .then(|| QuizResults::compile(&self.questions, &self.answers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(count: usize) -> QuizRunner {
        let questions = (0..count)
            .map(|i| QuizQuestion {
                question: format!("Q{}", i),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_answer: 1,
                explanation: "because".into(),
            })
            .collect();
        QuizRunner::new(questions).unwrap()
    }

    #[test]
    fn test_empty_quiz_is_rejected() {
        assert!(QuizRunner::new(Vec::new()).is_none());
    }

    #[test]
    fn test_first_answer_is_final() {
        let mut quiz = runner(2);
        assert!(quiz.select(3));
        assert!(!quiz.select(1));
        assert_eq!(quiz.selected(), Some(3));
    }

    #[test]
    fn test_out_of_range_option_is_ignored() {
        let mut quiz = runner(1);
        assert!(!quiz.select(4));
        assert!(!quiz.is_answered());
    }

    #[test]
    fn test_cannot_advance_before_answering() {
        let mut quiz = runner(2);
        assert!(!quiz.advance());
        assert_eq!(quiz.current_index(), 0);

        quiz.select(0);
        assert!(quiz.advance());
        assert_eq!(quiz.current_index(), 1);
    }

    #[test]
    fn test_option_states_after_wrong_answer() {
        let mut quiz = runner(1);
        assert_eq!(quiz.option_state(0), OptionState::Open);
        assert_eq!(quiz.revealed_explanation(), None);

        quiz.select(2);
        assert_eq!(quiz.option_state(1), OptionState::Correct);
        assert_eq!(quiz.option_state(2), OptionState::Incorrect);
        assert_eq!(quiz.option_state(0), OptionState::Locked);
        assert_eq!(quiz.revealed_explanation(), Some("because"));
    }

    #[test]
    fn test_finish_only_after_last_answer() {
        let mut quiz = runner(2);
        quiz.select(1);
        assert!(quiz.finish().is_none());
        quiz.advance();
        assert!(quiz.finish().is_none());
        assert!(!quiz.advance());

        quiz.select(0);
        let results = quiz.finish().unwrap();
        assert_eq!(results.score, 1);
        assert_eq!(results.total, 2);
    }

    #[test]
    fn test_progress_counts_completed_questions() {
        let mut quiz = runner(4);
        let progress = quiz.progress();
        assert_eq!((progress.position, progress.total, progress.percent), (1, 4, 0));

        quiz.select(0);
        quiz.advance();
        assert_eq!(quiz.progress().percent, 25);
    }
}
