//! Local, editable quiz question and its pre-save checks.

use super::model::{QuizQuestion, QuizQuestionDraft};
use crate::error::{AcademyError, Result};
use crate::ordering::Sequenced;

/// Options a freshly added question starts with.
pub const BLANK_OPTION_COUNT: usize = 4;

/// A question as held by the quiz builder.
///
/// `correct_option_index` always points into `options` as displayed, blanks
/// included; it is remapped only when the draft is built for saving.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionForm {
    pub id: Option<u64>,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub sequence_order: u32,
    pub is_editing: bool,
    /// Content differs from the server's copy.
    pub is_draft: bool,
    /// Position differs from the server's copy.
    pub is_moved: bool,
}

impl QuestionForm {
    /// A new, empty question at `sequence_order`.
    pub fn blank(sequence_order: u32) -> Self {
        Self {
            id: None,
            question_text: String::new(),
            options: vec![String::new(); BLANK_OPTION_COUNT],
            correct_option_index: 0,
            sequence_order,
            is_editing: true,
            is_draft: true,
            is_moved: false,
        }
    }

    /// Options that contain something other than whitespace.
    pub fn filled_options(&self) -> impl Iterator<Item = &String> {
        self.options.iter().filter(|option| !option.trim().is_empty())
    }

    /// Checks one question; `number` is its 1-based position for messages.
    pub fn validate(&self, number: usize) -> Result<()> {
        if self.question_text.trim().is_empty() {
            return Err(AcademyError::validation(format!(
                "Question {number}: Question text is required"
            )));
        }
        if self.filled_options().count() < 2 {
            return Err(AcademyError::validation(format!(
                "Question {number}: At least 2 options are required"
            )));
        }
        let correct_is_filled = self
            .options
            .get(self.correct_option_index)
            .is_some_and(|option| !option.trim().is_empty());
        if !correct_is_filled {
            return Err(AcademyError::validation(format!(
                "Question {number}: Correct answer must be selected from filled options"
            )));
        }
        Ok(())
    }

    /// Builds the save payload: trimmed text, blank options dropped, and the
    /// correct index moved to its position among the kept options.
    pub fn to_draft(&self, number: usize) -> Result<QuizQuestionDraft> {
        self.validate(number)?;
        let correct_option_index = self.options[..self.correct_option_index]
            .iter()
            .filter(|option| !option.trim().is_empty())
            .count();
        Ok(QuizQuestionDraft {
            question_text: self.question_text.trim().to_string(),
            options: self.filled_options().cloned().collect(),
            correct_option_index,
            sequence_order: self.sequence_order,
        })
    }
}

impl From<&QuizQuestion> for QuestionForm {
    fn from(question: &QuizQuestion) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text.clone(),
            options: question.options.clone(),
            correct_option_index: question.correct_option_index,
            sequence_order: question.sequence_order,
            is_editing: false,
            is_draft: false,
            is_moved: false,
        }
    }
}

impl Sequenced for QuestionForm {
    fn set_sequence_order(&mut self, order: u32) {
        if self.sequence_order != order {
            self.sequence_order = order;
            self.is_moved = true;
        }
    }
}
