//! Quiz domain module.
//!
//! - `model`: wire types for questions, bulk save and reorder
//! - `form`: the editable question used by the quiz builder

mod form;
mod model;

pub use form::{BLANK_OPTION_COUNT, QuestionForm};
pub use model::{
    BulkQuizRequest, QuizQuestion, QuizQuestionCreateRequest, QuizQuestionDraft,
    QuizQuestionUpdate, QuizReorderRequest,
};
