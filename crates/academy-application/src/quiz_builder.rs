//! Quiz builder for one video.
//!
//! Questions are edited locally as [`QuestionForm`]s and pushed in one bulk
//! save. Only deleting a question that already exists on the server makes an
//! immediate request.

use crate::view_scope::{ScopeHandle, ViewScope};
use academy_core::ordering::{MoveDirection, move_and_resequence, resequence};
use academy_core::quiz::QuestionForm;
use academy_core::video::Video;
use academy_core::{AcademyError, Result};
use academy_interaction::{QuizApi, VideosApi};

pub struct QuizBuilder {
    quiz_api: QuizApi,
    videos_api: VideosApi,
    scope: ViewScope,
    video_id: u64,
    pub video: Option<Video>,
    pub questions: Vec<QuestionForm>,
}

impl QuizBuilder {
    pub fn new(quiz_api: QuizApi, videos_api: VideosApi, video_id: u64) -> Self {
        Self {
            quiz_api,
            videos_api,
            scope: ViewScope::new(),
            video_id,
            video: None,
            questions: Vec::new(),
        }
    }

    pub fn video_id(&self) -> u64 {
        self.video_id
    }

    pub fn scope_handle(&self) -> ScopeHandle {
        self.scope.handle()
    }

    /// Loads the video and its questions together.
    pub async fn load(&mut self) -> Result<()> {
        let (video, questions) = self
            .scope
            .run(async {
                tokio::try_join!(
                    self.videos_api.get(self.video_id),
                    self.quiz_api.list_for_video(self.video_id)
                )
            })
            .await?;
        self.video = Some(video);
        self.questions = questions.iter().map(QuestionForm::from).collect();
        Ok(())
    }

    /// Appends an empty question; returns its index.
    pub fn add_question(&mut self) -> usize {
        let sequence = self.questions.len() as u32 + 1;
        self.questions.push(QuestionForm::blank(sequence));
        self.questions.len() - 1
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut QuestionForm> {
        let question = self
            .questions
            .get_mut(index)
            .ok_or_else(|| AcademyError::not_found("QuizQuestion", (index + 1).to_string()))?;
        question.is_draft = true;
        Ok(question)
    }

    pub fn set_question_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        self.question_mut(index)?.question_text = text.into();
        Ok(())
    }

    pub fn set_option(&mut self, index: usize, option: usize, text: impl Into<String>) -> Result<()> {
        let question = self.question_mut(index)?;
        let slot = question.options.get_mut(option).ok_or_else(|| {
            AcademyError::validation(format!("Question {}: no option {}", index + 1, option + 1))
        })?;
        *slot = text.into();
        Ok(())
    }

    pub fn set_correct_option(&mut self, index: usize, option: usize) -> Result<()> {
        self.question_mut(index)?.correct_option_index = option;
        Ok(())
    }

    pub fn toggle_editing(&mut self, index: usize) -> Result<()> {
        let question = self
            .questions
            .get_mut(index)
            .ok_or_else(|| AcademyError::not_found("QuizQuestion", (index + 1).to_string()))?;
        question.is_editing = !question.is_editing;
        Ok(())
    }

    /// Swaps a question with its neighbour and renumbers the list.
    pub fn move_question(&mut self, index: usize, direction: MoveDirection) -> bool {
        move_and_resequence(&mut self.questions, index, direction)
    }

    /// Removes a question, deleting it on the server first when it has an id.
    pub async fn delete_question(&mut self, index: usize) -> Result<()> {
        let id = self
            .questions
            .get(index)
            .ok_or_else(|| AcademyError::not_found("QuizQuestion", (index + 1).to_string()))?
            .id;
        if let Some(id) = id {
            self.scope.run(self.quiz_api.delete(id)).await?;
            tracing::info!(question_id = id, "Deleted quiz question");
        }
        self.questions.remove(index);
        resequence(&mut self.questions);
        Ok(())
    }

    pub fn has_drafts(&self) -> bool {
        self.questions.iter().any(|q| q.is_draft || q.is_moved)
    }

    /// First validation failure, numbered by display position.
    pub fn validate(&self) -> Result<()> {
        self.questions
            .iter()
            .enumerate()
            .try_for_each(|(i, question)| question.validate(i + 1))
    }

    /// Validates everything, bulk-saves, and replaces the local list with
    /// the server's copy.
    pub async fn save(&mut self) -> Result<()> {
        let drafts = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| question.to_draft(i + 1))
            .collect::<Result<Vec<_>>>()?;
        let count = drafts.len();
        let saved = self
            .scope
            .run(self.quiz_api.bulk_save(self.video_id, drafts))
            .await?;
        self.questions = saved.iter().map(QuestionForm::from).collect();
        tracing::info!(video_id = self.video_id, count, "Saved quiz");
        Ok(())
    }

    /// Pushes only the current order. Every question must already exist on
    /// the server. Content edits stay pending.
    pub async fn save_order(&mut self) -> Result<()> {
        let ids = self
            .questions
            .iter()
            .map(|q| q.id)
            .collect::<Option<Vec<u64>>>()
            .ok_or_else(|| AcademyError::validation("Save new questions before reordering"))?;
        self.scope
            .run(self.quiz_api.reorder(self.video_id, &ids))
            .await?;
        for question in &mut self.questions {
            question.is_moved = false;
        }
        tracing::info!(video_id = self.video_id, "Saved quiz order");
        Ok(())
    }
}
