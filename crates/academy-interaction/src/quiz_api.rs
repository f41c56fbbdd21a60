//! Quiz question endpoints.

use crate::gateway::HttpGateway;
use academy_core::Result;
use academy_core::quiz::{
    BulkQuizRequest, QuizQuestion, QuizQuestionCreateRequest, QuizQuestionDraft,
    QuizQuestionUpdate, QuizReorderRequest,
};
use std::sync::Arc;

const QUIZ_PATH: &str = "/academy/admin/quiz";

fn video_quiz_path(video_id: u64) -> String {
    format!("/academy/admin/videos/{video_id}/quiz")
}

#[derive(Clone)]
pub struct QuizApi {
    gateway: Arc<HttpGateway>,
}

impl QuizApi {
    pub fn new(gateway: Arc<HttpGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list_for_video(&self, video_id: u64) -> Result<Vec<QuizQuestion>> {
        self.gateway.get_json(&video_quiz_path(video_id)).await
    }

    pub async fn create(&self, request: &QuizQuestionCreateRequest) -> Result<QuizQuestion> {
        self.gateway.post_json(QUIZ_PATH, request).await
    }

    pub async fn update(&self, id: u64, update: &QuizQuestionUpdate) -> Result<QuizQuestion> {
        self.gateway
            .put_json(&format!("{QUIZ_PATH}/{id}"), update)
            .await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.gateway.delete(&format!("{QUIZ_PATH}/{id}")).await
    }

    pub async fn reorder(&self, video_id: u64, question_ids: &[u64]) -> Result<()> {
        let body = QuizReorderRequest {
            question_ids: question_ids.to_vec(),
        };
        self.gateway
            .post_unit(&format!("{}/reorder", video_quiz_path(video_id)), Some(&body))
            .await
    }

    /// Replaces the video's questions; returns what the server stored.
    pub async fn bulk_save(
        &self,
        video_id: u64,
        questions: Vec<QuizQuestionDraft>,
    ) -> Result<Vec<QuizQuestion>> {
        let body = BulkQuizRequest { questions };
        self.gateway
            .post_json(&format!("{}/bulk", video_quiz_path(video_id)), &body)
            .await
    }
}
