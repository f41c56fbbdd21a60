use serde::{Deserialize, Serialize};

/// A multiple-choice question attached to one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    #[serde(default)]
    pub id: Option<u64>,
    pub video_id: u64,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_option_index: usize,
    #[serde(default)]
    pub sequence_order: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionCreateRequest {
    pub video_id: u64,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub sequence_order: u32,
}

/// Partial update; only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// One element of a bulk save.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDraft {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub sequence_order: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkQuizRequest {
    pub questions: Vec<QuizQuestionDraft>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizReorderRequest {
    pub question_ids: Vec<u64>,
}
