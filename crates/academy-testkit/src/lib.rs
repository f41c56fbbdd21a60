//! In-process stand-in for the academy backend.
//!
//! [`FakeBackend::start`] binds an axum router to `127.0.0.1:0` and keeps all
//! data in memory, so integration tests exercise the real `reqwest` stack.
//! Every request is recorded with the headers the client sent.

use axum::body::Bytes;
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Phone number the fake OTP endpoint accepts.
pub const REGISTERED_PHONE: &str = "9876543210";
pub const REFERENCE_ID: &str = "ref-123";
/// Logs in as `ACADEMY_ADMIN`.
pub const ADMIN_OTP: &str = "123456";
/// Logs in as `RIDER`, which the console must refuse.
pub const RIDER_OTP: &str = "222222";
/// Rejected with an `exception` message.
pub const EXPIRED_OTP: &str = "000000";
/// Accepted, but the payload lacks a token.
pub const TOKENLESS_OTP: &str = "333333";
/// Answered with HTTP 401 instead of an envelope.
pub const UNAUTHORIZED_OTP: &str = "401401";
pub const ADMIN_TOKEN: &str = "tok-admin";
pub const RIDER_TOKEN: &str = "tok-rider";
/// Any request carrying this token gets a 401.
pub const EXPIRED_TOKEN: &str = "tok-expired";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub auth_token: Option<String>,
    pub source: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Default)]
pub struct BackendState {
    pub requests: Vec<RecordedRequest>,
    /// JSON bodies received, keyed by request path.
    pub bodies: Vec<(String, Value)>,
    pub videos: Vec<Value>,
    pub tracks: Vec<Value>,
    pub quiz: Vec<Value>,
    pub fail_logout: bool,
    pub overview_delay: Option<Duration>,
    next_id: u64,
}

impl BackendState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn video(&self, id: u64) -> Option<&Value> {
        self.videos.iter().find(|v| v["id"] == json!(id))
    }

    fn summaries(&self, ids: &[u64]) -> Vec<Value> {
        ids.iter()
            .enumerate()
            .filter_map(|(position, id)| {
                self.video(*id).map(|video| {
                    json!({
                        "id": id,
                        "title": video["title"],
                        "thumbnailUrl": video["thumbnailUrl"],
                        "durationSeconds": video["durationSeconds"],
                        "sequenceOrder": position + 1,
                    })
                })
            })
            .collect()
    }

    fn upsert_track(&mut self, delivery_type: &str, video_ids: Vec<u64>, is_active: bool) -> Value {
        let videos = self.summaries(&video_ids);
        let existing = self
            .tracks
            .iter()
            .position(|t| t["deliveryType"] == json!(delivery_type));
        let id = match existing {
            Some(index) => self.tracks[index]["id"].as_u64().unwrap_or_default(),
            None => self.next_id(),
        };
        let track = json!({
            "id": id,
            "deliveryType": delivery_type,
            "videoIds": video_ids,
            "videos": videos,
            "isActive": is_active,
            "createdAt": "2026-01-10T09:00:00",
            "updatedAt": "2026-01-11T09:00:00",
        });
        match existing {
            Some(index) => self.tracks[index] = track.clone(),
            None => self.tracks.push(track.clone()),
        }
        track
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        lock(&self.state)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state().requests.clone()
    }

    /// Requests whose path equals `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Last JSON body received on `path`.
    pub fn last_body(&self, path: &str) -> Option<Value> {
        self.state()
            .bodies
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, body)| body.clone())
    }

    /// Adds an active video tagged with `delivery_types`; returns its id.
    pub fn seed_video(&self, title: &str, delivery_types: &[&str]) -> u64 {
        let mut state = self.state();
        let id = state.next_id();
        let sequence = state.videos.len() + 1;
        state.videos.push(json!({
            "id": id,
            "title": title,
            "description": null,
            "durationSeconds": 60 + id,
            "videoUrl": format!("https://cdn.example/videos/{id}.mp4"),
            "thumbnailUrl": format!("https://cdn.example/thumbs/{id}.jpg"),
            "sequenceOrder": sequence,
            "isMandatory": true,
            "isActive": true,
            "deliveryTypes": delivery_types,
            "createdAt": "2026-01-05T10:30:00",
            "updatedAt": "2026-01-05T10:30:00",
        }));
        id
    }

    pub fn seed_track(&self, delivery_type: &str, video_ids: &[u64]) -> u64 {
        let track = self
            .state()
            .upsert_track(delivery_type, video_ids.to_vec(), true);
        track["id"].as_u64().unwrap_or_default()
    }

    pub fn seed_question(&self, video_id: u64, text: &str, options: &[&str], correct: usize) -> u64 {
        let mut state = self.state();
        let id = state.next_id();
        let sequence = state
            .quiz
            .iter()
            .filter(|q| q["videoId"] == json!(video_id))
            .count()
            + 1;
        state.quiz.push(json!({
            "id": id,
            "videoId": video_id,
            "questionText": text,
            "options": options,
            "correctOptionIndex": correct,
            "sequenceOrder": sequence,
            "isActive": true,
        }));
        id
    }

    pub fn set_fail_logout(&self, fail: bool) {
        self.state().fail_logout = fail;
    }

    pub fn set_overview_delay(&self, delay: Duration) {
        self.state().overview_delay = Some(delay);
    }
}

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn record_body(state: &Shared, path: &str, body: &Value) {
    lock(state).bodies.push((path.to_string(), body.clone()));
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": 404, "error": "Not Found", "message": format!("{what} not found") })),
    )
        .into_response()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/otp/generate", post(generate_otp))
        .route("/auth/login", post(login))
        .route("/auth/validate", get(validate))
        .route("/auth/logout", post(logout))
        .route("/academy/admin/videos", get(list_videos).post(create_video))
        .route("/academy/admin/videos/bulk-status", post(bulk_status))
        .route("/academy/admin/videos/upload", post(upload_video))
        .route("/academy/admin/videos/upload-thumbnail", post(upload_thumbnail))
        .route(
            "/academy/admin/videos/:id",
            get(get_video).put(update_video).delete(delete_video),
        )
        .route("/academy/admin/videos/:id/quiz", get(list_quiz))
        .route("/academy/admin/videos/:id/quiz/bulk", post(bulk_quiz))
        .route("/academy/admin/videos/:id/quiz/reorder", post(reorder_quiz))
        .route("/academy/admin/delivery-types", get(delivery_types))
        .route("/academy/admin/quiz", post(create_question))
        .route(
            "/academy/admin/quiz/:id",
            axum::routing::put(update_question).delete(delete_question),
        )
        .route("/academy/admin/tracks", get(list_tracks).post(save_track))
        .route("/academy/admin/tracks/copy", post(copy_track))
        .route("/academy/admin/tracks/:key", get(get_track).delete(delete_track))
        .route("/academy/admin/tracks/:key/available-videos", get(available_videos))
        .route("/academy/admin/analytics/overview", get(overview))
        .route("/academy/admin/analytics/riders", get(riders))
        .route("/academy/admin/analytics/videos", get(video_analytics))
        .route("/academy/admin/analytics/export/riders", get(export_riders))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

async fn record_request(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let headers = request.headers();
    let auth_token = header(headers, "authtoken");
    lock(&state).requests.push(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        auth_token: auth_token.clone(),
        source: header(headers, "source"),
        content_type: header(headers, "content-type"),
    });

    if auth_token.as_deref() == Some(EXPIRED_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Token expired" })),
        )
            .into_response();
    }
    next.run(request).await
}

async fn generate_otp(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record_body(&state, "/auth/otp/generate", &body);
    if body["number"] == json!(REGISTERED_PHONE) {
        Json(json!({
            "status": { "code": 200, "message": "OTP sent" },
            "response": { "referenceId": REFERENCE_ID, "message": "OTP sent" },
        }))
    } else {
        Json(json!({
            "status": { "code": 400, "message": "Number not registered" },
            "response": null,
        }))
    }
}

fn user_bo(role: &str) -> Value {
    json!({
        "id": 42,
        "name": "Asha Rao",
        "contactNumber": REGISTERED_PHONE,
        "role": role,
        "organizationId": 9,
        "organizationName": "Staffpay",
    })
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    record_body(&state, "/auth/login", &body);
    let otp = body["otp"].as_str().unwrap_or_default();
    if otp == UNAUTHORIZED_OTP {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid OTP" })),
        )
            .into_response();
    }
    let response = match otp {
        ADMIN_OTP => json!({ "valid": true, "token": ADMIN_TOKEN, "userBO": user_bo("ACADEMY_ADMIN") }),
        RIDER_OTP => json!({ "valid": true, "token": RIDER_TOKEN, "userBO": user_bo("RIDER") }),
        TOKENLESS_OTP => json!({ "valid": true, "userBO": user_bo("ACADEMY_ADMIN") }),
        EXPIRED_OTP => json!({ "valid": false, "exception": "OTP has expired" }),
        _ => json!({ "valid": false }),
    };
    Json(json!({ "status": { "code": 200 }, "response": response })).into_response()
}

async fn validate(headers: HeaderMap) -> Json<Value> {
    let code = match header(&headers, "authtoken").as_deref() {
        Some(ADMIN_TOKEN) => 200,
        _ => 403,
    };
    Json(json!({ "status": { "code": code } }))
}

async fn logout(State(state): State<Shared>) -> Response {
    if lock(&state).fail_logout {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Logout unavailable" })),
        )
            .into_response();
    }
    StatusCode::OK.into_response()
}

async fn list_videos(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let state = lock(&state);
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = query.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    let matching: Vec<Value> = state
        .videos
        .iter()
        .filter(|v| match query.get("isActive").map(String::as_str) {
            Some("true") => v["isActive"] == json!(true),
            Some("false") => v["isActive"] == json!(false),
            _ => true,
        })
        .filter(|v| match query.get("title") {
            Some(title) => v["title"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&title.to_lowercase()),
            None => true,
        })
        .filter(|v| match query.get("deliveryType") {
            Some(delivery_type) => v["deliveryTypes"]
                .as_array()
                .is_some_and(|types| types.contains(&json!(delivery_type))),
            None => true,
        })
        .cloned()
        .collect();
    let total = matching.len();
    let content: Vec<Value> = matching.into_iter().skip(page * size).take(size).collect();
    Json(json!({
        "content": content,
        "totalElements": total,
        "totalPages": total.div_ceil(size.max(1)),
        "number": page,
        "size": size,
    }))
}

async fn get_video(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    match lock(&state).video(id) {
        Some(video) => Json(video.clone()).into_response(),
        None => not_found("Video"),
    }
}

async fn create_video(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record_body(&state, "/academy/admin/videos", &body);
    let mut state = lock(&state);
    let mut video = body;
    video["id"] = json!(state.next_id());
    video["createdAt"] = json!("2026-02-01T08:00:00");
    video["updatedAt"] = json!("2026-02-01T08:00:00");
    state.videos.push(video.clone());
    Json(video)
}

async fn update_video(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("/academy/admin/videos/{id}");
    record_body(&state, &path, &body);
    let mut state = lock(&state);
    let Some(existing) = state.videos.iter_mut().find(|v| v["id"] == json!(id)) else {
        return not_found("Video");
    };
    let mut updated = body;
    updated["createdAt"] = existing["createdAt"].clone();
    updated["updatedAt"] = json!("2026-02-02T08:00:00");
    *existing = updated.clone();
    Json(updated).into_response()
}

async fn delete_video(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut state = lock(&state);
    match state.videos.iter_mut().find(|v| v["id"] == json!(id)) {
        Some(video) => {
            video["isActive"] = json!(false);
            StatusCode::OK.into_response()
        }
        None => not_found("Video"),
    }
}

async fn bulk_status(State(state): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    record_body(&state, "/academy/admin/videos/bulk-status", &body);
    let ids: Vec<Value> = body["ids"].as_array().cloned().unwrap_or_default();
    let mut state = lock(&state);
    for video in state.videos.iter_mut().filter(|v| ids.contains(&v["id"])) {
        video["isActive"] = body["isActive"].clone();
    }
    StatusCode::OK
}

fn is_file_upload(headers: &HeaderMap, body: &Bytes) -> bool {
    let multipart = header(headers, "content-type")
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));
    let text = String::from_utf8_lossy(body);
    multipart && text.contains("name=\"file\"") && text.contains("filename=")
}

async fn upload_video(headers: HeaderMap, body: Bytes) -> Response {
    if !is_file_upload(&headers, &body) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "file is required" })))
            .into_response();
    }
    Json(json!({
        "videoUrl": "https://cdn.example/videos/uploaded.mp4",
        "thumbnailUrl": "https://cdn.example/thumbs/auto.jpg",
        "durationSeconds": 95,
    }))
    .into_response()
}

async fn upload_thumbnail(headers: HeaderMap, body: Bytes) -> Response {
    if !is_file_upload(&headers, &body) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": "file is required" })))
            .into_response();
    }
    Json(json!({ "thumbnailUrl": "https://cdn.example/thumbs/custom.png" })).into_response()
}

async fn delivery_types() -> Json<Value> {
    Json(json!(["AMAZON", "BLUEDART", "DELHIVERY", "SWIGGY", "ZOMATO"]))
}

fn questions_for(state: &BackendState, video_id: u64) -> Vec<Value> {
    let mut questions: Vec<Value> = state
        .quiz
        .iter()
        .filter(|q| q["videoId"] == json!(video_id))
        .cloned()
        .collect();
    questions.sort_by_key(|q| q["sequenceOrder"].as_u64().unwrap_or_default());
    questions
}

async fn list_quiz(State(state): State<Shared>, Path(video_id): Path<u64>) -> Json<Value> {
    Json(json!(questions_for(&lock(&state), video_id)))
}

async fn bulk_quiz(
    State(state): State<Shared>,
    Path(video_id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    record_body(&state, &format!("/academy/admin/videos/{video_id}/quiz/bulk"), &body);
    let mut state = lock(&state);
    state.quiz.retain(|q| q["videoId"] != json!(video_id));
    for question in body["questions"].as_array().cloned().unwrap_or_default() {
        let mut stored = question;
        stored["id"] = json!(state.next_id());
        stored["videoId"] = json!(video_id);
        stored["isActive"] = json!(true);
        state.quiz.push(stored);
    }
    Json(json!(questions_for(&state, video_id)))
}

async fn reorder_quiz(
    State(state): State<Shared>,
    Path(video_id): Path<u64>,
    Json(body): Json<Value>,
) -> StatusCode {
    record_body(&state, &format!("/academy/admin/videos/{video_id}/quiz/reorder"), &body);
    let ids: Vec<Value> = body["questionIds"].as_array().cloned().unwrap_or_default();
    let mut state = lock(&state);
    for (position, id) in ids.iter().enumerate() {
        if let Some(question) = state.quiz.iter_mut().find(|q| &q["id"] == id) {
            question["sequenceOrder"] = json!(position + 1);
        }
    }
    StatusCode::OK
}

async fn create_question(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record_body(&state, "/academy/admin/quiz", &body);
    let mut state = lock(&state);
    let mut question = body;
    question["id"] = json!(state.next_id());
    question["isActive"] = json!(true);
    state.quiz.push(question.clone());
    Json(question)
}

async fn update_question(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    record_body(&state, &format!("/academy/admin/quiz/{id}"), &body);
    let mut state = lock(&state);
    let Some(question) = state.quiz.iter_mut().find(|q| q["id"] == json!(id)) else {
        return not_found("Question");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            question[key.as_str()] = value.clone();
        }
    }
    Json(question.clone()).into_response()
}

async fn delete_question(State(state): State<Shared>, Path(id): Path<u64>) -> StatusCode {
    lock(&state).quiz.retain(|q| q["id"] != json!(id));
    StatusCode::OK
}

async fn list_tracks(State(state): State<Shared>) -> Json<Value> {
    Json(json!(lock(&state).tracks))
}

async fn get_track(State(state): State<Shared>, Path(delivery_type): Path<String>) -> Response {
    let state = lock(&state);
    match state
        .tracks
        .iter()
        .find(|t| t["deliveryType"] == json!(delivery_type))
    {
        Some(track) => Json(track.clone()).into_response(),
        None => not_found("Track"),
    }
}

async fn available_videos(
    State(state): State<Shared>,
    Path(delivery_type): Path<String>,
) -> Json<Value> {
    let state = lock(&state);
    let ids: Vec<u64> = state
        .videos
        .iter()
        .filter(|v| v["isActive"] == json!(true))
        .filter(|v| {
            v["deliveryTypes"]
                .as_array()
                .is_some_and(|types| types.contains(&json!(delivery_type)))
        })
        .filter_map(|v| v["id"].as_u64())
        .collect();
    Json(json!(state.summaries(&ids)))
}

fn ids_of(value: &Value) -> Vec<u64> {
    value
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
        .unwrap_or_default()
}

async fn save_track(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    record_body(&state, "/academy/admin/tracks", &body);
    let delivery_type = body["deliveryType"].as_str().unwrap_or_default().to_string();
    let is_active = body["isActive"].as_bool().unwrap_or(true);
    Json(lock(&state).upsert_track(&delivery_type, ids_of(&body["videoIds"]), is_active))
}

async fn copy_track(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let source = query.get("sourceDeliveryType").cloned().unwrap_or_default();
    let target = query.get("targetDeliveryType").cloned().unwrap_or_default();
    let mut state = lock(&state);
    let Some(source_track) = state
        .tracks
        .iter()
        .find(|t| t["deliveryType"] == json!(source))
        .cloned()
    else {
        return not_found("Track");
    };
    Json(state.upsert_track(&target, ids_of(&source_track["videoIds"]), true)).into_response()
}

async fn delete_track(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let mut state = lock(&state);
    let id: u64 = id.parse().unwrap_or_default();
    match state.tracks.iter_mut().find(|t| t["id"] == json!(id)) {
        Some(track) => {
            track["isActive"] = json!(false);
            StatusCode::OK.into_response()
        }
        None => not_found("Track"),
    }
}

async fn overview(State(state): State<Shared>) -> Json<Value> {
    let delay = lock(&state).overview_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Json(json!({
        "totalRiders": 120,
        "completedTraining": 45,
        "inProgress": 50,
        "notStarted": 25,
        "completionRate": 37.5,
        "avgCompletionDays": 4.2,
        "avgQuizScore": 81.0,
        "totalVideosWatched": 900,
        "totalQuizzesPassed": 300,
    }))
}

async fn riders(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let page_size: u32 = query.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(20);
    Json(json!({
        "riders": [{
            "riderId": 501,
            "riderName": "Kiran",
            "contactNumber": "9000000001",
            "deliveryType": query.get("deliveryType").cloned().unwrap_or_else(|| "AMAZON".into()),
            "status": query.get("status").cloned().unwrap_or_else(|| "IN_PROGRESS".into()),
            "videosCompleted": 3,
            "totalVideos": 5,
            "avgQuizScore": 72.5,
            "startedAt": "2026-01-02T09:00:00",
            "completedAt": null,
        }],
        "totalCount": 1,
        "page": page,
        "pageSize": page_size,
        "totalPages": 1,
    }))
}

async fn video_analytics() -> Json<Value> {
    Json(json!([{
        "videoId": 1,
        "title": "Safety basics",
        "durationSeconds": 125,
        "totalViews": 300,
        "completions": 240,
        "avgWatchTimeSeconds": 110.0,
        "avgWatchPercentage": 88.0,
        "quizAttempts": 230,
        "quizPasses": 200,
        "quizPassRate": 86.9,
        "avgQuizScore": 79.0,
    }]))
}

async fn export_riders() -> Response {
    (
        [("content-type", "text/csv")],
        "riderId,riderName,status\n501,Kiran,IN_PROGRESS\n",
    )
        .into_response()
}
