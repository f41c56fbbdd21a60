use academy_core::analytics::{AnalyticsFilters, RiderStatus};
use academy_core::auth::{LoginRequest, PhoneNumber, UserProfile};
use academy_core::delivery::DeliveryType;
use academy_core::quiz::QuizQuestionDraft;
use academy_core::session::{MemorySessionStorage, SessionStore};
use academy_core::track::MandatoryTrackUpdateRequest;
use academy_core::video::{VideoForm, VideoQuery};
use academy_interaction::{
    AnalyticsApi, AuthApi, GatewayConfig, HttpGateway, QuizApi, TracksApi, UploadFile, VideosApi,
};
use academy_testkit::{ADMIN_OTP, ADMIN_TOKEN, FakeBackend, REFERENCE_ID, REGISTERED_PHONE};
use std::sync::Arc;

async fn signed_in() -> (FakeBackend, Arc<HttpGateway>) {
    let backend = FakeBackend::start().await;
    let session = Arc::new(SessionStore::new(Arc::new(MemorySessionStorage::new())));
    session
        .establish(
            ADMIN_TOKEN,
            UserProfile {
                id: 42,
                name: "Asha Rao".into(),
                contact_number: REGISTERED_PHONE.into(),
                role: "ACADEMY_ADMIN".into(),
                organization_id: 9,
                organization_name: None,
            },
        )
        .unwrap();
    let gateway =
        Arc::new(HttpGateway::new(GatewayConfig::new(backend.base_url.clone()), session).unwrap());
    (backend, gateway)
}

#[tokio::test]
async fn test_auth_envelopes() {
    let (backend, gateway) = signed_in().await;
    let auth = AuthApi::new(gateway);

    let otp = auth
        .send_otp(&PhoneNumber::parse(REGISTERED_PHONE).unwrap())
        .await
        .unwrap();
    assert!(otp.status.is_ok());
    assert_eq!(otp.response.unwrap().reference_id, REFERENCE_ID);

    let login = auth
        .login(&LoginRequest::new(REGISTERED_PHONE, ADMIN_OTP, REFERENCE_ID))
        .await
        .unwrap();
    let payload = login.response.unwrap();
    assert!(payload.valid);
    assert_eq!(payload.token.as_deref(), Some(ADMIN_TOKEN));

    let body = backend.last_body("/auth/login").unwrap();
    assert_eq!(body["loginFrom"], "ACADEMY_ADMIN");
    assert_eq!(body["referenceId"], REFERENCE_ID);

    assert!(auth.validate().await.unwrap().status.unwrap().is_ok());
    auth.logout().await.unwrap();
    assert_eq!(backend.requests_to("/auth/logout").len(), 1);
}

#[tokio::test]
async fn test_soft_delete_keeps_video_retrievable() {
    let (backend, gateway) = signed_in().await;
    let videos = VideosApi::new(gateway);
    let id = backend.seed_video("Helmet safety", &["AMAZON", "SWIGGY"]);
    backend.seed_video("Cash handling", &["ZOMATO"]);

    videos.delete(id).await.unwrap();

    let active = videos
        .list(&VideoQuery {
            is_active: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(active.content.iter().all(|v| v.id != id));
    assert_eq!(active.total_elements, 1);

    let deleted = videos.get(id).await.unwrap();
    assert!(!deleted.is_active);
    assert_eq!(deleted.title, "Helmet safety");
}

#[tokio::test]
async fn test_video_list_query_string() {
    let (backend, gateway) = signed_in().await;
    VideosApi::new(gateway)
        .list(&VideoQuery {
            page: Some(2),
            size: Some(10),
            title: Some("helmet".into()),
            delivery_type: Some(DeliveryType::Bluedart),
            is_active: Some(false),
        })
        .await
        .unwrap();

    let query = backend.requests_to("/academy/admin/videos")[0].query.clone().unwrap();
    assert_eq!(
        query,
        "page=2&size=10&title=helmet&deliveryType=BLUEDART&isActive=false"
    );
}

#[tokio::test]
async fn test_create_update_and_bulk_status() {
    let (backend, gateway) = signed_in().await;
    let videos = VideosApi::new(gateway);

    let mut form = VideoForm {
        title: "  Route planning ".into(),
        video_url: "https://cdn.example/videos/route.mp4".into(),
        ..Default::default()
    };
    form.toggle_delivery_type(DeliveryType::Delhivery);
    let created = videos.create(&form.to_request().unwrap()).await.unwrap();
    assert_eq!(created.title, "Route planning");

    let body = backend.last_body("/academy/admin/videos").unwrap();
    assert!(body.get("description").is_none());
    assert_eq!(body["deliveryTypes"][0], "DELHIVERY");

    form.title = "Route planning 2".into();
    let updated = videos
        .update(created.id, form.to_request().unwrap())
        .await
        .unwrap();
    assert_eq!(updated.title, "Route planning 2");
    let put_body = backend
        .last_body(&format!("/academy/admin/videos/{}", created.id))
        .unwrap();
    assert_eq!(put_body["id"], created.id);

    videos.bulk_update_status(&[created.id], false).await.unwrap();
    assert!(!videos.get(created.id).await.unwrap().is_active);
}

#[tokio::test]
async fn test_uploads_are_multipart() {
    let (backend, gateway) = signed_in().await;
    let videos = VideosApi::new(gateway);

    let uploaded = videos
        .upload_video(UploadFile::new("intro.mp4", vec![0, 0, 0, 24]))
        .await
        .unwrap();
    assert_eq!(uploaded.duration_seconds, Some(95));

    let thumb = videos
        .upload_thumbnail(UploadFile::new("cover.png", vec![137, 80, 78, 71]))
        .await
        .unwrap();
    assert!(thumb.thumbnail_url.ends_with("custom.png"));

    let request = &backend.requests_to("/academy/admin/videos/upload")[0];
    assert!(
        request
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
}

#[tokio::test]
async fn test_quiz_bulk_save_and_reorder() {
    let (backend, gateway) = signed_in().await;
    let quiz = QuizApi::new(gateway);
    let video_id = backend.seed_video("Safety basics", &["AMAZON"]);

    let saved = quiz
        .bulk_save(
            video_id,
            vec![
                QuizQuestionDraft {
                    question_text: "Wear a helmet?".into(),
                    options: vec!["Always".into(), "Never".into()],
                    correct_option_index: 0,
                    sequence_order: 1,
                },
                QuizQuestionDraft {
                    question_text: "Signal before turning?".into(),
                    options: vec!["No".into(), "Yes".into()],
                    correct_option_index: 1,
                    sequence_order: 2,
                },
            ],
        )
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|q| q.id.is_some() && q.video_id == video_id));

    let reversed: Vec<u64> = saved.iter().rev().filter_map(|q| q.id).collect();
    quiz.reorder(video_id, &reversed).await.unwrap();
    let body = backend
        .last_body(&format!("/academy/admin/videos/{video_id}/quiz/reorder"))
        .unwrap();
    assert_eq!(body["questionIds"][0], reversed[0]);

    let listed = quiz.list_for_video(video_id).await.unwrap();
    assert_eq!(listed[0].question_text, "Signal before turning?");

    quiz.delete(reversed[0]).await.unwrap();
    assert_eq!(quiz.list_for_video(video_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_track_is_none() {
    let (_backend, gateway) = signed_in().await;
    let tracks = TracksApi::new(gateway);
    assert!(
        tracks
            .by_delivery_type(DeliveryType::Swiggy)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_track_copy_replaces_target_list() {
    let (backend, gateway) = signed_in().await;
    let tracks = TracksApi::new(gateway);
    let a = backend.seed_video("A", &["AMAZON", "ZOMATO"]);
    let b = backend.seed_video("B", &["AMAZON", "ZOMATO"]);
    let c = backend.seed_video("C", &["ZOMATO"]);
    backend.seed_track("AMAZON", &[b, a]);
    backend.seed_track("ZOMATO", &[c]);

    let copied = tracks
        .copy(DeliveryType::Amazon, DeliveryType::Zomato)
        .await
        .unwrap();
    assert_eq!(copied.video_ids, vec![b, a]);

    let zomato = tracks
        .by_delivery_type(DeliveryType::Zomato)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zomato.video_ids, vec![b, a]);
    assert!(!zomato.video_ids.contains(&c));

    let copy_request = &backend.requests_to("/academy/admin/tracks/copy")[0];
    assert_eq!(
        copy_request.query.as_deref(),
        Some("sourceDeliveryType=AMAZON&targetDeliveryType=ZOMATO")
    );
}

#[tokio::test]
async fn test_track_save_and_available_videos() {
    let (backend, gateway) = signed_in().await;
    let tracks = TracksApi::new(gateway);
    let a = backend.seed_video("A", &["BLUEDART"]);
    backend.seed_video("Other", &["SWIGGY"]);

    let available = tracks.available_videos(DeliveryType::Bluedart).await.unwrap();
    assert_eq!(available.len(), 1);

    let saved = tracks
        .save(&MandatoryTrackUpdateRequest {
            delivery_type: DeliveryType::Bluedart,
            video_ids: vec![a],
            is_active: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(saved.videos[0].id, a);
    assert_eq!(tracks.list().await.unwrap().len(), 1);

    tracks.delete(saved.id).await.unwrap();
    let track = tracks
        .by_delivery_type(DeliveryType::Bluedart)
        .await
        .unwrap()
        .unwrap();
    assert!(!track.is_active);
}

#[tokio::test]
async fn test_analytics_queries() {
    let (backend, gateway) = signed_in().await;
    let analytics = AnalyticsApi::new(gateway);

    assert_eq!(analytics.overview().await.unwrap().total_riders, 120);
    assert_eq!(analytics.videos().await.unwrap()[0].completions, 240);

    let page = analytics
        .riders(&AnalyticsFilters::default(), None, None)
        .await
        .unwrap();
    assert_eq!(page.page_size, 20);
    let request = &backend.requests_to("/academy/admin/analytics/riders")[0];
    assert_eq!(request.query.as_deref(), Some("page=0&pageSize=20"));

    let filters = AnalyticsFilters {
        status: Some(RiderStatus::Completed),
        ..Default::default()
    };
    let csv = analytics.export_riders_csv(&filters).await.unwrap();
    assert!(String::from_utf8(csv).unwrap().starts_with("riderId,"));
    let export = &backend.requests_to("/academy/admin/analytics/export/riders")[0];
    assert_eq!(export.query.as_deref(), Some("status=COMPLETED"));
}
