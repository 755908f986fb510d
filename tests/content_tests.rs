
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::{unique_token, TestApp};

async fn created_id(response: reqwest::Response) -> i64 {
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    body["data"]["id"].as_i64().expect("created resource has an id")
}

fn event_payload(slug: &str) -> Value {
    json!({
        "title": "Hội thảo Rust cho người mới",
        "slug": slug,
        "date": "2025-11-15",
        "time": "14:00",
        "location": "Hội trường C2",
        "description": "Giới thiệu ngôn ngữ Rust và hệ sinh thái crate.",
        "category": "workshop",
        "tags": ["rust", "backend"],
        "speakers": [{ "name": "Lê Minh", "role": "Kỹ sư phần mềm" }]
    })
}

#[actix_rt::test]
async fn reading_an_event_counts_one_view_per_request() {
    let Some(app) = TestApp::spawn().await else { return };
    let slug = format!("hoi-thao-rust-{}", unique_token());
    let id = created_id(app.post_json("/api/events", &event_payload(&slug)).await).await;

    for expected in 1..=2 {
        let response = app.get(&format!("/api/events/{}", id)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["views"], expected);
        assert_eq!(body["data"]["slug"], slug.as_str());
    }

    let response = app.post_json(&format!("/api/events/{}", id), &json!({})).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!({ "id": id, "views": 3 }));
}

#[actix_rt::test]
async fn event_slug_must_be_unique() {
    let Some(app) = TestApp::spawn().await else { return };
    let slug = format!("su-kien-{}", unique_token());

    let response = app.post_json("/api/events", &event_payload(&slug)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let again = app.post_json("/api/events", &event_payload(&slug)).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn events_support_search_update_and_delete() {
    let Some(app) = TestApp::spawn().await else { return };
    let token = unique_token();
    let mut payload = event_payload(&format!("tim-kiem-{}", token));
    payload["excerpt"] = json!(format!("Mã sự kiện {}", token));
    let id = created_id(app.post_json("/api/events", &payload).await).await;

    let listed: Value = app
        .get(&format!("/api/events?search={}", token))
        .await
        .json()
        .await
        .unwrap();
    let ids: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![id]);

    let updated = app
        .put_json(&format!("/api/events/{}", id), &json!({ "location": "Thư viện Tạ Quang Bửu" }))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let body: Value = updated.json().await.unwrap();
    assert_eq!(body["data"]["location"], "Thư viện Tạ Quang Bửu");
    assert_eq!(body["data"]["title"], payload["title"]);

    let deleted = app.delete(&format!("/api/events/{}", id)).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let missing = app.get(&format!("/api/events/{}", id)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn news_likes_accumulate() {
    let Some(app) = TestApp::spawn().await else { return };
    let slug = format!("ket-qua-hackathon-{}", unique_token());
    let id = created_id(
        app.post_json(
            "/api/news",
            &json!({
                "title": "Kết quả Hackathon 2025",
                "slug": slug,
                "date": "2025-10-01",
                "content": "<p>Đội Bách khoa giành giải nhất.</p><script>alert(1)</script>",
                "category": "thong-bao",
                "tags": ["hackathon", "giải thưởng"],
                "author": { "name": "Ban Truyền thông" }
            }),
        )
        .await,
    )
    .await;

    for expected in 1..=2 {
        let response = app.post_json(&format!("/api/news/{}/like", id), &json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"]["likes"], expected);
    }

    let body: Value = app.get(&format!("/api/news/{}", id)).await.json().await.unwrap();
    assert_eq!(body["data"]["likes"], 2);
    assert_eq!(body["data"]["tags"], json!(["hackathon", "giải thưởng"]));

    let content = body["data"]["content"].as_str().unwrap();
    assert!(content.contains("<p>Đội Bách khoa giành giải nhất.</p>"));
    assert!(!content.contains("script"));
}

#[actix_rt::test]
async fn media_keeps_type_specific_fields() {
    let Some(app) = TestApp::spawn().await else { return };
    let id = created_id(
        app.post_json(
            "/api/media",
            &json!({
                "type": "document",
                "title": "Tài liệu nhập môn Git",
                "url": "/uploads/git-intro.pdf",
                "category": "tai-lieu",
                "page_count": 24
            }),
        )
        .await,
    )
    .await;

    let response = app.post_json(&format!("/api/media/{}", id), &json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["downloads"], 1);

    let body: Value = app.get(&format!("/api/media/{}", id)).await.json().await.unwrap();
    assert_eq!(body["data"]["type"], "document");
    assert_eq!(body["data"]["page_count"], 24);
    assert_eq!(body["data"]["downloads"], 1);
    assert!(body["data"].get("duration").is_none());

    let updated = app
        .put_json(&format!("/api/media/{}", id), &json!({ "page_count": 30 }))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let body: Value = updated.json().await.unwrap();
    assert_eq!(body["data"]["page_count"], 30);
    assert_eq!(body["data"]["downloads"], 1);
}

#[actix_rt::test]
async fn videos_cannot_be_downloaded() {
    let Some(app) = TestApp::spawn().await else { return };
    let id = created_id(
        app.post_json(
            "/api/media",
            &json!({
                "type": "video",
                "title": "Recap Tech Day",
                "url": "https://www.youtube.com/watch?v=abc123",
                "category": "su-kien",
                "duration": "12:30",
                "platform": "youtube"
            }),
        )
        .await,
    )
    .await;

    let response = app.post_json(&format!("/api/media/{}", id), &json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let downloads: Option<i32> = sqlx::query_scalar("SELECT downloads FROM media WHERE id = $1")
        .bind(id as i32)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(downloads, None);
}

#[actix_rt::test]
async fn partner_lifecycle() {
    let Some(app) = TestApp::spawn().await else { return };
    let name = format!("Công ty Phần mềm {}", unique_token());
    let id = created_id(
        app.post_json(
            "/api/partners",
            &json!({
                "name": name,
                "type": "business",
                "website": "https://partner.example.com",
                "collaboration": ["Học bổng", "Thực tập"]
            }),
        )
        .await,
    )
    .await;

    let body: Value = app.get(&format!("/api/partners/{}", id)).await.json().await.unwrap();
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["collaboration"], json!(["Học bổng", "Thực tập"]));

    let updated = app
        .put_json(&format!("/api/partners/{}", id), &json!({ "status": "inactive" }))
        .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let listed: Value = app
        .get("/api/partners?status=inactive&type=business")
        .await
        .json()
        .await
        .unwrap();
    assert!(listed["data"].as_array().unwrap().iter().any(|p| p["id"] == id));

    assert_eq!(app.delete(&format!("/api/partners/{}", id)).await.status(), StatusCode::OK);
    assert_eq!(
        app.delete(&format!("/api/partners/{}", id)).await.status(),
        StatusCode::NOT_FOUND
    );
}
