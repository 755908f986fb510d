
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::{unique_token, TestApp};

fn join_payload(email: &str, student_id: &str) -> Value {
    json!({
        "ho_ten": "Nguyễn Văn An",
        "ma_sinh_vien": student_id,
        "email": email,
        "so_dien_thoai": "0912 345 678",
        "truong": "Đại học Bách khoa Hà Nội",
        "khoa": "Công nghệ Thông tin",
        "nam_hoc": 2,
        "linh_vuc_quan_tam": ["Web", "AI"],
        "ban": "Ban Kỹ thuật",
        "ly_do": "Muốn tham gia các dự án thực tế"
    })
}

#[actix_rt::test]
async fn join_stores_normalized_member() {
    let Some(app) = TestApp::spawn().await else { return };
    let token = unique_token();
    let email = format!("An.{}@Example.com", token);
    let student_id = format!("sv{}", token);

    let response = app.post_json("/api/join", &join_payload(&email, &student_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], email.to_lowercase());
    assert_eq!(body["data"]["ma_sinh_vien"], student_id.to_uppercase());
    assert_eq!(body["data"]["linh_vuc_quan_tam"], json!(["Web", "AI"]));
    assert!(body["message"].is_string());

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE email = $1")
        .bind(email.to_lowercase())
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(stored, 1);
}

#[actix_rt::test]
async fn join_with_taken_email_reports_duplicate_email() {
    let Some(app) = TestApp::spawn().await else { return };
    let token = unique_token();
    let email = format!("dup.{}@example.com", token);

    let first = app.post_json("/api/join", &join_payload(&email, &format!("A{}", token))).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same address in a different case still collides.
    let second = app
        .post_json("/api/join", &join_payload(&email.to_uppercase(), &format!("B{}", token)))
        .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await.unwrap();
    assert_eq!(body["errorType"], "duplicate_email");
    assert_eq!(body["details"][0]["field"], "email");
}

#[actix_rt::test]
async fn join_with_taken_student_id_reports_duplicate_student_id() {
    let Some(app) = TestApp::spawn().await else { return };
    let token = unique_token();
    let student_id = format!("SV{}", token);

    let first = app
        .post_json("/api/join", &join_payload(&format!("one.{}@example.com", token), &student_id))
        .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .post_json(
            "/api/join",
            &join_payload(&format!("two.{}@example.com", token), &student_id.to_lowercase()),
        )
        .await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let body: Value = second.json().await.unwrap();
    assert_eq!(body["errorType"], "duplicate_ma_sinh_vien");
}

#[actix_rt::test]
async fn members_can_be_filtered_by_division() {
    let Some(app) = TestApp::spawn().await else { return };
    let token = unique_token();
    let mut payload = join_payload(&format!("media.{}@example.com", token), &format!("M{}", token));
    payload["ban"] = json!(format!("Ban Truyền thông {}", token));

    let created = app.post_json("/api/members", &payload).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = app
        .get(&format!("/api/members?ban={}", urlencoding::encode(payload["ban"].as_str().unwrap())))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let members = body["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["ban"], payload["ban"]);
}

#[actix_rt::test]
async fn contact_message_is_stored() {
    let Some(app) = TestApp::spawn().await else { return };
    let token = unique_token();
    let email = format!("hoi.{}@example.com", token);

    let response = app
        .post_json(
            "/api/contact",
            &json!({
                "name": "Trần Thị Bình",
                "email": email,
                "subject": "Lịch sinh hoạt",
                "message": "Cho mình hỏi lịch sinh hoạt tuần này của CLB"
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let id = body["data"]["id"].as_i64().unwrap();

    let stored: (String, Option<String>) =
        sqlx::query_as("SELECT email, phone FROM contact_messages WHERE id = $1")
            .bind(id as i32)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(stored.0, email);
    assert_eq!(stored.1, None);
}
