use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn defaults_are_served_before_first_save() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Ana", "ana@cfg.test", "Secret123!")
        .await;

    let settings: Value = app
        .auth_get("/api/settings", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["notifications_enabled"], false);
    assert_eq!(settings["activity_alert_minutes"], 15);
    assert_eq!(settings["has_google_api_key"], false);
}

#[tokio::test]
async fn save_round_trip_and_key_handling() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Bia", "bia@cfg.test", "Secret123!")
        .await;

    let resp = app
        .auth_put("/api/settings", &user.access_token)
        .json(&serde_json::json!({
            "notifications_enabled": true,
            "activity_alert_minutes": 30,
            "google_api_key": "AIza-test-key",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let saved: Value = resp.json().await.unwrap();
    assert_eq!(saved["activity_alert_minutes"], 30);
    assert_eq!(saved["has_google_api_key"], true);

    // Omitting the key keeps the stored one.
    let resp = app
        .auth_put("/api/settings", &user.access_token)
        .json(&serde_json::json!({
            "notifications_enabled": true,
            "activity_alert_minutes": 20,
        }))
        .send()
        .await
        .unwrap();
    let saved: Value = resp.json().await.unwrap();
    assert_eq!(saved["has_google_api_key"], true);

    // An empty string clears it.
    let resp = app
        .auth_put("/api/settings", &user.access_token)
        .json(&serde_json::json!({
            "notifications_enabled": false,
            "activity_alert_minutes": 20,
            "google_api_key": "",
        }))
        .send()
        .await
        .unwrap();
    let saved: Value = resp.json().await.unwrap();
    assert_eq!(saved["has_google_api_key"], false);
}

#[tokio::test]
async fn non_positive_alert_window_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Caio", "caio@cfg.test", "Secret123!")
        .await;

    for minutes in [0, -5] {
        let resp = app
            .auth_put("/api/settings", &user.access_token)
            .json(&serde_json::json!({
                "notifications_enabled": true,
                "activity_alert_minutes": minutes,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 422);
    }
}
