use serde_json::Value;

use crate::fixtures::test_app::TestApp;

async fn save_bot_profile(app: &TestApp, token: &str) {
    let resp = app
        .auth_put("/api/bot", token)
        .json(&serde_json::json!({
            "whatsapp_number": "+55 11 97777-0000",
            "bot_name": "Luna",
            "business_description": "Padaria artesanal no centro",
            "products_and_prices": "Pão de fermentação natural: R$ 18",
            "operating_hours": "Ter a Dom, 7h às 13h",
            "communication_tone": "Amigável",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn bot_config_defaults_and_save() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Ana", "ana@bot.test", "Secret123!")
        .await;

    let config: Value = app
        .auth_get("/api/bot", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(config["bot_name"], "");
    assert_eq!(config["is_connected"], false);

    save_bot_profile(&app, &user.access_token).await;

    let config: Value = app
        .auth_get("/api/bot", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(config["bot_name"], "Luna");
    assert_eq!(config["business_description"], "Padaria artesanal no centro");
}

#[tokio::test]
async fn connect_requires_a_configured_bot_name() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Bia", "bia@bot.test", "Secret123!")
        .await;

    let resp = app
        .auth_post("/api/bot/connect", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn connect_requires_an_api_key() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Caio", "caio@bot.test", "Secret123!")
        .await;
    save_bot_profile(&app, &user.access_token).await;

    let resp = app
        .auth_post("/api/bot/connect", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn connect_and_disconnect_round_trip() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Davi", "davi@bot.test", "Secret123!")
        .await;
    save_bot_profile(&app, &user.access_token).await;

    // A stored per-user key satisfies the availability check.
    app.auth_put("/api/settings", &user.access_token)
        .json(&serde_json::json!({
            "notifications_enabled": false,
            "activity_alert_minutes": 15,
            "google_api_key": "AIza-test-key",
        }))
        .send()
        .await
        .unwrap();

    let resp = app
        .auth_post("/api/bot/connect", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let connected: Value = resp.json().await.unwrap();
    assert_eq!(connected["config"]["is_connected"], true);
    assert!(connected["config"]["last_connection"].is_i64());
    assert_eq!(
        connected["greeting"],
        "Olá! Eu sou o Luna. Bot conectado e pronto para atender."
    );

    let resp = app
        .auth_post("/api/bot/disconnect", &user.access_token)
        .send()
        .await
        .unwrap();
    let config: Value = resp.json().await.unwrap();
    assert_eq!(config["is_connected"], false);
    // The last connection timestamp survives a disconnect.
    assert!(config["last_connection"].is_i64());
}

#[tokio::test]
async fn bot_chat_requires_connection() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Elen", "elen@bot.test", "Secret123!")
        .await;
    app.set_plan(&user, "EXPERT").await;
    save_bot_profile(&app, &user.access_token).await;

    let resp = app
        .auth_post("/api/bot/chat", &user.access_token)
        .json(&serde_json::json!({ "message": "Olá" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}
