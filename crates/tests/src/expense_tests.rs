use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn expenses_are_gated_by_plan_feature() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Ana", "ana@fin.test", "Secret123!")
        .await;

    // Basic tier has no finance feature.
    let resp = app
        .auth_get("/api/expense", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    app.set_plan(&user, "ADVANCED").await;
    let resp = app
        .auth_get("/api/expense", &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn admin_bypasses_expense_gate() {
    let app = TestApp::spawn().await;
    let admin = app
        .register_user("Root", "root@fin.test", "Secret123!")
        .await;
    let admin = app.make_admin(&admin, "Secret123!").await;

    // Admins stay on Basic but are never feature-gated.
    let resp = app
        .auth_get("/api/expense", &admin.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn expense_crud_round_trip() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Bia", "bia@fin.test", "Secret123!")
        .await;
    app.set_plan(&user, "EXPERT").await;

    let resp = app
        .auth_post("/api/expense", &user.access_token)
        .json(&serde_json::json!({
            "description": "Almoço com cliente",
            "amount": 85.50,
            "category": "Alimentação",
            "type": "EXPENSE",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["amount"], 85.5);

    // Replace in place.
    let resp = app
        .auth_post("/api/expense", &user.access_token)
        .json(&serde_json::json!({
            "id": id,
            "description": "Almoço com cliente",
            "amount": 92.00,
            "category": "Alimentação",
            "type": "EXPENSE",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let list: Vec<Value> = app
        .auth_get("/api/expense", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["amount"], 92.0);

    let resp = app
        .auth_delete(&format!("/api/expense/{}", id), &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Caio", "caio@fin.test", "Secret123!")
        .await;
    app.set_plan(&user, "EXPERT").await;

    let resp = app
        .auth_post("/api/expense", &user.access_token)
        .json(&serde_json::json!({
            "description": "Inválido",
            "amount": -5.0,
            "type": "EXPENSE",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}
