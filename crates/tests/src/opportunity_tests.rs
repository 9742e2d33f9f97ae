use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn won_transition_records_income_exactly_once() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Ana", "ana@opps.test", "Secret123!")
        .await;
    // Expert unlocks the finance page so we can observe the ledger.
    app.set_plan(&user, "EXPERT").await;

    let contact = app.create_contact(&user.access_token, "Cliente Z").await;
    let contact_id = contact["id"].as_str().unwrap();
    let opp = app
        .create_opportunity(&user.access_token, contact_id, "Plano Anual", 1200.0, "open")
        .await;
    let opp_id = opp["id"].as_str().unwrap();

    // open -> won synthesizes one income entry.
    let resp = app
        .auth_post("/api/opportunity", &user.access_token)
        .json(&serde_json::json!({
            "id": opp_id,
            "contact_id": contact_id,
            "product": "Plano Anual",
            "value": 1200.0,
            "status": "won",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let expenses: Vec<Value> = app
        .auth_get("/api/expense", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["type"], "INCOME");
    assert_eq!(expenses[0]["category"], "Vendas");
    assert_eq!(expenses[0]["amount"], 1200.0);
    assert_eq!(expenses[0]["description"], "Venda: Plano Anual - Cliente Z");

    // Re-saving an already-won opportunity must not duplicate the income.
    let resp = app
        .auth_post("/api/opportunity", &user.access_token)
        .json(&serde_json::json!({
            "id": opp_id,
            "contact_id": contact_id,
            "product": "Plano Anual",
            "value": 1200.0,
            "status": "won",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let expenses: Vec<Value> = app
        .auth_get("/api/expense", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(expenses.len(), 1);
}

#[tokio::test]
async fn status_change_creates_notification() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Bia", "bia@opps.test", "Secret123!")
        .await;

    let contact = app.create_contact(&user.access_token, "Cliente W").await;
    let contact_id = contact["id"].as_str().unwrap();
    let opp = app
        .create_opportunity(&user.access_token, contact_id, "Licença", 300.0, "open")
        .await;
    let opp_id = opp["id"].as_str().unwrap();

    // Creation alone is not a status change.
    let notifications: Vec<Value> = app
        .auth_get("/api/notification", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(notifications.is_empty());

    app.auth_post("/api/opportunity", &user.access_token)
        .json(&serde_json::json!({
            "id": opp_id,
            "contact_id": contact_id,
            "product": "Licença",
            "value": 300.0,
            "status": "negotiation",
        }))
        .send()
        .await
        .unwrap();

    let notifications: Vec<Value> = app
        .auth_get("/api/notification", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"], "OPPORTUNITY");
    assert_eq!(notifications[0]["title"], "Oportunidade atualizada");
    assert_eq!(
        notifications[0]["message"],
        "\"Licença\" mudou para Em Negociação"
    );
}

#[tokio::test]
async fn negative_value_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Caio", "caio@opps.test", "Secret123!")
        .await;
    let contact = app.create_contact(&user.access_token, "Cliente V").await;

    let resp = app
        .auth_post("/api/opportunity", &user.access_token)
        .json(&serde_json::json!({
            "contact_id": contact["id"].as_str().unwrap(),
            "product": "Produto",
            "value": -10.0,
            "status": "open",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn contact_name_snapshot_survives_rename() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Davi", "davi@opps.test", "Secret123!")
        .await;

    let contact = app.create_contact(&user.access_token, "Nome Original").await;
    let contact_id = contact["id"].as_str().unwrap();
    let opp = app
        .create_opportunity(&user.access_token, contact_id, "Serviço", 100.0, "open")
        .await;
    assert_eq!(opp["contact_name"], "Nome Original");

    // Rename the contact; the opportunity keeps its snapshot.
    app.auth_post("/api/contact", &user.access_token)
        .json(&serde_json::json!({ "id": contact_id, "name": "Nome Novo" }))
        .send()
        .await
        .unwrap();

    let opp_id = opp["id"].as_str().unwrap();
    let resp = app
        .auth_post("/api/opportunity", &user.access_token)
        .json(&serde_json::json!({
            "id": opp_id,
            "contact_id": contact_id,
            "product": "Serviço",
            "value": 100.0,
            "status": "open",
        }))
        .send()
        .await
        .unwrap();
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["contact_name"], "Nome Original");
}

#[tokio::test]
async fn deleting_opportunity_unlinks_activities() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Elen", "elen@opps.test", "Secret123!")
        .await;

    let contact = app.create_contact(&user.access_token, "Cliente U").await;
    let contact_id = contact["id"].as_str().unwrap();
    let opp = app
        .create_opportunity(&user.access_token, contact_id, "Projeto", 500.0, "open")
        .await;
    let opp_id = opp["id"].as_str().unwrap();

    let resp = app
        .auth_post("/api/activity", &user.access_token)
        .json(&serde_json::json!({
            "opportunity_id": opp_id,
            "title": "Reunião de kickoff",
            "date": bson::DateTime::now().timestamp_millis() + 3_600_000,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    app.auth_delete(&format!("/api/opportunity/{}", opp_id), &user.access_token)
        .send()
        .await
        .unwrap();

    // The activity survives, now unlinked.
    let activities: Vec<Value> = app
        .auth_get("/api/activity", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(activities.len(), 1);
    assert!(activities[0]["opportunity_id"].is_null());
}

#[tokio::test]
async fn opportunity_limit_blocks_creation() {
    let app = TestApp::spawn().await;
    let admin = app
        .register_user("Root", "root@opps.test", "Secret123!")
        .await;
    let admin = app.make_admin(&admin, "Secret123!").await;
    let user = app
        .register_user("Fani", "fani@opps.test", "Secret123!")
        .await;

    app.auth_put("/api/plan", &admin.access_token)
        .json(&serde_json::json!({
            "type": "BASIC",
            "name": "Básico",
            "price": 29.90,
            "max_contacts": 50,
            "max_opportunities": 1,
            "features": { "expenses": false, "ai_assistant": false, "voice_commands": false },
        }))
        .send()
        .await
        .unwrap();

    let contact = app.create_contact(&user.access_token, "Cliente T").await;
    let contact_id = contact["id"].as_str().unwrap();
    app.create_opportunity(&user.access_token, contact_id, "Primeira", 10.0, "open")
        .await;

    let resp = app
        .auth_post("/api/opportunity", &user.access_token)
        .json(&serde_json::json!({
            "contact_id": contact_id,
            "product": "Segunda",
            "value": 20.0,
            "status": "open",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}
