use bson::oid::ObjectId;
use serde_json::Value;

use crate::fixtures::test_app::TestApp;
use fluxo_services::assistant::ToolRouter;

#[tokio::test]
async fn assistant_chat_is_gated_by_plan_feature() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Ana", "ana@ai.test", "Secret123!")
        .await;

    let resp = app
        .auth_post("/api/assistant/chat", &user.access_token)
        .json(&serde_json::json!({ "message": "Olá" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);
}

#[tokio::test]
async fn missing_api_key_is_reported_before_any_upstream_call() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Bia", "bia@ai.test", "Secret123!")
        .await;
    app.set_plan(&user, "EXPERT").await;

    let resp = app
        .auth_post("/api/assistant/chat", &user.access_token)
        .json(&serde_json::json!({ "message": "Quanto gastei este mês?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Chave de API não configurada")
    );
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Caio", "caio@ai.test", "Secret123!")
        .await;
    app.set_plan(&user, "EXPERT").await;

    let resp = app
        .auth_post("/api/assistant/chat", &user.access_token)
        .json(&serde_json::json!({ "message": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn tool_router_records_expense_and_income() {
    let app = TestApp::spawn().await;
    let router = ToolRouter::new(&app.db);
    let user_id = ObjectId::new();

    let reply = router
        .execute(
            user_id,
            "create_expense",
            &serde_json::json!({ "description": "Almoço", "amount": "50" }),
        )
        .await;
    assert_eq!(
        reply.message,
        "✅ Despesa registrada: \"Almoço\" no valor de R$ 50."
    );

    let reply = router
        .execute(
            user_id,
            "create_income",
            &serde_json::json!({ "description": "Venda avulsa", "amount": 120.5 }),
        )
        .await;
    assert_eq!(
        reply.message,
        "💰 Receita registrada: \"Venda avulsa\" no valor de R$ 120.5."
    );

    let expenses = fluxo_services::dao::ExpenseDao::new(&app.db)
        .list(user_id)
        .await
        .unwrap();
    assert_eq!(expenses.len(), 2);
    // Category defaults differ by direction.
    assert!(expenses.iter().any(|e| e.category == "Geral"));
    assert!(expenses.iter().any(|e| e.category == "Vendas"));
}

#[tokio::test]
async fn tool_router_creates_lead_with_open_opportunity() {
    let app = TestApp::spawn().await;
    let router = ToolRouter::new(&app.db);
    let user_id = ObjectId::new();

    let reply = router
        .execute(
            user_id,
            "create_lead",
            &serde_json::json!({
                "name": "Mariana",
                "phone": "+55 11 96666-0000",
                "interest": "Bolo de casamento",
            }),
        )
        .await;
    assert!(reply.message.contains("Lead criado"));

    let contacts = fluxo_services::dao::ContactDao::new(&app.db)
        .list(user_id)
        .await
        .unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Mariana");

    let opportunities = fluxo_services::dao::OpportunityDao::new(&app.db)
        .list(user_id)
        .await
        .unwrap();
    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].product, "Bolo de casamento");
    assert_eq!(opportunities[0].value, 0.0);
    assert_eq!(opportunities[0].contact_id, contacts[0].id.unwrap());
}

#[tokio::test]
async fn tool_router_navigation_and_unknown_tools() {
    let app = TestApp::spawn().await;
    let router = ToolRouter::new(&app.db);
    let user_id = ObjectId::new();

    let reply = router
        .execute(user_id, "navigate", &serde_json::json!({ "page": "Expenses" }))
        .await;
    assert_eq!(reply.navigate_to.as_deref(), Some("expenses"));

    let reply = router
        .execute(user_id, "navigate", &serde_json::json!({ "page": "nowhere" }))
        .await;
    assert!(reply.navigate_to.is_none());
    assert!(reply.message.contains("não encontrada"));

    let reply = router
        .execute(user_id, "drop_database", &serde_json::json!({}))
        .await;
    assert_eq!(reply.message, "Ferramenta desconhecida.");
    assert!(reply.navigate_to.is_none());
}
