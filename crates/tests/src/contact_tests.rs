use serde_json::Value;

use crate::fixtures::test_app::TestApp;

#[tokio::test]
async fn contact_crud_round_trip() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Ana", "ana@contacts.test", "Secret123!")
        .await;

    let created = app.create_contact(&user.access_token, "Marcos Lima").await;
    let contact_id = created["id"].as_str().unwrap();
    assert_eq!(created["name"], "Marcos Lima");
    assert_eq!(created["company"], "Acme");

    // Saving with the same id replaces the record in place.
    let resp = app
        .auth_post("/api/contact", &user.access_token)
        .json(&serde_json::json!({
            "id": contact_id,
            "name": "Marcos Lima",
            "company": "Acme Ltda",
            "email": "marcos@acme.test",
            "phone": "+55 11 98888-0000",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"], contact_id);
    assert_eq!(updated["company"], "Acme Ltda");

    let list: Vec<Value> = app
        .auth_get("/api/contact", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);

    let resp = app
        .auth_delete(&format!("/api/contact/{}", contact_id), &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let list: Vec<Value> = app
        .auth_get("/api/contact", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.is_empty());
}

#[tokio::test]
async fn contact_name_is_required() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Bia", "bia@contacts.test", "Secret123!")
        .await;

    let resp = app
        .auth_post("/api/contact", &user.access_token)
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn contacts_are_scoped_per_user() {
    let app = TestApp::spawn().await;
    let owner = app
        .register_user("Caio", "caio@contacts.test", "Secret123!")
        .await;
    let other = app
        .register_user("Dani", "dani@contacts.test", "Secret123!")
        .await;

    let created = app.create_contact(&owner.access_token, "Cliente X").await;
    let contact_id = created["id"].as_str().unwrap();

    // Someone else's contact is indistinguishable from a missing one.
    let resp = app
        .auth_get(&format!("/api/contact/{}", contact_id), &other.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = app
        .auth_delete(&format!("/api/contact/{}", contact_id), &other.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn contact_limit_blocks_creation_but_not_admins() {
    let app = TestApp::spawn().await;
    let admin = app
        .register_user("Root", "root@contacts.test", "Secret123!")
        .await;
    let admin = app.make_admin(&admin, "Secret123!").await;
    let user = app
        .register_user("Eva", "eva@contacts.test", "Secret123!")
        .await;

    // Tighten the entry tier to a single contact.
    let resp = app
        .auth_put("/api/plan", &admin.access_token)
        .json(&serde_json::json!({
            "type": "BASIC",
            "name": "Básico",
            "price": 29.90,
            "max_contacts": 1,
            "max_opportunities": 10,
            "features": { "expenses": false, "ai_assistant": false, "voice_commands": false },
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    app.create_contact(&user.access_token, "Primeiro").await;

    let resp = app
        .auth_post("/api/contact", &user.access_token)
        .json(&serde_json::json!({ "name": "Segundo" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 403);

    // Updating an existing contact is not a creation and still works.
    let list: Vec<Value> = app
        .auth_get("/api/contact", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = list[0]["id"].as_str().unwrap();
    let resp = app
        .auth_post("/api/contact", &user.access_token)
        .json(&serde_json::json!({ "id": id, "name": "Primeiro Editado" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    // Admins are never blocked by plan caps.
    app.create_contact(&admin.access_token, "Admin Um").await;
    app.create_contact(&admin.access_token, "Admin Dois").await;
}

#[tokio::test]
async fn deleting_contact_removes_its_opportunities() {
    let app = TestApp::spawn().await;
    let user = app
        .register_user("Gil", "gil@contacts.test", "Secret123!")
        .await;

    let contact = app.create_contact(&user.access_token, "Cliente Y").await;
    let contact_id = contact["id"].as_str().unwrap();
    app.create_opportunity(&user.access_token, contact_id, "Consultoria", 1500.0, "open")
        .await;

    let resp = app
        .auth_delete(&format!("/api/contact/{}", contact_id), &user.access_token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let opportunities: Vec<Value> = app
        .auth_get("/api/opportunity", &user.access_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(opportunities.is_empty());
}
