use bson::{doc, oid::ObjectId};
use serde_json::Value;

use super::test_app::TestApp;

pub struct SeededUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Register a user and return their auth info.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> SeededUser {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Register request failed");

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        assert_eq!(status, 201, "Register failed: {}", body);

        let json: Value = serde_json::from_str(&body).expect("Failed to parse register response");
        SeededUser {
            id: json["user"]["id"].as_str().unwrap().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            access_token: json["access_token"].as_str().unwrap().to_string(),
            refresh_token: json["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    /// Login a user and return their auth info.
    pub async fn login_user(&self, email: &str, password: &str) -> SeededUser {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Login request failed");

        assert!(
            resp.status().is_success(),
            "Login failed: {}",
            resp.text().await.unwrap_or_default()
        );

        let json: Value = resp.json().await.expect("Failed to parse login response");
        SeededUser {
            id: json["user"]["id"].as_str().unwrap().to_string(),
            email: email.to_string(),
            name: json["user"]["name"].as_str().unwrap().to_string(),
            access_token: json["access_token"].as_str().unwrap().to_string(),
            refresh_token: json["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    /// Create an authenticated request with the given token.
    pub fn auth_get(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_post(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_put(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    pub fn auth_delete(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {}", token))
    }

    /// Promote a registered user to admin (direct DB write) and re-login
    /// so the fresh token carries the admin role.
    pub async fn make_admin(&self, user: &SeededUser, password: &str) -> SeededUser {
        let id = ObjectId::parse_str(&user.id).unwrap();
        self.db
            .collection::<bson::Document>("users")
            .update_one(doc! { "_id": id }, doc! { "$set": { "role": "ADMIN" } })
            .await
            .expect("Failed to promote user");
        self.login_user(&user.email, password).await
    }

    /// Move a user to a different plan tier (direct DB write).
    pub async fn set_plan(&self, user: &SeededUser, plan: &str) {
        let id = ObjectId::parse_str(&user.id).unwrap();
        self.db
            .collection::<bson::Document>("users")
            .update_one(doc! { "_id": id }, doc! { "$set": { "plan": plan } })
            .await
            .expect("Failed to change plan");
    }

    /// Create a contact over the API and return the response JSON.
    pub async fn create_contact(&self, token: &str, name: &str) -> Value {
        let resp = self
            .auth_post("/api/contact", token)
            .json(&serde_json::json!({
                "name": name,
                "company": "Acme",
                "email": format!("{}@acme.test", name.to_lowercase().replace(' ', ".")),
                "phone": "+55 11 99999-0000",
            }))
            .send()
            .await
            .expect("Create contact failed");
        assert!(
            resp.status().is_success(),
            "Create contact failed: {}",
            resp.text().await.unwrap_or_default()
        );
        resp.json().await.expect("Failed to parse contact response")
    }

    /// Create an opportunity over the API and return the response JSON.
    pub async fn create_opportunity(
        &self,
        token: &str,
        contact_id: &str,
        product: &str,
        value: f64,
        status: &str,
    ) -> Value {
        let resp = self
            .auth_post("/api/opportunity", token)
            .json(&serde_json::json!({
                "contact_id": contact_id,
                "product": product,
                "value": value,
                "status": status,
            }))
            .send()
            .await
            .expect("Create opportunity failed");
        assert!(
            resp.status().is_success(),
            "Create opportunity failed: {}",
            resp.text().await.unwrap_or_default()
        );
        resp.json()
            .await
            .expect("Failed to parse opportunity response")
    }
}
