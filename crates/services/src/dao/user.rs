use bson::{doc, oid::ObjectId, DateTime};
use mongodb::Database;
use fluxo_db::models::{
    Activity, AppNotification, BotConfig, Contact, Expense, Opportunity, PlanType, User,
    UserRole, UserSettings,
};
use tracing::info;

use super::base::{BaseDao, DaoError, DaoResult};

pub struct UserDao {
    pub base: BaseDao<User>,
    contacts: BaseDao<Contact>,
    opportunities: BaseDao<Opportunity>,
    expenses: BaseDao<Expense>,
    activities: BaseDao<Activity>,
    notifications: BaseDao<AppNotification>,
    settings: BaseDao<UserSettings>,
    bots: BaseDao<BotConfig>,
}

impl UserDao {
    pub fn new(db: &Database) -> Self {
        Self {
            base: BaseDao::new(db, User::COLLECTION),
            contacts: BaseDao::new(db, Contact::COLLECTION),
            opportunities: BaseDao::new(db, Opportunity::COLLECTION),
            expenses: BaseDao::new(db, Expense::COLLECTION),
            activities: BaseDao::new(db, Activity::COLLECTION),
            notifications: BaseDao::new(db, AppNotification::COLLECTION),
            settings: BaseDao::new(db, UserSettings::COLLECTION),
            bots: BaseDao::new(db, BotConfig::COLLECTION),
        }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        role: UserRole,
        plan: PlanType,
    ) -> DaoResult<User> {
        let now = DateTime::now();
        let user = User {
            id: None,
            name,
            email,
            password_hash: Some(password_hash),
            role,
            plan,
            is_active: true,
            avatar: None,
            created_at: now,
            updated_at: now,
        };

        let id = self.base.insert_one(&user).await?;
        self.base.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> DaoResult<User> {
        self.base
            .find_one(doc! { "email": email })
            .await?
            .ok_or(DaoError::NotFound)
    }

    pub async fn list(&self) -> DaoResult<Vec<User>> {
        self.base.find_many(doc! {}, Some(doc! { "name": 1 })).await
    }

    pub async fn save(&self, mut user: User) -> DaoResult<User> {
        user.updated_at = DateTime::now();
        match user.id {
            Some(id) => {
                self.base.save(id, &user).await?;
                Ok(user)
            }
            None => {
                let id = self.base.insert_one(&user).await?;
                self.base.find_by_id(id).await
            }
        }
    }

    /// Removes the user and every record owned by it. Any failure mid-way
    /// propagates so the caller never silently ends up with orphans.
    pub async fn delete_cascade(&self, user_id: ObjectId) -> DaoResult<()> {
        if !self.base.delete_by_id(user_id).await? {
            return Err(DaoError::NotFound);
        }

        let owned = doc! { "user_id": user_id };
        let contacts = self.contacts.hard_delete(owned.clone()).await?;
        let opportunities = self.opportunities.hard_delete(owned.clone()).await?;
        let expenses = self.expenses.hard_delete(owned.clone()).await?;
        let activities = self.activities.hard_delete(owned.clone()).await?;
        let notifications = self.notifications.hard_delete(owned.clone()).await?;
        self.settings.hard_delete(owned.clone()).await?;
        self.bots.hard_delete(owned).await?;

        info!(
            %user_id,
            contacts, opportunities, expenses, activities, notifications,
            "Cascade-deleted user data"
        );
        Ok(())
    }
}
