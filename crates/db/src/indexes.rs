use mongodb::{Database, IndexModel, options::IndexOptions};
use tracing::info;

pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    // Users
    create_indexes(
        db,
        "users",
        vec![index_unique(bson::doc! { "email": 1 })],
    )
    .await?;

    // Plan configs
    create_indexes(
        db,
        "plan_configs",
        vec![index_unique(bson::doc! { "type": 1 })],
    )
    .await?;

    // Contacts
    create_indexes(
        db,
        "contacts",
        vec![
            index(bson::doc! { "user_id": 1 }),
            index(bson::doc! { "user_id": 1, "name": 1 }),
        ],
    )
    .await?;

    // Opportunities
    create_indexes(
        db,
        "opportunities",
        vec![
            index(bson::doc! { "user_id": 1 }),
            index(bson::doc! { "contact_id": 1 }),
            index(bson::doc! { "user_id": 1, "status": 1 }),
        ],
    )
    .await?;

    // Expenses
    create_indexes(
        db,
        "expenses",
        vec![index(bson::doc! { "user_id": 1, "date": -1 })],
    )
    .await?;

    // Activities
    create_indexes(
        db,
        "activities",
        vec![
            index(bson::doc! { "user_id": 1, "date": 1 }),
            index(bson::doc! { "opportunity_id": 1 }),
        ],
    )
    .await?;

    // Notifications
    create_indexes(
        db,
        "notifications",
        vec![
            index(bson::doc! { "user_id": 1, "timestamp": -1 }),
            index(bson::doc! { "timestamp": 1 }),
        ],
    )
    .await?;

    // User settings
    create_indexes(
        db,
        "user_settings",
        vec![index_unique(bson::doc! { "user_id": 1 })],
    )
    .await?;

    // Bot configs
    create_indexes(
        db,
        "bot_configs",
        vec![index_unique(bson::doc! { "user_id": 1 })],
    )
    .await?;

    info!("Database indexes ensured");
    Ok(())
}

fn index(keys: bson::Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

fn index_unique(keys: bson::Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

async fn create_indexes(
    db: &Database,
    collection: &str,
    indexes: Vec<IndexModel>,
) -> Result<(), mongodb::error::Error> {
    db.collection::<bson::Document>(collection)
        .create_indexes(indexes)
        .await?;
    Ok(())
}
