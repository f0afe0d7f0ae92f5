use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuning
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("youtube_clone_db");

        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the data model relies on. The unique ones are
    /// load-bearing: duplicate email/handle/owner inserts must fail at the
    /// storage layer so the 409 path is race-free.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        let unique = || IndexOptions::builder().unique(true).build();

        // users(email) - unique, drives the duplicate-registration 409
        let users = self.db.collection::<mongodb::bson::Document>("users");
        users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;
        log::info!("   ✅ Index created: users(email) unique");

        // channels(handle) - unique, global handle namespace
        // channels(owner) - unique, at most one channel per user
        let channels = self.db.collection::<mongodb::bson::Document>("channels");
        channels
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "handle": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;
        channels
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "owner": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;
        log::info!("   ✅ Index created: channels(handle), channels(owner) unique");

        // videos(channelId) - for channel page queries
        let videos = self.db.collection::<mongodb::bson::Document>("videos");
        videos
            .create_index(IndexModel::builder().keys(doc! { "channelId": 1 }).build())
            .await?;
        log::info!("   ✅ Index created: videos(channelId)");

        // interactions(userId, videoId) - unique, one state doc per pair
        let interactions = self.db.collection::<mongodb::bson::Document>("interactions");
        interactions
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "userId": 1, "videoId": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;
        log::info!("   ✅ Index created: interactions(userId, videoId) unique");

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_connection_and_indexes() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/youtube_clone_test".to_string());

        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
    }
}
