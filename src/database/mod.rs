use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::time::Duration;

pub const USERS: &str = "users";
pub const CONTESTS: &str = "contests";
pub const REGISTRATIONS: &str = "registrations";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(Duration::from_secs(300));

        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let mongodb = Self::from_client(client, db_name);

        // Test connection
        mongodb.db.list_collection_names().await?;

        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Wraps an existing client without contacting the server.
    pub fn from_client(client: Client, db_name: &str) -> Self {
        Self {
            db: client.database(db_name),
        }
    }

    /// Creates the lookup indexes the handlers filter on. Failures are not fatal.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes: [(&str, Document); 6] = [
            (USERS, doc! { "email": 1 }),
            (CONTESTS, doc! { "status": 1 }),
            (CONTESTS, doc! { "contestType": 1 }),
            (CONTESTS, doc! { "attendance": -1 }),
            (REGISTRATIONS, doc! { "creatorEmail": 1 }),
            (REGISTRATIONS, doc! { "email": 1 }),
        ];

        for (collection_name, keys) in indexes {
            let collection = self.collection::<Document>(collection_name);
            let label = format!("{}({})", collection_name, keys.keys().cloned().collect::<Vec<_>>().join(", "));
            let index = IndexModel::builder().keys(keys).build();

            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index {} not created: {}", label, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    /// Round-trip to the server, used by the health endpoint.
    pub async fn ping(&self) -> bool {
        self.db.run_command(doc! { "ping": 1 }).await.is_ok()
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri, "ContestHubDB_test").await;
        assert!(db.is_ok());
        assert!(db.unwrap().ping().await);
    }

    #[tokio::test]
    async fn test_from_client_does_not_connect() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let db = MongoDB::from_client(client, "ContestHubDB");
        let users = db.collection::<Document>(USERS);
        assert_eq!(users.namespace().db, "ContestHubDB");
        assert_eq!(users.name(), "users");
    }
}
