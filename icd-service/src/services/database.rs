use crate::error::AppError;
use crate::models::{Icd, ImageStatus};
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson},
    Client as MongoClient, Collection, Database,
};

/// Logical name of the claim-log collection.
pub const ICD_COLLECTION: &str = "icd_log";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    // Collection accessors

    pub fn icds(&self) -> Collection<Icd> {
        self.db.collection(ICD_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    // Claim record operations

    pub async fn insert_icd(&self, icd: &Icd) -> Result<(), AppError> {
        self.icds().insert_one(icd, None).await.map_err(|e| {
            tracing::error!("Failed to insert claim record: {}", e);
            AppError::from(e)
        })?;
        Ok(())
    }

    pub async fn find_icd(&self, id: ObjectId) -> Result<Option<Icd>, AppError> {
        self.icds()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up claim record {}: {}", id, e);
                AppError::from(e)
            })
    }

    /// Field-level update of the image review state. Returns whether a
    /// record matched; a missing id matches nothing and creates nothing.
    pub async fn set_image_status(
        &self,
        id: ObjectId,
        status: ImageStatus,
    ) -> Result<bool, AppError> {
        let status = to_bson(&status).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to serialize image status: {}", e))
        })?;

        let result = self
            .icds()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "image_status": status } },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to update claim record {}: {}", id, e);
                AppError::from(e)
            })?;

        Ok(result.matched_count > 0)
    }
}
