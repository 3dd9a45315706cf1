use crate::database::{MongoDB, REGISTRATIONS};
use crate::models::{
    Record, Registration, RegistrationListQuery, RegistrationStatusRequest, StoredRecord, UpdateResponse,
};
use crate::services::contest_query::set_fields;
use crate::utils::{AppError, AppResult};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};

fn stored(db: &MongoDB) -> mongodb::Collection<StoredRecord<Registration>> {
    db.collection::<StoredRecord<Registration>>(REGISTRATIONS)
}

async fn find_many(db: &MongoDB, filter: Document) -> AppResult<Vec<Record<Registration>>> {
    let registrations: Vec<StoredRecord<Registration>> =
        stored(db).find(filter).await?.try_collect().await?;
    Ok(registrations.into_iter().map(Record::from).collect())
}

pub fn build_registration_filter(query: &RegistrationListQuery) -> Document {
    let mut filter = Document::new();
    if let Some(email) = query.email.as_deref().filter(|e| !e.is_empty()) {
        filter.insert("email", email);
    }
    if let Some(creator) = query.creator_email.as_deref().filter(|e| !e.is_empty()) {
        filter.insert("creatorEmail", creator);
    }
    filter
}

pub async fn list_registrations(db: &MongoDB, query: &RegistrationListQuery) -> AppResult<Vec<Record<Registration>>> {
    find_many(db, build_registration_filter(query)).await
}

/// Registrations for contests created by `email`.
pub async fn by_creator(db: &MongoDB, email: &str) -> AppResult<Vec<Record<Registration>>> {
    find_many(db, doc! { "creatorEmail": email }).await
}

/// Registrations (and therefore payments) made by participant `email`.
pub async fn by_participant(db: &MongoDB, email: &str) -> AppResult<Vec<Record<Registration>>> {
    find_many(db, doc! { "email": email }).await
}

/// Stores the registration. Contest attendance is updated by a separate call.
pub async fn create_registration(db: &MongoDB, registration: Registration) -> AppResult<Record<Registration>> {
    let result = db
        .collection::<Registration>(REGISTRATIONS)
        .insert_one(&registration)
        .await?;
    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("Inserted id is not an ObjectId".to_string()))?;

    Ok(Record::new(id, registration))
}

pub async fn update_status(
    db: &MongoDB,
    id: ObjectId,
    request: &RegistrationStatusRequest,
) -> AppResult<UpdateResponse> {
    let update = set_fields(&Registration {
        status: request.winner.clone(),
        ..Default::default()
    })?;

    let result = db
        .collection::<Document>(REGISTRATIONS)
        .update_one(doc! { "_id": id }, update)
        .upsert(true)
        .await?;
    Ok(UpdateResponse::from(result))
}
