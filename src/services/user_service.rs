use crate::database::{MongoDB, USERS};
use crate::models::{ExistingUserResponse, Record, StoredRecord, UpdateResponse, UpdateRoleRequest, User};
use crate::services::contest_query::set_fields;
use crate::utils::{AppError, AppResult};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};

/// Outcome of a sign-up call: either the stored user or the "already exists" marker.
#[derive(Debug)]
pub enum CreateUserOutcome {
    Created(Record<User>),
    AlreadyExists(ExistingUserResponse),
}

fn stored(db: &MongoDB) -> mongodb::Collection<StoredRecord<User>> {
    db.collection::<StoredRecord<User>>(USERS)
}

pub async fn list_users(db: &MongoDB) -> AppResult<Vec<Record<User>>> {
    let users: Vec<StoredRecord<User>> = stored(db).find(doc! {}).await?.try_collect().await?;
    Ok(users.into_iter().map(Record::from).collect())
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> AppResult<Option<Record<User>>> {
    Ok(stored(db)
        .find_one(doc! { "email": email })
        .await?
        .map(Record::from))
}

/// Idempotent on email: an existing user short-circuits the insert.
pub async fn create_user(db: &MongoDB, user: User) -> AppResult<CreateUserOutcome> {
    if let Some(email) = user.email.as_deref() {
        if find_by_email(db, email).await?.is_some() {
            log::info!("User already exists: {}", email);
            return Ok(CreateUserOutcome::AlreadyExists(ExistingUserResponse::already_exists()));
        }
    }

    let result = db.collection::<User>(USERS).insert_one(&user).await?;
    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("Inserted id is not an ObjectId".to_string()))?;

    Ok(CreateUserOutcome::Created(Record::new(id, user)))
}

/// Sets the role with upsert on the email filter, so an unknown email creates a
/// bare `{ email, role }` user.
pub async fn update_role(db: &MongoDB, email: &str, request: &UpdateRoleRequest) -> AppResult<UpdateResponse> {
    let update = set_fields(&User {
        role: request.role.clone(),
        ..Default::default()
    })?;

    let result = db
        .collection::<Document>(USERS)
        .update_one(doc! { "email": email }, update)
        .upsert(true)
        .await?;
    Ok(UpdateResponse::from(result))
}
