use crate::database::{MongoDB, CONTESTS};
use crate::models::{
    AttendanceUpdate, Contest, ContestListQuery, ContestListResponse, ContestUpdate, DeleteResponse,
    PopularQuery, Record, StatusUpdate, StoredRecord, UpdateResponse, WinnerUpdate,
};
use crate::services::contest_query::{
    self, Pagination, ACCEPTED_STATUS, BEST_CREATOR_LIMIT, POPULAR_LIMIT, WINNER_ADVERTISE_LIMIT,
};
use crate::utils::{AppError, AppResult};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::Serialize;

fn stored(db: &MongoDB) -> mongodb::Collection<StoredRecord<Contest>> {
    db.collection::<StoredRecord<Contest>>(CONTESTS)
}

async fn collect(cursor: mongodb::Cursor<StoredRecord<Contest>>) -> AppResult<Vec<Record<Contest>>> {
    let contests: Vec<StoredRecord<Contest>> = cursor.try_collect().await?;
    Ok(contests.into_iter().map(Record::from).collect())
}

/// Filtered, sorted, paged listing plus the count of accepted contests
/// (the count ignores the filter).
pub async fn list_contests(
    db: &MongoDB,
    query: &ContestListQuery,
) -> AppResult<ContestListResponse<Record<Contest>>> {
    let filter = contest_query::build_contest_filter(query);
    let sort = contest_query::build_contest_sort(query)?;
    let page = Pagination::from_page(query.page, query.limit);

    log::debug!("Contest filter: {:?}, sort: {:?}, page: {:?}", filter, sort, page);

    let contests = stored(db);
    let contest_count = contests
        .count_documents(doc! { "status": ACCEPTED_STATUS })
        .await?;

    let mut find = contests.find(filter).skip(page.skip);
    if let Some(sort) = sort {
        find = find.sort(sort);
    }
    if let Some(limit) = page.limit {
        find = find.limit(limit);
    }

    let all_contest = collect(find.await?).await?;

    Ok(ContestListResponse {
        all_contest,
        contest_count,
    })
}

pub async fn popular_contests(db: &MongoDB, query: &PopularQuery) -> AppResult<Vec<Record<Contest>>> {
    let filter = contest_query::build_popular_filter(query);
    let sort = contest_query::build_popular_sort(query)?;

    let contests = stored(db);
    let mut find = contests.find(filter).limit(POPULAR_LIMIT);
    if let Some(sort) = sort {
        find = find.sort(sort);
    }

    collect(find.await?).await
}

/// Top contests by attendance, used for the "best creators" showcase.
pub async fn best_creators(db: &MongoDB) -> AppResult<Vec<Record<Contest>>> {
    let cursor = stored(db)
        .find(doc! {})
        .sort(doc! { "attendance": -1 })
        .limit(BEST_CREATOR_LIMIT)
        .await?;
    collect(cursor).await
}

pub async fn advertised_winners(db: &MongoDB) -> AppResult<Vec<Record<Contest>>> {
    let cursor = stored(db)
        .find(doc! { "winnerName": { "$exists": true } })
        .limit(WINNER_ADVERTISE_LIMIT)
        .await?;
    collect(cursor).await
}

pub async fn get_contest(db: &MongoDB, id: ObjectId) -> AppResult<Record<Contest>> {
    stored(db)
        .find_one(doc! { "_id": id })
        .await?
        .map(Record::from)
        .ok_or_else(|| AppError::NotFound("Contest not found".to_string()))
}

pub async fn create_contest(db: &MongoDB, contest: Contest) -> AppResult<Record<Contest>> {
    let result = db.collection::<Contest>(CONTESTS).insert_one(&contest).await?;

    let id = result
        .inserted_id
        .as_object_id()
        .ok_or_else(|| AppError::DatabaseError("Inserted id is not an ObjectId".to_string()))?;

    Ok(Record::new(id, contest))
}

/// `$set` with upsert on the `_id` filter: an unknown id creates a new document.
async fn upsert_fields<T: Serialize>(db: &MongoDB, id: ObjectId, fields: &T) -> AppResult<UpdateResponse> {
    let update = contest_query::set_fields(fields)?;
    let result = db
        .collection::<Document>(CONTESTS)
        .update_one(doc! { "_id": id }, update)
        .upsert(true)
        .await?;
    Ok(UpdateResponse::from(result))
}

pub async fn update_contest(db: &MongoDB, id: ObjectId, update: &ContestUpdate) -> AppResult<UpdateResponse> {
    upsert_fields(db, id, update).await
}

pub async fn update_attendance(
    db: &MongoDB,
    id: ObjectId,
    update: &AttendanceUpdate,
) -> AppResult<UpdateResponse> {
    upsert_fields(db, id, update).await
}

pub async fn update_winner(db: &MongoDB, id: ObjectId, update: &WinnerUpdate) -> AppResult<UpdateResponse> {
    upsert_fields(db, id, update).await
}

pub async fn update_status(db: &MongoDB, id: ObjectId, update: &StatusUpdate) -> AppResult<UpdateResponse> {
    upsert_fields(db, id, update).await
}

/// Deleting an unknown id is not an error: the result simply reports zero deletions.
pub async fn delete_contest(db: &MongoDB, id: ObjectId) -> AppResult<DeleteResponse> {
    let result = db
        .collection::<Document>(CONTESTS)
        .delete_one(doc! { "_id": id })
        .await?;
    Ok(DeleteResponse::from(result))
}
