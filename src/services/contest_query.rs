//! Filter, sort and paging documents for the contest listings.

use crate::models::{ContestListQuery, PopularQuery};
use crate::utils::AppError;
use mongodb::bson::{doc, Bson, Document, Regex};
use serde::Serialize;

pub const ACCEPTED_STATUS: &str = "Accepted";
pub const POPULAR_LIMIT: i64 = 6;
pub const BEST_CREATOR_LIMIT: i64 = 3;
pub const WINNER_ADVERTISE_LIMIT: i64 = 6;

/// Skip/limit pair derived from a 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Without a limit there is nothing to page over, so the whole result is returned.
    pub fn from_page(page: Option<u64>, limit: Option<u64>) -> Self {
        match limit.filter(|l| *l > 0) {
            Some(limit) => {
                let page = page.unwrap_or(1).max(1);
                Pagination {
                    skip: (page - 1).saturating_mul(limit),
                    limit: Some(i64::try_from(limit).unwrap_or(i64::MAX)),
                }
            }
            None => Pagination {
                skip: 0,
                limit: None,
            },
        }
    }
}

/// Parses a sort direction the way the frontend sends it.
pub fn parse_sort_direction(raw: &str) -> Result<i32, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "asc" | "ascending" | "1" => Ok(1),
        "desc" | "descending" | "-1" => Ok(-1),
        other => Err(AppError::InvalidRequest(format!(
            "Invalid sort order: {}",
            other
        ))),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Exact-match filter for `GET /contests`. Each present parameter narrows the result.
pub fn build_contest_filter(query: &ContestListQuery) -> Document {
    let mut filter = Document::new();

    if let Some(category) = non_empty(&query.category) {
        filter.insert("contestType", category);
    }
    if let Some(email) = non_empty(&query.email) {
        filter.insert("creatorEmail", email);
    }
    if let Some(status) = non_empty(&query.status) {
        filter.insert("status", status);
    }

    filter
}

pub fn build_contest_sort(query: &ContestListQuery) -> Result<Option<Document>, AppError> {
    match non_empty(&query.sort_order) {
        Some(order) => {
            let direction = parse_sort_direction(order)?;
            Ok(Some(doc! { "attendance": direction }))
        }
        None => Ok(None),
    }
}

/// Splits a free-text search on whitespace, dropping empty tokens.
pub fn split_keywords(search_value: &str) -> Vec<&str> {
    search_value.split_whitespace().collect()
}

/// Escapes regex metacharacters so a keyword matches as a literal substring.
pub fn escape_regex(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if "\\^$.|?*+()[]{}/-".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `contestType` must contain any of the keywords, ignoring case.
pub fn build_popular_filter(query: &PopularQuery) -> Document {
    let keywords = non_empty(&query.search_value)
        .map(split_keywords)
        .unwrap_or_default();

    if keywords.is_empty() {
        return Document::new();
    }

    let patterns: Vec<Bson> = keywords
        .into_iter()
        .map(|keyword| {
            Bson::RegularExpression(Regex {
                pattern: escape_regex(keyword),
                options: "i".to_string(),
            })
        })
        .collect();

    doc! { "contestType": { "$in": patterns } }
}

/// Sorting only applies when both `attendance` and `order` are supplied.
pub fn build_popular_sort(query: &PopularQuery) -> Result<Option<Document>, AppError> {
    match (non_empty(&query.attendance), non_empty(&query.order)) {
        (Some(_), Some(order)) => {
            let direction = parse_sort_direction(order)?;
            Ok(Some(doc! { "attendance": direction }))
        }
        _ => Ok(None),
    }
}

/// Wraps the provided fields in a `$set`. Absent fields are left alone;
/// an update with nothing to set is rejected.
pub fn set_fields<T: Serialize>(fields: &T) -> Result<Document, AppError> {
    let set = mongodb::bson::to_document(fields)?;
    if set.is_empty() {
        return Err(AppError::InvalidRequest("No fields to update".to_string()));
    }
    Ok(doc! { "$set": set })
}
