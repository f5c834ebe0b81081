use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ContentRef, ContentType, ListEntry, ListPage, Pagination, UserId},
    routes::AppState,
};

/// Body of `POST /my-list/add`
///
/// Fields stay loosely typed so each problem can be reported by field name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub content_id: Option<Value>,
    #[serde(default)]
    pub content_type: Option<Value>,
}

impl AddItemRequest {
    pub fn validate(self) -> AppResult<ContentRef> {
        let content_id = match self.content_id {
            None | Some(Value::Null) => return Err(invalid("\"contentId\" is required")),
            Some(Value::String(id)) if id.trim().is_empty() => {
                return Err(invalid("\"contentId\" is not allowed to be empty"))
            }
            Some(Value::String(id)) => id,
            Some(_) => return Err(invalid("\"contentId\" must be a string")),
        };

        let content_type = match self.content_type {
            None | Some(Value::Null) => return Err(invalid("\"contentType\" is required")),
            Some(Value::String(raw)) => raw.parse::<ContentType>().ok(),
            Some(_) => None,
        }
        .ok_or_else(|| invalid("\"contentType\" must be one of [Movie, TVShow]"))?;

        Ok(ContentRef::new(content_type, content_id))
    }
}

/// Query string of `GET /my-list`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn validate(self) -> AppResult<Pagination> {
        let page = parse_integer("page", self.page)?;
        let limit = parse_integer("limit", self.limit)?;
        Pagination::new(page, limit).map_err(AppError::InvalidInput)
    }
}

fn parse_integer(field: &str, raw: Option<String>) -> AppResult<Option<i64>> {
    raw.map(|value| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(&format!("\"{}\" must be an integer", field)))
    })
    .transpose()
}

fn invalid(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub message: &'static str,
    pub data: ListEntry,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Handler for adding an item to the caller's list
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Extension(user_id): Extension<UserId>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AddItemResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let content = request.validate()?;

    tracing::info!(
        request_id = %request_id,
        content = %content,
        "Processing add request"
    );

    let entry = state.my_list.add(&user_id, content).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddItemResponse {
            message: "Item added successfully",
            data: entry,
        }),
    ))
}

/// Handler for removing an item from the caller's list
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Extension(user_id): Extension<UserId>,
    Path(content_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    if content_id.trim().is_empty() {
        return Err(invalid("\"contentId\" is not allowed to be empty"));
    }

    tracing::info!(
        request_id = %request_id,
        content_id = %content_id,
        "Processing remove request"
    );

    state.my_list.remove(&user_id, &content_id).await?;

    Ok(Json(MessageResponse {
        message: "Item removed successfully.",
    }))
}

/// Handler for listing the caller's items with catalog details
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Extension(user_id): Extension<UserId>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<ListPage>> {
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let pagination = query.validate()?;

    tracing::info!(
        request_id = %request_id,
        page = pagination.page(),
        limit = pagination.limit(),
        "Processing list request"
    );

    let page = state.my_list.list(&user_id, pagination).await?;
    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add_request(body: Value) -> AddItemRequest {
        serde_json::from_value(body).unwrap()
    }

    fn validation_message(result: AppResult<impl std::fmt::Debug>) -> String {
        match result {
            Err(AppError::InvalidInput(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_add_request_accepts_both_content_types() {
        let movie = add_request(json!({ "contentId": "movie-101", "contentType": "Movie" }));
        assert_eq!(
            movie.validate().unwrap(),
            ContentRef::Movie("movie-101".to_string())
        );

        let show = add_request(json!({ "contentId": "tvshow-201", "contentType": "TVShow" }));
        assert_eq!(
            show.validate().unwrap(),
            ContentRef::TvShow("tvshow-201".to_string())
        );
    }

    #[test]
    fn test_add_request_field_errors() {
        let cases = [
            (json!({ "contentType": "Movie" }), "\"contentId\" is required"),
            (
                json!({ "contentId": "  ", "contentType": "Movie" }),
                "\"contentId\" is not allowed to be empty",
            ),
            (
                json!({ "contentId": 42, "contentType": "Movie" }),
                "\"contentId\" must be a string",
            ),
            (json!({ "contentId": "movie-101" }), "\"contentType\" is required"),
            (
                json!({ "contentId": "movie-101", "contentType": "Documentary" }),
                "\"contentType\" must be one of [Movie, TVShow]",
            ),
            (
                json!({ "contentId": "movie-101", "contentType": 1 }),
                "\"contentType\" must be one of [Movie, TVShow]",
            ),
        ];

        for (body, expected) in cases {
            assert_eq!(validation_message(add_request(body).validate()), expected);
        }
    }

    #[test]
    fn test_list_query_defaults_and_parsing() {
        let pagination = ListQuery::default().validate().unwrap();
        assert_eq!(pagination, Pagination::default());

        let query = ListQuery {
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
        };
        let pagination = query.validate().unwrap();
        assert_eq!((pagination.page(), pagination.limit()), (2, 5));
    }

    #[test]
    fn test_list_query_rejects_non_integers() {
        let query = ListQuery {
            page: Some("1.5".to_string()),
            limit: None,
        };
        assert_eq!(
            validation_message(query.validate()),
            "\"page\" must be an integer"
        );

        let query = ListQuery {
            page: None,
            limit: Some("abc".to_string()),
        };
        assert_eq!(
            validation_message(query.validate()),
            "\"limit\" must be an integer"
        );
    }
}
