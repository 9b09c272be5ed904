//! Client REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};

use super::dto::{ClientPageParams, ClientRequest, IncomeQuery};
use super::ClientState;
use crate::application::ClientDto;
use crate::interfaces::http::common::{
    error_response, ApiError, ApiResponse, PaginatedResponse, ValidatedJson,
};

#[utoipa::path(
    get,
    path = "/api/v1/clients",
    tag = "Clients",
    params(ClientPageParams),
    responses(
        (status = 200, description = "One page of clients", body = ApiResponse<PaginatedResponse<ClientDto>>),
        (status = 400, description = "Unknown orderBy or direction")
    )
)]
pub async fn list_clients(
    State(state): State<ClientState>,
    Query(params): Query<ClientPageParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ClientDto>>>, ApiError> {
    let request = params
        .to_page_request(&state.pagination)
        .map_err(error_response)?;
    let page = state
        .service
        .find_all_paged(request)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(page.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/all",
    tag = "Clients",
    responses(
        (status = 200, description = "Every client, ordered by id", body = ApiResponse<Vec<ClientDto>>)
    )
)]
pub async fn list_all_clients(
    State(state): State<ClientState>,
) -> Result<Json<ApiResponse<Vec<ClientDto>>>, ApiError> {
    let clients = state.service.find_all().await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(clients)))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/income",
    tag = "Clients",
    params(IncomeQuery),
    responses(
        (status = 200, description = "Clients with exactly this income", body = ApiResponse<Vec<ClientDto>>),
        (status = 400, description = "Missing or non-numeric income")
    )
)]
pub async fn find_clients_by_income(
    State(state): State<ClientState>,
    Query(query): Query<IncomeQuery>,
) -> Result<Json<ApiResponse<Vec<ClientDto>>>, ApiError> {
    let clients = state
        .service
        .find_by_income(query.income)
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(clients)))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client details", body = ApiResponse<ClientDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_client(
    State(state): State<ClientState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiError> {
    let client = state.service.find_by_id(id).await.map_err(error_response)?;
    Ok(Json(ApiResponse::success(client)))
}

#[utoipa::path(
    post,
    path = "/api/v1/clients",
    tag = "Clients",
    request_body = ClientRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ClientDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Invalid client data")
    )
)]
pub async fn create_client(
    State(state): State<ClientState>,
    ValidatedJson(req): ValidatedJson<ClientRequest>,
) -> Result<
    (
        StatusCode,
        [(header::HeaderName, String); 1],
        Json<ApiResponse<ClientDto>>,
    ),
    ApiError,
> {
    let created = state
        .service
        .insert(req.into())
        .await
        .map_err(error_response)?;
    let location = match created.id {
        Some(id) => format!("/api/v1/clients/{}", id),
        None => "/api/v1/clients".to_string(),
    };
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(created)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client ID")),
    request_body = ClientRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ClientDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Invalid client data")
    )
)]
pub async fn update_client(
    State(state): State<ClientState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<ClientRequest>,
) -> Result<Json<ApiResponse<ClientDto>>, ApiError> {
    let updated = state
        .service
        .update(id, req.into())
        .await
        .map_err(error_response)?;
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    tag = "Clients",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_client(
    State(state): State<ClientState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await.map_err(error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::super::routes;
    use super::*;
    use crate::application::ClientService;
    use crate::config::PaginationConfig;
    use crate::domain::{Client, ClientRepository};
    use crate::infrastructure::InMemoryClientRepository;

    async fn app_with(clients: Vec<Client>) -> Router {
        let repo = InMemoryClientRepository::new();
        for c in clients {
            repo.save(c).await.unwrap();
        }
        routes(ClientState {
            service: Arc::new(ClientService::new(Arc::new(repo))),
            pagination: PaginationConfig::default(),
        })
    }

    fn client(name: &str, income: f64) -> Client {
        Client::new(
            name,
            "10419244771",
            income,
            Utc.with_ymd_and_hms(1996, 12, 23, 7, 0, 0).unwrap(),
            0,
        )
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, axum::http::HeaderMap, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, json)
    }

    fn body(name: &str) -> Value {
        json!({
            "name": name,
            "taxId": "10419244771",
            "income": 7500.0,
            "birthDate": "1996-12-23T07:00:00Z",
            "children": 0
        })
    }

    #[tokio::test]
    async fn get_existing_client() {
        let app = app_with(vec![client("Carolina Maria de Jesus", 7500.0)]).await;
        let (status, _, json) = send(app, "GET", "/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["data"]["name"], "Carolina Maria de Jesus");
        assert_eq!(json["data"]["birthDate"], "1996-12-23T07:00:00Z");
    }

    #[tokio::test]
    async fn get_missing_client_is_404() {
        let app = app_with(vec![]).await;
        let (status, _, json) = send(app, "GET", "/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Resource not found: Client with id=999");
    }

    #[tokio::test]
    async fn create_returns_201_with_location() {
        let app = app_with(vec![client("Ana", 1.0)]).await;
        let (status, headers, json) = send(app, "POST", "/", Some(body("Gilberto Gil"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[header::LOCATION], "/api/v1/clients/2");
        assert_eq!(json["data"]["id"], 2);
        assert_eq!(json["data"]["name"], "Gilberto Gil");
    }

    #[tokio::test]
    async fn create_rejects_invalid_body() {
        let app = app_with(vec![]).await;
        let mut invalid = body("");
        invalid["income"] = json!(-10.0);
        let (status, _, json) = send(app, "POST", "/", Some(invalid)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn update_existing_and_missing() {
        let app = app_with(vec![client("Old Name", 1.0)]).await;

        let (status, _, json) = send(app.clone(), "PUT", "/1", Some(body("New Name"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["data"]["name"], "New Name");

        let (status, _, _) = send(app, "PUT", "/1000", Some(body("Nobody"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_get_is_404() {
        let app = app_with(vec![client("Ana", 1.0)]).await;

        let (status, _, _) = send(app.clone(), "DELETE", "/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _, _) = send(app.clone(), "DELETE", "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = send(app, "GET", "/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_all_and_by_income() {
        let app = app_with(vec![
            client("Carolina Maria de Jesus", 7500.0),
            client("Djamila Ribeiro", 4500.0),
        ])
        .await;

        let (status, _, json) = send(app.clone(), "GET", "/all", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);

        let (status, _, json) = send(app.clone(), "GET", "/income?income=7500.0", None).await;
        assert_eq!(status, StatusCode::OK);
        let found = json["data"].as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "Carolina Maria de Jesus");

        let (status, _, _) = send(app, "GET", "/income?income=lots", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn paged_listing_defaults_to_name_order() {
        let app = app_with(vec![
            client("Caio", 3.0),
            client("Ana", 1.0),
            client("Bia", 2.0),
        ])
        .await;

        let (status, _, json) = send(app.clone(), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        assert_eq!(data["total"], 3);
        assert_eq!(data["size"], 12);
        assert_eq!(data["items"][0]["name"], "Ana");
        assert_eq!(data["items"][2]["name"], "Caio");

        let (_, _, json) = send(
            app.clone(),
            "GET",
            "/?page=1&linesPerPage=2&orderBy=income&direction=DESC",
            None,
        )
        .await;
        let data = &json["data"];
        assert_eq!(data["totalPages"], 2);
        assert_eq!(data["items"].as_array().unwrap().len(), 1);
        assert_eq!(data["items"][0]["name"], "Ana");

        let (status, _, _) = send(app, "GET", "/?orderBy=password", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn out_of_range_page_is_400() {
        let app = app_with(vec![client("Ana", 1.0)]).await;
        let (status, _, json) = send(app, "GET", "/?page=800000000000000000", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn tax_id_only_needs_to_be_present() {
        let app = app_with(vec![]).await;

        let mut long = body("Jorge Amado");
        long["taxId"] = json!("123456789012345678901234567890");
        let (status, _, json) = send(app.clone(), "POST", "/", Some(long)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["taxId"], "123456789012345678901234567890");

        let mut empty = body("Jorge Amado");
        empty["taxId"] = json!("");
        let (status, _, json) = send(app, "POST", "/", Some(empty)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "tax_id: tax id is required");
    }
}
