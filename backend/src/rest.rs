use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::domain::{VaccinationError, VaccinationService};
use shared::{
    CreateVaccinationRequest, DeleteVaccinationRequest, DeleteVaccinationResponse, ErrorResponse,
    UpdateVaccinationRequest,
};

/// Application state containing the VaccinationService
#[derive(Clone)]
pub struct AppState {
    pub vaccinations: VaccinationService,
}

impl AppState {
    /// Create new application state with the given VaccinationService
    pub fn new(vaccinations: VaccinationService) -> Self {
        Self { vaccinations }
    }
}

/// Axum handler function for GET /api/vaccinations
pub async fn list_vaccinations(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/vaccinations");

    match state.vaccinations.list_vaccinations().await {
        Ok(vaccinations) => (StatusCode::OK, Json(vaccinations)).into_response(),
        Err(e) => error_response(e, "Failed to fetch vaccinations"),
    }
}

/// Axum handler function for POST /api/vaccinations
pub async fn create_vaccination(
    State(state): State<AppState>,
    Json(request): Json<CreateVaccinationRequest>,
) -> impl IntoResponse {
    info!("POST /api/vaccinations - request: {:?}", request);

    match state.vaccinations.create_vaccination(request).await {
        Ok(vaccination) => (StatusCode::CREATED, Json(vaccination)).into_response(),
        Err(e) => error_response(e, "Failed to create vaccination"),
    }
}

/// Axum handler function for PATCH /api/vaccinations (mark complete)
pub async fn update_vaccination(
    State(state): State<AppState>,
    Json(request): Json<UpdateVaccinationRequest>,
) -> impl IntoResponse {
    info!("PATCH /api/vaccinations - request: {:?}", request);

    match state.vaccinations.mark_complete(request).await {
        Ok(vaccination) => (StatusCode::OK, Json(vaccination)).into_response(),
        Err(e) => error_response(e, "Failed to update vaccination"),
    }
}

/// Axum handler function for DELETE /api/vaccinations
pub async fn delete_vaccination(
    State(state): State<AppState>,
    Json(request): Json<DeleteVaccinationRequest>,
) -> impl IntoResponse {
    info!("DELETE /api/vaccinations - request: {:?}", request);

    match state.vaccinations.delete_vaccination(request).await {
        Ok(()) => (StatusCode::OK, Json(DeleteVaccinationResponse { success: true })).into_response(),
        Err(e) => error_response(e, "Failed to delete vaccination"),
    }
}

/// Map a service failure to the uniform `{error}` envelope. Store failures
/// keep their cause in the server log only; the client sees a static message.
fn error_response(error: VaccinationError, failure_message: &str) -> Response {
    match error {
        VaccinationError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
        }
        not_found @ VaccinationError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse { error: not_found.to_string() }),
        )
            .into_response(),
        VaccinationError::Persistence(cause) => {
            tracing::error!("Store failure: {:?}", cause);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: failure_message.to_string() }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use shared::Vaccination;

    /// Helper to create test handlers
    async fn setup_test_state() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState::new(VaccinationService::new(db))
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&bytes).expect("Failed to parse response body")
    }

    fn rabies_request() -> CreateVaccinationRequest {
        CreateVaccinationRequest {
            name: Some("Rabies".to_string()),
            due_date: Some("2025-01-01".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_vaccinations_handler() {
        let state = setup_test_state().await;

        let response = list_vaccinations(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let listed: Vec<Vaccination> = body_json(response).await;
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_create_vaccination_handler() {
        let state = setup_test_state().await;

        let response = create_vaccination(State(state), Json(rabies_request()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created: Vaccination = body_json(response).await;
        assert_eq!(created.name, "Rabies");
        assert_eq!(created.due_date.to_string(), "2025-01-01");
        assert_eq!(created.last_completed, None);
    }

    #[tokio::test]
    async fn test_create_vaccination_missing_name_is_bad_request() {
        let state = setup_test_state().await;

        let request = CreateVaccinationRequest {
            name: None,
            due_date: Some("2025-01-01".to_string()),
        };

        let response = create_vaccination(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let envelope: ErrorResponse = body_json(response).await;
        assert_eq!(envelope.error, "Name and dueDate are required");
    }

    #[tokio::test]
    async fn test_mark_complete_flow() {
        let state = setup_test_state().await;

        let created = create_vaccination(State(state.clone()), Json(rabies_request()))
            .await
            .into_response();
        let created: Vaccination = body_json(created).await;

        let request = UpdateVaccinationRequest {
            id: Some(created.id),
            last_completed: Some("2025-06-01".to_string()),
            due_date: Some("2026-06-01".to_string()),
        };

        let response = update_vaccination(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let updated: Vaccination = body_json(response).await;
        assert_eq!(updated.last_completed.map(|d| d.to_string()), Some("2025-06-01".to_string()));
        assert_eq!(updated.due_date.to_string(), "2026-06-01");
    }

    #[tokio::test]
    async fn test_update_vaccination_missing_fields_is_bad_request() {
        let state = setup_test_state().await;

        let request = UpdateVaccinationRequest {
            id: Some("some-id".to_string()),
            last_completed: None,
            due_date: None,
        };

        let response = update_vaccination(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_vaccination_unknown_id_is_not_found() {
        let state = setup_test_state().await;

        let request = UpdateVaccinationRequest {
            id: Some("no-such-id".to_string()),
            last_completed: Some("2025-06-01".to_string()),
            due_date: Some("2026-06-01".to_string()),
        };

        let response = update_vaccination(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_vaccination_handler() {
        let state = setup_test_state().await;

        let created = create_vaccination(State(state.clone()), Json(rabies_request()))
            .await
            .into_response();
        let created: Vaccination = body_json(created).await;

        let request = DeleteVaccinationRequest { id: Some(created.id.clone()) };
        let response = delete_vaccination(State(state.clone()), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let deleted: DeleteVaccinationResponse = body_json(response).await;
        assert!(deleted.success);

        let listed = list_vaccinations(State(state)).await.into_response();
        let listed: Vec<Vaccination> = body_json(listed).await;
        assert!(listed.iter().all(|v| v.id != created.id));
    }

    #[tokio::test]
    async fn test_delete_vaccination_missing_id_is_bad_request() {
        let state = setup_test_state().await;

        let request = DeleteVaccinationRequest { id: None };
        let response = delete_vaccination(State(state), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let envelope: ErrorResponse = body_json(response).await;
        assert_eq!(envelope.error, "id is required");
    }
}
