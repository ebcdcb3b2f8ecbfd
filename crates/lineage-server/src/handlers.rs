//! HTTP handlers and router

use crate::dto::{
    BaconsNumberResponse, PersonResponse, PersonTreeResponse, PersonWithRelationship,
    StorePersonRequest,
};
use crate::error::ApiError;
use crate::service::PersonService;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use lineage_core::PersonId;
use lineage_storage::PersonStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub type AppState<S> = Arc<PersonService<S>>;

/// Build the service router
pub fn router<S: PersonStore + 'static>(service: AppState<S>) -> Router {
    Router::new()
        .route("/person", post(store_person::<S>))
        .route("/person/{id}/tree", get(family_tree::<S>))
        .route("/person/{id}/baconNumber/{other_id}", get(bacon_number::<S>))
        .route("/person/{id}/relationship/{other_id}", get(relationship::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn store_person<S: PersonStore>(
    State(service): State<AppState<S>>,
    Json(request): Json<StorePersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    let new_person = request.into_new_person()?;
    let (record, related) = service.store(new_person).await?;
    Ok(Json(PersonResponse::from_parts(&record, &related)))
}

async fn family_tree<S: PersonStore>(
    State(service): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<PersonTreeResponse>, ApiError> {
    let id = PersonId::from_string(&id)?;
    let graph = service.family_graph(&id).await?;
    Ok(Json(PersonTreeResponse::from_graph(&graph)))
}

async fn bacon_number<S: PersonStore>(
    State(service): State<AppState<S>>,
    Path((id, other_id)): Path<(String, String)>,
) -> Result<Json<BaconsNumberResponse>, ApiError> {
    let id = PersonId::from_string(&id)?;
    let other_id = PersonId::from_string(&other_id)?;

    let bacons_number = service.bacon_number(&id, &other_id).await?;
    Ok(Json(BaconsNumberResponse { bacons_number }))
}

async fn relationship<S: PersonStore>(
    State(service): State<AppState<S>>,
    Path((id, other_id)): Path<(String, String)>,
) -> Result<Json<PersonWithRelationship>, ApiError> {
    let id = PersonId::from_string(&id)?;
    let other_id = PersonId::from_string(&other_id)?;

    let (person, entry) = service.relationship(&id, &other_id).await?;
    Ok(Json(PersonWithRelationship::from_relation(&person, entry)))
}
