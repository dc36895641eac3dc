use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id")]
    pub id: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub travelers: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub travelers: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "planned".to_string()
}

/// `{ "data": ... }` wrapper used by every response with a body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TripList {
    pub data: Vec<Trip>,
    pub total: usize,
}

/// Trips in insertion order.
pub type Db = Arc<RwLock<Vec<Trip>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/{id}", get(get_trip).put(update_trip).delete(delete_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    info!("mock trip service listening on {}", listener.local_addr()?);
    axum::serve(listener, app()).await
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn list_trips(State(db): State<Db>) -> Json<TripList> {
    let trips = db.read().await;
    Json(TripList {
        data: trips.clone(),
        total: trips.len(),
    })
}

async fn create_trip(
    State(db): State<Db>,
    Json(input): Json<TripInput>,
) -> (StatusCode, Json<Data<Trip>>) {
    let stamp = now();
    let trip = Trip {
        id: Uuid::new_v4().simple().to_string(),
        destination: input.destination,
        start_date: input.start_date,
        end_date: input.end_date,
        budget: input.budget,
        travelers: input.travelers,
        description: input.description,
        status: input.status,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    db.write().await.push(trip.clone());
    (StatusCode::CREATED, Json(Data { data: trip }))
}

async fn get_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Data<Trip>>, StatusCode> {
    let trips = db.read().await;
    trips
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(|data| Json(Data { data }))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement of the writable fields; id and `createdAt` survive.
async fn update_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TripInput>,
) -> Result<Json<Data<Trip>>, StatusCode> {
    let mut trips = db.write().await;
    let trip = trips
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    trip.destination = input.destination;
    trip.start_date = input.start_date;
    trip.end_date = input.end_date;
    trip.budget = input.budget;
    trip.travelers = input.travelers;
    trip.description = input.description;
    trip.status = input.status;
    trip.updated_at = now();
    Ok(Json(Data { data: trip.clone() }))
}

async fn delete_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut trips = db.write().await;
    let index = trips
        .iter()
        .position(|t| t.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    trips.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
