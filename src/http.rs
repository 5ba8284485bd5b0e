use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::types::{Booking, BookingError, Club, Slot, Space};
use crate::AppState;
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::{http::StatusCode, Form, Json};
use axum::{
    routing::{get, post},
    Router,
};
use axum_valid::Valid;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;
use validator::{Validate, ValidationError};

lazy_static! {
    // University mailboxes only: *.edu, *.ac, or a national variant such as
    // ac.in / edu.au.
    static ref UNIVERSITY_DOMAIN: Regex =
        Regex::new(r"(?i)@(?:[a-z0-9-]+\.)*(?:edu|ac)(?:\.[a-z]{2,3})?$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingRequest {
    club_email: String,
    space: Space,
    date: NaiveDate,
    slot: Slot,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
struct RegisterClubRequest {
    #[validate(email, custom(function = university_email))]
    email: String,
    #[validate(length(min = 1))]
    name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoveBookingRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityQuery {
    space: Space,
    date: NaiveDate,
    slot: Slot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityResponse {
    available: bool,
    existing: Option<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotView {
    start_hour: u8,
    label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing: Option<Booking>,
}

fn university_email(email: &str) -> Result<(), ValidationError> {
    match UNIVERSITY_DOMAIN.is_match(email) {
        true => Ok(()),
        false => Err(ValidationError::new("university_email")),
    }
}

fn error_response(err: BookingError) -> Response {
    let status = match &err {
        BookingError::Conflict(_) | BookingError::DuplicateClub(_) => StatusCode::CONFLICT,
        BookingError::UnknownSpace(_)
        | BookingError::UnknownSlot(_)
        | BookingError::UnknownClub(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BookingError::UnknownBooking(_) => StatusCode::NOT_FOUND,
        BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let existing = match err {
        BookingError::Conflict(ref existing) => Some(existing.clone()),
        _ => None,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            existing,
        }),
    )
        .into_response()
}

pub fn create_app<T: BookingBackend, C: Configuration>(backend: T, configuration: C) -> Router {
    let state = AppState {
        bookings: backend,
        configuration,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/", get(get_frontend))
        .route("/spaces", get(get_spaces))
        .route("/slots", get(get_slots))
        .route("/bookings", get(get_bookings).post(create_booking))
        .route("/availability", get(get_availability));

    let admin = Router::new()
        .route("/admin/clubs", get(get_clubs).post(register_club))
        .route("/admin/remove", post(remove_booking))
        .route("/admin/remove_all", post(remove_all_bookings))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<T, C>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, String)> {
    let password = state.configuration.admin_password();
    match request.headers().get("x-admin-password") {
        Some(header) if header.to_str().unwrap_or("") == password => Ok(next.run(request).await),
        Some(_) => Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string())),
        None => Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string())),
    }
}

async fn get_spaces() -> impl IntoResponse {
    Json(Space::ALL)
}

async fn get_slots() -> impl IntoResponse {
    let slots: Vec<SlotView> = Slot::ALL
        .into_iter()
        .map(|slot| SlotView {
            start_hour: slot.start_hour(),
            label: slot.label(),
        })
        .collect();
    Json(slots)
}

async fn get_bookings<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> impl IntoResponse {
    Json(state.bookings.bookings())
}

async fn get_availability<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<AvailabilityQuery>,
) -> impl IntoResponse {
    let existing = state.bookings.occupancy(query.space, query.date, query.slot);
    Json(AvailabilityResponse {
        available: existing.is_none(),
        existing,
    })
}

async fn create_booking<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Form(request): Form<BookingRequest>,
) -> Response {
    match state.bookings.book(
        &request.club_email,
        request.space,
        request.date,
        request.slot,
    ) {
        Ok(booking) => {
            info!(
                space = %booking.space,
                date = %booking.date,
                slot = %booking.slot,
                club = %booking.club.email,
                "booking created"
            );
            (StatusCode::CREATED, Json(booking)).into_response()
        }
        Err(err) => error_response(err),
    }
}

async fn get_clubs<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> impl IntoResponse {
    Json(state.bookings.clubs())
}

async fn register_club<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Valid(Json(request)): Valid<Json<RegisterClubRequest>>,
) -> Response {
    let club = Club {
        email: request.email,
        name: request.name,
    };
    match state.bookings.register_club(club.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(club)).into_response(),
        Err(err) => error_response(err),
    }
}

async fn remove_booking<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
    Json(request): Json<RemoveBookingRequest>,
) -> Response {
    match state.bookings.remove_booking(request.id) {
        Ok(()) => (StatusCode::OK, "Booking removed successfully".to_string()).into_response(),
        Err(err) => error_response(err),
    }
}

async fn remove_all_bookings<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> impl IntoResponse {
    state.bookings.remove_all_bookings();
    (
        StatusCode::OK,
        "All bookings removed successfully".to_string(),
    )
}

async fn get_frontend<T: BookingBackend, C: Configuration>(
    State(state): State<AppState<T, C>>,
) -> Result<Html<String>, (StatusCode, String)> {
    let path = state.configuration.frontend_path();
    match fs::read_to_string(&path).await {
        Ok(contents) => Ok(Html(
            contents.replace("{{website_title}}", &state.configuration.website_title()),
        )),
        Err(err) => {
            error!(?err, path = %path.display(), "failed to read frontend file");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read frontend file: {err}"),
            ))
        }
    }
}
