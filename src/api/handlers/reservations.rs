//! Booking and cancellation endpoints.
//!
//! Both require a bearer token. Request validation (date format, future date,
//! party size) happens here; allocation and pricing happen in the booking core.

use crate::{
    api::{AppState, extractors::AuthUser},
    core::booking,
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Date format accepted in booking requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of `POST /book`.
#[derive(Debug, Deserialize)]
pub struct BookRequest {
    /// Party size, 1 to 10
    pub seats_count: i32,
    /// Day to book, `YYYY-MM-DD`
    pub date: String,
}

/// Body of a successful booking.
#[derive(Debug, Serialize)]
pub struct BookResponse {
    /// Reservation ID
    pub id: i64,
    /// Reserved table
    pub table_id: i32,
    /// Seats booked after rounding odd parties up
    pub seats_count: i32,
    /// Total price
    pub price: i64,
}

/// Body of `POST /cancel`.
#[derive(Debug, Deserialize)]
pub struct CancelRequest {
    /// Reservation to cancel
    pub id: i64,
}

/// Body of a successful cancellation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Confirmation text
    pub message: String,
}

/// `POST /book` - reserves the best-fit table for the caller.
pub async fn book(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: std::result::Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookResponse>> {
    let Json(request) = payload?;

    let date = NaiveDate::parse_from_str(&request.date, DATE_FORMAT).map_err(|_| {
        Error::Validation {
            message: "Invalid date format, expected YYYY-MM-DD".to_string(),
        }
    })?;
    booking::validate_booking_request(request.seats_count, date, Utc::now().date_naive())?;

    let reservation =
        booking::book_table(&state.db, auth.user_id, request.seats_count, date).await?;

    Ok(Json(BookResponse {
        id: reservation.id,
        table_id: reservation.table_id,
        seats_count: reservation.seats_count,
        price: reservation.price,
    }))
}

/// `POST /cancel` - cancels one of the caller's reservations.
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: std::result::Result<Json<CancelRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let Json(request) = payload?;

    booking::cancel_user_reservation(&state.db, auth.user_id, request.id).await?;

    Ok(Json(MessageResponse {
        message: "Reservation canceled successfully".to_string(),
    }))
}
