// ABOUTME: Shared API response types
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Payload of mutations that report how many rows they changed
#[derive(Debug, Serialize)]
pub struct Affected {
    pub affected: u64,
}

/// Wrap a successful result in the envelope with the given status, or render the error
pub fn respond<T, E>(status: StatusCode, result: Result<T, E>) -> Response
where
    T: Serialize,
    E: Into<AppError>,
{
    match result {
        Ok(data) => (status, ResponseJson(ApiResponse::success(data))).into_response(),
        Err(e) => Into::<AppError>::into(e).into_response(),
    }
}

pub fn ok<T, E>(result: Result<T, E>) -> Response
where
    T: Serialize,
    E: Into<AppError>,
{
    respond(StatusCode::OK, result)
}

pub fn created<T, E>(result: Result<T, E>) -> Response
where
    T: Serialize,
    E: Into<AppError>,
{
    respond(StatusCode::CREATED, result)
}
