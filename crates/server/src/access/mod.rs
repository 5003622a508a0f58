//! Geographic access resolution.
//!
//! Roles carry authority over a city → taluka → wash area hierarchy:
//! admins see everything, sub-admins their assigned cities and every taluka
//! under them, HR staff their assigned talukas, washers their assigned wash
//! areas. The predicates and delegation validators here are pure; the
//! middleware wraps them around a per-request profile lookup.

pub mod delegation;
pub mod lookup;
pub mod middleware;
pub mod predicates;
pub mod target;
pub mod visibility;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared_types::AppError;

pub use delegation::{
    validate_hr_to_washer_assignment, validate_known_talukas, validate_sub_admin_to_hr_assignment,
};
pub use predicates::{has_access_to_city, has_access_to_taluka, has_access_to_wash_area};
pub use visibility::can_view_wash_area;

pub const CANNOT_VERIFY: &str = "Cannot verify user permissions";
pub const CHECK_FAILED: &str = "Permission check failed";
pub const BODY_TOO_LARGE: &str = "Request body too large";

/// Why a gated request was stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDenial {
    /// The caller's profile could not be determined.
    Unresolvable,
    /// The caller was resolved but lacks the scope; carries the message.
    Forbidden(String),
    /// The body exceeded the configured limit before the target could be read.
    TooLarge,
    /// Anything else that went wrong while checking.
    Unexpected,
}

impl AccessDenial {
    pub fn status(&self) -> StatusCode {
        match self {
            AccessDenial::Unresolvable | AccessDenial::Forbidden(_) => StatusCode::FORBIDDEN,
            AccessDenial::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AccessDenial::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            AccessDenial::Unresolvable => AppError::forbidden(CANNOT_VERIFY),
            AccessDenial::Forbidden(message) => AppError::forbidden(message),
            AccessDenial::TooLarge => AppError::payload_too_large(BODY_TOO_LARGE),
            AccessDenial::Unexpected => AppError::internal(CHECK_FAILED),
        }
    }
}

impl IntoResponse for AccessDenial {
    fn into_response(self) -> Response {
        self.into_app_error().into_response()
    }
}

impl From<AccessDenial> for AppError {
    fn from(denial: AccessDenial) -> Self {
        denial.into_app_error()
    }
}

/// The level of the hierarchy a gate protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    City,
    Taluka,
    WashArea,
}

impl Scope {
    /// Request field carrying the target value.
    pub fn field(self) -> &'static str {
        match self {
            Scope::City => "city",
            Scope::Taluka => "taluka",
            Scope::WashArea => "wash_area_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scope::City => "city",
            Scope::Taluka => "taluka",
            Scope::WashArea => "wash area",
        }
    }

    pub fn denied(self, value: &str) -> AccessDenial {
        AccessDenial::Forbidden(format!("Access denied to {}: {}", self.label(), value))
    }
}
