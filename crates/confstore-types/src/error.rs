//! Error type shared by every confstore crate and adapter.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// No identity could be resolved for the request
	Unauthorized,
	PermissionDenied,
	NotFound,
	/// The request itself was invalid (bad key, bad value, bad body)
	ValidationError(String),
	/// The storage backend failed
	DbError,
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::NotFound => write!(f, "not found"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Stable machine-readable code for the error body
	pub fn code(&self) -> &'static str {
		match self {
			Error::Unauthorized => "E-AUTH-UNAUTH",
			Error::PermissionDenied => "E-AUTH-NOPERM",
			Error::NotFound => "E-CORE-NOTFOUND",
			Error::ValidationError(_) => "E-VAL-INVALID",
			Error::DbError => "E-CORE-DBERR",
			Error::ConfigError(_) => "E-CORE-CONFIG",
			Error::Internal(_) | Error::Io(_) => "E-CORE-INTERNAL",
		}
	}
}

#[derive(Serialize)]
struct ErrorBody {
	code: &'static str,
	message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
	error: ErrorBody,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		// Internal details stay in the log
		let message = match &self {
			Error::ValidationError(_) | Error::NotFound => self.to_string(),
			_ => status.canonical_reason().unwrap_or("error").to_string(),
		};
		if status.is_server_error() {
			tracing::warn!("Request failed: {}", self);
		}
		let body = ErrorResponse { error: ErrorBody { code: self.code(), message } };
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
