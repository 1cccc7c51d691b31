//! Translation of service outcomes into HTTP responses.
//!
//! Ok is 200 (201 with `Location` for creation), NoContent 204, NotFound
//! 404, Forbidden 403, Error 400 and Conflict 409. 404 and 403 carry no
//! body; 400 and 409 carry the error envelope with the service message.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::domain::{Error, Outcome, Representation};

/// Map any outcome onto its status code and body.
pub fn respond<T: Serialize>(outcome: Outcome<T>) -> HttpResponse {
    match outcome {
        Outcome::Ok(payload) => HttpResponse::Ok().json(payload),
        Outcome::NoContent => HttpResponse::NoContent().finish(),
        Outcome::NotFound => HttpResponse::NotFound().finish(),
        Outcome::Forbidden => HttpResponse::Forbidden().finish(),
        Outcome::Error(message) => Error::invalid_request(message).error_response(),
        Outcome::Conflict(message) => Error::conflict(message).error_response(),
    }
}

/// Like [`respond`], but answers a successful create with `201 Created` and
/// a `Location` under `collection`.
pub fn respond_created<R>(outcome: Outcome<R>, collection: &str) -> HttpResponse
where
    R: Representation + Serialize,
{
    match outcome {
        Outcome::Ok(created) => HttpResponse::Created()
            .insert_header((LOCATION, format!("{collection}/own/{}", created.id())))
            .json(created),
        other => respond(other),
    }
}
