use utoipa::openapi::{Contact, InfoBuilder, License, Tag};
use utoipa::OpenApi;

use super::handlers::health::{self, Health};
use super::handlers::user::types::{CredentialsRequest, ProfileResponse, UserResponse};
use super::handlers::user::{profile, sign_in, sign_out, sign_up};

// `#[utoipa::path]` on each handler binds method + path; add new endpoints
// here so they show up in the generated document. Routes like `/` stay
// intentionally undocumented.
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        sign_up::sign_up,
        sign_in::sign_in,
        sign_out::sign_out,
        profile::profile,
    ),
    components(schemas(Health, CredentialsRequest, UserResponse, ProfileResponse))
)]
struct ApiDoc;

/// The `OpenAPI` document for all documented routes, with the info section
/// taken from Cargo metadata.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut api = ApiDoc::openapi();
    api.info = cargo_info();

    let mut user_tag = Tag::new("user");
    user_tag.description = Some("Sign-up, sign-in, sign-out, and profile".to_string());

    let mut health_tag = Tag::new("health");
    health_tag.description = Some("Service liveness".to_string());

    api.tags = Some(vec![user_tag, health_tag]);
    api
}

fn cargo_info() -> utoipa::openapi::Info {
    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.contact = cargo_contact();
    info.license = cargo_license();
    info
}

fn cargo_contact() -> Option<Contact> {
    // Cargo authors are `;` separated and may include "Name <email>".
    let authors = env!("CARGO_PKG_AUTHORS");
    let primary = authors.split(';').next().map(str::trim)?;
    if primary.is_empty() {
        return None;
    }

    let (name, email) = parse_author(primary);
    if name.is_none() && email.is_none() {
        return None;
    }

    let mut contact = Contact::new();
    contact.name = name.map(str::to_string);
    contact.email = email.map(str::to_string);
    Some(contact)
}

fn cargo_license() -> Option<License> {
    let identifier = optional_str(env!("CARGO_PKG_LICENSE"))?;
    let mut license = License::new(identifier);
    license.identifier = Some(identifier.to_string());
    Some(license)
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_author(author: &str) -> (Option<&str>, Option<&str>) {
    if let Some(start) = author.find('<') {
        let name = author[..start].trim();
        let email = author[start + 1..].trim_end_matches('>').trim();
        let name = if name.is_empty() { None } else { Some(name) };
        let email = if email.is_empty() { None } else { Some(email) };
        (name, email)
    } else {
        let name = author.trim();
        (if name.is_empty() { None } else { Some(name) }, None)
    }
}
