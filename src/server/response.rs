//! HTTP response helpers.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::{
    terminal::Payload,
    utils::mime::{self, types},
};

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with a rendered HTML page.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, types::HTML);
    }
    send_body(request, status, types::HTML, body.into_bytes())
}

/// Respond with the terminal's answer to a command.
pub fn respond_payload(request: Request, payload: Payload) -> Result<()> {
    match payload {
        Payload::Json(body) => send_body(request, 200, types::JSON, body.into_bytes()),
        Payload::Html(body) => send_body(request, 200, types::HTML, body.into_bytes()),
    }
}

/// Plain-text 404, for when even the 404 page cannot be produced.
pub fn respond_not_found_text(request: Request) -> Result<()> {
    send_body(request, 404, types::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 500 Internal Server Error.
pub fn respond_internal_error(request: Request) -> Result<()> {
    send_body(request, 500, types::PLAIN, b"500 Internal Server Error".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

/// Redirect with `status` (301 or 303) to `location`.
pub fn respond_redirect(request: Request, status: u16, location: &str) -> Result<()> {
    let location = Header::from_bytes("Location", location.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid redirect location `{location}`"))?;
    let response = Response::empty(StatusCode(status)).with_header(location);
    request.respond(response)?;
    Ok(())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
