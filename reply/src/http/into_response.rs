use bytes::Bytes;

use super::{Response, StatusCode};

pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        let mut response = Response::new(false);
        response.set_status(self);

        response
    }
}

impl IntoResponse for Bytes {
    fn into_response(self) -> Response {
        let mut response = StatusCode::Ok.into_response();
        response.set_content_type(mime::APPLICATION_OCTET_STREAM.as_ref());
        response.set_body(self);

        response
    }
}

pub struct Json<T>(pub T);
impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        let json = match serde_json::to_vec(&self.0) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(%err, "failed to serialize json body");
                return StatusCode::InternalServerError.into_response();
            }
        };

        let mut response = StatusCode::Ok.into_response();
        response.set_content_type(mime::APPLICATION_JSON.as_ref());
        response.set_body(json);

        response
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        let mut response = StatusCode::Ok.into_response();
        response.set_content_type(mime::TEXT_PLAIN_UTF_8.as_ref());
        response.set_body(self);

        response
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        let mut response = StatusCode::Ok.into_response();
        response.set_content_type(mime::TEXT_PLAIN_UTF_8.as_ref());
        response.set_body(self);

        response
    }
}

impl<B: IntoResponse> IntoResponse for (StatusCode, B) {
    fn into_response(self) -> Response {
        let mut response = self.1.into_response();
        response.set_status(self.0);

        response
    }
}
