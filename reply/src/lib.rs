//! HTTP/1.1 response model and its wire encoding.
//!
//! A [`Response`] is built by a handler, then appended once to an outbound
//! buffer by the transport with [`Response::append_to_buffer`]. Whether the
//! connection survives the response is read back through
//! [`Response::close_connection`].

pub mod config;
pub mod error;
pub mod http;
pub mod server;

pub use self::http::{EncodeOptions, IntoResponse, Json, ReasonPhrase, Response, StatusCode};
