pub const HTTP_VERSION: &[u8] = b"HTTP/1.1";
pub const LINE_DELIMITER: &[u8] = b"\r\n";
pub const REQUEST_DELIMITER: &[u8] = b"\r\n\r\n";

pub mod codec;
mod into_response;
mod options;
mod response;
mod status;

pub use into_response::{IntoResponse, Json};
pub use options::{EncodeOptions, ReasonPhrase};
pub use response::{Response, CONTENT_TYPE};
pub use status::StatusCode;
