use bytes::{BufMut, Bytes, BytesMut};
use indexmap::IndexMap;

use crate::error::ResponseError;

use super::{EncodeOptions, ReasonPhrase, StatusCode, HTTP_VERSION, LINE_DELIMITER};

pub const CONTENT_TYPE: &str = "Content-Type";

const CONNECTION_CLOSE: &[u8] = b"Connection: close\r\n";
const CONNECTION_KEEP_ALIVE: &[u8] = b"Connection: Keep-Alive\r\n";
const CONTENT_LENGTH: &[u8] = b"Content-Length: ";
const HEADER_SEPARATOR: &[u8] = b": ";

/// An HTTP/1.1 response under construction.
///
/// Framing is derived at encode time: a response either announces
/// `Connection: close` or carries a `Content-Length` computed from the body,
/// never both. Headers keep the order they were first added in.
#[derive(Clone, Debug, Default)]
pub struct Response {
    status: StatusCode,
    status_message: Option<String>,
    headers: IndexMap<String, String>,
    body: Bytes,
    close_connection: bool,
}

impl Response {
    pub fn new(close_connection: bool) -> Self {
        Self {
            close_connection,
            ..Self::default()
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Sets the reason phrase verbatim. It is not checked for CR/LF here;
    /// see [`Response::validate`].
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Whether the transport should close the connection after writing this response.
    pub fn close_connection(&self) -> bool {
        self.close_connection
    }

    pub fn set_close_connection(&mut self, on: bool) {
        self.close_connection = on;
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.add_header(CONTENT_TYPE, content_type);
    }

    /// Inserts a header, replacing the value of an existing header with the
    /// exact same name in place. Returns the replaced value.
    pub fn add_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.headers.insert(name.into(), value.into())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Rejects responses whose status message or headers contain CR or LF,
    /// which would otherwise let a caller inject extra header lines.
    pub fn validate(&self) -> Result<(), ResponseError> {
        if self.status_message.as_deref().is_some_and(has_line_break) {
            return Err(ResponseError::LineBreakInStatusMessage);
        }

        for (name, value) in &self.headers {
            if has_line_break(name) {
                return Err(ResponseError::LineBreakInHeaderName(name.clone()));
            }
            if has_line_break(value) {
                return Err(ResponseError::LineBreakInHeaderValue(name.clone()));
            }
        }

        Ok(())
    }

    /// Exact number of bytes [`Response::append_to_buffer_with`] appends.
    pub fn encoded_len(&self, options: &EncodeOptions) -> usize {
        let mut digits = itoa::Buffer::new();

        let status_line = HTTP_VERSION.len()
            + 1
            + digits.format(self.status.as_u16()).len()
            + 1
            + self.reason_phrase(options.reason_phrase).len()
            + LINE_DELIMITER.len();

        let framing = if self.close_connection {
            CONNECTION_CLOSE.len()
        } else {
            let keep_alive = if options.keep_alive_header {
                CONNECTION_KEEP_ALIVE.len()
            } else {
                0
            };
            CONTENT_LENGTH.len()
                + digits.format(self.body.len()).len()
                + LINE_DELIMITER.len()
                + keep_alive
        };

        let headers: usize = self
            .headers
            .iter()
            .map(|(k, v)| k.len() + HEADER_SEPARATOR.len() + v.len() + LINE_DELIMITER.len())
            .sum();

        status_line + framing + headers + LINE_DELIMITER.len() + self.body.len()
    }

    /// Appends the baseline wire form of this response to `dst`.
    pub fn append_to_buffer<B: BufMut>(&self, dst: &mut B) {
        self.append_to_buffer_with(dst, &EncodeOptions::default());
    }

    pub fn append_to_buffer_with<B: BufMut>(&self, dst: &mut B, options: &EncodeOptions) {
        let mut digits = itoa::Buffer::new();

        // status line = "HTTP/1.1 CODE REASON\r\n"
        dst.put_slice(HTTP_VERSION);
        dst.put_u8(b' ');
        dst.put_slice(digits.format(self.status.as_u16()).as_bytes());
        dst.put_u8(b' ');
        dst.put_slice(self.reason_phrase(options.reason_phrase).as_bytes());
        dst.put_slice(LINE_DELIMITER);

        if self.close_connection {
            dst.put_slice(CONNECTION_CLOSE);
        } else {
            dst.put_slice(CONTENT_LENGTH);
            dst.put_slice(digits.format(self.body.len()).as_bytes());
            dst.put_slice(LINE_DELIMITER);

            if options.keep_alive_header {
                dst.put_slice(CONNECTION_KEEP_ALIVE);
            }
        }

        for (name, value) in &self.headers {
            dst.put_slice(name.as_bytes());
            dst.put_slice(HEADER_SEPARATOR);
            dst.put_slice(value.as_bytes());
            dst.put_slice(LINE_DELIMITER);
        }

        dst.put_slice(LINE_DELIMITER);
        dst.put_slice(&self.body);

        tracing::trace!(
            status = self.status.as_u16(),
            headers = self.headers.len(),
            body_len = self.body.len(),
            close = self.close_connection,
            "encoded response"
        );
    }

    /// Encodes into a freshly allocated buffer sized up front.
    pub fn to_bytes(&self, options: &EncodeOptions) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len(options));
        self.append_to_buffer_with(&mut buf, options);
        buf.freeze()
    }

    fn reason_phrase(&self, fallback: ReasonPhrase) -> &str {
        if let Some(message) = &self.status_message {
            return message;
        }

        match fallback {
            ReasonPhrase::Empty => "",
            ReasonPhrase::Canonical => self.status.canonical_reason().unwrap_or_default(),
        }
    }
}

#[inline]
fn has_line_break(text: &str) -> bool {
    memchr::memchr2(b'\r', b'\n', text.as_bytes()).is_some()
}
