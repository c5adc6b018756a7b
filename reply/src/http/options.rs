/// What goes after the status code when no status message was set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonPhrase {
    /// Leave the reason phrase empty: `HTTP/1.1 200 \r\n`.
    #[default]
    Empty,
    /// Use the registry phrase for the code, if it has one.
    Canonical,
}

/// Knobs for [`Response::append_to_buffer_with`](super::Response::append_to_buffer_with).
///
/// The default encodes exactly the baseline wire format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    pub reason_phrase: ReasonPhrase,
    /// Emit `Connection: Keep-Alive` after `Content-Length` on persistent responses.
    pub keep_alive_header: bool,
    /// Refuse to encode responses carrying CR or LF in emitted text.
    pub reject_line_breaks: bool,
}

impl EncodeOptions {
    pub fn hardened() -> Self {
        Self {
            reject_line_breaks: true,
            ..Self::default()
        }
    }
}
