use bytes::{Buf, Bytes, BytesMut};
use memchr::memmem;
use once_cell::sync::Lazy;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{RequestError, ResponseError};

use super::{EncodeOptions, Response, REQUEST_DELIMITER};

static FINDER: Lazy<memmem::Finder> = Lazy::new(|| memmem::Finder::new(REQUEST_DELIMITER));

pub const MAX_HEAD_LEN: usize = 8 * 1024;

/// Frames a connection for the response encoder.
///
/// Decoding only splits off raw request heads at the first blank line; they
/// are handed to the handler unparsed. Request bodies are not framed.
#[derive(Clone, Debug)]
pub struct ConnectionCodec {
    options: EncodeOptions,
    max_head_len: usize,
}

impl Default for ConnectionCodec {
    fn default() -> Self {
        Self::new(EncodeOptions::default())
    }
}

impl ConnectionCodec {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            options,
            max_head_len: MAX_HEAD_LEN,
        }
    }

    pub fn with_max_head_len(mut self, max_head_len: usize) -> Self {
        self.max_head_len = max_head_len;
        self
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }
}

impl Decoder for ConnectionCodec {
    type Item = Bytes;

    type Error = RequestError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(position) = FINDER.find(&src[..]) else {
            if src.len() > self.max_head_len {
                return Err(RequestError::HeadTooLarge(self.max_head_len));
            }
            return Ok(None);
        };

        if position > self.max_head_len {
            return Err(RequestError::HeadTooLarge(self.max_head_len));
        }

        let head = src.split_to(position).freeze();
        src.advance(REQUEST_DELIMITER.len());

        Ok(Some(head))
    }
}

impl Encoder<&Response> for ConnectionCodec {
    type Error = ResponseError;

    fn encode(&mut self, response: &Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.options.reject_line_breaks {
            response.validate()?;
        }

        dst.reserve(response.encoded_len(&self.options));
        response.append_to_buffer_with(dst, &self.options);

        Ok(())
    }
}

impl Encoder<Response> for ConnectionCodec {
    type Error = ResponseError;

    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        <Self as Encoder<&Response>>::encode(self, &response, dst)
    }
}
