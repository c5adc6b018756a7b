use std::io;

#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("status message contains a line break")]
    LineBreakInStatusMessage,
    #[error("header name {0:?} contains a line break")]
    LineBreakInHeaderName(String),
    #[error("value of header {0:?} contains a line break")]
    LineBreakInHeaderValue(String),
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),
    #[error("failed to read request: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a registered status code")]
pub struct InvalidStatusCode(pub u16);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("max_connections must be greater than zero")]
    NoConnections,
}
