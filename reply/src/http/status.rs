use std::fmt;

use crate::error::InvalidStatusCode;

macro_rules! status_codes {
    (
        $(
            $(#[$docs:meta])*
            ($num:literal, $variant:ident, $phrase:literal);
        )+
    ) => {
        /// Registered HTTP status codes.
        ///
        /// `Unknown` stands for a status that was never set; it renders as `0`
        /// on the wire and has no reason phrase.
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum StatusCode {
            #[default]
            Unknown = 0,
            $(
                $(#[$docs])*
                $variant = $num,
            )+
        }

        impl StatusCode {
            /// Finds the registry entry for `code`, if there is one.
            pub const fn lookup(code: u16) -> Option<StatusCode> {
                match code {
                    $($num => Some(StatusCode::$variant),)+
                    _ => None,
                }
            }

            /// Symbolic name of the entry, e.g. `NotFound`.
            pub const fn name(self) -> &'static str {
                match self {
                    StatusCode::Unknown => "Unknown",
                    $(StatusCode::$variant => stringify!($variant),)+
                }
            }

            /// Reason phrase registered alongside the code.
            pub const fn canonical_reason(self) -> Option<&'static str> {
                match self {
                    StatusCode::Unknown => None,
                    $(StatusCode::$variant => Some($phrase),)+
                }
            }
        }
    };
}

status_codes! {
    /// RFC 7231, 6.2.1
    (100, Continue, "Continue");
    /// RFC 7231, 6.2.2
    (101, SwitchingProtocols, "Switching Protocols");
    /// RFC 2518, 10.1
    (102, Processing, "Processing");
    /// RFC 8297
    (103, EarlyHints, "Early Hints");

    (200, Ok, "OK");
    (201, Created, "Created");
    (202, Accepted, "Accepted");
    (203, NonAuthoritativeInfo, "Non-Authoritative Information");
    (204, NoContent, "No Content");
    (205, ResetContent, "Reset Content");
    /// RFC 7233, 4.1
    (206, PartialContent, "Partial Content");
    /// RFC 4918, 11.1
    (207, MultiStatus, "Multi-Status");
    /// RFC 5842, 7.1
    (208, AlreadyReported, "Already Reported");
    /// RFC 3229, 10.4.1
    (226, ImUsed, "IM Used");

    (300, MultipleChoices, "Multiple Choices");
    (301, MovedPermanently, "Moved Permanently");
    (302, Found, "Found");
    (303, SeeOther, "See Other");
    /// RFC 7232, 4.1
    (304, NotModified, "Not Modified");
    (305, UseProxy, "Use Proxy");
    (307, TemporaryRedirect, "Temporary Redirect");
    /// RFC 7538, 3
    (308, PermanentRedirect, "Permanent Redirect");

    (400, BadRequest, "Bad Request");
    /// RFC 7235, 3.1
    (401, Unauthorized, "Unauthorized");
    (402, PaymentRequired, "Payment Required");
    (403, Forbidden, "Forbidden");
    (404, NotFound, "Not Found");
    (405, MethodNotAllowed, "Method Not Allowed");
    (406, NotAcceptable, "Not Acceptable");
    /// RFC 7235, 3.2
    (407, ProxyAuthRequired, "Proxy Authentication Required");
    (408, RequestTimeout, "Request Timeout");
    (409, Conflict, "Conflict");
    (410, Gone, "Gone");
    (411, LengthRequired, "Length Required");
    /// RFC 7232, 4.2
    (412, PreconditionFailed, "Precondition Failed");
    (413, RequestEntityTooLarge, "Request Entity Too Large");
    (414, RequestUriTooLong, "Request URI Too Long");
    (415, UnsupportedMediaType, "Unsupported Media Type");
    /// RFC 7233, 4.4
    (416, RequestedRangeNotSatisfiable, "Requested Range Not Satisfiable");
    (417, ExpectationFailed, "Expectation Failed");
    /// RFC 7168, 2.3.3
    (418, Teapot, "I'm a teapot");
    /// RFC 7540, 9.1.2
    (421, MisdirectedRequest, "Misdirected Request");
    /// RFC 4918, 11.2
    (422, UnprocessableEntity, "Unprocessable Entity");
    (423, Locked, "Locked");
    (424, FailedDependency, "Failed Dependency");
    /// RFC 8470, 5.2
    (425, TooEarly, "Too Early");
    (426, UpgradeRequired, "Upgrade Required");
    /// RFC 6585
    (428, PreconditionRequired, "Precondition Required");
    (429, TooManyRequests, "Too Many Requests");
    (431, RequestHeaderFieldsTooLarge, "Request Header Fields Too Large");
    /// RFC 7725, 3
    (451, UnavailableForLegalReasons, "Unavailable For Legal Reasons");

    (500, InternalServerError, "Internal Server Error");
    (501, NotImplemented, "Not Implemented");
    (502, BadGateway, "Bad Gateway");
    (503, ServiceUnavailable, "Service Unavailable");
    (504, GatewayTimeout, "Gateway Timeout");
    (505, HttpVersionNotSupported, "HTTP Version Not Supported");
    /// RFC 2295, 8.1
    (506, VariantAlsoNegotiates, "Variant Also Negotiates");
    /// RFC 4918, 11.5
    (507, InsufficientStorage, "Insufficient Storage");
    /// RFC 5842, 7.2
    (508, LoopDetected, "Loop Detected");
    /// RFC 2774, 7
    (510, NotExtended, "Not Extended");
    /// RFC 6585, 6
    (511, NetworkAuthenticationRequired, "Network Authentication Required");
}

impl StatusCode {
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub const fn is_informational(self) -> bool {
        matches!(self.as_u16(), 100..=199)
    }

    pub const fn is_success(self) -> bool {
        matches!(self.as_u16(), 200..=299)
    }

    pub const fn is_redirection(self) -> bool {
        matches!(self.as_u16(), 300..=399)
    }

    pub const fn is_client_error(self) -> bool {
        matches!(self.as_u16(), 400..=499)
    }

    pub const fn is_server_error(self) -> bool {
        matches!(self.as_u16(), 500..=599)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_reason() {
            Some(reason) => write!(f, "{} {reason}", self.as_u16()),
            None => write!(f, "{}", self.as_u16()),
        }
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = InvalidStatusCode;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        StatusCode::lookup(code).ok_or(InvalidStatusCode(code))
    }
}

impl TryFrom<StatusCode> for ::http::StatusCode {
    type Error = InvalidStatusCode;

    fn try_from(code: StatusCode) -> Result<Self, Self::Error> {
        ::http::StatusCode::from_u16(code.as_u16()).map_err(|_| InvalidStatusCode(code.as_u16()))
    }
}

impl TryFrom<::http::StatusCode> for StatusCode {
    type Error = InvalidStatusCode;

    fn try_from(code: ::http::StatusCode) -> Result<Self, Self::Error> {
        StatusCode::try_from(code.as_u16())
    }
}
