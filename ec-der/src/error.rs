//! Error types

use core::fmt;

/// Result type with the `ec-der` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Encoding errors.
///
/// Every error is raised before any output is produced: a call either
/// returns a complete document or one of these.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Key material contains a private scalar (the `d` field).
    PrivateKeyNotAllowed,

    /// No curve name was given.
    MissingCurve,

    /// Curve is not supported.
    UnsupportedCurve {
        /// The curve is known to the registry but encoding keys for it is
        /// not enabled. `false` for names the registry doesn't know at all.
        reserved: bool,
    },

    /// Raw signature is empty, of odd length, or doesn't match the curve.
    InvalidSignatureLength {
        /// Length of the rejected input in bytes.
        len: usize,
    },

    /// `x` or `y` is not exactly the curve's coordinate size.
    CoordinateLengthMismatch {
        /// Coordinate size required by the curve.
        expected: usize,

        /// Length of the provided `x` coordinate.
        x: usize,

        /// Length of the provided `y` coordinate.
        y: usize,
    },

    /// Object identifier has fewer than two arcs or an out-of-range root.
    MalformedOid,

    /// A DER value exceeds the 127 bytes a short-form length can describe.
    ValueTooLong {
        /// Length of the value which could not be encoded.
        len: usize,
    },

    /// PEM encoding failed.
    #[cfg(feature = "pem")]
    Pem,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PrivateKeyNotAllowed => f.write_str("key data must be for a public key"),
            Error::MissingCurve => f.write_str("crv not set"),
            Error::UnsupportedCurve { reserved: false } => f.write_str("unrecognised EC curve"),
            Error::UnsupportedCurve { reserved: true } => f.write_str("unsupported EC curve"),
            Error::InvalidSignatureLength { len } => {
                write!(f, "invalid raw signature length: {len} bytes")
            }
            Error::CoordinateLengthMismatch { expected, x, y } => write!(
                f,
                "coordinate length mismatch: expected {expected} bytes, got x={x} y={y}"
            ),
            Error::MalformedOid => f.write_str("malformed object identifier"),
            Error::ValueTooLong { len } => write!(
                f,
                "DER value of {len} bytes exceeds short-form length limit"
            ),
            #[cfg(feature = "pem")]
            Error::Pem => f.write_str("PEM encoding error"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "pem")]
impl From<pem_rfc7468::Error> for Error {
    fn from(_: pem_rfc7468::Error) -> Error {
        Error::Pem
    }
}
