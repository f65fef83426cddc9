//! Conversion of fixed-width ECDSA signatures to ASN.1 DER.
//!
//! JOSE (and PKCS#11, WebCrypto, ...) serialize ECDSA signatures as the
//! big endian `r` and `s` scalars concatenated, each padded to the size of
//! the curve's order. Most verification APIs instead expect the DER
//! encoding from [RFC5912 Section 6]:
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!   r  INTEGER,
//!   s  INTEGER
//! }
//! ```
//!
//! [RFC5912 Section 6]: https://www.rfc-editor.org/rfc/rfc5912#section-6

use crate::{
    asn1::{self, DerObject},
    CurveId, Error, Result,
};
use alloc::vec::Vec;
use core::fmt;

/// Fixed-width (a.k.a. "raw" or IEEE P1363) ECDSA signature: `r ‖ s`.
///
/// Borrows the input; both halves are unsigned big endian integers of the
/// same width.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct RawSignature<'a> {
    bytes: &'a [u8],
}

impl<'a> RawSignature<'a> {
    /// Parse a raw signature of any scalar width.
    ///
    /// The input must be non-empty and of even length.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() % 2 != 0 {
            tracing::debug!(len = bytes.len(), "invalid raw signature length");
            return Err(Error::InvalidSignatureLength { len: bytes.len() });
        }

        Ok(Self { bytes })
    }

    /// Parse a raw signature made with the given curve, which must be
    /// exactly [`CurveId::signature_len`] bytes.
    pub fn for_curve(curve: CurveId, bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() != curve.signature_len() {
            tracing::debug!(
                curve = curve.name(),
                len = bytes.len(),
                expected = curve.signature_len(),
                "raw signature does not match curve"
            );
            return Err(Error::InvalidSignatureLength { len: bytes.len() });
        }

        Self::new(bytes)
    }

    /// Borrow the signature bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The `r` component, including any leading zeros.
    pub fn r(&self) -> &'a [u8] {
        &self.bytes[..self.scalar_len()]
    }

    /// The `s` component, including any leading zeros.
    pub fn s(&self) -> &'a [u8] {
        &self.bytes[self.scalar_len()..]
    }

    /// Width of each of `r` and `s` in bytes.
    pub fn scalar_len(&self) -> usize {
        self.bytes.len() / 2
    }

    /// Encode as an ASN.1 DER `ECDSA-Sig-Value`.
    pub fn to_der(&self) -> Result<DerSignature> {
        let r = asn1::encode_integer(self.r())?;
        let s = asn1::encode_integer(self.s())?;
        let bytes = DerObject::sequence(&[r, s])?.to_vec();

        tracing::trace!(raw_len = self.bytes.len(), der_len = bytes.len(), "encoded signature");
        Ok(DerSignature { bytes })
    }
}

impl<'a> TryFrom<&'a [u8]> for RawSignature<'a> {
    type Error = Error;

    fn try_from(bytes: &'a [u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for RawSignature<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl fmt::Debug for RawSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSignature")
            .field("r", &self.r())
            .field("s", &self.s())
            .finish()
    }
}

/// ASN.1 DER-encoded ECDSA signature.
#[derive(Clone, Eq, PartialEq)]
pub struct DerSignature {
    bytes: Vec<u8>,
}

#[allow(clippy::len_without_is_empty)]
impl DerSignature {
    /// Borrow this signature as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the length of the signature in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Take the DER bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for DerSignature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<DerSignature> for Vec<u8> {
    fn from(signature: DerSignature) -> Vec<u8> {
        signature.into_vec()
    }
}

impl fmt::Debug for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerSignature(")?;

        for &byte in self.as_ref() {
            write!(f, "{byte:02X}")?;
        }

        write!(f, ")")
    }
}

/// Convert a raw `r ‖ s` signature to ASN.1 DER.
pub fn convert_to_der(raw: &[u8]) -> Result<DerSignature> {
    RawSignature::new(raw)?.to_der()
}
