//! Elliptic curve public keys encoded as X.509 `SubjectPublicKeyInfo`.
//!
//! Implements the `id-ecPublicKey` form described in [RFC5480 Section 2]:
//!
//! ```text
//! SubjectPublicKeyInfo  ::=  SEQUENCE  {
//!   algorithm         AlgorithmIdentifier,
//!   subjectPublicKey  BIT STRING
//! }
//!
//! AlgorithmIdentifier  ::=  SEQUENCE  {
//!   algorithm   OBJECT IDENTIFIER,   -- id-ecPublicKey
//!   parameters  OBJECT IDENTIFIER    -- namedCurve
//! }
//! ```
//!
//! The `subjectPublicKey` is always an uncompressed SEC1 point.
//!
//! [RFC5480 Section 2]: https://www.rfc-editor.org/rfc/rfc5480#section-2

use crate::{
    asn1::DerObject,
    curve::{self, CurveId, EC_PUBLIC_KEY_OID},
    Error, Result,
};
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "pem")]
use {alloc::string::String, pem_rfc7468::LineEnding};

/// PEM type label of a `SubjectPublicKeyInfo` document.
#[cfg(feature = "pem")]
const PEM_LABEL: &str = "PUBLIC KEY";

/// SEC1 tag byte of an uncompressed point.
const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Unvalidated key fields, as found in a JSON Web Key.
///
/// Coordinates are the raw big endian bytes (i.e. already decoded from
/// base64url). Use [`PublicKeyMaterial::new`] to validate them.
#[derive(Copy, Clone, Default)]
pub struct KeyFields<'a> {
    /// Curve name (`crv`).
    pub crv: Option<&'a str>,

    /// Affine x-coordinate (`x`).
    pub x: &'a [u8],

    /// Affine y-coordinate (`y`).
    pub y: &'a [u8],

    /// Private scalar (`d`). Its presence alone makes the key invalid here.
    pub d: Option<&'a [u8]>,
}

impl fmt::Debug for KeyFields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFields")
            .field("crv", &self.crv)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("d", &self.d.map(|_| ".."))
            .finish()
    }
}

/// Validated elliptic curve public key: a supported curve and both affine
/// coordinates of exactly the curve's size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKeyMaterial {
    curve: CurveId,
    x: Vec<u8>,
    y: Vec<u8>,
}

impl PublicKeyMaterial {
    /// Validate key fields.
    ///
    /// Checks are made in this order: no private scalar, a curve name is
    /// present, the curve is enabled, and both coordinates have the curve's
    /// size.
    pub fn new(fields: KeyFields<'_>) -> Result<Self> {
        if fields.d.is_some() {
            tracing::debug!("rejecting key data containing a private scalar");
            return Err(Error::PrivateKeyNotAllowed);
        }

        let crv = match fields.crv {
            Some(crv) if !crv.is_empty() => crv,
            _ => return Err(Error::MissingCurve),
        };

        let curve = curve::lookup(crv)?;
        let expected = curve.coordinate_len();

        if fields.x.len() != expected || fields.y.len() != expected {
            tracing::debug!(
                curve = curve.name(),
                expected,
                x = fields.x.len(),
                y = fields.y.len(),
                "coordinate length mismatch"
            );

            return Err(Error::CoordinateLengthMismatch {
                expected,
                x: fields.x.len(),
                y: fields.y.len(),
            });
        }

        Ok(Self {
            curve,
            x: fields.x.to_vec(),
            y: fields.y.to_vec(),
        })
    }

    /// Validate key fields given as `(name, value)` pairs, e.g. the members
    /// of a JSON Web Key with `x` and `y` already decoded.
    ///
    /// `crv`, `x`, `y` and `d` are recognized; any other field (`kty`, `kid`,
    /// `use`, ...) is ignored. A `crv` which is not valid UTF-8 is treated
    /// as an unknown curve.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<[u8]>,
    {
        let mut crv = None;
        let mut x = None;
        let mut y = None;
        let mut has_d = false;

        for (name, value) in fields {
            match name.as_ref() {
                "crv" => crv = Some(value.as_ref().to_vec()),
                "x" => x = Some(value.as_ref().to_vec()),
                "y" => y = Some(value.as_ref().to_vec()),
                "d" => has_d = true,
                _ => (),
            }
        }

        if has_d {
            tracing::debug!("rejecting key data containing a private scalar");
            return Err(Error::PrivateKeyNotAllowed);
        }

        let crv = crv
            .as_deref()
            .map(core::str::from_utf8)
            .transpose()
            .map_err(|_| {
                tracing::debug!("curve name is not valid UTF-8");
                Error::UnsupportedCurve { reserved: false }
            })?;

        Self::new(KeyFields {
            crv,
            x: x.as_deref().unwrap_or_default(),
            y: y.as_deref().unwrap_or_default(),
            d: None,
        })
    }

    /// Curve this key is on.
    pub fn curve(&self) -> CurveId {
        self.curve
    }

    /// Big endian affine x-coordinate.
    pub fn x(&self) -> &[u8] {
        &self.x
    }

    /// Big endian affine y-coordinate.
    pub fn y(&self) -> &[u8] {
        &self.y
    }

    /// SEC1 uncompressed point encoding: `0x04 ‖ x ‖ y`.
    pub fn to_uncompressed_point(&self) -> Vec<u8> {
        let mut point = Vec::with_capacity(1 + self.x.len() + self.y.len());
        point.push(UNCOMPRESSED_POINT_TAG);
        point.extend_from_slice(&self.x);
        point.extend_from_slice(&self.y);
        point
    }

    /// Serialize as an ASN.1 DER `SubjectPublicKeyInfo`.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let algorithm = DerObject::sequence(&[
            DerObject::oid(EC_PUBLIC_KEY_OID)?,
            DerObject::oid(self.curve.oid_arcs())?,
        ])?;

        let subject_public_key = DerObject::bit_string(&self.to_uncompressed_point())?;
        let der = DerObject::sequence(&[algorithm, subject_public_key])?.to_vec();

        tracing::trace!(curve = self.curve.name(), len = der.len(), "encoded SPKI");
        Ok(der)
    }

    /// Serialize as a PEM-encoded `SubjectPublicKeyInfo` ("PUBLIC KEY")
    /// document, with base64 wrapped at 64 columns and `\n` line endings.
    #[cfg(feature = "pem")]
    pub fn to_pem(&self) -> Result<String> {
        let der = self.to_der()?;
        Ok(pem_rfc7468::encode_string(PEM_LABEL, LineEnding::LF, &der)?)
    }
}

impl TryFrom<KeyFields<'_>> for PublicKeyMaterial {
    type Error = Error;

    fn try_from(fields: KeyFields<'_>) -> Result<Self> {
        Self::new(fields)
    }
}

/// Encode a public key as a PEM `SubjectPublicKeyInfo` document.
#[cfg(feature = "pem")]
pub fn build_subject_public_key_info(key: &PublicKeyMaterial) -> Result<String> {
    key.to_pem()
}
