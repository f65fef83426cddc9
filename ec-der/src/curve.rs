//! Curve registry.
//!
//! Maps JOSE curve names (as found in the `crv` field of a JSON Web Key) to
//! the ASN.1 object identifier naming the curve and the size of its
//! coordinates. The table is a compile-time constant.
//!
//! NIST P-384 and P-521 are listed so that they can be recognized, but are
//! not enabled: looking them up yields [`Error::UnsupportedCurve`] with
//! `reserved` set, where an unknown name leaves it clear.

use crate::{Error, Result};
use core::{fmt, str::FromStr};

/// Object identifier for `id-ecPublicKey` (ANSI X9.62).
///
/// <http://oid-info.com/get/1.2.840.10045.2.1>
pub const EC_PUBLIC_KEY_OID: &[u32] = &[1, 2, 840, 10045, 2, 1];

/// Static description of a named curve.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CurveInfo {
    /// JOSE curve name, e.g. `P-256`.
    pub name: &'static str,

    /// Object identifier in dotted-decimal form.
    pub oid: &'static str,

    /// Object identifier arcs, matching [`CurveInfo::oid`].
    pub oid_arcs: &'static [u32],

    /// Size of a serialized affine coordinate (and of a scalar) in bytes.
    pub coordinate_len: usize,
}

/// The NIST P-256 elliptic curve, a.k.a. prime256v1 (ANSI X9.62) and
/// secp256r1 (SECG).
///
/// <http://oid-info.com/get/1.2.840.10045.3.1.7>
const NIST_P256: CurveInfo = CurveInfo {
    name: "P-256",
    oid: "1.2.840.10045.3.1.7",
    oid_arcs: &[1, 2, 840, 10045, 3, 1, 7],
    coordinate_len: 32,
};

/// The NIST P-384 elliptic curve, a.k.a. secp384r1 (SECG).
const NIST_P384: CurveInfo = CurveInfo {
    name: "P-384",
    oid: "1.3.132.0.34",
    oid_arcs: &[1, 3, 132, 0, 34],
    coordinate_len: 48,
};

/// The NIST P-521 elliptic curve, a.k.a. secp521r1 (SECG).
const NIST_P521: CurveInfo = CurveInfo {
    name: "P-521",
    oid: "1.3.132.0.35",
    oid_arcs: &[1, 3, 132, 0, 35],
    coordinate_len: 66,
};

/// Known curves. Entries without a [`CurveId`] are recognized but disabled.
const REGISTRY: &[(CurveInfo, Option<CurveId>)] = &[
    (NIST_P256, Some(CurveId::NistP256)),
    (NIST_P384, None),
    (NIST_P521, None),
];

/// Curves keys can be encoded for.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum CurveId {
    /// NIST P-256
    NistP256,
}

impl CurveId {
    /// Registry entry for this curve.
    pub const fn info(self) -> &'static CurveInfo {
        match self {
            CurveId::NistP256 => &NIST_P256,
        }
    }

    /// JOSE curve name.
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// Object identifier in dotted-decimal form.
    pub const fn oid(self) -> &'static str {
        self.info().oid
    }

    /// Object identifier arcs.
    pub const fn oid_arcs(self) -> &'static [u32] {
        self.info().oid_arcs
    }

    /// Size of each of the `x` and `y` coordinates in bytes.
    pub const fn coordinate_len(self) -> usize {
        self.info().coordinate_len
    }

    /// Size of a fixed-width `r ‖ s` signature in bytes.
    pub const fn signature_len(self) -> usize {
        self.info().coordinate_len * 2
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveId {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        lookup(name)
    }
}

/// Look up an enabled curve by its JOSE name.
pub fn lookup(name: &str) -> Result<CurveId> {
    match REGISTRY.iter().find(|(info, _)| info.name == name) {
        Some((_, Some(id))) => Ok(*id),
        Some((info, None)) => {
            tracing::debug!(curve = info.name, oid = info.oid, "curve is not enabled");
            Err(Error::UnsupportedCurve { reserved: true })
        }
        None => {
            tracing::debug!(curve = name, "unknown curve");
            Err(Error::UnsupportedCurve { reserved: false })
        }
    }
}

/// Registry entry for a curve name, whether or not it is enabled.
pub fn info(name: &str) -> Option<&'static CurveInfo> {
    REGISTRY
        .iter()
        .map(|(info, _)| info)
        .find(|info| info.name == name)
}
