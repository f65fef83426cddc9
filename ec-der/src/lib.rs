//! Elliptic curve public key and ECDSA signature encoding.
//!
//! This crate converts the raw building blocks found in JSON Web Keys and
//! JSON Web Signatures into the ASN.1 DER structures expected by most
//! signature verification APIs:
//!
//! - [`PublicKeyMaterial`]: a curve name plus raw affine `x` and `y`
//!   coordinates, encoded as an X.509 `SubjectPublicKeyInfo` ([RFC5480]) in
//!   either DER or PEM form.
//! - [`RawSignature`]: a fixed-width `r ‖ s` ECDSA signature (a.k.a.
//!   IEEE P1363 form), converted into a [`DerSignature`] as specified in
//!   [RFC5912 Section 6]:
//!
//! ```text
//! ECDSA-Sig-Value ::= SEQUENCE {
//!   r  INTEGER,
//!   s  INTEGER
//! }
//! ```
//!
//! The DER encoder in [`asn1`] is self-contained and only implements the
//! handful of universal types these two structures need. Lengths are always
//! encoded in short form, which bounds every value to 127 bytes; this is
//! sufficient for all curves in the [`curve`] registry.
//!
//! ## Usage
//!
#![cfg_attr(feature = "pem", doc = "```")]
#![cfg_attr(not(feature = "pem"), doc = "```ignore")]
//! use ec_der::{PublicKeyMaterial, RawSignature};
//!
//! let fields: [(&str, &[u8]); 4] = [
//!     ("kty", b"EC"),
//!     ("crv", b"P-256"),
//!     ("x", &[0x11; 32]),
//!     ("y", &[0x22; 32]),
//! ];
//!
//! let key = PublicKeyMaterial::from_fields(fields)?;
//!
//! let pem = key.to_pem()?;
//! assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
//!
//! let sig = RawSignature::new(&[0x80; 64])?.to_der()?;
//! assert_eq!(sig.len(), 72);
//! # Ok::<(), ec_der::Error>(())
//! ```
//!
//! Decoding base64url coordinates and parsing the surrounding JSON is left
//! to the caller.
//!
//! [RFC5480]: https://www.rfc-editor.org/rfc/rfc5480
//! [RFC5912 Section 6]: https://www.rfc-editor.org/rfc/rfc5912#section-6

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod asn1;
pub mod curve;

mod error;
mod public_key;
mod signature;

pub use crate::{
    curve::CurveId,
    error::{Error, Result},
    public_key::{KeyFields, PublicKeyMaterial},
    signature::{DerSignature, RawSignature},
};

#[cfg(feature = "pem")]
pub use crate::public_key::build_subject_public_key_info;

pub use crate::signature::convert_to_der;
