//! Minimal ASN.1 DER encoder.
//!
//! Implements just enough of DER to build a `SubjectPublicKeyInfo` and an
//! `ECDSA-Sig-Value`: the `INTEGER`, `BIT STRING`, `OBJECT IDENTIFIER` and
//! `SEQUENCE` universal types.
//!
//! Only the short form of the length octets is supported, i.e. a single
//! byte holding a length of at most 127. Values longer than that are
//! rejected with [`Error::ValueTooLong`] instead of being encoded with a
//! truncated length.

use crate::{Error, Result};
use alloc::vec::Vec;

/// Largest value length expressible with a short-form length octet.
pub const MAX_VALUE_LEN: usize = 0x7F;

/// Bit set in the identifier octet of a constructed encoding.
const CONSTRUCTED: u8 = 0x20;

/// Bit set on every base-128 group of an OID arc except the last.
const CONTINUATION: u8 = 0x80;

/// ASN.1 universal tag numbers
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum Tag {
    /// ASN.1 `INTEGER`
    Integer = 0x02,

    /// ASN.1 `BIT STRING`
    BitString = 0x03,

    /// ASN.1 `OBJECT IDENTIFIER`
    ObjectIdentifier = 0x06,

    /// ASN.1 `SEQUENCE`: lists of other elements
    Sequence = 0x10,
}

impl Tag {
    /// Is this tag always encoded in constructed form?
    pub const fn is_constructed(self) -> bool {
        matches!(self, Tag::Sequence)
    }

    /// Identifier octet for this tag, i.e. `0x30` for `SEQUENCE`.
    pub const fn octet(self) -> u8 {
        if self.is_constructed() {
            self as u8 | CONSTRUCTED
        } else {
            self as u8
        }
    }
}

/// Encode a tag/length/value triple.
///
/// The identifier octet is `tag | 0x20` if `constructed` is set, otherwise
/// `tag` as-is. `value` must be at most [`MAX_VALUE_LEN`] bytes long.
pub fn encode_tlv(tag: u8, constructed: bool, value: &[u8]) -> Result<Vec<u8>> {
    let identifier = if constructed { tag | CONSTRUCTED } else { tag };
    let length = short_length(value.len())?;

    let mut der = Vec::with_capacity(value.len() + 2);
    push_tlv(&mut der, identifier, length, value);
    Ok(der)
}

/// Encode the content octets of an `OBJECT IDENTIFIER` from its arcs.
///
/// The first two arcs are combined into a single subidentifier
/// (`40 * arc0 + arc1`). Every subidentifier is written in base 128, most
/// significant group first, with the high bit set on all but the final
/// group.
pub fn encode_oid(arcs: &[u32]) -> Result<Vec<u8>> {
    let (first, rest) = match arcs {
        [arc0 @ 0..=2, arc1, rest @ ..] if *arc0 == 2 || *arc1 < 40 => {
            let first = arc0
                .checked_mul(40)
                .and_then(|n| n.checked_add(*arc1))
                .ok_or(Error::MalformedOid)?;
            (first, rest)
        }
        _ => return Err(Error::MalformedOid),
    };

    let mut der = Vec::with_capacity(arcs.len() * 2);
    push_base128(&mut der, first);

    for &arc in rest {
        push_base128(&mut der, arc);
    }

    Ok(der)
}

/// Encode an unsigned big endian integer as an ASN.1 `INTEGER`.
///
/// The ASN.1 encoding is signed, so its leading bit must have value 0; it
/// must also be of minimal length (so leading bytes of value 0 must be
/// removed, except if that would contradict the rule about the sign bit).
/// Zero encodes as a single `0x00` byte.
pub fn encode_integer(bytes: &[u8]) -> Result<DerObject> {
    let start = bytes
        .iter()
        .position(|&byte| byte != 0)
        .unwrap_or(bytes.len());
    let trimmed = &bytes[start..];

    let mut value = Vec::with_capacity(trimmed.len() + 1);

    if trimmed.first().map_or(true, |&byte| byte >= 0x80) {
        value.push(0x00);
    }

    value.extend_from_slice(trimmed);
    DerObject::new(Tag::Integer, value)
}

/// A single DER-encoded ASN.1 value.
///
/// The value is guaranteed to fit a short-form length octet, so converting
/// it to bytes cannot fail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DerObject {
    tag: Tag,
    value: Vec<u8>,
}

impl DerObject {
    /// Create a new object from its tag and content octets.
    pub fn new(tag: Tag, value: Vec<u8>) -> Result<Self> {
        short_length(value.len())?;
        Ok(Self { tag, value })
    }

    /// `OBJECT IDENTIFIER` with the given arcs.
    pub fn oid(arcs: &[u32]) -> Result<Self> {
        Self::new(Tag::ObjectIdentifier, encode_oid(arcs)?)
    }

    /// `BIT STRING` holding whole bytes, i.e. with no unused bits.
    pub fn bit_string(bytes: &[u8]) -> Result<Self> {
        let mut value = Vec::with_capacity(bytes.len() + 1);
        value.push(0x00);
        value.extend_from_slice(bytes);
        Self::new(Tag::BitString, value)
    }

    /// `SEQUENCE` of the given objects, in order.
    pub fn sequence(elements: &[DerObject]) -> Result<Self> {
        let len = elements.iter().map(DerObject::encoded_len).sum();
        let mut value = Vec::with_capacity(len);

        for element in elements {
            element.encode_to(&mut value);
        }

        Self::new(Tag::Sequence, value)
    }

    /// Tag of this object.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Content octets of this object.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Length of the complete encoding, including the two header bytes.
    pub fn encoded_len(&self) -> usize {
        self.value.len() + 2
    }

    /// Append the complete encoding of this object to `out`.
    pub fn encode_to(&self, out: &mut Vec<u8>) {
        // Length was checked against `MAX_VALUE_LEN` on construction
        out.reserve(self.encoded_len());
        push_tlv(out, self.tag.octet(), self.value.len() as u8, &self.value);
    }

    /// Serialize the complete encoding of this object.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut der = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut der);
        der
    }
}

/// Append identifier, short-form length and content octets to `out`.
fn push_tlv(out: &mut Vec<u8>, identifier: u8, length: u8, value: &[u8]) {
    out.push(identifier);
    out.push(length);
    out.extend_from_slice(value);
}

/// Short-form length octet for a value of `len` bytes.
fn short_length(len: usize) -> Result<u8> {
    if len > MAX_VALUE_LEN {
        return Err(Error::ValueTooLong { len });
    }

    Ok(len as u8)
}

/// Append a subidentifier in base 128, most significant group first.
fn push_base128(out: &mut Vec<u8>, arc: u32) {
    let groups = (u32::BITS - arc.leading_zeros()).div_ceil(7).max(1);

    for i in (0..groups).rev() {
        let group = ((arc >> (7 * i)) & 0x7F) as u8;

        if i == 0 {
            out.push(group);
        } else {
            out.push(group | CONTINUATION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn tag_octets() {
        assert_eq!(Tag::Integer.octet(), 0x02);
        assert_eq!(Tag::BitString.octet(), 0x03);
        assert_eq!(Tag::ObjectIdentifier.octet(), 0x06);
        assert_eq!(Tag::Sequence.octet(), 0x30);
    }

    #[test]
    fn tlv_primitive_and_constructed() {
        assert_eq!(encode_tlv(0x02, false, &[0x01]).unwrap(), hex!("020101"));
        assert_eq!(encode_tlv(0x10, true, &[]).unwrap(), hex!("3000"));
        assert_eq!(
            encode_tlv(0x10, true, &hex!("020101")).unwrap(),
            hex!("3003020101")
        );
    }

    #[test]
    fn tlv_length_limit() {
        assert_eq!(encode_tlv(0x04, false, &[0xAA; 127]).unwrap()[1], 0x7F);
        assert_eq!(
            encode_tlv(0x04, false, &[0xAA; 128]),
            Err(Error::ValueTooLong { len: 128 })
        );
        assert_eq!(
            DerObject::bit_string(&[0; 127]),
            Err(Error::ValueTooLong { len: 128 })
        );
    }

    #[test]
    fn objects_encode_as_tlv() {
        let integer = encode_integer(&[0x80]).unwrap();
        let oid = DerObject::oid(&[1, 2, 840, 10045, 3, 1, 7]).unwrap();
        let bit_string = DerObject::bit_string(&[0x04; 65]).unwrap();
        let sequence = DerObject::sequence(&[integer.clone(), oid.clone()]).unwrap();
        let empty = DerObject::new(Tag::Sequence, Vec::new()).unwrap();

        for object in [integer, oid, bit_string, sequence, empty] {
            let tag = object.tag();
            let expected = encode_tlv(tag as u8, tag.is_constructed(), object.value()).unwrap();

            assert_eq!(object.to_vec(), expected);
            assert_eq!(object.encoded_len(), expected.len());
        }
    }

    #[test]
    fn oid_ec_public_key() {
        assert_eq!(
            encode_oid(&[1, 2, 840, 10045, 2, 1]).unwrap(),
            hex!("2A8648CE3D0201")
        );
    }

    #[test]
    fn oid_nist_p256() {
        assert_eq!(
            encode_oid(&[1, 2, 840, 10045, 3, 1, 7]).unwrap(),
            hex!("2A8648CE3D030107")
        );
    }

    #[test]
    fn oid_zero_and_wide_arcs() {
        // secp384r1
        assert_eq!(encode_oid(&[1, 3, 132, 0, 34]).unwrap(), hex!("2B81040022"));
        assert_eq!(encode_oid(&[2, 5, 4, 3]).unwrap(), hex!("550403"));
        assert_eq!(encode_oid(&[1, 2, 127]).unwrap(), hex!("2A7F"));
        assert_eq!(encode_oid(&[1, 2, 128]).unwrap(), hex!("2A8100"));
        assert_eq!(encode_oid(&[1, 2, 16384]).unwrap(), hex!("2A818000"));
        assert_eq!(
            encode_oid(&[1, 2, u32::MAX]).unwrap(),
            hex!("2A8FFFFFFF7F")
        );
    }

    #[test]
    fn oid_malformed() {
        assert_eq!(encode_oid(&[]), Err(Error::MalformedOid));
        assert_eq!(encode_oid(&[1]), Err(Error::MalformedOid));
        assert_eq!(encode_oid(&[3, 1]), Err(Error::MalformedOid));
        assert_eq!(encode_oid(&[1, 40]), Err(Error::MalformedOid));
        assert_eq!(encode_oid(&[2, 999]).unwrap(), hex!("8837"));
    }

    #[test]
    fn integer_minimal() {
        assert_eq!(encode_integer(&[0x01]).unwrap().to_vec(), hex!("020101"));
        assert_eq!(encode_integer(&hex!("000001")).unwrap().to_vec(), hex!("020101"));
        assert_eq!(encode_integer(&hex!("7F")).unwrap().to_vec(), hex!("02017F"));
    }

    #[test]
    fn integer_sign_padding() {
        assert_eq!(encode_integer(&hex!("FF")).unwrap().to_vec(), hex!("020200FF"));
        assert_eq!(
            encode_integer(&hex!("0080")).unwrap().to_vec(),
            hex!("02020080")
        );
        assert_eq!(
            encode_integer(&hex!("FFEE")).unwrap().to_vec(),
            hex!("020300FFEE")
        );
    }

    #[test]
    fn integer_zero() {
        assert_eq!(encode_integer(&[]).unwrap().to_vec(), hex!("020100"));
        assert_eq!(encode_integer(&[0; 32]).unwrap().to_vec(), hex!("020100"));
    }

    #[test]
    fn nested_sequence() {
        let seq = DerObject::sequence(&[
            DerObject::oid(&[1, 2, 840, 10045, 2, 1]).unwrap(),
            DerObject::bit_string(&[0x04]).unwrap(),
        ])
        .unwrap();

        assert_eq!(seq.tag(), Tag::Sequence);
        assert_eq!(seq.encoded_len(), 15);
        assert_eq!(seq.to_vec(), hex!("300D 06072A8648CE3D0201 03020004"));
    }
}
