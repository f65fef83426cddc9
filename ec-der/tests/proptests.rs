//! Property-based tests for the `ec-der` crate.

use der::{
    asn1::{ObjectIdentifier, SequenceOf, UintRef},
    Encode,
};
use ec_der::{
    asn1::{self, Tag},
    convert_to_der,
};
use proptest::{collection, prelude::*};

/// Number of bytes left after stripping leading zeros.
fn significant_len(bytes: &[u8]) -> usize {
    bytes.iter().skip_while(|&&byte| byte == 0).count()
}

/// Raw signatures with scalars of 1 to 28 bytes, short enough that the
/// whole `ECDSA-Sig-Value` fits a short-form length.
fn raw_signature() -> impl Strategy<Value = Vec<u8>> {
    (1usize..=28).prop_flat_map(|n| collection::vec(any::<u8>(), 2 * n))
}

proptest! {
    #[test]
    fn integer_length_bounds(bytes in collection::vec(any::<u8>(), 0..100)) {
        let k = significant_len(&bytes);
        let integer = asn1::encode_integer(&bytes).unwrap();
        let value = integer.value();

        prop_assert_eq!(integer.tag(), Tag::Integer);
        prop_assert!(value.len() == k.max(1) || value.len() == k + 1);
        prop_assert!(value[0] < 0x80);

        // Minimal: a leading zero byte only ever serves as a sign byte
        if value.len() > 1 {
            prop_assert!(value[0] != 0 || value[1] >= 0x80);
        }
    }

    #[test]
    fn integer_matches_der_crate(bytes in collection::vec(any::<u8>(), 1..64)) {
        let expected = UintRef::new(&bytes).unwrap().to_der().unwrap();
        prop_assert_eq!(asn1::encode_integer(&bytes).unwrap().to_vec(), expected);
    }

    #[test]
    fn signature_structure(raw in raw_signature()) {
        let (r, s) = raw.split_at(raw.len() / 2);
        let r_len = asn1::encode_integer(r).unwrap().encoded_len();
        let s_len = asn1::encode_integer(s).unwrap().encoded_len();

        let der = convert_to_der(&raw).unwrap();
        let bytes = der.as_bytes();

        prop_assert_eq!(bytes[0], 0x30);
        prop_assert_eq!(usize::from(bytes[1]), bytes.len() - 2);
        prop_assert_eq!(der.len(), 2 + r_len + s_len);
    }

    #[test]
    fn signature_matches_der_crate(raw in raw_signature()) {
        let (r, s) = raw.split_at(raw.len() / 2);

        let mut sequence = SequenceOf::<UintRef<'_>, 2>::new();
        sequence.add(UintRef::new(r).unwrap()).unwrap();
        sequence.add(UintRef::new(s).unwrap()).unwrap();

        let der = convert_to_der(&raw).unwrap();
        let expected = sequence.to_der().unwrap();
        prop_assert_eq!(der.as_bytes(), expected.as_slice());
    }

    #[test]
    fn oid_matches_der_crate(
        root in 0u32..=2,
        second in 0u32..40,
        rest in collection::vec(0u32..=0x0FFF_FFFF, 1..6),
    ) {
        let mut arcs = vec![root, second];
        arcs.extend_from_slice(&rest);

        let dotted = arcs
            .iter()
            .map(|arc| arc.to_string())
            .collect::<Vec<_>>()
            .join(".");
        let expected = ObjectIdentifier::new(&dotted).unwrap();

        prop_assert_eq!(asn1::encode_oid(&arcs).unwrap(), expected.as_bytes());
    }
}
