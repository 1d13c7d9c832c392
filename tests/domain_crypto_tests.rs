mod common;

use cades_signer::domain::crypto::DigestBytesError;
use cades_signer::{
    DigestBytes, HashAlgorithm, RawSignature, SignerAlgorithm, SignerCertificate, SigningError,
};

#[test]
fn digest_bytes_happy_path() {
    let bytes = vec![0xAA; HashAlgorithm::Sha256.digest_size()];
    let d = DigestBytes::new(HashAlgorithm::Sha256, bytes.clone()).expect("valid size");
    assert_eq!(d.as_slice(), &bytes[..]);
    assert_eq!(d.algorithm(), HashAlgorithm::Sha256);
}

#[test]
fn digest_bytes_length_mismatch() {
    let bytes = vec![0xAA; 10];
    let err = DigestBytes::new(HashAlgorithm::Sha256, bytes).unwrap_err();
    assert!(matches!(err, DigestBytesError::LengthMismatch { .. }));
    assert!(matches!(
        SigningError::from(err),
        SigningError::InvalidDigest(_)
    ));
}

#[test]
fn raw_signature_wrapper() {
    let sig = RawSignature::new(vec![1, 2, 3, 4]).unwrap();
    assert_eq!(sig.as_slice(), &[1, 2, 3, 4]);
    assert_eq!(format!("{sig:?}"), "RawSignature(len=4)");
    assert!(matches!(
        RawSignature::new(Vec::new()).unwrap_err(),
        SigningError::MissingInput(_)
    ));
}

#[test]
fn certificate_loads_from_pem_and_der_alike() {
    let from_pem = SignerCertificate::load(&common::fixture_bytes("signer.pem")).unwrap();
    let from_der = SignerCertificate::load(&common::fixture_bytes("signer.der")).unwrap();
    assert_eq!(from_pem, from_der);
    assert!(!from_pem.is_self_issued());
    assert_eq!(from_pem.as_der(), common::fixture_bytes("signer.der").as_slice());
}

#[test]
fn garbage_certificate_is_encoding_error() {
    let err = SignerCertificate::from_der(&[0x30, 0x03, 0x02, 0x01, 0x00]).unwrap_err();
    assert!(matches!(err, SigningError::CertificateEncoding(_)));
}

#[test]
fn suite_digest_sizes_follow_hash() {
    for algo in SignerAlgorithm::ALL {
        let hash = HashAlgorithm::from_oid(algo.digest_oid()).unwrap();
        assert_eq!(hash.digest(b"abc").len(), hash.digest_size(), "{algo}");
    }
}
