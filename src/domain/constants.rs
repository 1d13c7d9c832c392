//! Centralized object identifiers and limits used across attribute and
//! envelope construction.
//! Keep this intentionally small; only broadly reused literals should live here.

use der::asn1::ObjectIdentifier;

// === CMS content types ===

/// id-data (1.2.840.113549.1.7.1)
pub const ID_DATA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.1");

/// id-signedData (1.2.840.113549.1.7.2)
pub const ID_SIGNED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");

// === PKCS#9 / ESS / CAdES attribute types ===

/// PKCS#9 contentType attribute (1.2.840.113549.1.9.3)
pub const ID_CONTENT_TYPE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.3");

/// PKCS#9 messageDigest attribute (1.2.840.113549.1.9.4)
pub const ID_MESSAGE_DIGEST: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.4");

/// PKCS#9 signingTime attribute (1.2.840.113549.1.9.5)
pub const ID_SIGNING_TIME: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.5");

/// id-aa-ets-sigPolicyId (1.2.840.113549.1.9.16.2.15)
pub const ID_AA_ETS_SIG_POLICY_ID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.15");

/// id-aa-signingCertificateV2 (1.2.840.113549.1.9.16.2.47)
pub const ID_AA_SIGNING_CERTIFICATE_V2: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.47");

/// id-spq-ets-uri policy qualifier (1.2.840.113549.1.9.16.5.1)
pub const ID_SPQ_ETS_URI: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.5.1");

// === Digest algorithm OIDs ===

/// SHA-256 (2.16.840.1.101.3.4.2.1)
pub const SHA256_OID: &str = "2.16.840.1.101.3.4.2.1";

/// SHA-384 (2.16.840.1.101.3.4.2.2)
pub const SHA384_OID: &str = "2.16.840.1.101.3.4.2.2";

/// SHA-512 (2.16.840.1.101.3.4.2.3)
pub const SHA512_OID: &str = "2.16.840.1.101.3.4.2.3";

// === Signature algorithm OIDs ===

/// sha256WithRSAEncryption (1.2.840.113549.1.1.11).
/// Also the legacy fixed outer SignerInfo signature algorithm.
pub const SHA256_WITH_RSA_OID: &str = "1.2.840.113549.1.1.11";

/// sha384WithRSAEncryption (1.2.840.113549.1.1.12)
pub const SHA384_WITH_RSA_OID: &str = "1.2.840.113549.1.1.12";

/// sha512WithRSAEncryption (1.2.840.113549.1.1.13)
pub const SHA512_WITH_RSA_OID: &str = "1.2.840.113549.1.1.13";

/// ecdsa-with-SHA256 (1.2.840.10045.4.3.2)
pub const ECDSA_WITH_SHA256_OID: &str = "1.2.840.10045.4.3.2";

/// ecdsa-with-SHA384 (1.2.840.10045.4.3.3)
pub const ECDSA_WITH_SHA384_OID: &str = "1.2.840.10045.4.3.3";

/// ecdsa-with-SHA512 (1.2.840.10045.4.3.4)
pub const ECDSA_WITH_SHA512_OID: &str = "1.2.840.10045.4.3.4";

// === Limits ===

/// Maximum issuer links followed when collecting a chain from the CA cache.
pub const MAX_CHAIN_DEPTH: usize = 8;
