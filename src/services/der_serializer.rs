//! DER `SET OF` serialization preserving insertion order.

use std::io::Write;

use der::Encode;

use crate::domain::pkcs7::OrderedSetRef;
use crate::infra::error::{SigningError, SigningResult};

/// Encode `values` as a DER SET, elements in the order given.
pub fn serialize_set<T: Encode>(values: &[T]) -> SigningResult<Vec<u8>> {
    OrderedSetRef::new(values)
        .to_der()
        .map_err(|e| SigningError::Serialization(format!("Failed to encode SET: {e}")))
}

/// Like [`serialize_set`], writing into `sink`; returns the byte count.
pub fn serialize_set_to<T: Encode, W: Write>(values: &[T], sink: &mut W) -> SigningResult<usize> {
    let der = serialize_set(values)?;
    sink.write_all(&der)
        .and_then(|()| sink.flush())
        .map_err(|e| SigningError::Serialization(format!("Failed to write SET: {e}")))?;
    Ok(der.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use der::asn1::OctetString;
    use std::io;

    #[test]
    fn keeps_insertion_order() {
        let values = [
            OctetString::new(vec![0x03]).unwrap(),
            OctetString::new(vec![0x01, 0x02]).unwrap(),
        ];
        let der = serialize_set(&values).unwrap();
        assert_eq!(
            der,
            vec![0x31, 0x07, 0x04, 0x01, 0x03, 0x04, 0x02, 0x01, 0x02]
        );
    }

    #[test]
    fn writes_to_sink() {
        let values = [OctetString::new(vec![0xFF]).unwrap()];
        let mut sink = Vec::new();
        let written = serialize_set_to(&values, &mut sink).unwrap();
        assert_eq!(written, 5);
        assert_eq!(sink, serialize_set(&values).unwrap());
    }

    struct BrokenSink;

    impl io::Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_is_serialization_error() {
        let values = [OctetString::new(vec![0x00]).unwrap()];
        let err = serialize_set_to(&values, &mut BrokenSink).unwrap_err();
        assert!(matches!(err, SigningError::Serialization(_)));
    }
}
