//! `SET OF` whose elements keep insertion order on encode.
//!
//! `der::asn1::SetOfVec` sorts its elements; signed attributes are signed
//! over the exact bytes produced in phase one, so the envelope must carry
//! them in the same order. This type writes elements exactly as stored.

use der::{
    DecodeValue, Encode, EncodeValue, FixedTag, Header, Length, Reader, Tag, Writer,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderedSetOf<T>(Vec<T>);

impl<T> OrderedSetOf<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
    #[must_use]
    pub fn as_set_ref(&self) -> OrderedSetRef<'_, T> {
        OrderedSetRef(&self.0)
    }
}

impl<T> From<Vec<T>> for OrderedSetOf<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

/// Borrowed view of an ordered `SET OF`; the single encoder behind
/// [`OrderedSetOf`] and the set serializer.
#[derive(Clone, Copy, Debug)]
pub struct OrderedSetRef<'a, T>(&'a [T]);

impl<'a, T> OrderedSetRef<'a, T> {
    #[must_use]
    pub fn new(items: &'a [T]) -> Self {
        Self(items)
    }
}

impl<T> FixedTag for OrderedSetRef<'_, T> {
    const TAG: Tag = Tag::Set;
}

impl<T: Encode> EncodeValue for OrderedSetRef<'_, T> {
    fn value_len(&self) -> der::Result<Length> {
        self.0
            .iter()
            .try_fold(Length::ZERO, |acc, item| acc + item.encoded_len()?)
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.0.iter().try_for_each(|item| item.encode(writer))
    }
}

impl<T> FixedTag for OrderedSetOf<T> {
    const TAG: Tag = Tag::Set;
}

impl<T: Encode> EncodeValue for OrderedSetOf<T> {
    fn value_len(&self) -> der::Result<Length> {
        self.as_set_ref().value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        self.as_set_ref().encode_value(writer)
    }
}

impl<'a, T: der::Decode<'a>> DecodeValue<'a> for OrderedSetOf<T> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut items = Vec::new();
            while !reader.is_finished() {
                items.push(T::decode(reader)?);
            }
            Ok(Self(items))
        })
    }
}
