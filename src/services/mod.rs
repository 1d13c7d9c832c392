//! Service layer module root.
//! Stateless services for attribute generation and envelope assembly.

pub mod algorithm_resolver;
pub mod attribute_generator;
pub mod der_serializer;
pub mod envelope_builder;
pub mod signed_attributes_builder;

pub use algorithm_resolver::{resolve, AlgorithmResolver, ResolvedSuite};
pub use attribute_generator::{
    AttributeRequest, CadesBesAttributeGenerator, SignedAttributeGenerator,
};
pub use der_serializer::{serialize_set, serialize_set_to};
pub use envelope_builder::{signer_identifier, EnvelopeBuilder};
pub use signed_attributes_builder::{SignedAttributesBuilder, SignedAttributesOutput};
