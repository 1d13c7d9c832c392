pub mod algorithm;
pub mod constants;
pub mod crypto;
pub mod pkcs7;
pub mod policy;
pub mod time;
