//! Helpers shared by Android app code.
//!
//! - `refcode`: packs an item index and a page reference into one request code
//! - `check`: guard checks that log why they failed
//! - `serializer`: flat string/int array serialization
//! - `debug`: the logging collaborator every helper takes
//! - `config`: TOML settings for the above

pub mod check;
pub mod config;
pub mod debug;
pub mod error;
pub mod refcode;
pub mod serializer;

pub use check::{Check, Checkable};
pub use config::Config;
pub use debug::{DebugLog, DebugMode};
pub use error::{Error, Result};
pub use refcode::{
    decode, decode_item_index, decode_page_ref_number, encode, encode_request_code, DecodedFields,
    EncodedCode, RefCodeError, ReferenceCodec,
};
pub use serializer::{SerializerError, StringArraySerializer};
