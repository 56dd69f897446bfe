//! Reference-code packing for Android request codes
//!
//! Packs an item index and a `"<page>/<count>"` reference into one decimal
//! integer that can travel as an activity-result request code, and unpacks it
//! again without any external schema.
//!
//! # Layout
//!
//! ```text
//!   m | index (m digits) | page (m digits) | count (m digits)
//! ```
//!
//! `m` (the multiplier) is the digit count of the largest of the three fields,
//! stored as the leading digit so the decoder knows where to cut. Each field is
//! zero-padded to `m` digits. With `m <= 9` the code has at most 28 digits, so
//! it is carried as a `u128`; only small triples fit an `i32` request code
//! (see [`EncodedCode::to_request_code`]).
//!
//! Zero has a width of one digit, so `(0, 0, 0)` packs to `1000`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::debug::DebugLog;

const TAG: &str = "ReferenceCodec";

/// Bundle key of the decoded list item index.
pub const KEY_ITEM_INDEX: &str = "index";
/// Bundle key of the decoded page number.
pub const KEY_PAGE_ID: &str = "page";
/// Bundle key of the decoded page count.
pub const KEY_TOTAL_COUNT: &str = "count";

/// Default divider between page number and page count.
pub const DEFAULT_DIVIDER: char = '/';

/// The multiplier is stored as a single decimal digit.
pub const MAX_MULTIPLIER: u8 = 9;

/// One of the three packed fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Index,
    PageId,
    TotalCount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Index => "item index",
            Field::PageId => "page id",
            Field::TotalCount => "total count",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefCodeError {
    #[error("Reference string is empty")]
    EmptyReference,

    #[error("Divider '{divider}' not found in reference string: {reference}")]
    DividerNotFound { reference: String, divider: char },

    #[error("Failed to parse {field} from '{value}'")]
    InvalidNumber { field: Field, value: String },

    #[error("Value {0} needs more than 9 digits")]
    MultiplierOverflow(u32),

    #[error("Multiplier {0} is outside 1..=9")]
    InvalidMultiplier(u8),

    #[error("The {field} {value} does not fit in {width} digits")]
    FieldTooWide { field: Field, value: u32, width: u8 },

    #[error("Encoded value {0} is negative")]
    NegativeCode(i128),

    #[error("Encoded value has {actual} digits, expected at least {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Encoded value {0} does not fit in a 32-bit request code")]
    RequestCodeOverflow(u128),
}

/// A packed reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedCode(u128);

impl EncodedCode {
    pub fn value(&self) -> u128 {
        self.0
    }

    /// The leading digit, i.e. the width of each packed field.
    pub fn multiplier(&self) -> u8 {
        let mut value = self.0;
        while value >= 10 {
            value /= 10;
        }
        value as u8
    }

    pub fn decode(&self) -> Result<DecodedFields, RefCodeError> {
        decode_digits(&self.0.to_string())
    }

    /// Narrow to a platform request code.
    pub fn to_request_code(&self) -> Result<i32, RefCodeError> {
        i32::try_from(self.0).map_err(|_| RefCodeError::RequestCodeOverflow(self.0))
    }
}

impl fmt::Display for EncodedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EncodedCode> for u128 {
    fn from(code: EncodedCode) -> Self {
        code.0
    }
}

impl From<EncodedCode> for i128 {
    fn from(code: EncodedCode) -> Self {
        // At most 28 digits, well inside i128
        code.0 as i128
    }
}

impl TryFrom<i32> for EncodedCode {
    type Error = RefCodeError;

    fn try_from(request_code: i32) -> Result<Self, Self::Error> {
        u128::try_from(request_code)
            .map(EncodedCode)
            .map_err(|_| RefCodeError::NegativeCode(request_code as i128))
    }
}

impl FromStr for EncodedCode {
    type Err = RefCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Validate the layout up front so only decodable codes are constructed
        decode_digits(s)?;
        let value = s.parse::<u128>().map_err(|_| RefCodeError::InvalidNumber {
            field: Field::Index,
            value: s.to_string(),
        })?;
        Ok(EncodedCode(value))
    }
}

/// The three fields recovered from a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecodedFields {
    #[serde(rename = "index")]
    pub index: u32,
    #[serde(rename = "page")]
    pub page_id: u32,
    #[serde(rename = "count")]
    pub total_count: u32,
}

impl DecodedFields {
    /// Rebuild the reference string, e.g. `"1/13"`.
    pub fn page_ref(&self, divider: char) -> String {
        format!("{}{}{}", self.page_id, divider, self.total_count)
    }

    /// The fields keyed by [`KEY_ITEM_INDEX`], [`KEY_PAGE_ID`] and [`KEY_TOTAL_COUNT`].
    pub fn to_map(&self) -> HashMap<&'static str, u32> {
        HashMap::from([
            (KEY_ITEM_INDEX, self.index),
            (KEY_PAGE_ID, self.page_id),
            (KEY_TOTAL_COUNT, self.total_count),
        ])
    }
}

// ============================================================================
// Pure encode / decode
// ============================================================================

/// Number of decimal digits in `value`; zero counts as one digit.
pub fn field_width(value: u32) -> u8 {
    let mut width = 1;
    let mut rest = value / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

/// Width shared by all three fields.
pub fn multiplier(index: u32, page_id: u32, total_count: u32) -> Result<u8, RefCodeError> {
    let max = index.max(page_id).max(total_count);
    let width = field_width(max);
    if width > MAX_MULTIPLIER {
        return Err(RefCodeError::MultiplierOverflow(max));
    }
    Ok(width)
}

/// Pack the three fields at an explicit width.
///
/// Fields wider than `multiplier` are rejected rather than truncated.
pub fn encode(
    page_id: u32,
    total_count: u32,
    index: u32,
    multiplier: u8,
) -> Result<EncodedCode, RefCodeError> {
    if multiplier == 0 || multiplier > MAX_MULTIPLIER {
        return Err(RefCodeError::InvalidMultiplier(multiplier));
    }

    let scale = 10u128.pow(multiplier as u32);
    let mut value = multiplier as u128;
    for (field, field_value) in [
        (Field::Index, index),
        (Field::PageId, page_id),
        (Field::TotalCount, total_count),
    ] {
        if field_width(field_value) > multiplier {
            return Err(RefCodeError::FieldTooWide { field, value: field_value, width: multiplier });
        }
        // Shifting by `scale` is the numeric form of zero-padding to `multiplier` digits
        value = value * scale + field_value as u128;
    }

    Ok(EncodedCode(value))
}

/// Pack `index` together with a reference string such as `"1/13"`.
///
/// Only the first occurrence of `divider` splits the string.
pub fn encode_request_code(
    ref_num: &str,
    index: u32,
    divider: char,
) -> Result<EncodedCode, RefCodeError> {
    if ref_num.is_empty() {
        return Err(RefCodeError::EmptyReference);
    }

    let (page_str, count_str) = ref_num
        .split_once(divider)
        .ok_or_else(|| RefCodeError::DividerNotFound {
            reference: ref_num.to_string(),
            divider,
        })?;

    let page_id = parse_field(Field::PageId, page_str)?;
    let total_count = parse_field(Field::TotalCount, count_str)?;
    let multiplier = multiplier(index, page_id, total_count)?;

    encode(page_id, total_count, index, multiplier)
}

/// Unpack a code produced by [`encode_request_code`] or [`encode`].
pub fn decode(code: i128) -> Result<DecodedFields, RefCodeError> {
    if code < 0 {
        return Err(RefCodeError::NegativeCode(code));
    }
    decode_digits(&code.to_string())
}

/// Decode and rebuild the `"<page>/<count>"` reference.
pub fn decode_page_ref_number(code: i128) -> Result<String, RefCodeError> {
    decode(code).map(|fields| fields.page_ref(DEFAULT_DIVIDER))
}

/// Decode and return only the item index.
pub fn decode_item_index(code: i128) -> Result<u32, RefCodeError> {
    decode(code).map(|fields| fields.index)
}

fn parse_field(field: Field, value: &str) -> Result<u32, RefCodeError> {
    // `u32::from_str` accepts a leading '+', the platform parser does too
    value.parse::<u32>().map_err(|_| RefCodeError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn decode_digits(digits: &str) -> Result<DecodedFields, RefCodeError> {
    let bytes = digits.as_bytes();
    let Some(&first) = bytes.first() else {
        return Err(RefCodeError::LengthMismatch { expected: 4, actual: 0 });
    };
    // Byte slicing below relies on every character being an ASCII digit
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(RefCodeError::InvalidNumber {
            field: Field::Index,
            value: digits.to_string(),
        });
    }

    let multiplier = first - b'0';
    if multiplier == 0 {
        return Err(RefCodeError::InvalidMultiplier(multiplier));
    }

    let width = multiplier as usize;
    let expected = 1 + 3 * width;
    // Digits past the three fields are ignored
    if bytes.len() < expected {
        return Err(RefCodeError::LengthMismatch { expected, actual: bytes.len() });
    }

    let slice = |field: Field, n: usize| {
        let start = 1 + n * width;
        parse_field(field, &digits[start..start + width])
    };

    Ok(DecodedFields {
        index: slice(Field::Index, 0)?,
        page_id: slice(Field::PageId, 1)?,
        total_count: slice(Field::TotalCount, 2)?,
    })
}

// ============================================================================
// Codec with diagnostics
// ============================================================================

/// Reference codec that reports failures through a [`DebugLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceCodec {
    log: DebugLog,
    divider: char,
}

impl ReferenceCodec {
    pub fn new(log: DebugLog) -> Self {
        Self { log, divider: DEFAULT_DIVIDER }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.debug_log()).with_divider(config.divider)
    }

    pub fn with_divider(mut self, divider: char) -> Self {
        self.divider = divider;
        self
    }

    pub fn divider(&self) -> char {
        self.divider
    }

    pub fn encode_request_code(&self, ref_num: &str, index: u32) -> Result<EncodedCode, RefCodeError> {
        let result = encode_request_code(ref_num, index, self.divider);
        if let Err(e) = &result {
            self.log.error(TAG, "encode the request code", "encode_request_code", e);
        }
        result
    }

    pub fn decode(&self, code: i128) -> Result<DecodedFields, RefCodeError> {
        let result = decode(code);
        if let Err(e) = &result {
            self.log.error(
                TAG,
                &format!("get blocks from encoded number {}", code),
                "decode",
                e,
            );
        }
        result
    }

    /// Like [`decode_page_ref_number`] but joined with this codec's divider.
    pub fn decode_page_ref_number(&self, code: i128) -> Result<String, RefCodeError> {
        self.decode(code).map(|fields| fields.page_ref(self.divider))
    }

    pub fn decode_item_index(&self, code: i128) -> Result<u32, RefCodeError> {
        self.decode(code).map(|fields| fields.index)
    }
}

impl Default for ReferenceCodec {
    fn default() -> Self {
        Self::new(DebugLog::default())
    }
}
