/// Layout of the packed 32-bit measurement classification word.
///
/// The evaluator treats the comparison value as opaque; this module
/// records where the embedding application packs the fields it filters
/// on, so chains, patterns, and ignore masks can be composed without
/// magic numbers.
///
/// Word layout:
/// - bits 0-7   base measurement type
/// - bits 8-15  extended (sub) type, meaning scoped by the base type
/// - bits 26-28 timestamp encoding
///
/// The remaining bits carry flags owned by the transport layer and are
/// normally covered by a chain's `ignore_mask`.

/// Base measurement type field (bits 0-7).
pub const MASK_BASE_TYPE: u32 = 0x0000_00FF;

/// Extended measurement type field (bits 8-15).
pub const MASK_EXT_TYPE: u32 = 0x0000_FF00;

/// Shift of the extended type field.
pub const EXT_TYPE_POS: u32 = 8;

/// Base and extended type fields together.
pub const MASK_FULL_TYPE: u32 = MASK_BASE_TYPE | MASK_EXT_TYPE;

/// Timestamp encoding field (bits 26-28).
pub const MASK_TIMESTAMP: u32 = 0x1C00_0000;

/// Shift of the timestamp encoding field.
pub const TIMESTAMP_POS: u32 = 26;

/// Base measurement types used by the bundled chains and tests.
pub mod base_type {
    pub const UNDEFINED: u32 = 0x00;
    pub const ACCELERATION: u32 = 0x01;
    pub const LIGHT: u32 = 0x02;
    pub const PRESSURE: u32 = 0x03;
    pub const TEMPERATURE: u32 = 0x04;
    pub const HUMIDITY: u32 = 0x05;
}

/// Extended types for [`base_type::TEMPERATURE`].
pub mod ext_temperature {
    pub const AMBIENT: u32 = 0x00;
    pub const DIE: u32 = 0x01;
}

/// Timestamp encodings.
pub mod timestamp {
    pub const NONE: u32 = 0x00;
    pub const EPOCH_32: u32 = 0x01;
    pub const EPOCH_64: u32 = 0x02;
    pub const UPTIME_MS_32: u32 = 0x03;
}

/// Pack base type, extended type, and timestamp encoding into a
/// classification word. Out-of-range inputs are truncated to their
/// fields.
pub const fn classify(base: u32, ext: u32, ts: u32) -> u32 {
    (base & MASK_BASE_TYPE)
        | ((ext << EXT_TYPE_POS) & MASK_EXT_TYPE)
        | ((ts << TIMESTAMP_POS) & MASK_TIMESTAMP)
}

/// Extract the base type field.
pub const fn base_type_of(value: u32) -> u32 {
    value & MASK_BASE_TYPE
}

/// Extract the extended type field.
pub const fn ext_type_of(value: u32) -> u32 {
    (value & MASK_EXT_TYPE) >> EXT_TYPE_POS
}

/// Extract the timestamp encoding field.
pub const fn timestamp_of(value: u32) -> u32 {
    (value & MASK_TIMESTAMP) >> TIMESTAMP_POS
}
