/// Serde helper functions for custom serialization/deserialization
/// Check if u64 is zero (for skip_serializing_if)
pub const fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

/// Check if usize is zero (for skip_serializing_if)
pub const fn is_zero_usize(value: &usize) -> bool {
    *value == 0
}

/// Check if bool is false (for skip_serializing_if)
pub const fn is_false(value: &bool) -> bool {
    !*value
}
