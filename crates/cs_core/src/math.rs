//! Integer math helpers for deterministic simulation.
//!
//! The engine never touches floating point. Every quantity is an `i32` and
//! every division truncates toward zero, matching the arithmetic the data
//! tables were tuned against.

/// Absolute value.
#[must_use]
pub const fn abs(v: i32) -> i32 {
    if v >= 0 {
        v
    } else {
        -v
    }
}

/// Clamp `v` into `[min, max]`.
///
/// Unlike [`i32::clamp`] this never panics when `min > max`: the lower bound
/// is checked first.
#[must_use]
pub const fn clamp(v: i32, min: i32, max: i32) -> i32 {
    if v <= min {
        min
    } else if v >= max {
        max
    } else {
        v
    }
}

/// Sign of `v` as -1, 0 or 1.
#[must_use]
pub const fn sign(v: i32) -> i32 {
    if v > 0 {
        1
    } else if v < 0 {
        -1
    } else {
        0
    }
}

/// Whether `v` lies in the half-open range `[min, max)`.
#[must_use]
pub const fn in_range(v: i32, min: i32, max: i32) -> bool {
    v >= min && v < max
}

/// Smaller of two values.
#[must_use]
pub const fn min(a: i32, b: i32) -> i32 {
    if a <= b {
        a
    } else {
        b
    }
}

/// Larger of two values.
#[must_use]
pub const fn max(a: i32, b: i32) -> i32 {
    if a >= b {
        a
    } else {
        b
    }
}

/// Integer division rounding up. Only valid for positive arguments.
#[must_use]
pub const fn div_round_up(n: i32, d: i32) -> i32 {
    (n + (d - 1)) / d
}

/// Sign-extend the high nibble of a byte: `int8(v & 0xf0) / 16`.
#[must_use]
pub const fn signed_high_nibble(v: u8) -> i32 {
    ((v & 0xf0) as i8) as i32 / 16
}

/// Sign-extend the low nibble of a byte: `int8(v * 16) / 16`.
#[must_use]
pub const fn signed_low_nibble(v: u8) -> i32 {
    (v.wrapping_mul(16) as i8) as i32 / 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-5, 0, 255), 0);
        assert_eq!(clamp(300, 0, 255), 255);
        assert_eq!(clamp(17, 0, 255), 17);
        // Lower bound wins on an inverted range.
        assert_eq!(clamp(5, 10, 0), 10);
    }

    #[test]
    fn test_sign_and_abs() {
        assert_eq!(sign(-7), -1);
        assert_eq!(sign(0), 0);
        assert_eq!(sign(3), 1);
        assert_eq!(abs(-7), 7);
        assert_eq!(abs(7), 7);
    }

    #[test]
    fn test_in_range_is_half_open() {
        assert!(in_range(0, 0, 16));
        assert!(in_range(15, 0, 16));
        assert!(!in_range(16, 0, 16));
        assert!(!in_range(-1, 0, 16));
    }

    #[test]
    fn test_truncating_division() {
        // Division truncates toward zero, not toward negative infinity.
        assert_eq!(-7 / 2, -3);
        assert_eq!(div_round_up(7, 2), 4);
        assert_eq!(div_round_up(8, 2), 4);
    }

    #[test]
    fn test_nibble_sign_extension() {
        assert_eq!(signed_high_nibble(0x70), 7);
        assert_eq!(signed_high_nibble(0xf0), -1);
        assert_eq!(signed_high_nibble(0x80), -8);
        assert_eq!(signed_low_nibble(0x07), 7);
        assert_eq!(signed_low_nibble(0x0f), -1);
        assert_eq!(signed_low_nibble(0xf8), -8);
    }
}
