//! Platform-independent float canonicalization.
//!
//! A finite `f64` is rendered as `<sign><exponent>:<mantissa bits>`. The
//! magnitude is scaled by powers of two into `(0.5, 1]`, the exponent is the
//! number of halvings (negative for doublings), and the mantissa is emitted
//! one bit at a time until the remaining fraction is exactly zero. Every
//! step is an exact binary operation, so the result never depends on how a
//! platform formats floats.
//!
//! ```text
//!  1.0   -> +0:1
//!  2.0   -> +1:1
//!  0.75  -> +0:011
//! -1.5   -> -1:011
//!  0.0   -> +0:
//! ```

use crate::error::{FloatGuard, ObjectHashError, Result};

/// Hard upper bound on the canonical string length.
///
/// A finite double never comes close; reaching it means the expansion did
/// not terminate.
pub const MAX_NORMALIZED_LEN: usize = 1000;

/// Canonical ASCII encoding of `f`, the payload hashed under the float tag.
///
/// Both zeros map to `+0:`.
pub fn normalize(f: f64) -> Result<String> {
    if !f.is_finite() {
        return Err(reject(f, FloatGuard::NotFinite));
    }
    if f == 0.0 {
        return Ok("+0:".to_string());
    }

    let original = f;
    let mut out = String::with_capacity(64);
    let mut f = f;
    if f < 0.0 {
        out.push('-');
        f = -f;
    } else {
        out.push('+');
    }

    let mut exponent: i32 = 0;
    while f > 1.0 {
        f /= 2.0;
        exponent += 1;
    }
    while f <= 0.5 {
        f *= 2.0;
        exponent -= 1;
    }
    out.push_str(&exponent.to_string());
    out.push(':');

    if !(f > 0.5 && f <= 1.0) {
        return Err(reject(original, FloatGuard::MagnitudeOutOfRange));
    }

    while f != 0.0 {
        if f >= 1.0 {
            out.push('1');
            f -= 1.0;
        } else {
            out.push('0');
        }
        if f >= 1.0 {
            return Err(reject(original, FloatGuard::MantissaOverflow));
        }
        if out.len() >= MAX_NORMALIZED_LEN {
            return Err(reject(original, FloatGuard::TooLong));
        }
        f *= 2.0;
    }

    Ok(out)
}

fn reject(value: f64, guard: FloatGuard) -> ObjectHashError {
    tracing::debug!(value, %guard, "float normalization rejected input");
    ObjectHashError::FloatNormalization { value, guard }
}
