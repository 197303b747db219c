//! Arbitrary-precision decimal arithmetic for the simulation.
//!
//! Late-game quantities (generator cost bases go up to `50^49`) are far
//! beyond both `f64` and any fixed-point representation, so every currency
//! and amount in the engine is a [`Dec`]. Rounding is always explicit:
//! [`dec_floor`] / [`dec_ceil`] at the points the game rules call for it,
//! never silently.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Pow, ToPrimitive, Zero};

/// The decimal type used for all amounts, currencies and costs.
pub type Dec = BigDecimal;

/// Construct a [`Dec`] from an unsigned integer.
#[inline]
pub fn dec(v: u64) -> Dec {
    Dec::from(v)
}

/// Construct a [`Dec`] as `digits * 10^-scale`. Exact; use this for
/// fractional game constants (`dec_scaled(25, 1)` is exactly 2.5).
#[inline]
pub fn dec_scaled(digits: i64, scale: i64) -> Dec {
    Dec::new(BigInt::from(digits), scale)
}

/// Convert an f64 to [`Dec`]. Use only at the engine boundary (save
/// migration of legacy numeric fields), never in the simulation loop.
#[inline]
pub fn f64_to_dec(v: f64) -> Dec {
    Dec::from_f64(v).unwrap_or_else(Dec::zero)
}

/// Convert a [`Dec`] to f64 for display projections. Saturates to
/// `f64::INFINITY` once the value leaves f64 range.
#[inline]
pub fn dec_to_f64(v: &Dec) -> f64 {
    v.to_f64().unwrap_or(f64::INFINITY)
}

/// Largest integer <= `v`, as a [`Dec`] with scale 0.
#[inline]
pub fn dec_floor(v: &Dec) -> Dec {
    v.with_scale_round(0, RoundingMode::Floor)
}

/// Smallest integer >= `v`, as a [`Dec`] with scale 0.
#[inline]
pub fn dec_ceil(v: &Dec) -> Dec {
    v.with_scale_round(0, RoundingMode::Ceiling)
}

/// Floor `v` to a [`BigInt`]. The cost formula's triangular term is computed
/// in integers, so purchases stay exact at any magnitude.
#[inline]
pub fn dec_floor_int(v: &Dec) -> BigInt {
    v.with_scale_round(0, RoundingMode::Floor)
        .into_bigint_and_exponent()
        .0
}

/// `base^exp` for an integer base, exact.
#[inline]
pub fn int_pow(base: u32, exp: u32) -> Dec {
    Dec::from(Pow::pow(BigInt::from(base), exp))
}

/// `base^exp` for a decimal base, by squaring. Exact (scale grows with
/// `exp`); used for research cost growth factors like 2.5^level.
pub fn dec_pow(base: &Dec, exp: u32) -> Dec {
    let mut result = Dec::from(1u32);
    let mut square = base.clone();
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = &result * &square;
        }
        square = &square * &square;
        e >>= 1;
    }
    result
}
