//! # BigInt
//! Arbitrary-precision signed integers. Arithmetic is exact with no overflow
//! limit, and the bitwise operators behave as if the value were represented
//! in infinite-width two's-complement notation.
//!
//! # Example
//! ```
//! use big_int::BigInt;
//!
//! let a: BigInt = "123456789123456789123456789".parse().unwrap();
//! let one = BigInt::from(1);
//! assert_eq!((&a + &one).to_string(), "123456789123456789123456790");
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::mem;
use std::ops::{
    Add, AddAssign,
    Sub, SubAssign,
    Mul, MulAssign,
    Div, DivAssign,
    Rem, RemAssign,
    Shl, ShlAssign,
    Shr, ShrAssign,
    BitAnd, BitAndAssign,
    BitOr, BitOrAssign,
    BitXor, BitXorAssign,
    Neg, Not,
};
use std::str::FromStr;

use crate::big_int_cache::*;
use crate::big_int_constants::*;

/// Radix of the magnitude representation.
const BASE: u64 = 1 << u32::BITS;

/// Arbitrary-precision signed integer.
///
/// Stored as a sign flag plus a little-endian magnitude in base 2^32.
/// `sign == true` means the value is non-negative. The magnitude never has a
/// trailing (most-significant) zero word, and zero is always `digits = []`
/// with `sign = true`, so there is exactly one representation per value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigInt {
    digits: Vec<u32>,
    sign: bool,
}

/// The error produced when a decimal string cannot be parsed as a [`BigInt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBigIntError {
    /// The input was empty, or was a bare `+`/`-` with no digits.
    Empty,
    /// A character in the numeric span was not an ASCII decimal digit.
    InvalidDigit,
}

impl Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBigIntError::Empty => f.write_str("cannot parse integer from empty string"),
            ParseBigIntError::InvalidDigit => f.write_str("invalid digit found in string"),
        }
    }
}

impl std::error::Error for ParseBigIntError {}

/// Adds `second` plus an incoming carry into `first`, returning the carry
/// out. The sum of two words and a carry bit fits 33 bits, so a `u64`
/// accumulator is always wide enough.
fn adc(first: &mut u32, second: u32, carry: u32) -> u32 {
    let sum = *first as u64 + second as u64 + carry as u64;
    *first = sum as u32;
    (sum >> u32::BITS) as u32
}

/// Subtracts `second` plus an incoming borrow from `first`, returning the
/// borrow out (1 when this word underflowed).
fn sbb(first: &mut u32, second: u32, borrow: u32) -> u32 {
    let diff = (*first as u64)
        .wrapping_sub(second as u64)
        .wrapping_sub(borrow as u64);
    *first = diff as u32;
    (diff >> u32::BITS != 0) as u32
}

/// Produces one word of the two's-complement bit pattern of a magnitude.
///
/// For a negative operand the pattern is NOT-then-add-one; `carry` threads
/// the "add one" through successive words, starting seeded at word zero.
fn twos_complement_word(digit: u32, negative: bool, carry: &mut bool) -> u32 {
    let mut word = if negative { !digit } else { digit };
    if *carry {
        let (incremented, overflow) = word.overflowing_add(1);
        word = incremented;
        *carry = overflow;
    }
    word
}

// Construction.
impl BigInt {
    /// Returns the canonical zero.
    pub const fn new() -> BigInt {
        BigInt {
            digits: Vec::new(),
            sign: true,
        }
    }

    pub(crate) fn from_raw(digits: Vec<u32>, sign: bool) -> BigInt {
        debug_assert!(digits.last().map_or(true, |&d| d != 0));
        debug_assert!(sign || !digits.is_empty());
        BigInt { digits, sign }
    }

    fn from_u64(val: u64, sign: bool) -> BigInt {
        if val == 0 {
            return BigInt::new();
        }
        if val <= MAX_CONSTANT as u64 {
            return if sign {
                POS_CACHE[val as usize].clone()
            } else {
                NEG_CACHE[val as usize].clone()
            };
        }
        let low = val as u32;
        let high = (val >> u32::BITS) as u32;
        let digits = if high == 0 { vec![low] } else { vec![low, high] };
        BigInt { digits, sign }
    }
}

impl Default for BigInt {
    fn default() -> Self {
        BigInt::new()
    }
}

macro_rules! impl_from_unsigned {
    ($($u:ty),*) => {
    $(
    impl From<$u> for BigInt {
        fn from(val: $u) -> Self {
            BigInt::from_u64(val as u64, true)
        }
    }
    )*
    };
}

macro_rules! impl_from_signed {
    ($($i:ty),*) => {
    $(
    impl From<$i> for BigInt {
        fn from(val: $i) -> Self {
            // unsigned_abs also covers the most negative value, whose
            // absolute value does not fit the signed type.
            BigInt::from_u64(val.unsigned_abs() as u64, val >= 0)
        }
    }
    )*
    };
}

impl_from_unsigned!(u8, u16, u32, usize, u64);
impl_from_signed!(i8, i16, i32, isize, i64);

// Inspection.
impl BigInt {
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> BigInt {
        BigInt {
            digits: self.digits.clone(),
            sign: true,
        }
    }

    /// Word at `index`, zero beyond the stored magnitude.
    fn get(&self, index: usize) -> u32 {
        self.digits.get(index).copied().unwrap_or(0)
    }

    /// Re-establishes the representation invariant: no trailing zero word,
    /// and zero is positive.
    fn normalize(&mut self) {
        while let Some(&0) = self.digits.last() {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.sign = true;
        }
    }
}

// Magnitude arithmetic. Everything here ignores the sign flag; callers pick
// the result sign first and these routines re-normalize on the way out.
impl BigInt {
    /// `|self| >= |rhs| * 2^(32 * shift)`.
    fn ge_abs(&self, rhs: &BigInt, shift: usize) -> bool {
        // Any magnitude is at least zero, whatever the shift.
        if rhs.digits.is_empty() {
            return true;
        }
        if self.digits.len() != rhs.digits.len() + shift {
            return self.digits.len() > rhs.digits.len() + shift;
        }
        for i in (0..self.digits.len()).rev() {
            let theirs = if i < shift { 0 } else { rhs.get(i - shift) };
            if self.digits[i] != theirs {
                return self.digits[i] > theirs;
            }
        }
        true
    }

    fn cmp_abs(&self, rhs: &BigInt) -> Ordering {
        match self.digits.len().cmp(&rhs.digits.len()) {
            Ordering::Equal => {}
            ord => return ord,
        }
        for i in (0..self.digits.len()).rev() {
            match self.digits[i].cmp(&rhs.digits[i]) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// `|self| += |rhs| * 2^(32 * shift)`. The buffer grows by one extra
    /// word up front, so the final carry always drains.
    fn add_abs(&mut self, rhs: &BigInt, shift: usize) {
        let len = self.digits.len().max(rhs.digits.len() + shift) + 1;
        self.digits.resize(len, 0);
        let mut carry = 0;
        for i in shift..len {
            carry = adc(&mut self.digits[i], rhs.get(i - shift), carry);
        }
        debug_assert_eq!(carry, 0);
        self.normalize();
    }

    /// `|self| = ||self| - |rhs| * 2^(32 * shift)||`; the smaller magnitude
    /// is subtracted from the larger, so the borrow always drains. Callers
    /// decide what sign the difference carries.
    fn sub_abs(&mut self, rhs: &BigInt, shift: usize) {
        let bigger = self.ge_abs(rhs, 0);
        let len = self.digits.len().max(rhs.digits.len());
        self.digits.resize(len, 0);
        let mut borrow = 0;
        for i in shift..len {
            let mut minuend = self.digits[i];
            let mut subtrahend = rhs.get(i - shift);
            if !bigger {
                mem::swap(&mut minuend, &mut subtrahend);
            }
            borrow = sbb(&mut minuend, subtrahend, borrow);
            self.digits[i] = minuend;
        }
        debug_assert_eq!(borrow, 0);
        self.normalize();
    }

    /// Multiplies the whole magnitude by one word. A word-by-word product
    /// plus carry fits 64 bits, so this never loses bits.
    fn mul_short(&mut self, rhs: u32) {
        let len = self.digits.len() + 1;
        self.digits.resize(len, 0);
        let mut carry: u32 = 0;
        for i in 0..len {
            let product = rhs as u64 * self.digits[i] as u64 + carry as u64;
            self.digits[i] = product as u32;
            carry = (product >> u32::BITS) as u32;
        }
        debug_assert_eq!(carry, 0);
        self.normalize();
    }

    /// Schoolbook multiplication, accumulating in place from the top word of
    /// the receiver down so each partial product lands in untouched space.
    fn mul_long(&mut self, rhs: &BigInt) {
        let old_len = self.digits.len();
        let rhs_len = rhs.digits.len();
        self.digits.resize(old_len + rhs_len + 1, 0);
        for start in (0..old_len).rev() {
            let current = self.digits[start] as u64;
            let mut carry_mul: u32 = 0;
            let mut carry_add: u32 = 0;
            self.digits[start] = 0;
            for i in 0..=rhs_len {
                let product = current * rhs.get(i) as u64 + carry_mul as u64;
                carry_mul = (product >> u32::BITS) as u32;
                carry_add = adc(&mut self.digits[start + i], product as u32, carry_add);
            }
            if carry_add != 0 {
                carry_add = adc(&mut self.digits[start + rhs_len + 1], 0, carry_add);
            }
            debug_assert!(carry_mul == 0 && carry_add == 0);
        }
        self.normalize();
    }

    /// Divides the magnitude by one nonzero word in place, returning the
    /// remainder.
    fn div_short(&mut self, rhs: u32) -> u32 {
        debug_assert!(rhs != 0);
        let mut rem: u32 = 0;
        for i in (0..self.digits.len()).rev() {
            let cur = ((rem as u64) << u32::BITS) + self.digits[i] as u64;
            self.digits[i] = (cur / rhs as u64) as u32;
            rem = (cur % rhs as u64) as u32;
        }
        self.normalize();
        rem
    }
}

// Signed arithmetic layer. The OpAssign<&BigInt> impls are the real
// implementations; every other operand combination forwards to them.
macro_rules! forward_binop {
    (impl $imp:ident, $method:ident via $assign_imp:ident, $assign_method:ident) => {
        impl $imp for BigInt {
            type Output = BigInt;

            fn $method(mut self, rhs: BigInt) -> BigInt {
                $assign_imp::<&BigInt>::$assign_method(&mut self, &rhs);
                self
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(mut self, rhs: &BigInt) -> BigInt {
                $assign_imp::<&BigInt>::$assign_method(&mut self, rhs);
                self
            }
        }

        impl $imp for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                let mut lhs = self.clone();
                $assign_imp::<&BigInt>::$assign_method(&mut lhs, rhs);
                lhs
            }
        }

        impl $assign_imp for BigInt {
            fn $assign_method(&mut self, rhs: BigInt) {
                $assign_imp::<&BigInt>::$assign_method(self, &rhs);
            }
        }
    };
}

forward_binop!(impl Add, add via AddAssign, add_assign);
forward_binop!(impl Sub, sub via SubAssign, sub_assign);
forward_binop!(impl Mul, mul via MulAssign, mul_assign);
forward_binop!(impl Div, div via DivAssign, div_assign);
forward_binop!(impl Rem, rem via RemAssign, rem_assign);
forward_binop!(impl BitAnd, bitand via BitAndAssign, bitand_assign);
forward_binop!(impl BitOr, bitor via BitOrAssign, bitor_assign);
forward_binop!(impl BitXor, bitxor via BitXorAssign, bitxor_assign);

impl AddAssign<&BigInt> for BigInt {
    fn add_assign(&mut self, rhs: &BigInt) {
        if rhs.is_zero() {
            return;
        }
        if self.sign == rhs.sign {
            self.add_abs(rhs, 0);
        } else {
            let result_sign = self.ge_abs(rhs, 0) == self.sign;
            self.sub_abs(rhs, 0);
            self.sign = result_sign;
        }
        self.normalize();
    }
}

impl SubAssign<&BigInt> for BigInt {
    fn sub_assign(&mut self, rhs: &BigInt) {
        if rhs.is_zero() {
            return;
        }
        if self.sign == rhs.sign {
            let result_sign = self.ge_abs(rhs, 0) == self.sign;
            self.sub_abs(rhs, 0);
            self.sign = result_sign;
        } else {
            self.add_abs(rhs, 0);
        }
        self.normalize();
    }
}

impl MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &BigInt) {
        if self.is_zero() || rhs.is_zero() {
            *self = BigInt::new();
            return;
        }
        let result_sign = self.sign == rhs.sign;
        if rhs.digits.len() == 1 {
            self.mul_short(rhs.digits[0]);
        } else {
            self.mul_long(rhs);
        }
        self.sign = result_sign;
        self.normalize();
    }
}

impl DivAssign<&BigInt> for BigInt {
    fn div_assign(&mut self, rhs: &BigInt) {
        self.division(rhs, false);
    }
}

impl RemAssign<&BigInt> for BigInt {
    fn rem_assign(&mut self, rhs: &BigInt) {
        self.division(rhs, true);
    }
}

impl BigInt {
    /// Quotient of truncating division, or `None` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &BigInt) -> Option<BigInt> {
        if rhs.is_zero() {
            return None;
        }
        let mut quotient = self.clone();
        quotient.division(rhs, false);
        Some(quotient)
    }

    /// Remainder of truncating division (its sign follows `self`), or
    /// `None` when `rhs` is zero.
    pub fn checked_rem(&self, rhs: &BigInt) -> Option<BigInt> {
        if rhs.is_zero() {
            return None;
        }
        let mut remainder = self.clone();
        remainder.division(rhs, true);
        Some(remainder)
    }

    /// Shared truncating division: replaces `self` with either the quotient
    /// or the remainder. The remainder keeps the dividend's sign.
    ///
    /// The zero check precedes all mutation, so a failed division leaves the
    /// receiver untouched.
    fn division(&mut self, rhs: &BigInt, want_remainder: bool) {
        assert!(!rhs.is_zero(), "division by zero");
        let quotient_sign = self.sign == rhs.sign;
        let dividend_sign = self.sign;
        self.sign = true;
        let mut divisor = rhs.abs();

        if self.cmp_abs(&divisor) == Ordering::Less {
            if want_remainder {
                self.sign = dividend_sign;
            } else {
                *self = BigInt::new();
            }
        } else if divisor.digits.len() == 1 {
            let rem = self.div_short(divisor.digits[0]);
            if want_remainder {
                *self = BigInt::from(rem);
                self.sign = dividend_sign;
            } else {
                self.sign = quotient_sign;
            }
        } else {
            let delta = self.digits.len() - divisor.digits.len();
            let mut quotient = BigInt::new();
            quotient.digits = vec![0; delta + 1];
            // Scale both operands so the divisor's top word is at least
            // BASE / 2; the two-word trial estimate below is then at most
            // two too large (Knuth, TAOCP vol. 2, Algorithm D). The
            // quotient is unaffected by the scaling, only the remainder
            // has to be divided back down.
            let f = (BASE / (divisor.digits[divisor.digits.len() - 1] as u64 + 1)) as u32;
            self.mul_short(f);
            divisor.mul_short(f);
            let n = divisor.digits.len();
            let top = divisor.digits[n - 1] as u64;
            debug_assert!(top != 0);
            for k in (0..=delta).rev() {
                let head = ((self.get(n + k) as u64) << u32::BITS) + self.get(n + k - 1) as u64;
                let mut trial = (head / top).min(u32::MAX as u64) as u32;
                let mut scaled = divisor.clone();
                scaled.mul_short(trial);
                let mut corrections = 0;
                while !self.ge_abs(&scaled, k) {
                    debug_assert!(corrections < 2 && trial > 0);
                    trial -= 1;
                    scaled.sub_abs(&divisor, 0);
                    corrections += 1;
                }
                self.sub_abs(&scaled, k);
                quotient.digits[k] = trial;
            }
            if want_remainder {
                self.div_short(f);
                self.sign = dividend_sign;
            } else {
                quotient.sign = quotient_sign;
                quotient.normalize();
                *self = quotient;
            }
        }
        self.normalize();
    }
}

// Add-one/sub-one primitives behind the increment and decrement surface.
impl BigInt {
    /// Adds one in place.
    pub fn inc(&mut self) {
        self.add_small(1);
    }

    /// Subtracts one in place.
    pub fn dec(&mut self) {
        self.sub_small(1);
    }

    /// `self += rhs` for a single word, with fast paths for receivers of
    /// zero or one word; the general path folds `rhs` into word zero of the
    /// usual carry/borrow chain.
    fn add_small(&mut self, rhs: u32) {
        if rhs == 0 {
            return;
        }
        if self.digits.is_empty() {
            self.sign = true;
            self.digits.push(rhs);
        } else if self.digits.len() == 1 && !self.sign {
            let digit = self.digits[0];
            self.digits[0] = digit.max(rhs) - digit.min(rhs);
            self.sign = rhs >= digit;
        } else {
            let len = self.digits.len() + 1;
            self.digits.resize(len, 0);
            let mut carry = 0;
            for i in 0..len {
                let addend = if i == 0 { rhs } else { 0 };
                carry = if self.sign {
                    adc(&mut self.digits[i], addend, carry)
                } else {
                    sbb(&mut self.digits[i], addend, carry)
                };
            }
            debug_assert_eq!(carry, 0);
        }
        self.normalize();
    }

    /// `self -= rhs` for a single word; mirror of [`BigInt::add_small`].
    fn sub_small(&mut self, rhs: u32) {
        if rhs == 0 {
            return;
        }
        if self.digits.is_empty() {
            self.sign = false;
            self.digits.push(rhs);
        } else if self.digits.len() == 1 && self.sign {
            let digit = self.digits[0];
            self.digits[0] = digit.max(rhs) - digit.min(rhs);
            self.sign = digit >= rhs;
        } else {
            let len = self.digits.len() + 1;
            self.digits.resize(len, 0);
            let mut carry = 0;
            for i in 0..len {
                let subtrahend = if i == 0 { rhs } else { 0 };
                carry = if self.sign {
                    sbb(&mut self.digits[i], subtrahend, carry)
                } else {
                    adc(&mut self.digits[i], subtrahend, carry)
                };
            }
            debug_assert_eq!(carry, 0);
        }
        self.normalize();
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.sign = !self.sign;
        self.normalize();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.clone().neg()
    }
}

// Bitwise layer. The two's-complement bit pattern of a negative operand is
// computed on the fly, word by word; nothing dual is ever stored.
impl BigInt {
    fn bitwise(&mut self, rhs: &BigInt, op: fn(u32, u32) -> u32) {
        let self_negative = !self.sign;
        let rhs_negative = !rhs.sign;
        let mut self_carry = self_negative;
        let mut rhs_carry = rhs_negative;
        let len = self.digits.len().max(rhs.digits.len());
        self.digits.resize(len, 0);
        for i in 0..len {
            let ours = twos_complement_word(self.digits[i], self_negative, &mut self_carry);
            let theirs = twos_complement_word(rhs.get(i), rhs_negative, &mut rhs_carry);
            self.digits[i] = op(ours, theirs);
        }
        // The operator applied to the two sign bits is the sign bit of the
        // result; a set sign bit means the pattern must be negated back
        // into a magnitude.
        if op(self_negative as u32, rhs_negative as u32) != 0 {
            self.sign = false;
            self.invert_binary();
        } else {
            self.sign = true;
        }
        self.normalize();
    }

    /// NOT-then-add-one over the stored words: converts a negative result's
    /// two's-complement pattern back into its magnitude. Only called while
    /// `sign` is false, so the sub-one primitive grows the magnitude.
    fn invert_binary(&mut self) {
        for digit in self.digits.iter_mut() {
            *digit = !*digit;
        }
        self.sub_small(1);
        self.normalize();
    }
}

impl BitAndAssign<&BigInt> for BigInt {
    fn bitand_assign(&mut self, rhs: &BigInt) {
        self.bitwise(rhs, |a, b| a & b);
    }
}

impl BitOrAssign<&BigInt> for BigInt {
    fn bitor_assign(&mut self, rhs: &BigInt) {
        self.bitwise(rhs, |a, b| a | b);
    }
}

impl BitXorAssign<&BigInt> for BigInt {
    fn bitxor_assign(&mut self, rhs: &BigInt) {
        self.bitwise(rhs, |a, b| a ^ b);
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(mut self) -> BigInt {
        // ~x == -x - 1 in two's complement.
        self.sign = !self.sign;
        self.sub_small(1);
        self
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        !self.clone()
    }
}

impl ShlAssign<u32> for BigInt {
    fn shl_assign(&mut self, n: u32) {
        self.mul_short(1 << (n % u32::BITS));
        let words = (n / u32::BITS) as usize;
        if words > 0 && !self.is_zero() {
            let mut shifted = vec![0; words];
            shifted.extend_from_slice(&self.digits);
            self.digits = shifted;
        }
        self.normalize();
    }
}

impl ShrAssign<u32> for BigInt {
    fn shr_assign(&mut self, n: u32) {
        let words = (n / u32::BITS) as usize;
        if words >= self.digits.len() {
            *self = BigInt::new();
            return;
        }
        // Arithmetic shift rounds a negative value toward negative
        // infinity: any one bit shifted out costs an extra decrement of
        // the magnitude, once for the dropped whole words and once for
        // the remainder of the final short division.
        let dropped_nonzero = self.digits[..words].iter().any(|&digit| digit != 0);
        self.digits.drain(..words);
        if !self.sign && dropped_nonzero {
            self.sub_small(1);
        }
        let was_negative = !self.sign;
        let rem = self.div_short(1 << (n % u32::BITS));
        if was_negative && rem != 0 {
            self.sub_small(1);
        }
        self.normalize();
    }
}

impl Shl<u32> for BigInt {
    type Output = BigInt;

    fn shl(mut self, n: u32) -> BigInt {
        self <<= n;
        self
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    fn shl(self, n: u32) -> BigInt {
        self.clone() << n
    }
}

impl Shr<u32> for BigInt {
    type Output = BigInt;

    fn shr(mut self, n: u32) -> BigInt {
        self >>= n;
        self
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    fn shr(self, n: u32) -> BigInt {
        self.clone() >> n
    }
}

// Relational layer. Equality is derived component-wise, which is exact
// because the representation is canonical.
impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.sign != other.sign {
            return if self.sign {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        let by_abs = self.cmp_abs(other);
        if self.sign {
            by_abs
        } else {
            by_abs.reverse()
        }
    }
}

// Conversion layer.
impl FromStr for BigInt {
    type Err = ParseBigIntError;

    /// Parses an optionally signed decimal string, consuming the digits in
    /// 9-digit chunks: each chunk multiplies the accumulator by the
    /// matching power of ten and adds the chunk's value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(ParseBigIntError::Empty);
        }
        let start = usize::from(bytes[0] == b'-' || bytes[0] == b'+');
        if start == bytes.len() {
            return Err(ParseBigIntError::Empty);
        }
        if !bytes[start..].iter().all(|b| b.is_ascii_digit()) {
            return Err(ParseBigIntError::InvalidDigit);
        }

        let mut result = BigInt::new();
        let mut cursor = start;
        while cursor < bytes.len() {
            let end = bytes.len().min(cursor + DIGITS_PER_CHUNK);
            let mut chunk: u32 = 0;
            for &digit in &bytes[cursor..end] {
                chunk = chunk * 10 + u32::from(digit - b'0');
            }
            result.mul_short(POW_TEN[end - cursor]);
            result.add_small(chunk);
            cursor = end;
        }
        if bytes[0] == b'-' {
            result.sign = false;
        }
        result.normalize();
        Ok(result)
    }
}

impl Display for BigInt {
    /// Renders the decimal form by repeated division of the magnitude by
    /// ten; the collected digits come out least-significant-first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut tmp = self.abs();
        let mut collected = String::with_capacity(self.digits.len() * 10 + 1);
        while !tmp.is_zero() {
            let rem = tmp.div_short(10);
            collected.push((b'0' + rem as u8) as char);
        }
        if !self.sign {
            collected.push('-');
        }
        f.write_str(&collected.chars().rev().collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    macro_rules! format_case {
        ($name:ident: $input:literal => $expected:literal) => {
            #[test]
            fn $name() {
                assert_eq!(big($input).to_string(), $expected);
            }
        };
    }

    format_case!(format_zero: "0" => "0");
    format_case!(format_negative_zero: "-0" => "0");
    format_case!(format_padded_zero: "000" => "0");
    format_case!(format_plus_and_leading_zeros: "+00123" => "123");
    format_case!(format_negative: "-42" => "-42");
    format_case!(format_word_boundary: "4294967296" => "4294967296");
    format_case!(format_many_digits:
        "123456789123456789123456789" => "123456789123456789123456789");

    macro_rules! parse_error_case {
        ($name:ident: $input:literal => $expected:ident) => {
            #[test]
            fn $name() {
                assert_eq!(
                    $input.parse::<BigInt>(),
                    Err(ParseBigIntError::$expected)
                );
            }
        };
    }

    parse_error_case!(parse_empty: "" => Empty);
    parse_error_case!(parse_bare_plus: "+" => Empty);
    parse_error_case!(parse_bare_minus: "-" => Empty);
    parse_error_case!(parse_embedded_letter: "12a3" => InvalidDigit);
    parse_error_case!(parse_double_sign: "--5" => InvalidDigit);
    parse_error_case!(parse_mixed_signs: "+-1" => InvalidDigit);
    parse_error_case!(parse_leading_space: " 5" => InvalidDigit);
    parse_error_case!(parse_trailing_sign: "5-" => InvalidDigit);

    #[test]
    fn from_machine_integers() {
        assert_eq!(BigInt::from(0u32), BigInt::new());
        assert_eq!(BigInt::from(-1i8).to_string(), "-1");
        assert_eq!(BigInt::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(BigInt::from(i64::MAX).to_string(), i64::MAX.to_string());
        assert_eq!(BigInt::from(i64::MIN).to_string(), i64::MIN.to_string());
        assert_eq!(BigInt::from(300u16), big("300"));
        assert_eq!(BigInt::default(), BigInt::new());
    }

    #[test]
    fn addition_carries_across_words() {
        assert_eq!(big("4294967295") + big("1"), big("4294967296"));
        assert_eq!(
            big("123456789123456789123456789") + big("1"),
            big("123456789123456789123456790")
        );
    }

    #[test]
    fn additive_identities() {
        let x = big("-987654321987654321");
        assert_eq!(&x + &BigInt::new(), x);
        assert_eq!(&x + &(-&x), BigInt::new());
        assert_eq!(&x - &x, BigInt::new());
        assert_eq!(-(-&x), x);
    }

    #[test]
    fn subtraction_below_zero() {
        assert_eq!((big("0") - big("1")).to_string(), "-1");
        assert_eq!(big("3") - big("5"), big("-2"));
        assert_eq!(big("-3") - big("-5"), big("2"));
        assert_eq!(big("-3") - big("5"), big("-8"));
    }

    #[test]
    fn multiplication_signs_and_magnitude() {
        assert_eq!(
            big("99999999999999999999") * big("2"),
            big("199999999999999999998")
        );
        assert_eq!(big("-4") * big("5"), big("-20"));
        assert_eq!(big("-4") * big("-5"), big("20"));
        let zero = big("-7") * BigInt::new();
        assert_eq!(zero, BigInt::new());
        assert!(zero.to_string() == "0");
        let x = big("123456789012345678901234567890");
        assert_eq!(&x * &big("1"), x);
    }

    #[test]
    fn long_multiplication() {
        assert_eq!(
            big("18446744073709551616") * big("18446744073709551616"),
            big("340282366920938463463374607431768211456")
        );
        assert_eq!(
            big("-123456789123456789") * big("987654321987654321"),
            big("-121932631356500531347203169112635269")
        );
    }

    #[test]
    fn short_division() {
        assert_eq!(big("100") / big("7"), big("14"));
        assert_eq!(big("100") % big("7"), big("2"));
        assert_eq!(big("18446744073709551616") / big("2"), big("9223372036854775808"));
    }

    #[test]
    fn long_division_exact() {
        assert_eq!(
            big("1000000000000000000000000") / big("1000000000000000"),
            big("1000000000")
        );
        assert_eq!(
            big("1000000000000000000000000") % big("1000000000000000"),
            BigInt::new()
        );
    }

    #[test]
    fn long_division_quotient_with_zero_low_words() {
        // (2^32 + 1) * 2^64 over 2^32 + 1: the running value reaches zero
        // while low quotient words are still pending, so those trial
        // digits must come out as zero.
        let x = big("79228162532711081667253501952");
        let y = big("4294967297");
        assert_eq!(&x / &y, big("18446744073709551616"));
        assert_eq!(&x % &y, BigInt::new());
        assert_eq!(-&x / &y, big("-18446744073709551616"));
    }

    #[test]
    fn division_law_holds() {
        let cases = [
            ("340282366920938463463374607431768211455", "18446744073709551616"),
            ("-340282366920938463463374607431768211455", "18446744073709551617"),
            ("98765432109876543210987654321", "-12345678901234567890"),
            ("-98765432109876543210987654321", "-12345678901234567890"),
            ("7", "340282366920938463463374607431768211455"),
        ];
        for (a, b) in cases {
            let x = big(a);
            let y = big(b);
            let q = &x / &y;
            let r = &x % &y;
            assert_eq!(&q * &y + &r, x, "division law failed for {a} / {b}");
            assert!(r.abs() < y.abs());
        }
    }

    #[test]
    fn remainder_follows_dividend_sign() {
        assert_eq!(big("-7") % big("3"), big("-1"));
        assert_eq!(big("-7") / big("3"), big("-2"));
        assert_eq!(big("7") % big("-3"), big("1"));
        assert_eq!(big("7") / big("-3"), big("-2"));
        assert_eq!(big("-7") % big("-3"), big("-1"));
        assert_eq!(big("-7") / big("-3"), big("2"));
    }

    #[test]
    fn small_dividend_is_remainder() {
        assert_eq!(big("5") / big("100"), BigInt::new());
        assert_eq!(big("5") % big("100"), big("5"));
        assert_eq!(big("-5") % big("100"), big("-5"));
    }

    #[test]
    fn checked_division_by_zero() {
        let x = big("12345678901234567890");
        assert_eq!(x.checked_div(&BigInt::new()), None);
        assert_eq!(x.checked_rem(&BigInt::new()), None);
        assert_eq!(x.checked_div(&big("10")), Some(big("1234567890123456789")));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_zero_panics() {
        let _ = big("1") / BigInt::new();
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn remainder_by_zero_panics() {
        let _ = big("-1") % BigInt::new();
    }

    #[test]
    fn increment_and_decrement() {
        let mut x = BigInt::new();
        x.inc();
        assert_eq!(x, big("1"));
        x.dec();
        x.dec();
        assert_eq!(x, big("-1"));

        let mut y = big("-2");
        y.inc();
        assert_eq!(y, big("-1"));

        let mut boundary = big("4294967295");
        boundary.inc();
        assert_eq!(boundary, big("4294967296"));
        boundary.dec();
        assert_eq!(boundary, big("4294967295"));

        let mut negative_boundary = big("-4294967296");
        negative_boundary.inc();
        assert_eq!(negative_boundary, big("-4294967295"));
    }

    #[test]
    fn ordering_is_total() {
        let ordered = ["-5", "-3", "0", "3", "5"].map(big);
        for window in ordered.windows(2) {
            assert!(window[0] < window[1]);
        }
        assert!(big("123456789012345678") < big("123456789012345679"));
        assert!(big("-18446744073709551616") < big("-4294967296"));
        assert!(big("18446744073709551616") > big("4294967296"));
        assert_eq!(big("42").cmp(&big("42")), Ordering::Equal);
    }

    #[test]
    fn bitwise_not_is_twos_complement() {
        for value in -100i64..=100 {
            let x = BigInt::from(value);
            assert_eq!(!&x, BigInt::from(-value - 1), "~{value}");
        }
        assert_eq!(
            !big("18446744073709551616"),
            big("-18446744073709551617")
        );
    }

    #[test]
    fn bitwise_idempotence() {
        for s in ["0", "5", "-5", "18446744073709551616", "-18446744073709551616"] {
            let x = big(s);
            assert_eq!(&x & &x, x);
            assert_eq!(&x | &x, x);
            assert_eq!(&x ^ &x, BigInt::new());
        }
    }

    #[test]
    fn bitwise_with_negative_operands() {
        assert_eq!(big("-1") & big("5"), big("5"));
        assert_eq!(big("5") ^ big("-1"), big("-6"));
        assert_eq!(big("-1") | big("5"), big("-1"));
        // Cross-checked against 128-bit two's complement.
        let a = -(1i128 << 64) - 12345;
        let b = (1i128 << 70) + 987654321;
        for (ours, native) in [
            (big(&a.to_string()) & big(&b.to_string()), a & b),
            (big(&a.to_string()) | big(&b.to_string()), a | b),
            (big(&a.to_string()) ^ big(&b.to_string()), a ^ b),
        ] {
            assert_eq!(ours, big(&native.to_string()));
        }
    }

    #[test]
    fn shift_identities() {
        let x = big("123456789123456789");
        assert_eq!(&x << 0, x);
        assert_eq!(&x >> 0, x);
        assert_eq!((&x << 77) >> 77, x);
        assert_eq!((big("1") << 64).to_string(), "18446744073709551616");
        assert_eq!(big("1") << 1, big("2"));
    }

    #[test]
    fn right_shift_of_negative_rounds_down() {
        assert_eq!(big("-5") >> 1, big("-3"));
        assert_eq!(big("-4") >> 1, big("-2"));
        assert_eq!(big("-1") >> 1, big("-1"));
        assert_eq!(big("-4294967297") >> 63, big("-1"));
        // A set bit below the dropped-word boundary must also round down.
        assert_eq!(big("-4294967297") >> 32, big("-2"));
        assert_eq!(big("-4294967296") >> 32, big("-1"));
    }

    #[test]
    fn right_shift_exhausting_the_magnitude() {
        assert_eq!(big("5") >> 100, BigInt::new());
        assert_eq!(big("-5") >> 100, BigInt::new());
        assert_eq!(BigInt::new() >> 3, BigInt::new());
    }

    #[test]
    fn shift_of_negative_magnitude() {
        assert_eq!(big("-3") << 4, big("-48"));
        assert_eq!(big("-48") >> 4, big("-3"));
    }

    #[test]
    fn no_negative_zero_is_observable() {
        for zero in [
            big("-3") + big("3"),
            big("-3") - big("-3"),
            big("-3") * BigInt::new(),
            big("-3") % big("3"),
            big("-3") ^ big("-3"),
            -BigInt::new(),
        ] {
            assert_eq!(zero, BigInt::new());
            assert_eq!(zero.to_string(), "0");
            assert!(zero >= BigInt::new());
        }
    }

    #[test]
    fn compound_assignment_operators() {
        let mut x = big("10");
        x += big("5");
        assert_eq!(x, big("15"));
        x -= big("20");
        assert_eq!(x, big("-5"));
        x *= big("-6");
        assert_eq!(x, big("30"));
        x /= big("7");
        assert_eq!(x, big("4"));
        x %= big("3");
        assert_eq!(x, big("1"));
        x <<= 8;
        assert_eq!(x, big("256"));
        x >>= 4;
        assert_eq!(x, big("16"));
        x &= big("10");
        assert_eq!(x, BigInt::new());
        x |= big("9");
        assert_eq!(x, big("9"));
        x ^= big("5");
        assert_eq!(x, big("12"));
    }

    #[test]
    fn parse_format_round_trip() {
        for s in [
            "0",
            "1",
            "-1",
            "4294967295",
            "4294967296",
            "-123456789123456789123456789123456789",
            "340282366920938463463374607431768211456",
        ] {
            assert_eq!(big(s).to_string(), s);
        }
    }

    #[test]
    fn parse_error_messages() {
        assert_eq!(
            ParseBigIntError::Empty.to_string(),
            "cannot parse integer from empty string"
        );
        assert_eq!(
            ParseBigIntError::InvalidDigit.to_string(),
            "invalid digit found in string"
        );
    }
}
