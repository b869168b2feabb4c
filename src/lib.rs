//! Big Int \
//! This crate provides:
//! - [`BigInt`]: arbitrary-precision signed integers. All bitwise operations
//!   behave as if the value were stored in infinite-width two's-complement
//!   notation, while arithmetic is exact with no overflow limit.
//!
//! # Example
//! ```
//! use big_int::BigInt;
//!
//! let a: BigInt = "10000000000000".parse().unwrap();
//! let b: BigInt = "900000000000".parse().unwrap();
//! println!("a = {}", a);
//! println!("a + b = {}", &a + &b);
//! println!("a - b = {}", &a - &b);
//! println!("a * b = {}", &a * &b);
//! println!("a / b = {}", &a / &b);
//! println!("a % b = {}", &a % &b);
//! println!("a << 10 = {}", &a << 10);
//! println!("a >> 10 = {}", &a >> 10);
//! ```

mod big_int;
mod big_int_cache;
mod big_int_constants;

pub use crate::big_int::{BigInt, ParseBigIntError};
