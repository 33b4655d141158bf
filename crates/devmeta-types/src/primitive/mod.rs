//! # Primitive Data Types
//!
//! Leaf implementations of the [`DataType`](crate::DataType) contract.
//! Each type is identified by a stable id that the schema loader uses as
//! its `"type"` tag.
//!
//! | id | type | converts |
//! |----|------|----------|
//! | `string` | [`StringType`] | no |
//! | `int` | [`IntType`] | yes |
//! | `long` | [`LongType`] | yes |
//! | `double` | [`DoubleType`] | yes |
//! | `boolean` | [`BooleanType`] | yes |
//! | `date` | [`DateTimeType`] | yes |
//! | `enum` | [`EnumType`] | no |
//! | `array` | [`ArrayType`] | yes |

pub mod array;
pub mod boolean;
pub mod date;
pub mod enumeration;
pub mod number;
pub mod string;

pub use array::ArrayType;
pub use boolean::BooleanType;
pub use date::{DateTimeType, DEFAULT_DATE_FORMAT};
pub use enumeration::{EnumElement, EnumType};
pub use number::{DoubleType, IntType, LongType};
pub use string::StringType;
