//! Terminal comparers for primitive values.
//!
//! Every terminal value kind implements [`Scalar`]; a difference is always
//! reported as `different values '{a}' != '{b}'`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use sdelta_model::{ElementKind, OnDeleteAction, PathKind, PrimitiveKind};
use sdelta_types::PropertyPath;
use uuid::Uuid;

use crate::context::DeltaContext;

/// A terminal value with kind-appropriate equality and a textual form.
pub trait Scalar {
    fn same(&self, other: &Self) -> bool;

    /// Text embedded in divergence messages.
    fn render(&self) -> String;
}

macro_rules! exact_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

exact_scalar!(
    bool,
    i64,
    NaiveDate,
    DateTime<FixedOffset>,
    Decimal,
    TimeDelta,
    Uuid,
    NaiveTime,
    OnDeleteAction,
    PathKind,
    PrimitiveKind,
    ElementKind,
);

impl Scalar for str {
    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn render(&self) -> String {
        self.to_owned()
    }
}

impl Scalar for String {
    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn render(&self) -> String {
        self.clone()
    }
}

/// No tolerance: values one ULP apart differ. NaN equals NaN and `0.0`
/// equals `-0.0`.
impl Scalar for f64 {
    fn same(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

/// Byte sequences compare element-wise and render as hex.
impl Scalar for [u8] {
    fn same(&self, other: &Self) -> bool {
        self == other
    }

    fn render(&self) -> String {
        hex::encode(self)
    }
}

impl Scalar for Vec<u8> {
    fn same(&self, other: &Self) -> bool {
        self.as_slice().same(other.as_slice())
    }

    fn render(&self) -> String {
        self.as_slice().render()
    }
}

macro_rules! nullable_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            /// Both absent are equal; an absent value renders as `''`.
            impl Scalar for Option<$ty> {
                fn same(&self, other: &Self) -> bool {
                    self == other
                }

                fn render(&self) -> String {
                    self.map(|v| v.to_string()).unwrap_or_default()
                }
            }
        )*
    };
}

nullable_scalar!(i32, bool);

impl DeltaContext {
    /// Compare two terminal values, reporting at `path` when they differ.
    pub fn visit_scalar<T: Scalar + ?Sized>(&mut self, a: &T, b: &T, path: &PropertyPath) {
        if !a.same(b) {
            self.report(
                path,
                format!("different values '{}' != '{}'", a.render(), b.render()),
            );
        }
    }
}
