//! State inspection by path.
//!
//! Chips expose their internal state through dotted string paths so
//! tracing, tests and the command line can look inside a running machine.
//! A query never changes emulation state.

use std::fmt;

/// The answer to a state query.
///
/// Register-width variants keep their width so they print as hex of the
/// right size; counters are `U32`/`U64` and print in decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    String(String),
}

impl Value {
    /// Numeric value widened to `u64`. `None` for strings; booleans are
    /// 0 or 1.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Bool(v) => Some(u64::from(v)),
            Value::U8(v) => Some(u64::from(v)),
            Value::U16(v) => Some(u64::from(v)),
            Value::U32(v) => Some(u64::from(v)),
            Value::U64(v) => Some(v),
            Value::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "${v:02X}"),
            Value::U16(v) => write!(f, "${v:04X}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from!(bool => Bool, u8 => U8, u16 => U16, u32 => U32, u64 => U64, String => String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

#[cfg(feature = "json")]
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(v) => Self::Bool(*v),
            Value::U8(v) => Self::from(*v),
            Value::U16(v) => Self::from(*v),
            Value::U32(v) => Self::from(*v),
            Value::U64(v) => Self::from(*v),
            Value::String(v) => Self::String(v.clone()),
        }
    }
}

/// A component whose state can be inspected.
pub trait Observable {
    /// Query one property by dotted path, e.g. `pc`, `flags.z` or
    /// `pulse1.period`. `None` if the path is not recognised.
    fn query(&self, path: &str) -> Option<Value>;

    /// Every path `query` answers. Patterns such as `oam.<hex>` stand for
    /// a family of paths.
    fn query_paths(&self) -> &'static [&'static str];
}
