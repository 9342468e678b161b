//! Caller-supplied defaults for lookups that miss.
//!
//! Every lookup in this crate that fails to find a key returns the value of a
//! [`Fallback`]. A fallback is either a literal value or a producer that runs
//! only when the lookup actually misses.

use std::fmt;

use super::{Map, Value};
use crate::Container;

type Producer = Box<dyn FnOnce(&[Value]) -> Value>;

/// A literal default or a producer of one.
///
/// # Examples
///
/// ```
/// # use strata::{Fallback, Value};
/// assert_eq!(Fallback::from("n/a").resolve(), Value::from("n/a"));
/// assert_eq!(Fallback::lazy(|| Value::Int(7)).resolve(), Value::Int(7));
/// assert_eq!(Fallback::none().resolve(), Value::Null);
///
/// let sum = Fallback::with_args(|args| {
///     Value::Int(args.iter().filter_map(Value::as_int).sum())
/// });
/// assert_eq!(sum.resolve_with(&[Value::Int(2), Value::Int(3)]), Value::Int(5));
/// ```
pub enum Fallback {
    /// Returned as-is
    Value(Value),
    /// Invoked on a miss
    Producer(Producer),
}

impl Fallback {
    /// The `Null` default
    pub fn none() -> Self {
        Fallback::Value(Value::Null)
    }

    /// Wraps a zero-argument producer
    pub fn lazy<F>(producer: F) -> Self
    where
        F: FnOnce() -> Value + 'static,
    {
        Fallback::Producer(Box::new(move |_| producer()))
    }

    /// Wraps a producer that receives the arguments given to [`Fallback::resolve_with`]
    pub fn with_args<F>(producer: F) -> Self
    where
        F: FnOnce(&[Value]) -> Value + 'static,
    {
        Fallback::Producer(Box::new(producer))
    }

    /// Returns the literal or invokes the producer with no arguments
    pub fn resolve(self) -> Value {
        self.resolve_with(&[])
    }

    /// Returns the literal or invokes the producer with `args`
    pub fn resolve_with(self, args: &[Value]) -> Value {
        match self {
            Fallback::Value(value) => value,
            Fallback::Producer(producer) => producer(args),
        }
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Fallback::none()
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Fallback::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Resolves a default the way every lookup miss does.
pub fn value_of(default: impl Into<Fallback>) -> Value {
    default.into().resolve()
}

macro_rules! literal_fallback {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Fallback {
                fn from(value: $ty) -> Self {
                    Fallback::Value(Value::from(value))
                }
            }
        )*
    };
}

literal_fallback!(bool, i64, i32, u32, usize, f64, String, &str, Map, Container, Vec<Value>);

impl From<Value> for Fallback {
    fn from(value: Value) -> Self {
        Fallback::Value(value)
    }
}

impl From<()> for Fallback {
    fn from(_: ()) -> Self {
        Fallback::none()
    }
}
