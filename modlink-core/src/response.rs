//! Response conversion traits.

use crate::error::BoxError;
use std::{any::Any, fmt};

/// The value an action hands back to the router.
///
/// Most actions are fire-and-forget and produce [`Response::Empty`]. Actions
/// that do produce something return it type-erased; callers that know the
/// concrete type can downcast it.
#[derive(Default)]
pub enum Response {
    /// The action produced nothing.
    #[default]
    Empty,
    /// The action produced a value.
    Value(Box<dyn Any + Send>),
}

impl Response {
    /// Wrap a value.
    pub fn value<T: Any + Send>(value: T) -> Self {
        Response::Value(Box::new(value))
    }

    /// Check if the action produced nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, Response::Empty)
    }

    /// Borrow the produced value as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Response::Value(v) => v.downcast_ref(),
            Response::Empty => None,
        }
    }

    /// Take the produced value as `T`.
    ///
    /// Returns the response unchanged if it is empty or holds another type.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self {
            Response::Value(v) => v.downcast::<T>().map(|b| *b).map_err(Response::Value),
            Response::Empty => Err(Response::Empty),
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Empty => f.write_str("Empty"),
            Response::Value(_) => f.write_str("Value(..)"),
        }
    }
}

/// Trait for converting an action's return value into a [`Response`].
///
/// # Default Implementations
///
/// - `()` → `Empty`
/// - `Response` → As is
/// - `String`, `&'static str`, `bool`, integers → `Value`
/// - `Option<T>` → `None` is `Empty`, `Some` delegates
/// - `Result<T, E>` → Delegates to inner `T` or propagates error
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoResponse`",
    label = "missing `IntoResponse` implementation",
    note = "Wrap arbitrary values with `Response::value`."
)]
pub trait IntoResponse {
    /// Convert the output into a response or an error.
    fn into_response(self) -> Result<Response, BoxError>;
}

impl IntoResponse for () {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(Response::Empty)
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> Result<Response, BoxError> {
        Ok(self)
    }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: Into<BoxError>,
{
    fn into_response(self) -> Result<Response, BoxError> {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => Err(e.into()),
        }
    }
}

impl<T: IntoResponse> IntoResponse for Option<T> {
    fn into_response(self) -> Result<Response, BoxError> {
        match self {
            Some(t) => t.into_response(),
            None => Ok(Response::Empty),
        }
    }
}

macro_rules! value_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoResponse for $ty {
                fn into_response(self) -> Result<Response, BoxError> {
                    Ok(Response::value(self))
                }
            }
        )*
    };
}

value_response!(String, &'static str, bool, i32, i64, u32, u64, usize, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_empty() {
        assert!(().into_response().unwrap().is_empty());
    }

    #[test]
    fn test_value_roundtrip() {
        let response = 7u32.into_response().unwrap();
        assert_eq!(response.downcast_ref::<u32>(), Some(&7));
        assert!(response.downcast_ref::<i64>().is_none());
        assert_eq!(response.downcast::<u32>().ok(), Some(7));
    }

    #[test]
    fn test_result_propagates_error() {
        let out: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = out.into_response().unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_option_none_is_empty() {
        let out: Option<String> = None;
        assert!(out.into_response().unwrap().is_empty());
    }
}
