use thiserror::Error;

/// Marker trait for binders that can serve a bare flag (consuming no value tokens)
pub trait BareBinder {}

/// Marker trait for binders that consume exactly one value token.
pub trait ValueBinder {}

/// Marker trait for binders that consume a run of value tokens.
pub trait BatchBinder {}

/// Behaviour to bind matched tokens onto the destination type `T`.
///
/// We use this at the bottom of the registry object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait Bindable<T> {
    /// Declare that the binding has been matched.
    fn matched(&self, target: &mut T);

    /// Bind a single consumed value token onto the target.
    fn capture(&self, target: &mut T, token: &str) -> Result<(), ConvertError>;
}

#[derive(Debug, Error)]
#[doc(hidden)]
#[error("cannot convert '{token}' to {type_name}.")]
pub struct ConvertError {
    pub(crate) token: String,
    pub(crate) type_name: &'static str,
}

impl ConvertError {
    pub(crate) fn new(token: &str, type_name: &'static str) -> Self {
        Self {
            token: token.to_string(),
            type_name,
        }
    }
}
