use crate::api::{Bindable, ConvertError};

/// Number of value tokens a named binding consumes from the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    /// Consumes no value tokens.
    Zero,
    /// Consumes exactly one value token.
    One,
    /// Consumes the maximal non-empty run of value tokens.
    AtLeastOne,
}

// We need a (dyn .. [ignoring V] ..) here in order to put the binders of varying value types V
// under one collection per destination T.
pub(crate) type BoundAction<T> = Box<dyn Bindable<T> + Send + Sync>;
pub(crate) type CatchAllAction<T> = Box<dyn Fn(&mut T, &[String]) + Send + Sync>;

/// One declared pattern matched by literal name.
pub(crate) struct NamedBinding<T> {
    name: String,
    arity: Arity,
    action: BoundAction<T>,
}

impl<T> NamedBinding<T> {
    pub(crate) fn new(name: impl Into<String>, arity: Arity, action: BoundAction<T>) -> Self {
        Self {
            name: name.into(),
            arity,
            action,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn arity(&self) -> Arity {
        self.arity
    }

    pub(crate) fn matched(&self, target: &mut T) {
        self.action.matched(target);
    }

    pub(crate) fn capture(&self, target: &mut T, token: &str) -> Result<(), ConvertError> {
        self.action.capture(target, token)
    }
}

/// One declared pattern matched by queue order.
pub(crate) struct PositionalBinding<T> {
    name: String,
    action: BoundAction<T>,
}

impl<T> PositionalBinding<T> {
    pub(crate) fn new(name: impl Into<String>, action: BoundAction<T>) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn matched(&self, target: &mut T) {
        self.action.matched(target);
    }

    pub(crate) fn capture(&self, target: &mut T, token: &str) -> Result<(), ConvertError> {
        self.action.capture(target, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Scalar, Switch};

    #[test]
    fn named_binding() {
        // Setup
        let mut target = false;
        let binding = NamedBinding::new(
            "-v",
            Arity::Zero,
            Box::new(Switch::new(|flag: &mut bool| flag, true)),
        );

        // Execute
        binding.matched(&mut target);

        // Verify
        assert_eq!(binding.name(), "-v");
        assert_eq!(binding.arity(), Arity::Zero);
        assert!(target);
    }

    #[test]
    fn positional_binding() {
        // Setup
        let mut target: u32 = 0;
        let binding =
            PositionalBinding::new("count", Box::new(Scalar::new(|value: &mut u32| value)));

        // Execute
        binding.capture(&mut target, "5").unwrap();

        // Verify
        assert_eq!(binding.name(), "count");
        assert_eq!(target, 5);
    }
}
