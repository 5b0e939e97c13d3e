use std::fmt;

use thiserror::Error;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::api::ConvertError;
use crate::resolver::model::{Arity, CatchAllAction, NamedBinding, PositionalBinding};

/// An error that occurs while declaring the binding registry.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// An error that occurs while resolving a token sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A named binding matched, but no eligible value token followed it before the next
    /// recognized name or the end of input.
    #[error("no value provided to binding '{0}'.")]
    MissingValue(String),

    /// Fewer tokens capable of filling positional slots were supplied than positional bindings
    /// declared.
    #[error("not enough tokens provided to positional binding '{0}'.")]
    MissingPositional(String),

    /// A consumed value token failed conversion into the bound field's type.
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidValue {
        /// The offending input token.
        token: String,
        /// The name of the type the token would not convert into.
        type_name: &'static str,
    },

    /// Strict mode only: a token matched neither a named binding nor a pending positional slot.
    #[error("token '{0}' does not match any binding.")]
    UnexpectedToken(String),
}

impl From<ConvertError> for ResolveError {
    fn from(error: ConvertError) -> Self {
        ResolveError::InvalidValue {
            token: error.token,
            type_name: error.type_name,
        }
    }
}

/// The frozen binding registry, ready to resolve token sequences onto values of `T`.
///
/// Immutable once built; a single `Resolver` may serve any number of sequential or concurrent
/// resolutions.
pub struct Resolver<T> {
    named: Vec<NamedBinding<T>>,
    // Match keys parallel to `named`, pre-folded when running case-insensitive.
    keys: Vec<String>,
    positionals: Vec<PositionalBinding<T>>,
    catch_all: Option<CatchAllAction<T>>,
    ignore_case: bool,
    strict: bool,
}

impl<T> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver{..}").finish()
    }
}

impl<T> Resolver<T> {
    pub(crate) fn new(
        named: Vec<NamedBinding<T>>,
        positionals: Vec<PositionalBinding<T>>,
        mut catch_alls: Vec<CatchAllAction<T>>,
        ignore_case: bool,
        strict: bool,
    ) -> Result<Self, ConfigError> {
        if catch_alls.len() > 1 {
            return Err(ConfigError(
                "Cannot declare more than one catch-all binding.".to_string(),
            ));
        }

        let keys = named
            .iter()
            .map(|binding| {
                if ignore_case {
                    binding.name().to_uppercase()
                } else {
                    binding.name().to_string()
                }
            })
            .collect();
        Ok(Self {
            named,
            keys,
            positionals,
            catch_all: catch_alls.pop(),
            ignore_case,
            strict,
        })
    }

    /// Resolve the token sequence into a freshly produced `T`.
    ///
    /// Walks the tokens in a single pass: each token either matches a named binding (which may
    /// consume following value tokens), fills the next pending positional binding, or lands on
    /// the leftover list for the catch-all.  Failures abort the pass at the point of detection;
    /// the partially populated value is discarded.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Scalar, Switch};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     verbose: bool,
    ///     level: u32,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
    ///     .flag_with_value("-l", Scalar::new(|s: &mut Settings| &mut s.level))
    ///     .build();
    /// let settings = resolver.resolve(&["-v", "-l", "3"]).unwrap();
    ///
    /// assert!(settings.verbose);
    /// assert_eq!(settings.level, 3);
    /// ```
    pub fn resolve(&self, tokens: &[&str]) -> Result<T, ResolveError>
    where
        T: Default,
    {
        let mut target = T::default();
        let mut pending = self.positionals.iter();
        let mut leftover: Vec<String> = Vec::default();
        let mut index = 0;

        while index < tokens.len() {
            let token = tokens[index];

            match self.find_named(token) {
                Some(binding) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!(
                            "Token '{token}' matched the named binding '{name}'.",
                            name = binding.name()
                        );
                    }

                    binding.matched(&mut target);

                    match binding.arity() {
                        Arity::Zero => {
                            // Only the name token is consumed.
                        }
                        Arity::One => match tokens.get(index + 1) {
                            Some(value) if !self.is_named(value) => {
                                binding.capture(&mut target, value)?;
                                index += 1;
                            }
                            _ => {
                                return Err(ResolveError::MissingValue(
                                    binding.name().to_string(),
                                ));
                            }
                        },
                        Arity::AtLeastOne => {
                            let mut end = index + 1;

                            while end < tokens.len() && !self.is_named(tokens[end]) {
                                end += 1;
                            }

                            if end == index + 1 {
                                return Err(ResolveError::MissingValue(
                                    binding.name().to_string(),
                                ));
                            }

                            for value in &tokens[index + 1..end] {
                                binding.capture(&mut target, value)?;
                            }

                            // Flip to the last consumed value; the loop advances past it.
                            index = end - 1;
                        }
                    }
                }
                None => match pending.next() {
                    Some(positional) => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!(
                                "Token '{token}' fills the positional binding '{name}'.",
                                name = positional.name()
                            );
                        }

                        positional.matched(&mut target);
                        positional.capture(&mut target, token)?;
                    }
                    None => {
                        if self.strict && self.catch_all.is_none() {
                            return Err(ResolveError::UnexpectedToken(token.to_string()));
                        }

                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Token '{token}' is unclaimed; leftover.");
                        }

                        leftover.push(token.to_string());
                    }
                },
            }

            index += 1;
        }

        if let Some(positional) = pending.next() {
            return Err(ResolveError::MissingPositional(positional.name().to_string()));
        }

        if !leftover.is_empty() {
            if let Some(action) = &self.catch_all {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Dispatching {count} leftover token(s) to the catch-all binding.",
                        count = leftover.len()
                    );
                }

                action(&mut target, &leftover);
            }
        }

        Ok(target)
    }

    /// Resolve the token sequence, discarding the failure detail.
    ///
    /// The thin projection of [`Resolver::resolve`] for call sites that only care whether
    /// resolution succeeded.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     level: u32,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag_with_value("-l", Scalar::new(|s: &mut Settings| &mut s.level))
    ///     .build();
    ///
    /// assert!(resolver.try_resolve(&["-l", "3"]).is_some());
    /// assert!(resolver.try_resolve(&["-l"]).is_none());
    /// ```
    pub fn try_resolve(&self, tokens: &[&str]) -> Option<T>
    where
        T: Default,
    {
        self.resolve(tokens).ok()
    }

    fn find_named(&self, token: &str) -> Option<&NamedBinding<T>> {
        self.position(token).map(|index| &self.named[index])
    }

    fn is_named(&self, token: &str) -> bool {
        self.position(token).is_some()
    }

    // First match in declaration order, so duplicate names keep first-declared precedence.
    fn position(&self, token: &str) -> Option<usize> {
        if self.ignore_case {
            let folded = token.to_uppercase();
            self.keys.iter().position(|key| key == &folded)
        } else {
            self.keys.iter().position(|key| key == token)
        }
    }
}
