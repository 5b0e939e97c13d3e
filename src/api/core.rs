use crate::api::bind::{BareBinder, BatchBinder, Bindable, ValueBinder};
use crate::resolver::model::{Arity, CatchAllAction, NamedBinding, PositionalBinding};
use crate::resolver::{ConfigError, Resolver};

/// The binding registry declaration for a destination type `T`.
///
/// Bindings are declared fluently, then frozen into a [`Resolver`] via
/// [`BindingRegistry::build`] (or [`BindingRegistry::build_resolver`]).
/// The registry is append-only; declaration order fixes both positional consumption order and
/// named matching precedence.
///
/// ### Example
/// ```
/// use argbind::{BindingRegistry, Scalar, Switch};
///
/// #[derive(Default)]
/// struct Settings {
///     path: String,
///     verbose: bool,
/// }
///
/// let resolver = BindingRegistry::new()
///     .positional("path", Scalar::new(|s: &mut Settings| &mut s.path))
///     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
///     .build();
/// let settings = resolver.resolve(&["input.txt", "-v"]).unwrap();
///
/// assert_eq!(settings.path, "input.txt".to_string());
/// assert!(settings.verbose);
/// ```
pub struct BindingRegistry<T> {
    named: Vec<NamedBinding<T>>,
    positionals: Vec<PositionalBinding<T>>,
    catch_alls: Vec<CatchAllAction<T>>,
    ignore_case: bool,
    strict: bool,
}

impl<T> Default for BindingRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BindingRegistry<T> {
    /// Create a binding registry.
    pub fn new() -> Self {
        Self {
            named: Vec::default(),
            positionals: Vec::default(),
            catch_alls: Vec::default(),
            ignore_case: false,
            strict: false,
        }
    }

    /// Declare a positional binding; each consumes exactly one token.
    ///
    /// The order of positional declarations corresponds to their consumption order during
    /// resolution.  Named declarations interleaved between them do not affect that order.
    /// The `name` identifies the binding in failure values only; positionals are never matched
    /// by literal.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     path: String,
    ///     count: u32,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .positional("path", Scalar::new(|s: &mut Settings| &mut s.path))
    ///     .positional("count", Scalar::new(|s: &mut Settings| &mut s.count))
    ///     .build();
    /// let settings = resolver.resolve(&["input.txt", "2"]).unwrap();
    ///
    /// assert_eq!(settings.path, "input.txt".to_string());
    /// assert_eq!(settings.count, 2);
    /// ```
    pub fn positional(
        mut self,
        name: impl Into<String>,
        field: impl Bindable<T> + ValueBinder + Send + Sync + 'static,
    ) -> Self {
        self.positionals
            .push(PositionalBinding::new(name, Box::new(field)));
        self
    }

    /// Declare a flag binding; on match, no token is consumed besides the name itself.
    ///
    /// Use a [`Switch`](crate::Switch) to assign a pre-declared value, or a
    /// [`Trigger`](crate::Trigger) to run an arbitrary mutation.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Switch, Trigger};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     verbose: bool,
    ///     retries: u32,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
    ///     .flag("-r", Trigger::new(|s: &mut Settings| s.retries += 1))
    ///     .build();
    /// let settings = resolver.resolve(&["-r", "-v", "-r"]).unwrap();
    ///
    /// assert!(settings.verbose);
    /// assert_eq!(settings.retries, 2);
    /// ```
    pub fn flag(
        mut self,
        name: impl Into<String>,
        field: impl Bindable<T> + BareBinder + Send + Sync + 'static,
    ) -> Self {
        self.named
            .push(NamedBinding::new(name, Arity::Zero, Box::new(field)));
        self
    }

    /// Declare a named binding that consumes exactly one following token as its value.
    ///
    /// The value must not itself be a recognized name; otherwise resolution fails with
    /// [`ResolveError::MissingValue`](crate::ResolveError::MissingValue).
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Optional, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     output: String,
    ///     level: Option<u32>,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag_with_value("-o", Scalar::new(|s: &mut Settings| &mut s.output))
    ///     .flag_with_value("-l", Optional::new(|s: &mut Settings| &mut s.level))
    ///     .build();
    /// let settings = resolver.resolve(&["-o", "out.txt", "-l", "3"]).unwrap();
    ///
    /// assert_eq!(settings.output, "out.txt".to_string());
    /// assert_eq!(settings.level, Some(3));
    /// ```
    pub fn flag_with_value(
        mut self,
        name: impl Into<String>,
        field: impl Bindable<T> + ValueBinder + Send + Sync + 'static,
    ) -> Self {
        self.named
            .push(NamedBinding::new(name, Arity::One, Box::new(field)));
        self
    }

    /// Declare a named binding that consumes the maximal run of following non-name tokens.
    ///
    /// The run extends up to (but excluding) the next recognized name, or the end of input.
    /// An empty run fails resolution with
    /// [`ResolveError::MissingValue`](crate::ResolveError::MissingValue).
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Collection, Switch};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     items: Vec<String>,
    ///     verbose: bool,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
    ///     .flag_with_values("-items", Collection::new(|s: &mut Settings| &mut s.items))
    ///     .build();
    /// let settings = resolver.resolve(&["-items", "a", "b", "-v"]).unwrap();
    ///
    /// assert_eq!(settings.items, vec!["a".to_string(), "b".to_string()]);
    /// assert!(settings.verbose);
    /// ```
    pub fn flag_with_values(
        mut self,
        name: impl Into<String>,
        field: impl Bindable<T> + BatchBinder + Send + Sync + 'static,
    ) -> Self {
        self.named
            .push(NamedBinding::new(name, Arity::AtLeastOne, Box::new(field)));
        self
    }

    /// Declare the catch-all binding, receiving every token that matched neither a named binding
    /// nor a pending positional slot.
    ///
    /// The action is invoked at most once per resolution, with the full leftover list in
    /// encounter order; it is not invoked when there are no leftovers.  Without a catch-all,
    /// leftovers are silently discarded (see [`BindingRegistry::strict`]).
    /// Declaring more than one catch-all fails at build time.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Scalar};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     path: String,
    ///     rest: Vec<String>,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .positional("path", Scalar::new(|s: &mut Settings| &mut s.path))
    ///     .catch_all(|s: &mut Settings, leftover| s.rest.extend_from_slice(leftover))
    ///     .build();
    /// let settings = resolver.resolve(&["a", "x", "y"]).unwrap();
    ///
    /// assert_eq!(settings.path, "a".to_string());
    /// assert_eq!(settings.rest, vec!["x".to_string(), "y".to_string()]);
    /// ```
    pub fn catch_all(mut self, action: impl Fn(&mut T, &[String]) + Send + Sync + 'static) -> Self {
        self.catch_alls.push(Box::new(action));
        self
    }

    /// Match named bindings case-insensitively, by uppercasing both the declared name and the
    /// input token.
    ///
    /// Applies to every named binding in the registry, including the boundary lookahead for
    /// value runs.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, Switch};
    ///
    /// #[derive(Default)]
    /// struct Settings {
    ///     verbose: bool,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
    ///     .ignore_case()
    ///     .build();
    /// let settings = resolver.resolve(&["-V"]).unwrap();
    ///
    /// assert!(settings.verbose);
    /// ```
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Fail resolution on the first unclaimed token instead of discarding leftovers.
    ///
    /// Has no effect when a catch-all binding is declared: the catch-all claims the leftovers.
    ///
    /// ### Example
    /// ```
    /// use argbind::{BindingRegistry, ResolveError, Switch};
    ///
    /// #[derive(Debug, Default)]
    /// struct Settings {
    ///     verbose: bool,
    /// }
    ///
    /// let resolver = BindingRegistry::new()
    ///     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
    ///     .strict()
    ///     .build();
    /// let error = resolver.resolve(&["-v", "what"]).unwrap_err();
    ///
    /// assert_eq!(error, ResolveError::UnexpectedToken("what".to_string()));
    /// ```
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Build the token resolver as a Result.
    /// This freezes the declaration and checks for errors (ex: a repeated catch-all).
    pub fn build_resolver(self) -> Result<Resolver<T>, ConfigError> {
        Resolver::new(
            self.named,
            self.positionals,
            self.catch_alls,
            self.ignore_case,
            self.strict,
        )
    }

    /// Build the token resolver.
    /// This freezes the declaration and checks for errors (ex: a repeated catch-all).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> Resolver<T> {
        match self.build_resolver() {
            Ok(resolver) => resolver,
            Err(error) => {
                eprintln!("{error}");
                std::process::exit(1);
            }
        }
    }
}
