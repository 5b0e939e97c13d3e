//! `argbind` is a declarative command line token resolver for Rust.
//!
//! Although other crates provide command line parser functionality, most are full Cli frameworks
//! with help rendering and sub-command structure.
//! `argbind` deliberately is not.
//! It concentrates on a single concern: walk an ordered token sequence exactly once, and bind
//! each token onto a strongly-typed destination value according to a declared registry.
//! Specifically, `argbind` attempts to prioritize the following design concerns:
//! * *Type safe token binding*:
//! The user should not call any `&str -> V` conversion functions directly.
//! All value conversion is controlled by [`std::str::FromStr`].
//! * *Declaration order is semantics*:
//! Positional bindings consume tokens strictly in declaration order, and named bindings match
//! with first-declared precedence.
//! The registry is append-only; there is no removal or redeclaration Api.
//! * *Freeze, then resolve*:
//! A registry is declared once and frozen into a [`Resolver`].
//! The resolver is immutable and may be reused across any number of sequential or concurrent
//! resolutions; every resolution produces a fresh destination value.
//! * *Reasonable performance*:
//! The resolver should be *fast enough*.
//! We are of the opinion that the cost of token resolution is insignificant with respect to any
//! non-trivial program.
//! That said, `argbind` will still aim to minimize its memory & CPU footprint, within reason.
//!
//! # Usage
//! Configure `argbind` by starting with a [`BindingRegistry`] and declaring bindings against
//! your destination type, then freeze it with [`BindingRegistry::build`].
//!
//! ```
//! use argbind::{BindingRegistry, Collection, Scalar, Switch};
//!
//! #[derive(Debug, Default, PartialEq, Eq)]
//! struct Settings {
//!     path: String,
//!     count: u32,
//!     verbose: bool,
//!     items: Vec<String>,
//!     rest: Vec<String>,
//! }
//!
//! let resolver = BindingRegistry::new()
//!     .positional("path", Scalar::new(|s: &mut Settings| &mut s.path))
//!     .positional("count", Scalar::new(|s: &mut Settings| &mut s.count))
//!     .flag("-v", Switch::new(|s: &mut Settings| &mut s.verbose, true))
//!     .flag_with_values("-items", Collection::new(|s: &mut Settings| &mut s.items))
//!     .catch_all(|s: &mut Settings, leftover| s.rest.extend_from_slice(leftover))
//!     .build();
//!
//! let settings = resolver
//!     .resolve(&["in.txt", "10", "stray", "-v", "-items", "a", "b"])
//!     .unwrap();
//!
//! assert_eq!(settings.path, "in.txt".to_string());
//! assert_eq!(settings.count, 10);
//! assert!(settings.verbose);
//! assert_eq!(settings.items, vec!["a".to_string(), "b".to_string()]);
//! assert_eq!(settings.rest, vec!["stray".to_string()]);
//! ```
//!
//! ### Binders
//! Each binding takes a *binder* pairing a typed field accessor `Fn(&mut T) -> &mut V` with the
//! conversion behaviour for the tokens it consumes:
//! * [`Scalar`]: binds a single converted token.
//! This is the most common binder; it applies to both positional and flag-with-value bindings.
//! * [`Optional`]: the `Scalar` analogue for `Option<V>` fields, wrapping the converted token
//! into `Some`.
//! * [`Switch`]: binds a bare flag to a pre-declared value.
//! Note that `Switch` may apply to any `Clone` type `V` (not restricted to just `bool`).
//! * [`Trigger`]: binds a bare flag to an arbitrary mutation of the destination, for flags with
//! no associated field.
//! * [`Collection`]: binds a flag-with-values run, converting each token and accumulating the
//! results into any collection that implements [`Accumulate`].
//! `argbind` provides this implementation for `Vec<V>`, `VecDeque<V>`, `HashSet<V>` and
//! `BTreeSet<V>`.
//!
//! ### Leftovers
//! A token that matches no named binding and finds the positional queue exhausted lands on the
//! *leftover list*.
//! When a [`BindingRegistry::catch_all`] binding is declared, the full list is delivered to it
//! once, in encounter order, after the pass; otherwise leftovers are silently discarded.
//! Use [`BindingRegistry::strict`] to fail on the first unclaimed token instead.
//!
//! ### Matching rule
//! Token-to-name matching is exact string equality.
//! With [`BindingRegistry::ignore_case`], both sides are uppercased before the comparison.
//! There is no prefix matching and no `--name=value` splitting, and short flags do not combine
//! (`-ab` only ever matches a binding literally named `-ab`).
//! Names are opaque literals, so `-v`, `--verbose`, `/V` and bare `verbose` are all equally
//! valid.
//!
//! ### Failures
//! [`Resolver::resolve`] returns a [`ResolveError`] describing the first failure: a named
//! binding without its value tokens, an exhausted input with positional bindings still pending,
//! a token that would not convert, or (under [`BindingRegistry::strict`]) an unclaimed token.
//! [`Resolver::try_resolve`] is the thin projection for call sites that only care whether
//! resolution succeeded.
#![deny(missing_docs)]
mod api;
mod resolver;

pub use api::*;
pub use resolver::{ConfigError, ResolveError, Resolver};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
