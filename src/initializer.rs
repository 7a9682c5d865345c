//! Tagged initializer selectors

use crate::value::Method;

/// The conventional initializer member name
pub const DEFAULT_INITIALIZER: &str = "_init";

/// Selects the initializer run at construction or composition time
///
/// An explicit method is bound once, at composition. A named selector is
/// resolved against the finished target instead: per call against the
/// finished instance for instance initializers, once against the finished
/// type's static lookup for type-level initializers. A name that resolves
/// to nothing callable is tolerated - construction returns the bare
/// instance, composition returns the type.
#[derive(Clone, Debug)]
pub enum Initializer {
    /// Use this method directly
    Explicit(Method),
    /// Look the initializer up by member name on the finished target
    Named(String),
}

impl Default for Initializer {
    fn default() -> Self {
        Initializer::Named(DEFAULT_INITIALIZER.to_string())
    }
}

impl From<Method> for Initializer {
    fn from(method: Method) -> Self {
        Initializer::Explicit(method)
    }
}

impl From<&str> for Initializer {
    fn from(name: &str) -> Self {
        Initializer::Named(name.to_string())
    }
}

impl From<String> for Initializer {
    fn from(name: String) -> Self {
        Initializer::Named(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test the default selector is the conventional name
    #[test]
    fn test_default_selector() {
        match Initializer::default() {
            Initializer::Named(name) => assert_eq!(name, DEFAULT_INITIALIZER),
            other => panic!("expected named default, got {other:?}"),
        }
    }

    /// Test selector conversions
    #[test]
    fn test_selector_conversions() {
        assert!(matches!(
            Initializer::from("initializer"),
            Initializer::Named(name) if name == "initializer"
        ));

        let method = Method::new(|this, _| Ok(this.clone()));
        assert!(matches!(
            Initializer::from(method),
            Initializer::Explicit(_)
        ));
    }
}
