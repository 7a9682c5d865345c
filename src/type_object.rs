//! Composed types: constructible callables with lineage metadata

use crate::errors::{ComposeError, ComposeResult};
use crate::initializer::Initializer;
use crate::instance::Instance;
use crate::template::Template;
use crate::value::{Members, Value};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// A constructible type produced by composition
///
/// A type carries its behavior [`Template`], its own static members, the
/// mixin types that contributed to it (in order, verbatim), and the direct
/// `superType`/`superTemplate` lineage captured at composition time.
/// Handles are cheap to clone and compare by identity.
///
/// Construction goes through [`Type::create`]; the instance initializer
/// resolved at composition decides what each call returns.
#[derive(Clone)]
pub struct Type(pub(crate) Arc<TypeData>);

pub(crate) struct TypeData {
    pub(crate) template: Template,
    pub(crate) statics: RwLock<Members>,
    pub(crate) mixins: Vec<Type>,
    pub(crate) super_type: Option<Type>,
    pub(crate) super_template: Option<Template>,
    pub(crate) instance_init: Initializer,
}

impl Type {
    /// The universal root type
    ///
    /// The default base for composition and the terminus of every lineage
    /// walk. It has an empty template, no statics, and no super links;
    /// every instance is an instance of it.
    pub fn object() -> Type {
        static OBJECT: OnceLock<Type> = OnceLock::new();
        OBJECT
            .get_or_init(|| {
                let template = Template::root();
                let ty = Type(Arc::new(TypeData {
                    template: template.clone(),
                    statics: RwLock::new(Members::new()),
                    mixins: Vec::new(),
                    super_type: None,
                    super_template: None,
                    instance_init: Initializer::default(),
                }));
                template.set_constructor(&ty);
                ty
            })
            .clone()
    }

    pub(crate) fn from_parts(
        template: Template,
        statics: Members,
        mixins: Vec<Type>,
        base: Type,
        super_template: Template,
        instance_init: Initializer,
    ) -> Type {
        Type(Arc::new(TypeData {
            template,
            statics: RwLock::new(statics),
            mixins,
            super_type: Some(base),
            super_template: Some(super_template),
            instance_init,
        }))
    }

    /// Construct an instance of this type
    ///
    /// With an explicit initializer, the initializer runs with `this` bound
    /// to a fresh instance and the given arguments, and its return value is
    /// the construction result - initializers may substitute any value. With
    /// a named initializer, the name is looked up on the finished instance
    /// at every call; if it resolves to a callable it runs the same way,
    /// otherwise the bare instance is returned.
    ///
    /// # Errors
    ///
    /// Only errors raised by the initializer itself, propagated unchanged.
    pub fn create(&self, args: &[Value]) -> ComposeResult<Value> {
        trace!(args = args.len(), "creating instance");
        let instance = Instance::new(self);
        match &self.0.instance_init {
            Initializer::Explicit(method) => method.invoke(&Value::Instance(instance), args),
            Initializer::Named(name) => match instance.get(name) {
                Some(Value::Method(method)) => {
                    method.invoke(&Value::Instance(instance.clone()), args)
                }
                _ => Ok(Value::Instance(instance)),
            },
        }
    }

    /// This type's behavior template
    pub fn template(&self) -> &Template {
        &self.0.template
    }

    /// The mixin types that contributed to this type, in the order given
    ///
    /// Empty when the type was composed without mixins.
    pub fn mixins(&self) -> &[Type] {
        &self.0.mixins
    }

    /// The direct base type (`None` only on the root type)
    pub fn super_type(&self) -> Option<&Type> {
        self.0.super_type.as_ref()
    }

    /// The direct base type's behavior template
    ///
    /// Exposed so an overriding initializer can invoke inherited behavior
    /// explicitly.
    pub fn super_template(&self) -> Option<&Template> {
        self.0.super_template.as_ref()
    }

    /// Look up a static member, walking the supertype chain
    ///
    /// Own statics shadow inherited ones. The walk is live: statics a type
    /// initializer assigned onto a base are visible from every descendant.
    pub fn static_member(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.statics.read().get(name) {
            return Some(value.clone());
        }
        self.0
            .super_type
            .as_ref()
            .and_then(|base| base.static_member(name))
    }

    /// Snapshot of the statics held directly on this type
    pub fn own_statics(&self) -> Members {
        self.0.statics.read().clone()
    }

    /// Assign a static member directly on this type
    ///
    /// Type-level initializers use this to assign onto `this`.
    pub fn set_static(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.statics.write().insert(name.into(), value.into());
    }

    /// Invoke a named static member with `this` bound to this type
    ///
    /// # Errors
    ///
    /// Returns an error if the member is missing from the whole supertype
    /// chain or resolves to something that is not callable.
    pub fn call_static(&self, name: &str, args: &[Value]) -> ComposeResult<Value> {
        match self.static_member(name) {
            Some(Value::Method(method)) => method.invoke(&Value::Type(self.clone()), args),
            Some(_) => Err(ComposeError::NotCallable {
                member: name.to_string(),
            }),
            None => Err(ComposeError::MemberNotFound {
                member: name.to_string(),
            }),
        }
    }

    /// Check whether this type is `other` or descends from it
    ///
    /// Mixins are not ancestors; only the supertype chain counts.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        let mut current = Some(self.clone());
        while let Some(ty) = current {
            if ty.ptr_eq(other) {
                return true;
            }
            current = ty.super_type().cloned();
        }
        false
    }

    /// Check whether two handles refer to the same type
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let statics = self.0.statics.read();
        let static_names: Vec<&str> = statics.keys().map(String::as_str).collect();
        let member_names: Vec<&str> = self
            .0
            .template
            .own_members()
            .keys()
            .map(String::as_str)
            .collect();
        f.debug_struct("Type")
            .field("members", &member_names)
            .field("statics", &static_names)
            .field("mixins", &self.0.mixins.len())
            .field("has_super", &self.0.super_type.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compose, Method};

    /// Test the root type is a stable singleton
    #[test]
    fn test_root_identity() {
        let root = Type::object();
        assert!(root.ptr_eq(&Type::object()));
        assert!(root.super_type().is_none());
        assert!(root.super_template().is_none());
        assert!(root.mixins().is_empty());
        assert!(root
            .template()
            .constructor()
            .is_some_and(|c| c.ptr_eq(&root)));
    }

    /// Test construction without a resolvable initializer returns a bare instance
    #[test]
    fn test_create_bare() {
        let ty = Compose::new().member("a", "a").compose_type().unwrap();

        let instance = ty.create(&[]).unwrap().into_instance().unwrap();
        assert!(instance.own_members().is_empty());
        assert_eq!(instance.get("a"), Some(Value::from("a")));
        assert!(instance.is_instance_of(&ty));
    }

    /// Test static lookup walks the supertype chain
    ///
    /// ```mermaid
    /// graph TD
    ///     C -->|static_member a| B
    ///     B -->|static_member a| A
    ///     A -->|own| V[value]
    /// ```
    #[test]
    fn test_static_chain_walk() {
        let a = Compose::new()
            .static_member("a", "a")
            .compose_type()
            .unwrap();
        let b = Compose::extend(&a).compose_type().unwrap();
        let c = Compose::extend(&b).static_member("c", "c").compose_type().unwrap();

        assert_eq!(c.static_member("a"), Some(Value::from("a")));
        assert_eq!(c.static_member("c"), Some(Value::from("c")));
        assert_eq!(c.static_member("missing"), None);

        // own_statics never includes inherited members
        assert!(!c.own_statics().contains_key("a"));
    }

    /// Test the static walk is live across later base mutation
    #[test]
    fn test_static_walk_is_live() {
        let a = Compose::new().compose_type().unwrap();
        let b = Compose::extend(&a).compose_type().unwrap();

        assert_eq!(b.static_member("late"), None);
        a.set_static("late", "value");
        assert_eq!(b.static_member("late"), Some(Value::from("value")));
    }

    /// Test strict static dispatch
    #[test]
    fn test_call_static() {
        let ty = Compose::new()
            .static_method("tag", |this, _| {
                Ok(this.clone())
            })
            .static_member("label", "plain")
            .compose_type()
            .unwrap();

        let result = ty.call_static("tag", &[]).unwrap();
        assert_eq!(result, Value::Type(ty.clone()));

        assert!(matches!(
            ty.call_static("label", &[]),
            Err(ComposeError::NotCallable { .. })
        ));
        assert!(matches!(
            ty.call_static("missing", &[]),
            Err(ComposeError::MemberNotFound { .. })
        ));
    }

    /// Test subtype walk includes self and the root
    #[test]
    fn test_is_subtype_of() {
        let a = Compose::new().compose_type().unwrap();
        let b = Compose::extend(&a).compose_type().unwrap();
        let other = Compose::new().compose_type().unwrap();

        assert!(b.is_subtype_of(&b));
        assert!(b.is_subtype_of(&a));
        assert!(b.is_subtype_of(&Type::object()));
        assert!(!b.is_subtype_of(&other));
        assert!(!a.is_subtype_of(&b));
    }

    /// Test initializer errors propagate out of create
    #[test]
    fn test_create_propagates_initializer_error() {
        let ty = Compose::new()
            .init(Method::new(|_, _| {
                Err(ComposeError::custom("bad config"))
            }))
            .compose_type()
            .unwrap();

        let err = ty.create(&[]).unwrap_err();
        assert_eq!(err.to_string(), "bad config");
    }
}
