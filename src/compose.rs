// Copyright 2025 Cowboy AI, LLC.

//! Composition of constructible types from bases, mixins, and behavior

use crate::errors::{ComposeError, ComposeResult};
use crate::initializer::Initializer;
use crate::merge::merge;
use crate::template::Template;
use crate::type_object::Type;
use crate::value::{Members, Method, Value};
use tracing::debug;

/// Configuration for composing a [`Type`]
///
/// Every input is individually optional; the flexible positional convention
/// of prototype-style composition becomes named builder calls. The common
/// call shapes get convenience constructors: [`Compose::new`] for no base,
/// [`Compose::extend`] for a base, [`Compose::blend`] for mixins.
///
/// # Example
///
/// ```
/// use proto_compose::{Compose, Value};
///
/// let point = Compose::new()
///     .method("_init", |this, args| {
///         let instance = this.as_instance().expect("instance target");
///         if let [x, y] = args {
///             instance.set("x", x.clone());
///             instance.set("y", y.clone());
///         }
///         Ok(this.clone())
///     })
///     .compose_type()?;
///
/// let p = point.create(&[Value::from(3), Value::from(4)])?;
/// let p = p.as_instance().expect("instance result");
/// assert_eq!(p.get("x"), Some(Value::from(3)));
/// assert_eq!(p.get("y"), Some(Value::from(4)));
/// # Ok::<(), proto_compose::ComposeError>(())
/// ```
#[derive(Default)]
pub struct Compose {
    base: Option<Type>,
    mixins: Vec<Type>,
    members: Members,
    statics: Members,
    init: Initializer,
    type_init: Initializer,
    type_init_args: Vec<Value>,
}

impl Compose {
    /// Start a composition with no base (the root type is the default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a composition extending the given base type
    pub fn extend(base: &Type) -> Self {
        Self::new().base(base)
    }

    /// Start a composition blending the given mixin types, in order
    pub fn blend<'a>(mixins: impl IntoIterator<Item = &'a Type>) -> Self {
        Self::new().mixins(mixins)
    }

    /// Set the base type to extend
    pub fn base(mut self, base: &Type) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Append one mixin type
    pub fn mixin(mut self, mixin: &Type) -> Self {
        self.mixins.push(mixin.clone());
        self
    }

    /// Append mixin types, preserving the given order
    pub fn mixins<'a>(mut self, mixins: impl IntoIterator<Item = &'a Type>) -> Self {
        self.mixins.extend(mixins.into_iter().cloned());
        self
    }

    /// Add an instance-level member
    pub fn member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members.insert(name.into(), value.into());
        self
    }

    /// Add an instance-level method
    pub fn method(
        self,
        name: impl Into<String>,
        f: impl Fn(&Value, &[Value]) -> ComposeResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.member(name, Method::new(f))
    }

    /// Add every member of the given map as instance-level behavior
    pub fn members(mut self, members: Members) -> Self {
        merge(&members, &mut self.members);
        self
    }

    /// Add a type-level (static) member
    pub fn static_member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(name.into(), value.into());
        self
    }

    /// Add a type-level (static) method
    pub fn static_method(
        self,
        name: impl Into<String>,
        f: impl Fn(&Value, &[Value]) -> ComposeResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.static_member(name, Method::new(f))
    }

    /// Add every member of the given map as type-level behavior
    pub fn statics(mut self, statics: Members) -> Self {
        merge(&statics, &mut self.statics);
        self
    }

    /// Select the instance initializer: a method, or a member name
    ///
    /// Defaults to looking up `_init` on the finished instance at each
    /// construction.
    pub fn init(mut self, selector: impl Into<Initializer>) -> Self {
        self.init = selector.into();
        self
    }

    /// Select the type-level initializer: a method, or a static member name
    ///
    /// Defaults to looking up `_init` through the finished type's static
    /// chain once, at composition.
    pub fn type_init(mut self, selector: impl Into<Initializer>) -> Self {
        self.type_init = selector.into();
        self
    }

    /// Arguments handed to the type-level initializer (default: none)
    pub fn type_init_args(mut self, args: impl IntoIterator<Item = Value>) -> Self {
        self.type_init_args = args.into_iter().collect();
        self
    }

    /// Compose the type and return the type initializer's result
    ///
    /// The composition order is contract:
    ///
    /// 1. the base defaults to the root type; its template becomes the new
    ///    type's `superTemplate`
    /// 2. each mixin, in order, contributes its own template members and its
    ///    own statics - later mixins overwrite earlier ones
    /// 3. the explicit instance and static behavior merge last and win
    /// 4. the fresh template resolves against the base template, the
    ///    constructor back-reference is linked, lineage is recorded
    /// 5. the type initializer resolves and, if callable, runs exactly once
    ///    with `this` bound to the new type; its return value is the result
    ///    of this function. Otherwise the new type is returned.
    ///
    /// Bases and mixins are only read; composing never mutates an input.
    ///
    /// # Errors
    ///
    /// Only errors raised by the type initializer itself, propagated
    /// unchanged.
    pub fn compose(self) -> ComposeResult<Value> {
        let Compose {
            base,
            mixins,
            members,
            statics,
            init,
            type_init,
            type_init_args,
        } = self;

        let base = base.unwrap_or_else(Type::object);
        let super_template = base.template().clone();
        debug!(
            mixins = mixins.len(),
            members = members.len(),
            statics = statics.len(),
            "composing type"
        );

        let mut template_members = Members::new();
        let mut static_members = Members::new();
        for mixin in &mixins {
            merge(&mixin.own_statics(), &mut static_members);
            merge(mixin.template().own_members(), &mut template_members);
        }
        merge(&members, &mut template_members);
        merge(&statics, &mut static_members);

        let template = Template::extend(&super_template, template_members);
        let ty = Type::from_parts(
            template.clone(),
            static_members,
            mixins,
            base,
            super_template,
            init,
        );
        template.set_constructor(&ty);

        let resolved = match type_init {
            Initializer::Explicit(method) => Some(method),
            Initializer::Named(name) => match ty.static_member(&name) {
                Some(Value::Method(method)) => Some(method),
                _ => None,
            },
        };
        match resolved {
            Some(method) => method.invoke(&Value::Type(ty.clone()), &type_init_args),
            None => Ok(Value::Type(ty)),
        }
    }

    /// Compose the type, expecting the result to be the type itself
    ///
    /// The convenience terminal for the common shape where no type
    /// initializer substitutes a different result.
    ///
    /// # Errors
    ///
    /// [`ComposeError::NotAType`] if a type initializer returned something
    /// other than a type, plus anything [`Compose::compose`] propagates.
    pub fn compose_type(self) -> ComposeResult<Type> {
        match self.compose()? {
            Value::Type(ty) => Ok(ty),
            other => Err(ComposeError::NotAType {
                found: other.kind(),
            }),
        }
    }
}
