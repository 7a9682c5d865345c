//! Instances produced by type construction

use crate::errors::{ComposeError, ComposeResult};
use crate::type_object::Type;
use crate::value::{Members, Value};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// An instance of a composed [`Type`]
///
/// An instance owns only the members assigned to it directly, plus a link
/// back to its type. Member lookup falls through own slots to the type's
/// behavior template. Handles are cheap to clone and compare by identity.
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

struct InstanceData {
    ty: Type,
    slots: RwLock<Members>,
}

impl Instance {
    /// Allocate a bare instance of the given type
    ///
    /// No initializer runs; this is the construction primitive that
    /// [`Type::create`] builds on.
    pub fn new(ty: &Type) -> Instance {
        Instance(Arc::new(InstanceData {
            ty: ty.clone(),
            slots: RwLock::new(Members::new()),
        }))
    }

    /// Look up a member: own slots first, then the type's template
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.slots.read().get(name) {
            return Some(value.clone());
        }
        self.0.ty.template().member(name)
    }

    /// Assign a member directly on this instance
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.slots.write().insert(name.into(), value.into());
    }

    /// Invoke a named member with `this` bound to this instance
    ///
    /// # Errors
    ///
    /// Returns an error if the member is missing or not callable. The
    /// tolerant lookup-and-skip path exists only for construction-time
    /// initializers; explicit dispatch is strict.
    pub fn call(&self, name: &str, args: &[Value]) -> ComposeResult<Value> {
        match self.get(name) {
            Some(Value::Method(method)) => method.invoke(&Value::Instance(self.clone()), args),
            Some(_) => Err(ComposeError::NotCallable {
                member: name.to_string(),
            }),
            None => Err(ComposeError::MemberNotFound {
                member: name.to_string(),
            }),
        }
    }

    /// The type that constructed this instance
    pub fn constructor(&self) -> &Type {
        &self.0.ty
    }

    /// Check whether this instance's type is `ty` or descends from it
    ///
    /// Walks the supertype chain only; mixins blend members in but are not
    /// ancestors for identity purposes.
    pub fn is_instance_of(&self, ty: &Type) -> bool {
        self.0.ty.is_subtype_of(ty)
    }

    /// Snapshot of the members assigned directly on this instance
    pub fn own_members(&self) -> Members {
        self.0.slots.read().clone()
    }

    /// Check whether two handles refer to the same instance
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.0.slots.read();
        let own: Vec<&str> = slots.keys().map(String::as_str).collect();
        f.debug_struct("Instance")
            .field("own", &own)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compose, Method};

    /// Test lookup falls through own slots to the template
    #[test]
    fn test_member_lookup_order() {
        let ty = Compose::new()
            .member("a", "template")
            .member("b", "template")
            .compose_type()
            .unwrap();

        let instance = Instance::new(&ty);
        assert_eq!(instance.get("a"), Some(Value::from("template")));

        instance.set("a", "own");
        assert_eq!(instance.get("a"), Some(Value::from("own")));
        assert_eq!(instance.get("b"), Some(Value::from("template")));
        assert_eq!(instance.get("c"), None);

        assert_eq!(instance.own_members().len(), 1);
    }

    /// Test strict dispatch errors
    #[test]
    fn test_call_errors() {
        let ty = Compose::new()
            .member("label", "plain data")
            .compose_type()
            .unwrap();
        let instance = Instance::new(&ty);

        let err = instance.call("missing", &[]).unwrap_err();
        assert!(err.is_member_not_found());

        let err = instance.call("label", &[]).unwrap_err();
        assert!(matches!(err, ComposeError::NotCallable { .. }));
    }

    /// Test dispatch binds this to the receiver
    #[test]
    fn test_call_binds_receiver() {
        let ty = Compose::new()
            .method("speak", |this, _| Ok(this.clone()))
            .compose_type()
            .unwrap();
        let instance = Instance::new(&ty);

        let result = instance.call("speak", &[]).unwrap();
        assert_eq!(result, Value::Instance(instance));
    }

    /// Test dispatch finds members assigned on the instance itself
    #[test]
    fn test_call_own_slot_method() {
        let ty = Compose::new().compose_type().unwrap();
        let instance = Instance::new(&ty);
        instance.set("greet", Method::new(|_, _| Ok(Value::from("hello"))));

        assert_eq!(instance.call("greet", &[]).unwrap(), Value::from("hello"));
    }

    /// Test constructor back-reference and identity
    #[test]
    fn test_constructor_and_identity() {
        let ty = Compose::new().compose_type().unwrap();
        let other = Compose::new().compose_type().unwrap();

        let instance = Instance::new(&ty);
        assert!(instance.constructor().ptr_eq(&ty));
        assert!(instance.is_instance_of(&ty));
        assert!(instance.is_instance_of(&Type::object()));
        assert!(!instance.is_instance_of(&other));
    }
}
