//! Behavior templates - the shared per-type member lookup target

use crate::merge::merge;
use crate::type_object::{Type, TypeData};
use crate::value::{Members, Value};
use parking_lot::RwLock;
use std::fmt;
use std::sync::{Arc, Weak};

/// The shared behavior template of a composed [`Type`]
///
/// Every instance of a type resolves members it does not own against the
/// type's template. A template records two member sets:
///
/// - its *own* members - exactly what mixins and the explicit instance
///   behavior contributed to this type. This is the set a merge reads when
///   the template is used as a mixin source.
/// - its *resolved* members - the flattened lookup map, built once at
///   composition from the parent template's resolved members plus the own
///   members. Templates never change after composition, so instance lookup
///   is a single map access instead of a chain walk.
///
/// A template's constructor back-reference always points at the type it was
/// composed for, never at an ancestor.
#[derive(Clone)]
pub struct Template(Arc<TemplateData>);

struct TemplateData {
    own: Members,
    resolved: Members,
    parent: Option<Template>,
    constructor: RwLock<Weak<TypeData>>,
}

impl Template {
    /// The root template: no members, no parent
    pub(crate) fn root() -> Template {
        Template(Arc::new(TemplateData {
            own: Members::new(),
            resolved: Members::new(),
            parent: None,
            constructor: RwLock::new(Weak::new()),
        }))
    }

    /// Build a fresh template that extends `parent` with the given own members
    pub(crate) fn extend(parent: &Template, own: Members) -> Template {
        let mut resolved = parent.0.resolved.clone();
        merge(&own, &mut resolved);
        Template(Arc::new(TemplateData {
            own,
            resolved,
            parent: Some(parent.clone()),
            constructor: RwLock::new(Weak::new()),
        }))
    }

    /// Look up a member through the full resolution order
    ///
    /// Resolution covers the parent chain and every mixin contribution,
    /// with later contributors shadowing earlier ones.
    pub fn member(&self, name: &str) -> Option<Value> {
        self.0.resolved.get(name).cloned()
    }

    /// Look up a member contributed directly to this template
    pub fn own_member(&self, name: &str) -> Option<Value> {
        self.0.own.get(name).cloned()
    }

    /// The members contributed directly to this template
    pub fn own_members(&self) -> &Members {
        &self.0.own
    }

    /// The full resolved member set, parent contributions included
    pub fn members(&self) -> &Members {
        &self.0.resolved
    }

    /// The base type's template this template extends
    pub fn parent(&self) -> Option<&Template> {
        self.0.parent.as_ref()
    }

    /// The type this template was composed for
    ///
    /// `None` only while composition is still linking the new type.
    pub fn constructor(&self) -> Option<Type> {
        self.0.constructor.read().upgrade().map(Type)
    }

    pub(crate) fn set_constructor(&self, ty: &Type) {
        *self.0.constructor.write() = Arc::downgrade(&ty.0);
    }

    /// Check whether two handles refer to the same template
    pub fn ptr_eq(&self, other: &Template) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let own: Vec<&str> = self.0.own.keys().map(String::as_str).collect();
        f.debug_struct("Template")
            .field("own", &own)
            .field("has_parent", &self.0.parent.is_some())
            .finish()
    }
}
