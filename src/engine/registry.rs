//! Id → object lookup built once per spec.
//!
//! Lookups never fail loudly: an unknown id is `None`, and the caller skips
//! whatever depended on it.

use std::collections::HashMap;

use crate::spec::{GraphObject, Object, X_AXIS, Y_AXIS};

/// What an id refers to: an authored object or one of the axis sentinels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    Object(&'a GraphObject),
    XAxis,
    YAxis,
}

impl Target<'_> {
    /// The target's y at `x`: the x-axis is `y = 0`, the y-axis has no value.
    pub fn value_at(self, x: f64) -> Option<f64> {
        match self {
            Target::Object(obj) => obj.value_at(x),
            Target::XAxis => Some(0.0),
            Target::YAxis => None,
        }
    }
}

/// Borrowed view of a GraphSpec's objects, keyed by id
#[derive(Debug, Default)]
pub struct ObjectRegistry<'a> {
    objects: HashMap<&'a str, &'a GraphObject>,
}

impl<'a> ObjectRegistry<'a> {
    /// Index `objects`. On duplicate ids the first occurrence wins.
    pub fn build(objects: &'a [GraphObject]) -> Self {
        let mut map: HashMap<&'a str, &'a GraphObject> = HashMap::with_capacity(objects.len());
        for obj in objects {
            if map.contains_key(obj.id()) {
                crate::log::warn!(id = obj.id(), "duplicate object id, keeping the first");
                continue;
            }
            map.insert(obj.id(), obj);
        }
        ObjectRegistry { objects: map }
    }

    /// Look up an authored object
    pub fn get(&self, id: &str) -> Option<&'a GraphObject> {
        self.objects.get(id).copied()
    }

    /// Look up an id, honouring the axis sentinels.
    pub fn resolve(&self, id: &str) -> Option<Target<'a>> {
        match id {
            X_AXIS => Some(Target::XAxis),
            Y_AXIS => Some(Target::YAxis),
            _ => {
                let found = self.get(id).map(Target::Object);
                if found.is_none() {
                    crate::log::debug!(id, "unresolved object reference");
                }
                found
            }
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FunctionObject, LineForm, LineObject};

    #[test]
    fn finds_objects_and_sentinels() {
        let objects: Vec<GraphObject> = vec![
            FunctionObject::new("f", 1.0, 0.0, 0.0).into(),
            LineObject::new("l", LineForm::Horizontal { y: 1.0 }).into(),
        ];
        let registry = ObjectRegistry::build(&objects);
        assert_eq!(registry.len(), 2);
        assert!(matches!(registry.resolve("f"), Some(Target::Object(GraphObject::Function(_)))));
        assert_eq!(registry.resolve(X_AXIS), Some(Target::XAxis));
        assert_eq!(registry.resolve(Y_AXIS), Some(Target::YAxis));
        assert_eq!(registry.resolve("missing"), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let objects: Vec<GraphObject> = vec![
            FunctionObject::new("f", 1.0, 0.0, 0.0).into(),
            FunctionObject::new("f", 2.0, 0.0, 0.0).into(),
        ];
        let registry = ObjectRegistry::build(&objects);
        assert_eq!(registry.len(), 1);
        match registry.get("f") {
            Some(GraphObject::Function(f)) => assert_eq!(f.a, 1.0),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn axes_as_curves() {
        assert_eq!(Target::XAxis.value_at(12.0), Some(0.0));
        assert_eq!(Target::YAxis.value_at(0.0), None);
    }
}
