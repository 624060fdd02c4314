use std::fmt;
use std::sync::Arc;

use crate::origin::{SourceOrigin, UNSET};

/// Ordered string attributes attached to a [`Context`].
///
/// Inserting an existing key replaces its value in place, so iteration order is the
/// order in which keys were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert-or-assign. Returns the previous value for `key`, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Renders as `k = v, k2 = v2`.
impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (k, v)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k} = {v}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Attributes;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Attributes {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    struct AttributesVisitor;

    impl<'de> Visitor<'de> for AttributesVisitor {
        type Value = Attributes;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of string attributes")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut attrs = Attributes::new();
            while let Some((k, v)) = access.next_entry::<String, String>()? {
                attrs.insert(k, v);
            }
            Ok(attrs)
        }
    }

    impl<'de> Deserialize<'de> for Attributes {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(AttributesVisitor)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContextData {
    pub(crate) domain: String,
    pub(crate) reason: String,
    pub(crate) origin: SourceOrigin,
    pub(crate) attrs: Attributes,
}

/// Domain, reason, origin and attributes describing a failure.
///
/// Cloning shares the underlying data. The only mutation, [`Context::add_attr`],
/// takes `&mut self` and copies the data first if it is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    data: Arc<ContextData>,
}

impl Context {
    pub(crate) fn from_data(data: ContextData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    pub fn domain(&self) -> &str {
        &self.data.domain
    }

    pub fn reason(&self) -> &str {
        &self.data.reason
    }

    pub fn origin(&self) -> &SourceOrigin {
        &self.data.origin
    }

    pub fn attributes(&self) -> &Attributes {
        &self.data.attrs
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.data.attrs.contains_key(key)
    }

    pub fn add_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        Arc::make_mut(&mut self.data).attrs.insert(key, value);
    }
}

/// Fluent builder for a standalone [`Context`]. See [`ctx`].
#[must_use = "a context builder does nothing until `done` is called"]
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    domain: String,
    reason: String,
    origin: SourceOrigin,
    attrs: Attributes,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            domain: UNSET.to_string(),
            reason: UNSET.to_string(),
            origin: SourceOrigin::default(),
            attrs: Attributes::new(),
        }
    }
}

impl ContextBuilder {
    pub fn domain(mut self, name: impl Into<String>) -> Self {
        self.domain = name.into();
        self
    }

    pub fn reason(mut self, text: impl Into<String>) -> Self {
        self.reason = text.into();
        self
    }

    pub fn location(mut self, origin: SourceOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[track_caller]
    pub fn here(self) -> Self {
        self.location(SourceOrigin::current())
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key, value);
        self
    }

    pub fn done(self) -> Context {
        Context::from_data(ContextData {
            domain: self.domain,
            reason: self.reason,
            origin: self.origin,
            attrs: self.attrs,
        })
    }
}

/// Starts a standalone context. Unset fields read as `"?"`.
pub fn ctx() -> ContextBuilder {
    ContextBuilder::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_fields() {
        let line = line!() + 4;
        let ctx = ctx()
            .domain("Test")
            .reason("Reason")
            .here()
            .attr("key", "value")
            .done();

        assert_eq!(ctx.domain(), "Test");
        assert_eq!(ctx.reason(), "Reason");
        assert_eq!(ctx.origin().line(), line);
        assert_eq!(ctx.attributes().len(), 1);
        assert_eq!(ctx.attributes().get("key"), Some("value"));
    }

    #[test]
    fn unset_fields_read_as_sentinel() {
        let ctx = ctx().done();
        assert_eq!(ctx.domain(), "?");
        assert_eq!(ctx.reason(), "?");
        assert!(ctx.attributes().is_empty());
    }

    #[test]
    fn attributes_keep_first_seen_order() {
        let mut attrs = Attributes::new();
        assert_eq!(attrs.insert("b", "1"), None);
        attrs.insert("a", "2");
        assert_eq!(attrs.insert("b", "3"), Some("1".to_string()));

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(attrs.get("b"), Some("3"));
        assert_eq!(attrs.to_string(), "b = 3, a = 2");
    }

    #[test]
    fn add_attr_does_not_touch_shared_copies() {
        let original = ctx().domain("D").done();
        let mut copy = original.clone();
        copy.add_attr("k", "v");

        assert!(copy.has_attr("k"));
        assert!(!original.has_attr("k"));
    }
}
