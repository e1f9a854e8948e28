//! Declaration metadata attached to classes and to (class, method) pairs
//!
//! The store is written while declarations run and only read afterwards by
//! the bootstrap. It holds at most one value per (subject, key); a later
//! write for the same pair replaces the earlier one.

use std::collections::HashMap;
use std::fmt;

use crate::foundation::{ClassRef, ComponentId};
use crate::metadata::types::{HttpMethod, ParamBinding};

/// What a metadata entry is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Class(ComponentId),
    Method(ComponentId, &'static str),
}

impl Subject {
    pub fn class(&self) -> ComponentId {
        match self {
            Subject::Class(id) | Subject::Method(id, _) => *id,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Class(id) => write!(f, "{}", id),
            Subject::Method(id, method) => write!(f, "{}::{}", id, method),
        }
    }
}

/// The fixed set of metadata keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    Prefix,
    Controllers,
    Providers,
    Method,
    Path,
    RouteParams,
    Injectable,
    InjectTokens,
}

impl MetadataKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Prefix => "prefix",
            MetadataKey::Controllers => "controllers",
            MetadataKey::Providers => "providers",
            MetadataKey::Method => "method",
            MetadataKey::Path => "path",
            MetadataKey::RouteParams => "route:params",
            MetadataKey::Injectable => "injectable",
            MetadataKey::InjectTokens => "inject:tokens",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded declaration value
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Verb(HttpMethod),
    Flag(bool),
    Classes(Vec<ClassRef>),
    Params(Vec<ParamBinding>),
    Tokens(Vec<Option<ComponentId>>),
}

/// Key-value declarations for one application
#[derive(Debug, Default)]
pub struct MetadataStore {
    entries: HashMap<(Subject, MetadataKey), MetadataValue>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for (subject, key), replacing any earlier value
    pub fn set_metadata(&mut self, subject: Subject, key: MetadataKey, value: MetadataValue) {
        if let Some(previous) = self.entries.insert((subject, key), value) {
            tracing::trace!(
                subject = %subject,
                key = %key,
                previous = ?previous,
                "Metadata overwritten"
            );
        }
    }

    /// The value recorded for (subject, key); absence means "not declared"
    pub fn get_metadata(&self, subject: &Subject, key: MetadataKey) -> Option<&MetadataValue> {
        self.entries.get(&(*subject, key))
    }

    pub fn contains(&self, subject: &Subject, key: MetadataKey) -> bool {
        self.entries.contains_key(&(*subject, key))
    }

    /// Text value, or `None` when undeclared
    pub fn text(&self, subject: &Subject, key: MetadataKey) -> Option<&str> {
        match self.get_metadata(subject, key)? {
            MetadataValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// HTTP verb recorded on a method, or `None` when undeclared
    pub fn verb(&self, subject: &Subject) -> Option<HttpMethod> {
        match self.get_metadata(subject, MetadataKey::Method)? {
            MetadataValue::Verb(method) => Some(*method),
            _ => None,
        }
    }

    /// Boolean value, `false` when undeclared
    pub fn flag(&self, subject: &Subject, key: MetadataKey) -> bool {
        matches!(self.get_metadata(subject, key), Some(MetadataValue::Flag(true)))
    }

    /// Class list, empty when undeclared
    pub fn classes(&self, subject: &Subject, key: MetadataKey) -> &[ClassRef] {
        match self.get_metadata(subject, key) {
            Some(MetadataValue::Classes(classes)) => classes,
            _ => &[],
        }
    }

    /// Parameter bindings of a method in recorded order, empty when undeclared
    pub fn param_bindings(&self, subject: &Subject) -> &[ParamBinding] {
        match self.get_metadata(subject, MetadataKey::RouteParams) {
            Some(MetadataValue::Params(params)) => params,
            _ => &[],
        }
    }

    /// Positional inject-token overrides of a class, empty when undeclared
    pub fn inject_tokens(&self, subject: &Subject) -> &[Option<ComponentId>] {
        match self.get_metadata(subject, MetadataKey::InjectTokens) {
            Some(MetadataValue::Tokens(tokens)) => tokens,
            _ => &[],
        }
    }

    /// Names of `class`'s methods that carry a verb or a path, sorted
    pub fn routed_methods(&self, class: ComponentId) -> Vec<&'static str> {
        let mut methods: Vec<&'static str> = self
            .entries
            .keys()
            .filter_map(|(subject, key)| match (subject, key) {
                (Subject::Method(_, name), MetadataKey::Method | MetadataKey::Path)
                    if subject.class() == class =>
                {
                    Some(*name)
                }
                _ => None,
            })
            .collect();
        methods.sort_unstable();
        methods.dedup();
        methods
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::types::ParamSource;

    struct UsersController;

    fn class() -> Subject {
        Subject::Class(ComponentId::of::<UsersController>())
    }

    #[test]
    fn test_absent_metadata_uses_empty_defaults() {
        let store = MetadataStore::new();
        let method = Subject::Method(ComponentId::of::<UsersController>(), "find_all");

        assert!(store.is_empty());
        assert_eq!(store.text(&class(), MetadataKey::Prefix), None);
        assert_eq!(store.verb(&method), None);
        assert!(!store.flag(&class(), MetadataKey::Injectable));
        assert!(store.classes(&class(), MetadataKey::Controllers).is_empty());
        assert!(store.param_bindings(&method).is_empty());
        assert!(store.inject_tokens(&class()).is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = MetadataStore::new();
        store.set_metadata(class(), MetadataKey::Prefix, MetadataValue::Text("/people".into()));
        store.set_metadata(class(), MetadataKey::Prefix, MetadataValue::Text("/users".into()));

        assert_eq!(store.len(), 1);
        assert_eq!(store.text(&class(), MetadataKey::Prefix), Some("/users"));
    }

    #[test]
    fn test_class_and_method_subjects_are_distinct() {
        let mut store = MetadataStore::new();
        let method = Subject::Method(ComponentId::of::<UsersController>(), "create");

        store.set_metadata(method, MetadataKey::Path, MetadataValue::Text("/".into()));
        store.set_metadata(method, MetadataKey::Method, MetadataValue::Verb(HttpMethod::POST));
        store.set_metadata(
            method,
            MetadataKey::RouteParams,
            MetadataValue::Params(vec![ParamBinding::new(0, ParamSource::Body, None)]),
        );

        assert_eq!(store.text(&class(), MetadataKey::Path), None);
        assert_eq!(store.text(&method, MetadataKey::Path), Some("/"));
        assert_eq!(store.verb(&method), Some(HttpMethod::POST));
        assert_eq!(store.param_bindings(&method).len(), 1);
        assert_eq!(method.to_string(), "UsersController::create");
    }

    #[test]
    fn test_routed_methods_of_one_class() {
        struct AuditController;

        let mut store = MetadataStore::new();
        let users = ComponentId::of::<UsersController>();
        store.set_metadata(Subject::Method(users, "find_all"), MetadataKey::Method, MetadataValue::Verb(HttpMethod::GET));
        store.set_metadata(Subject::Method(users, "find_all"), MetadataKey::Path, MetadataValue::Text("/".into()));
        store.set_metadata(Subject::Method(users, "create"), MetadataKey::Path, MetadataValue::Text("/".into()));
        store.set_metadata(
            Subject::Method(users, "helper"),
            MetadataKey::RouteParams,
            MetadataValue::Params(Vec::new()),
        );
        store.set_metadata(
            Subject::Method(ComponentId::of::<AuditController>(), "list"),
            MetadataKey::Method,
            MetadataValue::Verb(HttpMethod::GET),
        );
        store.set_metadata(class(), MetadataKey::Prefix, MetadataValue::Text("/users".into()));

        assert_eq!(store.routed_methods(users), vec!["create", "find_all"]);
    }

    #[test]
    fn test_mismatched_value_kind_reads_as_absent() {
        let mut store = MetadataStore::new();
        store.set_metadata(class(), MetadataKey::Injectable, MetadataValue::Text("yes".into()));

        assert!(store.contains(&class(), MetadataKey::Injectable));
        assert!(!store.flag(&class(), MetadataKey::Injectable));
    }
}
