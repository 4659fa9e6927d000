//! Type-tag dispatch registry shared by the emitter and the preprocessor.
//!
//! A [`Registry`] maps a [`NodeType`] to the ordered list of handlers registered for it, plus an optional fallback
//! handler used for types without an entry. Registries are built once by a single registration function per
//! subsystem (see `emitter::registry` and `preprocessor::registry`) and are read-only afterwards, so lookups need
//! no synchronization.
//!
//! ## Notes
//! - Registration order is significant: the preprocessor folds a node through every rule in order.
//! - Handlers are `&'static` values; the registry never owns or drops them.
//!
//! ## Examples
//! ```rust
//! use unparser::ast::NodeType;
//! use unparser::dispatch::Registry;
//!
//! trait Greeter: Sync {
//!     fn greet(&self) -> &'static str;
//! }
//!
//! struct Hello;
//! impl Greeter for Hello {
//!     fn greet(&self) -> &'static str {
//!         "hello"
//!     }
//! }
//!
//! let registry = Registry::<dyn Greeter>::builder().register(NodeType::Int, &Hello).build();
//! assert_eq!(registry.lookup(NodeType::Int)[0].greet(), "hello");
//! assert!(registry.lookup(NodeType::Str).is_empty());
//! ```

use std::collections::HashMap;

use unparser_syntax::ast::NodeType;

/// Read-only map from node type to handlers.
pub struct Registry<H: ?Sized + 'static> {
    handlers: HashMap<NodeType, Vec<&'static H>>,
    fallback: Option<&'static H>,
}

impl<H: ?Sized + 'static> Registry<H> {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder<H> {
        RegistryBuilder {
            handlers: HashMap::new(),
            fallback: None,
        }
    }

    /// Handlers for `kind`, in registration order.
    ///
    /// ## Returns
    /// - The registered handlers, or a one-element slice holding the fallback when `kind` has no entry, or an empty
    ///   slice when there is no fallback either.
    pub fn lookup(&self, kind: NodeType) -> &[&'static H] {
        match self.handlers.get(&kind) {
            Some(handlers) => handlers,
            None => match &self.fallback {
                Some(fallback) => std::slice::from_ref(fallback),
                None => &[],
            },
        }
    }

    /// Whether `kind` has its own entry (the fallback does not count).
    pub fn is_registered(&self, kind: NodeType) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of handlers registered for `kind` itself.
    pub fn handler_count(&self, kind: NodeType) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Number of node types with an entry.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Builder for [`Registry`].
pub struct RegistryBuilder<H: ?Sized + 'static> {
    handlers: HashMap<NodeType, Vec<&'static H>>,
    fallback: Option<&'static H>,
}

impl<H: ?Sized + 'static> RegistryBuilder<H> {
    /// Append `handler` to the list for `kind`.
    pub fn register(mut self, kind: NodeType, handler: &'static H) -> Self {
        self.handlers.entry(kind).or_default().push(handler);
        self
    }

    /// Append `handler` to the list of every type in `kinds`.
    pub fn register_all(mut self, kinds: &[NodeType], handler: &'static H) -> Self {
        for kind in kinds {
            self = self.register(*kind, handler);
        }
        self
    }

    /// Handler used for types without an entry.
    pub fn fallback(mut self, handler: &'static H) -> Self {
        self.fallback = Some(handler);
        self
    }

    pub fn build(self) -> Registry<H> {
        Registry {
            handlers: self.handlers,
            fallback: self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Tag: Sync {
        fn tag(&self) -> &'static str;
    }

    struct First;
    struct Second;
    struct Fallback;

    impl Tag for First {
        fn tag(&self) -> &'static str {
            "first"
        }
    }

    impl Tag for Second {
        fn tag(&self) -> &'static str {
            "second"
        }
    }

    impl Tag for Fallback {
        fn tag(&self) -> &'static str {
            "default"
        }
    }

    fn tags(handlers: &[&'static dyn Tag]) -> Vec<&'static str> {
        handlers.iter().map(|h| h.tag()).collect()
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[test]
    fn test_lookup_keeps_registration_order() {
        let registry = Registry::<dyn Tag>::builder()
            .register(NodeType::Dstr, &Second)
            .register(NodeType::Dstr, &First)
            .build();
        assert_eq!(tags(registry.lookup(NodeType::Dstr)), vec!["second", "first"]);
        assert_eq!(registry.handler_count(NodeType::Dstr), 2);
    }

    #[test]
    fn test_unregistered_type_uses_fallback() {
        let registry = Registry::<dyn Tag>::builder()
            .register(NodeType::Int, &First)
            .fallback(&Fallback)
            .build();
        assert_eq!(tags(registry.lookup(NodeType::Hash)), vec!["default"]);
        assert_eq!(tags(registry.lookup(NodeType::Int)), vec!["first"]);
        assert!(!registry.is_registered(NodeType::Hash));
        assert_eq!(registry.handler_count(NodeType::Hash), 0);
    }

    #[test]
    fn test_unregistered_type_without_fallback_is_empty() {
        let registry = Registry::<dyn Tag>::builder().register(NodeType::Int, &First).build();
        assert!(registry.lookup(NodeType::Hash).is_empty());
        assert!(!registry.has_fallback());
    }

    // ========================================================================
    // Builder
    // ========================================================================

    #[test]
    fn test_register_all() {
        let registry = Registry::<dyn Tag>::builder()
            .register_all(&[NodeType::Lvar, NodeType::Ivar, NodeType::Gvar], &First)
            .build();
        assert_eq!(registry.len(), 3);
        assert!(registry.is_registered(NodeType::Gvar));
        assert!(!registry.is_empty());
    }
}
