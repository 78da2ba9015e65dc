//! Registry of chart views.
//!
//! Views render in registration order; names are unique and used for
//! lookup by interactions and renderers.

use std::collections::HashMap;

use crate::error::{RegistryError, RegistryResult};
use crate::view::{ViewKind, ViewSpec};

/// Ordered collection of the views on a dashboard.
#[derive(Default)]
pub struct ViewRegistry {
    views: Vec<Box<dyn ViewSpec>>,
    by_name: HashMap<String, usize>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view; fails if the name is taken.
    pub fn register(&mut self, view: Box<dyn ViewSpec>) -> RegistryResult<()> {
        let name = view.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateView(name));
        }
        self.by_name.insert(name, self.views.len());
        self.views.push(view);
        Ok(())
    }

    /// Builder-style registration.
    pub fn with(mut self, view: impl ViewSpec + 'static) -> RegistryResult<Self> {
        self.register(Box::new(view))?;
        Ok(self)
    }

    /// Get a view by name.
    pub fn get(&self, name: &str) -> Option<&dyn ViewSpec> {
        self.by_name
            .get(name)
            .map(|&index| self.views[index].as_ref())
    }

    /// Get a view by name, failing for an unknown name.
    pub fn require(&self, name: &str) -> RegistryResult<&dyn ViewSpec> {
        self.get(name)
            .ok_or_else(|| RegistryError::UnknownView(name.to_string()))
    }

    /// Views in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ViewSpec> {
        self.views.iter().map(|v| v.as_ref())
    }

    /// View names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.views.iter().map(|v| v.name()).collect()
    }

    /// Views of one kind.
    pub fn list_by_kind(&self, kind: ViewKind) -> Vec<&dyn ViewSpec> {
        self.iter().filter(|v| v.kind() == kind).collect()
    }

    /// Number of registered views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{BarView, ScatterView, YearSelectorView};
    use crossview_stats::TopN;

    #[test]
    fn test_registration_order() {
        let registry = ViewRegistry::new()
            .with(YearSelectorView::new("years"))
            .and_then(|r| r.with(BarView::counts("bars", "job_title", TopN::new(8))))
            .and_then(|r| r.with(ScatterView::new("scatter", "job_title", "salary")))
            .unwrap();

        assert_eq!(registry.names(), vec!["years", "bars", "scatter"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list_by_kind(ViewKind::Bar).len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ViewRegistry::new();
        registry.register(Box::new(YearSelectorView::new("years"))).unwrap();

        let err = registry.register(Box::new(YearSelectorView::new("years")));
        assert_eq!(err, Err(RegistryError::DuplicateView("years".to_string())));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_by_name() {
        let registry = ViewRegistry::new().with(YearSelectorView::new("years")).unwrap();

        assert_eq!(registry.get("years").map(|v| v.kind()), Some(ViewKind::YearSelector));
        assert!(registry.get("map").is_none());
        assert_eq!(
            registry.require("map").err(),
            Some(RegistryError::UnknownView("map".to_string()))
        );
    }
}
