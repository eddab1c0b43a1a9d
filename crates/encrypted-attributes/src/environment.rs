//! Providers of the current deployment environment label.
//!
//! The label is read on every encryption so a change to a
//! [`SharedEnvironment`] is observed by the very next write.

use std::sync::Arc;

use arc_swap::ArcSwap;

/// Source of the environment label stamped on new envelopes.
pub trait EnvironmentProvider {
    fn current_environment(&self) -> String;
}

impl<F> EnvironmentProvider for F
where
    F: Fn() -> String,
{
    fn current_environment(&self) -> String {
        self()
    }
}

/// A fixed environment label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticEnvironment(String);

impl StaticEnvironment {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn current_environment(&self) -> String {
        self.0.clone()
    }
}

/// Process-wide environment label that can be changed at runtime.
///
/// Clones share the same label. Backed by [`ArcSwap`] so reads never block.
#[derive(Clone, Debug)]
pub struct SharedEnvironment {
    inner: Arc<ArcSwap<String>>,
}

impl SharedEnvironment {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(label.into())),
        }
    }

    /// Atomically replace the label for every clone.
    pub fn set(&self, label: impl Into<String>) {
        self.inner.store(Arc::new(label.into()));
    }
}

impl EnvironmentProvider for SharedEnvironment {
    fn current_environment(&self) -> String {
        (**self.inner.load()).clone()
    }
}
