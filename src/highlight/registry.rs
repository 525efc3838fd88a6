// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache of host style handles, one per category.
//!
//! Handles are host rendering resources. They are created lazily the first time
//! a category shows up and kept until teardown; nothing is evicted in between.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::highlight::bucket::Category;

/// Owned mapping from category to host style handle.
#[derive(Debug)]
pub struct StyleRegistry<S> {
    handles: BTreeMap<Category, S>,
}

impl<S> Default for StyleRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StyleRegistry<S> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }

    /// Returns the handle for `category`, calling `create` only if there is none yet.
    ///
    /// A failed creation leaves the registry unchanged.
    pub fn get_or_create<F>(&mut self, category: Category, create: F) -> Result<&S>
    where
        F: FnOnce() -> Result<S>,
    {
        if !self.handles.contains_key(&category) {
            let handle = create()?;
            self.handles.insert(category, handle);
        }
        Ok(&self.handles[&category])
    }

    /// Returns the handle for `category`, if one was created.
    pub fn get(&self, category: Category) -> Option<&S> {
        self.handles.get(&category)
    }

    /// Returns true if a handle exists for `category`.
    pub fn contains(&self, category: Category) -> bool {
        self.handles.contains_key(&category)
    }

    /// Iterates over all handles, nearest category first.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &S)> {
        self.handles.iter().map(|(category, handle)| (*category, handle))
    }

    /// Returns the number of handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns true if no handle was created yet.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Removes and returns every handle, leaving the registry empty.
    pub fn drain(&mut self) -> impl Iterator<Item = (Category, S)> + use<S> {
        std::mem::take(&mut self.handles).into_iter()
    }
}
