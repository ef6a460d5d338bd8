//! Append-only element list backing every `cmi.<collection>.n` array.

use crate::error::{Result, ScormError};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An element that carries an id which must survive updates.
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// Ordered list whose element `i` is always data model index `i`.
///
/// Elements can be appended or replaced in place, never removed or
/// reordered, so indices stay contiguous from 0 and match `._count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementList<T> {
    items: Vec<T>,
}

impl<T> Default for ElementList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ElementList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index the next appended element will receive.
    pub fn next_index(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Appends an element and returns its index.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    /// Fails with `IndexOutOfRange` unless `index < len`.
    pub fn check_index(&self, collection: &'static str, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(ScormError::index_out_of_range(
                collection,
                index,
                self.items.len(),
            ))
        }
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn replace(&mut self, collection: &'static str, index: usize, item: T) -> Result<T> {
        self.check_index(collection, index)?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }
}

impl<T: Identified> ElementList<T> {
    /// Copies the stored id onto `item` so an update can never re-identify an
    /// element.
    pub fn preserve_id(&self, collection: &'static str, index: usize, item: &mut T) -> Result<()> {
        self.check_index(collection, index)?;
        item.set_id(self.items[index].id().to_string());
        Ok(())
    }
}

impl<T> Index<usize> for ElementList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> FromIterator<T> for ElementList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ElementList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Identified for Item {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    fn item(id: &str, value: u32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn push_returns_contiguous_indices() {
        let mut list = ElementList::new();
        assert_eq!(list.push(item("a", 1)), 0);
        assert_eq!(list.push(item("b", 2)), 1);
        assert_eq!(list.next_index(), 2);
        assert_eq!(list[1].value, 2);
    }

    #[test]
    fn replace_out_of_range_is_rejected() {
        let mut list: ElementList<Item> = ElementList::new();
        let err = list.replace("items", 0, item("a", 1)).unwrap_err();
        assert_eq!(err, ScormError::index_out_of_range("items", 0, 0));
        assert!(list.is_empty());
    }

    #[test]
    fn preserve_id_overrides_caller_id() {
        let list: ElementList<Item> = [item("original", 1)].into_iter().collect();
        let mut update = item("forged", 9);
        list.preserve_id("items", 0, &mut update).unwrap();
        assert_eq!(update.id, "original");
        assert!(list.preserve_id("items", 1, &mut update).is_err());
    }
}
