//! Bounded element lists
//!
//! A [`BoundedList`] holds at most [`LIST_CAPACITY`] elements. It never
//! encodes its own length: the owner reads the count from its own header,
//! passes it to [`BoundedList::read_from`], and writes `len()` back when
//! encoding.

use std::io::{Read, Write};
use std::ops::Index;

use crate::error::{LiteError, Result};
use crate::notify::ChangeHandler;

/// Maximum number of elements in a list (one count byte)
pub const LIST_CAPACITY: usize = u8::MAX as usize;

/// How to read and write one list element
pub trait Element: Sized {
    fn read_element<R: Read>(reader: &mut R, handler: &ChangeHandler) -> Result<Self>;

    fn write_element<W: Write>(&self, writer: &mut W) -> Result<()>;

    /// Route the element's change notifications to `handler`
    fn attach(&mut self, handler: &ChangeHandler);
}

/// Ordered list capped at 255 elements
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedList<T> {
    items: Vec<T>,
    handler: ChangeHandler,
}

impl<T> Default for BoundedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            handler: ChangeHandler::none(),
        }
    }
}

impl<T: Element> BoundedList<T> {
    pub const CAPACITY: usize = LIST_CAPACITY;

    pub fn new(handler: ChangeHandler) -> Self {
        Self {
            items: Vec::new(),
            handler,
        }
    }

    /// Decode `count` consecutive elements
    pub fn read_from<R: Read>(count: usize, reader: &mut R, handler: &ChangeHandler) -> Result<Self> {
        if count > LIST_CAPACITY {
            return Err(LiteError::Capacity {
                capacity: LIST_CAPACITY,
            });
        }
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::read_element(reader, handler)?);
        }
        Ok(Self {
            items,
            handler: handler.clone(),
        })
    }

    /// Encode every element in order, without a count
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for item in &self.items {
            item.write_element(writer)?;
        }
        Ok(())
    }

    /// Build from existing elements, attaching them to `handler`
    pub fn from_elements<I>(elements: I, handler: ChangeHandler) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items: Vec<T> = elements.into_iter().collect();
        if items.len() > LIST_CAPACITY {
            return Err(LiteError::Capacity {
                capacity: LIST_CAPACITY,
            });
        }
        for item in &mut items {
            item.attach(&handler);
        }
        Ok(Self { items, handler })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= LIST_CAPACITY
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable element access; edits go through the element's own setters
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn push(&mut self, mut element: T) -> Result<()> {
        self.ensure_room()?;
        element.attach(&self.handler);
        self.items.push(element);
        self.handler.notify();
        Ok(())
    }

    pub fn insert(&mut self, index: usize, mut element: T) -> Result<()> {
        if index > self.items.len() {
            return Err(LiteError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.ensure_room()?;
        element.attach(&self.handler);
        self.items.insert(index, element);
        self.handler.notify();
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(LiteError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let element = self.items.remove(index);
        self.handler.notify();
        Ok(element)
    }

    /// Replace the element at `index`, returning the old one
    pub fn set(&mut self, index: usize, mut element: T) -> Result<T>
    where
        T: PartialEq,
    {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(LiteError::IndexOutOfRange { index, len })?;
        element.attach(&self.handler);
        let changed = *slot != element;
        let old = std::mem::replace(slot, element);
        if changed {
            self.handler.notify();
        }
        Ok(old)
    }

    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.handler.notify();
    }

    pub(crate) fn attach(&mut self, handler: &ChangeHandler) {
        self.handler = handler.clone();
        for item in &mut self.items {
            item.attach(handler);
        }
    }

    fn ensure_room(&self) -> Result<()> {
        if self.is_full() {
            return Err(LiteError::Capacity {
                capacity: LIST_CAPACITY,
            });
        }
        Ok(())
    }
}

impl<T> Index<usize> for BoundedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a BoundedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
