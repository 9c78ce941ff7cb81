//! Change notification hook
//!
//! Every element of a chunk carries a clone of the owner's [`ChangeHandler`].
//! Setters compare the old and new value and call [`ChangeHandler::notify`]
//! only when something actually changed. Construction and decoding never
//! notify.
//!
//! The handler is a callback, not a reference to the owner. Hosts usually
//! capture a dirty flag or a `Weak` to their own state in the closure.

use std::fmt;
use std::sync::Arc;

/// Cloneable, non-owning notification hook
#[derive(Clone, Default)]
pub struct ChangeHandler(Option<Arc<dyn Fn() + Send + Sync>>);

impl ChangeHandler {
    /// Wrap a callback
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Some(Arc::new(callback)))
    }

    /// A handler that ignores notifications
    pub fn none() -> Self {
        Self(None)
    }

    /// Whether a callback is attached
    pub fn is_attached(&self) -> bool {
        self.0.is_some()
    }

    /// Invoke the callback synchronously
    ///
    /// The callback must not mutate the object that raised the notification.
    pub fn notify(&self) {
        if let Some(callback) = &self.0 {
            callback();
        }
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_attached() {
            f.write_str("ChangeHandler(attached)")
        } else {
            f.write_str("ChangeHandler(none)")
        }
    }
}

/// Handlers never take part in structural equality
impl PartialEq for ChangeHandler {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// Assign `value` to `slot` and notify if it differs
///
/// Returns whether the value changed.
pub(crate) fn update<T: PartialEq>(slot: &mut T, value: T, handler: &ChangeHandler) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    handler.notify();
    true
}

/// [`update`] for a single float, using [`same_f32`]
pub(crate) fn update_f32(slot: &mut f32, value: f32, handler: &ChangeHandler) -> bool {
    if same_f32(*slot, value) {
        return false;
    }
    *slot = value;
    handler.notify();
    true
}

/// [`update`] for a float array, using [`same_floats`]
pub(crate) fn update_floats<const N: usize>(
    slot: &mut [f32; N],
    value: [f32; N],
    handler: &ChangeHandler,
) -> bool {
    if same_floats(slot, &value) {
        return false;
    }
    *slot = value;
    handler.notify();
    true
}

/// Float equality where NaN equals NaN
///
/// Any two NaNs compare equal regardless of payload bits, and `0.0` equals
/// `-0.0`. Every float comparison in the data model goes through this, so a
/// value always equals its own copy.
pub(crate) fn same_f32(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// [`same_f32`] over two slices of equal length
pub(crate) fn same_floats(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| same_f32(x, y))
}
