//! `GhostCell` - safe interior mutability via branded tokens.
//!
//! ## Safety invariant
//!
//! For a fixed brand `'brand`, every safe method that produces `&mut T`
//! requires `&mut GhostToken<'brand>`. The token is linear, so safe code can
//! never hold two overlapping mutable borrows of the same cell, nor a mutable
//! borrow alongside a shared one.

use core::cell::UnsafeCell;
use core::mem;

use crate::token::InvariantLifetime;
use crate::GhostToken;

/// A branded cell that can only be accessed using a token of the same brand.
#[repr(transparent)]
pub struct GhostCell<'brand, T: ?Sized> {
    _brand: InvariantLifetime<'brand>,
    value: UnsafeCell<T>,
}

impl<'brand, T> GhostCell<'brand, T> {
    /// Creates a new `GhostCell`.
    pub const fn new(value: T) -> Self {
        Self {
            _brand: InvariantLifetime::new(),
            value: UnsafeCell::new(value),
        }
    }

    /// Consumes the cell and returns the contained value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Replaces the contained value, returning the old value.
    #[inline]
    pub fn replace(&self, token: &mut GhostToken<'brand>, value: T) -> T {
        mem::replace(self.borrow_mut(token), value)
    }
}

impl<'brand, T: ?Sized> GhostCell<'brand, T> {
    /// Borrows the cell immutably.
    #[inline(always)]
    pub fn borrow<'a>(&'a self, _token: &'a GhostToken<'brand>) -> &'a T {
        // SAFETY: safe code cannot obtain `&mut T` without `&mut GhostToken<'brand>`,
        // which cannot coexist with the shared token borrow held here.
        unsafe { &*self.value.get() }
    }

    /// Borrows the cell mutably.
    #[inline(always)]
    pub fn borrow_mut<'a>(&'a self, _token: &'a mut GhostToken<'brand>) -> &'a mut T {
        // SAFETY: the caller proves exclusivity via `&mut GhostToken<'brand>`.
        unsafe { &mut *self.value.get() }
    }

    /// Returns a mutable reference without a token.
    ///
    /// Exclusive access to the cell itself already rules out aliasing.
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<'brand, T: Default> Default for GhostCell<'brand, T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<'brand, T> From<T> for GhostCell<'brand, T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

// SAFETY: sending the cell by value does not grant access to the interior;
// access still requires the branded token.
unsafe impl<'brand, T: ?Sized + Send> Send for GhostCell<'brand, T> {}
