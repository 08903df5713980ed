//! Shared closures handed to the picker by its host.
//!
//! A [`Callback`] compares by identity, so two handles are equal only when
//! they were cloned from the same closure. That keeps [`DatePickerArgs`]
//! comparable without comparing closures.
//!
//! [`DatePickerArgs`]: crate::DatePickerArgs
use std::{fmt, sync::Arc};

/// Cloneable handle to a host closure `Fn(T) -> R`.
///
/// Used for the change handler, the disabled-date policy and the day cell
/// renderer. The closure must be `Send + Sync` because deferred picker work
/// may run on whatever thread drains the host's scheduler.
pub struct Callback<T, R = ()>(Arc<dyn Fn(T) -> R + Send + Sync>);

impl<T, R> Callback<T, R> {
    /// Wraps `f`.
    pub fn new(f: impl Fn(T) -> R + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invokes the closure.
    pub fn call(&self, value: T) -> R {
        (self.0)(value)
    }
}

impl<T, R> Clone for Callback<T, R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T, R> PartialEq for Callback<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T, R> Eq for Callback<T, R> {}

impl<T, R> fmt::Debug for Callback<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Arc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let increment = Callback::<i32, i32>::new(|x| x + 1);
        let same = increment.clone();
        let lookalike = Callback::<i32, i32>::new(|x| x + 1);
        assert_eq!(increment, same);
        assert_ne!(increment, lookalike);
        assert_eq!(same.call(1), 2);
    }

    #[test]
    fn renders_content_from_input() {
        let label = Callback::new(|day: u8| format!("<{day}>"));
        assert_eq!(label.call(7), "<7>");
        assert!(format!("{label:?}").starts_with("Callback(0x"));
    }
}
