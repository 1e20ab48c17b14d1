//! Slot State
//!
//! What one synchronized piece of state currently holds.

use crate::error::FetchError;

/// State of a single slot
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState<T> {
    /// Nothing bound, or the binding does not allow fetching
    Unloaded,
    /// A fetch cycle is in flight. `stale` is the previous value for the
    /// same key, kept visible while refreshing.
    Loading { stale: Option<T> },
    Loaded(T),
    Failed(FetchError),
}

impl<T> Default for SlotState<T> {
    fn default() -> Self {
        SlotState::Unloaded
    }
}

impl<T> SlotState<T> {
    /// Current value, including a stale one shown during a refresh
    pub fn value(&self) -> Option<&T> {
        match self {
            SlotState::Loaded(v) => Some(v),
            SlotState::Loading { stale } => stale.as_ref(),
            SlotState::Unloaded | SlotState::Failed(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            SlotState::Loaded(v) => Some(v),
            SlotState::Loading { stale } => stale,
            SlotState::Unloaded | SlotState::Failed(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SlotState::Loaded(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SlotState::Loading { .. })
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            SlotState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Take the value out, leaving `Loading` behind
    pub(crate) fn begin_refresh(&mut self) {
        let stale = std::mem::take(self).into_value();
        *self = SlotState::Loading { stale };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_visible_while_refreshing() {
        let mut state = SlotState::Loaded(3);
        state.begin_refresh();
        assert_eq!(state, SlotState::Loading { stale: Some(3) });
        assert_eq!(state.value(), Some(&3));
    }

    #[test]
    fn test_failed_has_no_value() {
        let mut state: SlotState<i32> = SlotState::Failed(FetchError::Unauthorized);
        assert_eq!(state.value(), None);
        assert_eq!(state.error(), Some(&FetchError::Unauthorized));
        state.begin_refresh();
        assert_eq!(state, SlotState::Loading { stale: None });
    }
}
