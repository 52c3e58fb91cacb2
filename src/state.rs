//! Navigation history.
//!
//! [`RouterState`] is a linear history of [`Location`]s with a cursor. Pushing
//! truncates forward entries, as in a browser. Every entry keeps the state it
//! was pushed with, so going back to a modal entry restores the overlay over
//! the same background.

use crate::location::Location;
use crate::route::Route;
use crate::{NavigationDirection, RouteChangeEvent};
use std::sync::Arc;

/// History stack plus the registered route tree.
#[derive(Debug, Clone)]
pub struct RouterState {
    history: Vec<Location>,
    current: usize,
    routes: Vec<Arc<Route>>,
}

impl RouterState {
    /// New state positioned at `/`.
    pub fn new() -> Self {
        Self {
            history: vec![Location::root()],
            current: 0,
            routes: Vec::new(),
        }
    }

    pub fn add_route(&mut self, route: impl Into<Arc<Route>>) {
        self.routes.push(route.into());
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn current_location(&self) -> &Location {
        &self.history[self.current]
    }

    pub fn current_path(&self) -> &str {
        self.current_location().path()
    }

    /// Number of entries in the history.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Cursor position in the history.
    pub fn index(&self) -> usize {
        self.current
    }

    /// Push `location`, dropping any forward entries.
    pub fn push(&mut self, location: Location) -> RouteChangeEvent {
        let from = self.current_location().clone();
        self.history.truncate(self.current + 1);
        self.history.push(location.clone());
        self.current += 1;

        RouteChangeEvent {
            from: Some(from),
            to: location,
            direction: NavigationDirection::Forward,
        }
    }

    /// Replace the current entry.
    pub fn replace(&mut self, location: Location) -> RouteChangeEvent {
        let from = std::mem::replace(&mut self.history[self.current], location.clone());

        RouteChangeEvent {
            from: Some(from),
            to: location,
            direction: NavigationDirection::Replace,
        }
    }

    pub fn back(&mut self) -> Option<RouteChangeEvent> {
        self.back_by(1)
    }

    /// Move the cursor back `steps` entries.
    ///
    /// Returns `None` (and leaves the cursor alone) if the history is too short.
    pub fn back_by(&mut self, steps: usize) -> Option<RouteChangeEvent> {
        if steps == 0 || steps > self.current {
            return None;
        }
        let from = self.current_location().clone();
        self.current -= steps;

        Some(RouteChangeEvent {
            from: Some(from),
            to: self.current_location().clone(),
            direction: NavigationDirection::Back,
        })
    }

    pub fn forward(&mut self) -> Option<RouteChangeEvent> {
        if !self.can_go_forward() {
            return None;
        }
        let from = self.current_location().clone();
        self.current += 1;

        Some(RouteChangeEvent {
            from: Some(from),
            to: self.current_location().clone(),
            direction: NavigationDirection::Forward,
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.history.len()
    }

    /// Location `steps` entries behind the cursor.
    pub fn peek_back(&self, steps: usize) -> Option<&Location> {
        self.current
            .checked_sub(steps)
            .and_then(|index| self.history.get(index))
    }

    /// Location one entry ahead of the cursor.
    pub fn peek_forward(&self) -> Option<&Location> {
        self.history.get(self.current + 1)
    }

    /// Reset history to `/`. Routes are kept.
    pub fn clear(&mut self) {
        self.history.clear();
        self.history.push(Location::root());
        self.current = 0;
    }
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavigationIntent;

    #[test]
    fn test_navigation() {
        let mut state = RouterState::new();
        assert_eq!(state.current_path(), "/");

        state.push(Location::new("/plans"));
        state.push(Location::new("/plan/3"));
        assert_eq!(state.current_path(), "/plan/3");

        state.back();
        assert_eq!(state.current_path(), "/plans");

        state.forward();
        assert_eq!(state.current_path(), "/plan/3");
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut state = RouterState::new();
        state.push(Location::new("/plans"));
        let event = state.replace(Location::new("/faq"));

        assert_eq!(state.current_path(), "/faq");
        assert_eq!(state.len(), 2);
        assert_eq!(event.from.as_ref().map(Location::path), Some("/plans"));
        assert_eq!(event.direction, NavigationDirection::Replace);
    }

    #[test]
    fn test_back_by_restores_entry_state() {
        let mut state = RouterState::new();
        let plans = Location::new("/plans");
        state.push(plans.clone());
        let signup = Location::with_intent("/signup", NavigationIntent::open_over(&plans));
        state.push(signup.clone());
        state.push(Location::with_intent("/login", NavigationIntent::modal_from(&signup)));

        assert!(state.back_by(5).is_none());
        assert_eq!(state.peek_back(2), Some(&plans));

        let event = state.back_by(1);
        assert!(event.is_some());
        assert_eq!(state.current_location(), &signup);
        assert_eq!(state.peek_forward().map(Location::path), Some("/login"));
    }

    #[test]
    fn test_push_truncates_forward_history() {
        let mut state = RouterState::new();
        state.push(Location::new("/a"));
        state.push(Location::new("/b"));
        state.back();
        state.push(Location::new("/c"));

        assert!(!state.can_go_forward());
        assert_eq!(state.len(), 3);
    }
}
