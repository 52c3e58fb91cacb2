//! Route resolution into a match stack.
//!
//! The route tree is resolved **once per navigation** into a [`MatchStack`]:
//! one [`MatchEntry`] per nesting level, from the top-level route down to the
//! leaf. Outlets read their entry by depth instead of searching the tree while
//! rendering.
//!
//! Given routes:
//! ```text
//! /                 (layout: header + sidebar)
//!   ""              (index → home)
//!   plan/:id        (has children)
//!     participants  (leaf)
//! /login            (modal-capable leaf)
//! ```
//!
//! For `/plan/7/participants` the stack is:
//! ```text
//! [0] Route("/")             params={}        ← router_view
//! [1] Route("plan/:id")      params={id: 7}   ← outlet depth 1
//! [2] Route("participants")  params={id: 7}   ← outlet depth 2
//! ```
//!
//! The modal overlay resolves two stacks per navigation: one for the
//! background location (page layer) and one for the modal path, whose leaf is
//! the overlay content. See [`crate::modal`].
//!
//! # Depth tracking
//!
//! Outlets discover their depth through a thread-local parent marker:
//! - `router_view` resets it to "no parent" and renders depth 0;
//! - every outlet renders `parent + 1` and becomes the parent of outlets built
//!   inside its route builder.

use crate::location::{normalize_path, trim_slashes};
use crate::route::Route;
use crate::RouteParams;
use std::cell::Cell;
use std::sync::Arc;

// ============================================================================
// Depth tracking (thread-local)
// ============================================================================

thread_local! {
    /// Depth of the outlet whose builder is currently running.
    static PARENT_DEPTH: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Forget the current parent. Called at the start of every layer render.
pub fn reset_outlet_depth() {
    PARENT_DEPTH.with(|d| d.set(None));
}

/// Enter a new outlet: returns its depth and makes it the current parent.
pub fn enter_outlet() -> usize {
    PARENT_DEPTH.with(|d| {
        let depth = d.get().map_or(0, |parent| parent + 1);
        d.set(Some(depth));
        depth
    })
}

/// Make `depth` the current parent without claiming a new level.
///
/// Used by outlets that already know their depth from an earlier frame.
pub fn set_parent_depth(depth: usize) {
    PARENT_DEPTH.with(|d| d.set(Some(depth)));
}

/// Depth of the current parent outlet, if any.
pub fn current_outlet_depth() -> Option<usize> {
    PARENT_DEPTH.with(Cell::get)
}

// ============================================================================
// Match stack
// ============================================================================

/// One matched level of the route hierarchy.
#[derive(Debug, Clone)]
pub struct MatchEntry {
    pub route: Arc<Route>,
    /// Params accumulated from all levels up to and including this one.
    pub params: RouteParams,
    /// 0 = top-level route.
    pub depth: usize,
}

/// Resolved route chain for one path.
#[derive(Debug, Clone, Default)]
pub struct MatchStack {
    entries: Vec<MatchEntry>,
}

impl MatchStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_depth(&self, depth: usize) -> Option<&MatchEntry> {
        self.entries.get(depth)
    }

    pub fn root(&self) -> Option<&MatchEntry> {
        self.entries.first()
    }

    pub fn leaf(&self) -> Option<&MatchEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MatchEntry] {
        &self.entries
    }

    /// Accumulated params at the deepest level.
    pub fn params(&self) -> RouteParams {
        self.leaf().map(|e| e.params.clone()).unwrap_or_default()
    }

    pub fn has_depth(&self, depth: usize) -> bool {
        depth < self.entries.len()
    }

    /// Route paths from root to leaf, e.g. `["/", "plan/:id", "participants"]`.
    pub fn route_paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.route.config.path.as_str())
            .collect()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Maximum nesting depth, guards against circular route trees.
const MAX_DEPTH: usize = 16;

/// Resolve `path` against the route tree.
///
/// Routes are tried in registration order. Static and `:param` segments are
/// matched left to right; a route whose children cannot consume the rest of
/// the path is backtracked. When the path is exhausted on a route with
/// children, its index child (empty path, or `index`) is appended.
///
/// An empty stack means nothing matched.
pub fn resolve_match_stack(routes: &[Arc<Route>], path: &str) -> MatchStack {
    let normalized = normalize_path(path);
    let trimmed = trim_slashes(&normalized);
    let segments: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    };

    let mut stack = MatchStack::new();
    resolve_recursive(routes, &segments, 0, &RouteParams::new(), &mut stack);

    crate::debug_log!(
        "Resolved '{}' into {} levels [{}]",
        path,
        stack.len(),
        stack.route_paths().join(" → ")
    );

    stack
}

fn resolve_recursive(
    routes: &[Arc<Route>],
    remaining: &[&str],
    depth: usize,
    inherited: &RouteParams,
    stack: &mut MatchStack,
) -> bool {
    if depth >= MAX_DEPTH {
        crate::warn_log!(
            "Route nesting deeper than {} levels, check for circular routes",
            MAX_DEPTH
        );
        return false;
    }

    for route in routes {
        let route_path = trim_slashes(&route.config.path);
        let route_segments: Vec<&str> = if route_path.is_empty() {
            Vec::new()
        } else {
            route_path.split('/').collect()
        };

        // Empty path: index route, or a layout wrapping its children.
        if route_segments.is_empty() {
            if remaining.is_empty() {
                stack.push(route, inherited.clone(), depth);
                if !route.children.is_empty() {
                    try_index_route(&route.children, depth + 1, inherited, stack);
                }
                return true;
            }

            if !route.children.is_empty() {
                stack.push(route, inherited.clone(), depth);
                if resolve_recursive(&route.children, remaining, depth + 1, inherited, stack) {
                    return true;
                }
                stack.entries.pop();
            }
            continue;
        }

        let Some(params) = match_segments(&route_segments, remaining, inherited) else {
            continue;
        };

        let after = &remaining[route_segments.len()..];
        stack.push(route, params.clone(), depth);

        if after.is_empty() {
            if !route.children.is_empty() {
                try_index_route(&route.children, depth + 1, &params, stack);
            }
            return true;
        }

        if !route.children.is_empty()
            && resolve_recursive(&route.children, after, depth + 1, &params, stack)
        {
            return true;
        }

        stack.entries.pop();
    }

    false
}

/// Match the leading `remaining` segments against a route pattern.
fn match_segments(
    pattern: &[&str],
    remaining: &[&str],
    inherited: &RouteParams,
) -> Option<RouteParams> {
    if pattern.len() > remaining.len() {
        return None;
    }

    let mut params = inherited.clone();
    for (route_seg, path_seg) in pattern.iter().zip(remaining) {
        if let Some(name) = route_seg.strip_prefix(':') {
            // `:id<i32>` → `id`
            let name = name.split('<').next().unwrap_or(name);
            params.insert(name.to_string(), (*path_seg).to_string());
        } else if route_seg != path_seg {
            return None;
        }
    }
    Some(params)
}

/// Append the index child of a route whose path was fully consumed.
fn try_index_route(
    children: &[Arc<Route>],
    depth: usize,
    params: &RouteParams,
    stack: &mut MatchStack,
) {
    if let Some(child) = children
        .iter()
        .find(|c| trim_slashes(&c.config.path).is_empty())
    {
        stack.push(child, params.clone(), depth);
        if !child.children.is_empty() {
            try_index_route(&child.children, depth + 1, params, stack);
        }
        return;
    }

    if let Some(child) = children
        .iter()
        .find(|c| trim_slashes(&c.config.path) == "index")
    {
        stack.push(child, params.clone(), depth);
    }
}

impl MatchStack {
    fn push(&mut self, route: &Arc<Route>, params: RouteParams, depth: usize) {
        self.entries.push(MatchEntry {
            route: Arc::clone(route),
            params,
            depth,
        });
    }
}
