//! The overlay as drawn by `RouterView`: keyboard and pointer input go through
//! the rendered backdrop, card, and focus handling of a real test window.

mod common;

use common::*;
use gpui::{point, px, Modifiers, Pixels, Point, TestAppContext, VisualTestContext};
use travellink_navigator::*;

fn open_router_window(cx: &mut TestAppContext) -> &mut VisualTestContext {
    let (_view, cx) = cx.add_window_view(|_, cx| RouterView::new(cx));
    cx.run_until_parked();
    cx
}

/// Centre of the window. The card is centred on the backdrop.
fn card_centre(cx: &mut VisualTestContext) -> Point<Pixels> {
    let size = cx.update(|window, _| window.viewport_size());
    point(size.width / 2., size.height / 2.)
}

/// A point on the backdrop, well outside the card.
fn backdrop_corner() -> Point<Pixels> {
    point(px(4.), px(4.))
}

fn login_over_plans(cx: &mut TestAppContext) {
    init_travel_link(cx);
    cx.update(|cx| {
        Navigator::push(cx, "/plans");
        Navigator::open_modal(cx, "/login");
    });
}

#[gpui::test]
fn test_escape_closes_rendered_overlay(cx: &mut TestAppContext) {
    login_over_plans(cx);
    let cx = open_router_window(cx);

    cx.simulate_keystrokes("escape");
    cx.run_until_parked();

    assert_eq!(cx.read(Navigator::current_path), "/plans");
    assert!(!cx.read(Navigator::is_modal_open));
    assert!(!cx.read(|cx| cx.router().scroll_lock().is_locked()));
}

#[gpui::test]
fn test_click_on_card_keeps_overlay(cx: &mut TestAppContext) {
    login_over_plans(cx);
    let cx = open_router_window(cx);

    let centre = card_centre(cx);
    cx.simulate_click(centre, Modifiers::default());
    cx.run_until_parked();

    assert_eq!(cx.read(Navigator::current_path), "/login");
    assert!(cx.read(Navigator::is_modal_open));
}

#[gpui::test]
fn test_click_on_backdrop_closes_overlay(cx: &mut TestAppContext) {
    login_over_plans(cx);
    let cx = open_router_window(cx);

    cx.simulate_click(backdrop_corner(), Modifiers::default());
    cx.run_until_parked();

    assert_eq!(cx.read(Navigator::current_path), "/plans");
    assert!(!cx.read(Navigator::is_modal_open));
}

#[gpui::test]
fn test_direct_entry_draws_no_backdrop(cx: &mut TestAppContext) {
    init_travel_link(cx);
    cx.update(|cx| {
        Navigator::push(cx, "/plans");
        Navigator::push(cx, "/login");
    });
    let cx = open_router_window(cx);

    // The same input that closes an overlay leaves a full page alone.
    cx.simulate_click(backdrop_corner(), Modifiers::default());
    cx.simulate_keystrokes("escape");
    cx.run_until_parked();

    assert_eq!(cx.read(Navigator::current_path), "/login");
    assert_eq!(cx.read(|cx| cx.router().state().len()), 3);
}

#[gpui::test]
fn test_overlay_opened_after_mount_takes_input(cx: &mut TestAppContext) {
    init_travel_link(cx);
    cx.update(|cx| Navigator::push(cx, "/plans"));
    let cx = open_router_window(cx);

    cx.update(|_, cx| {
        Navigator::open_modal(cx, "/signup");
    });
    cx.run_until_parked();
    assert!(cx.read(|cx| cx.router().scroll_lock().is_locked()));

    cx.simulate_keystrokes("escape");
    cx.run_until_parked();
    assert_eq!(cx.read(Navigator::current_path), "/plans");
}

#[gpui::test]
fn test_closing_window_keeps_router_lock_until_teardown(cx: &mut TestAppContext) {
    login_over_plans(cx);
    let lock = cx.read(|cx| cx.router().scroll_lock().clone());

    let window_cx = open_router_window(cx);
    window_cx.update(|window, _| window.remove_window());
    cx.run_until_parked();
    assert!(lock.is_locked());

    cx.update(teardown_router);
    assert!(!lock.is_locked());
}
