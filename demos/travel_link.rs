//! Travel Link shell
//!
//! A plan list with the four account pages (login, sign-up, forgotten password,
//! username lookup) available both as full pages and as overlays. Open one from
//! the header, chain to the others from inside the card, then close it with
//! Escape, the backdrop, or the close control. The plan list never unmounts.
//!
//! Run with `RUST_LOG=debug cargo run --example travel_link` to follow the
//! router's decisions.

use gpui::prelude::FluentBuilder;
use gpui::{
    div, px, rgb, size, App, AppContext, Application, Bounds, Context, FontWeight,
    InteractiveElement, IntoElement, MouseButton, ParentElement, Render, StatefulInteractiveElement,
    Styled, TitlebarOptions, Window, WindowBounds, WindowOptions,
};
use travellink_navigator::{
    init_router, init_session, modal_link, render_router_outlet, router_link, sign_in, sign_out,
    AuthGuard, EmbeddablePage, Navigator, NotGuard, Presentation, RoleGuard, Route,
    RouterView, SessionContext, SessionUser,
};

fn main() {
    env_logger::init();

    Application::new().run(|cx: &mut App| {
        init_session(cx);
        init_router(cx, |router| {
            router.set_fallback_route("/home");

            router.add_route(Route::new("/", |window, cx, _| shell(window, cx)).children(vec![
                Route::view("", home_page).into(),
                Route::view("home", home_page).name("home").into(),
                Route::new("plans", |_, cx, _| plan_list(cx)).name("plans").into(),
                Route::new("plan/:id", |_, _, params| {
                    plan_detail(params.get("id").map_or("?", String::as_str))
                })
                .name("plan")
                .into(),
                Route::view("about", about_page).into(),
                Route::view("faq", faq_page).into(),
                Route::view("admin", admin_page)
                    .guard(AuthGuard::session("/login"))
                    .guard(RoleGuard::admin(Some("/home")))
                    .into(),
            ]));

            router.add_route(
                Route::modal_component("/login", || AccountPage::new(AccountForm::Login))
                    .name("login"),
            );
            router.add_route(
                Route::modal_component("/signup", || AccountPage::new(AccountForm::Signup))
                    .overlay_width(px(560.))
                    .guard(NotGuard::new(AuthGuard::session("/login")))
                    .name("signup"),
            );
            router.add_route(Route::modal_component("/forgot-password", || {
                AccountPage::new(AccountForm::ForgotPassword)
            }));
            router.add_route(
                Route::modal_component("/findusername", || {
                    AccountPage::new(AccountForm::FindUsername)
                })
                .without_close_button(),
            );
        });
        Navigator::push(cx, "/plans");

        let bounds = Bounds::centered(None, size(px(960.), px(720.)), cx);
        let opened = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("Travel Link".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_, cx| cx.new(|cx| RouterView::new(cx)),
        );
        if let Err(error) = opened {
            log::error!("Failed to open window: {error}");
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}

// ============================================================================
// Shell
// ============================================================================

fn shell(window: &mut Window, cx: &mut App) -> gpui::AnyElement {
    let signed_in = SessionContext::username(cx);

    div()
        .flex()
        .flex_col()
        .size_full()
        .bg(rgb(0xf5f7fa))
        .text_color(rgb(0x222222))
        .child(
            div()
                .flex()
                .items_center()
                .gap_4()
                .px_6()
                .py_3()
                .bg(rgb(0xffffff))
                .border_b_1()
                .border_color(rgb(0xdde3ea))
                .child(div().font_weight(FontWeight::BOLD).child("Travel Link"))
                .child(router_link(cx, "/home", "Home"))
                .child(router_link(cx, "/plans", "Plans"))
                .child(router_link(cx, "/about", "About"))
                .child(router_link(cx, "/faq", "FAQ"))
                .child(router_link(cx, "/admin", "Admin"))
                .child(div().flex_1())
                .map(|header| match signed_in {
                    Some(name) => header.child(format!("Hi, {name}")).child(
                        div()
                            .cursor_pointer()
                            .text_color(rgb(0x2196f3))
                            .child("Sign out")
                            .on_mouse_down(MouseButton::Left, |_, _, cx| {
                                sign_out(cx);
                                Navigator::replace(cx, "/home");
                            }),
                    ),
                    None => header
                        .child(modal_link("/login", "Sign in"))
                        .child(modal_link("/signup", "Sign up")),
                }),
        )
        .child(
            div()
                .flex_1()
                .p_6()
                .child(render_router_outlet(window, cx)),
        )
        .into_any_element()
}

fn home_page() -> gpui::AnyElement {
    div()
        .flex()
        .flex_col()
        .gap_2()
        .child(div().text_2xl().child("Plan trips together"))
        .child("Create a plan, invite friends, and split the schedule.")
        .into_any_element()
}

fn plan_list(cx: &mut App) -> gpui::AnyElement {
    let plans = [
        (1, "Jeju, spring weekend"),
        (2, "Kyoto temples"),
        (3, "Lisbon food tour"),
        (4, "Iceland ring road"),
        (5, "Busan beaches"),
        (6, "Hanoi street food"),
    ];

    div()
        .flex()
        .flex_col()
        .gap_3()
        .child(div().text_xl().child("Plans"))
        .children(plans.iter().map(|(id, title)| {
            div()
                .p_4()
                .h(px(120.))
                .rounded_md()
                .bg(rgb(0xffffff))
                .border_1()
                .border_color(rgb(0xdde3ea))
                .child(router_link(cx, format!("/plan/{id}"), *title))
        }))
        .into_any_element()
}

fn plan_detail(id: &str) -> gpui::AnyElement {
    div()
        .flex()
        .flex_col()
        .gap_2()
        .child(div().text_xl().child(format!("Plan #{id}")))
        .child(modal_link("/login", "Sign in to join this plan"))
        .into_any_element()
}

fn about_page() -> gpui::AnyElement {
    div()
        .child("Travel Link turns a short survey into a shared itinerary.")
        .into_any_element()
}

fn faq_page() -> gpui::AnyElement {
    div()
        .child("Account pages open over the page you are on. Press Escape to close them.")
        .into_any_element()
}

fn admin_page() -> gpui::AnyElement {
    div().text_xl().child("Administration").into_any_element()
}

// ============================================================================
// Account pages
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum AccountForm {
    Login,
    Signup,
    ForgotPassword,
    FindUsername,
}

impl AccountForm {
    fn title(self) -> &'static str {
        match self {
            AccountForm::Login => "Sign in",
            AccountForm::Signup => "Create an account",
            AccountForm::ForgotPassword => "Reset your password",
            AccountForm::FindUsername => "Find your username",
        }
    }
}

struct AccountPage {
    form: AccountForm,
    presentation: Presentation,
}

impl AccountPage {
    fn new(form: AccountForm) -> Self {
        Self {
            form,
            presentation: Presentation::Page,
        }
    }

    fn links(&self) -> Vec<gpui::Div> {
        let mut links = Vec::new();
        if self.form != AccountForm::Login {
            links.push(modal_link("/login", "Back to sign in"));
        }
        if self.form == AccountForm::Login {
            links.push(modal_link("/signup", "Create an account"));
            links.push(modal_link("/forgot-password", "Forgot password?"));
            links.push(modal_link("/findusername", "Forgot username?"));
        }
        links
    }
}

impl EmbeddablePage for AccountPage {
    fn set_presentation(&mut self, presentation: Presentation) {
        self.presentation = presentation;
    }
}

impl Render for AccountPage {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<'_, Self>) -> impl IntoElement {
        let embedded = self.presentation == Presentation::Overlay;
        let form = self.form;

        div()
            .flex()
            .flex_col()
            .gap_3()
            .when(!embedded, |page| {
                page.size_full()
                    .p_8()
                    .bg(rgb(0xffffff))
                    .child(router_home_link())
            })
            .child(div().text_xl().font_weight(FontWeight::BOLD).child(form.title()))
            .child(
                div()
                    .id("account-submit")
                    .px_4()
                    .py_2()
                    .rounded_md()
                    .bg(rgb(0x2196f3))
                    .text_color(rgb(0xffffff))
                    .cursor_pointer()
                    .child("Continue")
                    .on_click(move |_, _, cx| {
                        if form == AccountForm::Login {
                            sign_in(cx, SessionUser::new("traveller"));
                            Navigator::dismiss_modal(cx);
                        }
                    }),
            )
            .children(self.links())
    }
}

fn router_home_link() -> impl IntoElement {
    div()
        .cursor_pointer()
        .text_color(rgb(0x666666))
        .child("← Travel Link")
        .on_mouse_down(MouseButton::Left, |_, _, cx| {
            Navigator::push(cx, "/home");
        })
}
