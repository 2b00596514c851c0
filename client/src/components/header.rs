//! Top navigation bar: brand, staff dashboard switch, logout.

use homeschool::state::header::dashboard_switch;
use homeschool::{AppRoute, Session};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::context::SessionContext;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let location = use_location();
    let navigate = use_navigate();

    let navigate_switch = navigate.clone();
    let switch_button = move || {
        let current = AppRoute::from_path(&location.pathname.get());
        dashboard_switch(current).map(|(label, target)| {
            let navigate = navigate_switch.clone();
            view! {
                <button class="btn btn-outline-success" on:click=move |_| navigate(target.path(), NavigateOptions::default())>
                    {label}
                </button>
            }
        })
    };

    let on_logout = move |_| {
        ctx.logout();
        navigate(AppRoute::Login.path(), NavigateOptions::default());
    };

    view! {
        <nav class="navbar navbar-light bg-light">
            <span class="navbar-brand">"Homeschool Interactive"</span>
            <div class="navbar-nav ml-auto">
                {switch_button}
                <Show when=move || ctx.session.with(Session::is_logged_in)>
                    <button class="btn btn-outline-secondary" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
