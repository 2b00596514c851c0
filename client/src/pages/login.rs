//! Login page: username/password against `POST /auth/login`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use homeschool::{AppRoute, Session};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::context::SessionContext;

/// The view a guard redirect asked us to return to.
pub(crate) fn requested_view(from: Option<&str>) -> Option<AppRoute> {
    from.and_then(AppRoute::from_path).filter(|route| *route != AppRoute::Login)
}

pub(crate) fn submit_label(pending: bool) -> &'static str {
    if pending { "Signing in..." } else { "Login" }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let query = use_query_map();
    let navigate = use_navigate();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    // Leave this view as soon as there is a session: on mount after a
    // reload, or when a login here succeeds.
    Effect::new(move || {
        let from = query.with(|q| q.get("from"));
        let landing = ctx
            .session
            .with(|session| ctx.guard.landing_after_login(session, requested_view(from.as_deref())));
        if let Some(target) = landing {
            navigate(target.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if ctx.session.with_untracked(Session::is_pending) {
            return;
        }

        #[cfg(feature = "csr")]
        {
            let user = username.get_untracked();
            let pass = password.get_untracked();
            let store = ctx.store();
            leptos::task::spawn_local(async move {
                if let Err(err) = store.login(&user, &pass).await {
                    tracing::debug!(error = %err, "login attempt failed");
                }
            });
        }
    };

    let pending = move || ctx.session.with(Session::is_pending);
    let login_error = move || ctx.session.with(|s| s.login_error().map(str::to_owned));

    view! {
        <div class="login-container">
            <form class="login-form" on:submit=on_submit>
                <h2>"Sign In"</h2>
                <input
                    type="text"
                    name="username"
                    placeholder="Username"
                    required=true
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    name="password"
                    placeholder="Password"
                    required=true
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=pending>
                    {move || submit_label(pending())}
                </button>
                {move || login_error().map(|message| view! { <p class="login-error">{message}</p> })}
            </form>
        </div>
    }
}
