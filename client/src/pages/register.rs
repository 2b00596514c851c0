//! Registration page for staff to create new accounts.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use homeschool::ApiResult;
use homeschool::session::registration_failure_message;
use homeschool::state::forms::validate_credentials;
use leptos::prelude::*;

use crate::context::SessionContext;

pub(crate) const REGISTERED_MESSAGE: &str = "Registration successful.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub(crate) fn from_result(result: &ApiResult<()>) -> Self {
        match result {
            Ok(()) => Notice::Success(REGISTERED_MESSAGE.to_owned()),
            Err(err) => Notice::Error(registration_failure_message(err)),
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "register-notice register-notice--ok",
            Notice::Error(_) => "register-notice register-notice--error",
        }
    }

    fn text(&self) -> String {
        match self {
            Notice::Success(text) | Notice::Error(text) => text.clone(),
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let user = username.get_untracked();
        let pass = password.get_untracked();
        if let Err(message) = validate_credentials(&user, &pass) {
            notice.set(Some(Notice::Error(message.to_owned())));
            return;
        }
        busy.set(true);
        notice.set(None);

        #[cfg(feature = "csr")]
        {
            let store = ctx.store();
            leptos::task::spawn_local(async move {
                let result = store.register(&user, &pass).await;
                match &result {
                    Ok(()) => {
                        username.set(String::new());
                        password.set(String::new());
                    }
                    Err(err) => ctx.report("register", err),
                }
                notice.set(Some(Notice::from_result(&result)));
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (ctx, user, pass);
    };

    view! {
        <div class="login-container">
            <form class="login-form" on:submit=on_submit>
                <h2>"Register a New User"</h2>
                <input
                    type="text"
                    name="username"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    name="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
                {move || notice.get().map(|n| view! { <p class=n.class()>{n.text()}</p> })}
            </form>
        </div>
    }
}
