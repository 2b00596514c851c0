//! Route wrapper that renders its children only when the guard allows.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use homeschool::{AppRoute, GuardDecision};
use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::context::SessionContext;

/// Location to redirect to, carrying the requested view as `?from=`.
pub(crate) fn redirect_path(to: AppRoute, from: Option<AppRoute>) -> String {
    match from {
        Some(from) => format!("{}?from={}", to.path(), from.path()),
        None => to.path().to_owned(),
    }
}

/// Re-evaluated on every session change, so a logout (or a 401 that ends
/// the session) immediately leaves the protected view.
#[component]
pub fn ProtectedRoute(route: AppRoute, children: ChildrenFn) -> impl IntoView {
    let ctx = expect_context::<SessionContext>();

    move || match ctx.session.with(|session| ctx.guard.check_route(session, route)) {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Redirect { to, from } => view! { <Redirect path=redirect_path(to, from)/> }.into_any(),
    }
}
