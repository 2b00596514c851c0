//! Root application component with routing and the session context.

use homeschool::{ApiClient, AppRoute, ClientConfig, SessionStore};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::layout::Layout;
use crate::components::protected_route::ProtectedRoute;
use crate::context::SessionContext;
use crate::pages::{
    admin::AdminDashboard, login::LoginPage, register::RegisterPage, student::StudentDashboard,
    teacher::TeacherDashboard,
};
use crate::storage::ClientStorage;

/// Configuration baked in at build time; a browser has no process env.
fn build_config() -> ClientConfig {
    let lookup = |key: &str| -> Option<String> {
        let value = match key {
            homeschool::config::API_URL_VAR => option_env!("HOMESCHOOL_API_URL"),
            homeschool::config::REQUEST_TIMEOUT_VAR => option_env!("HOMESCHOOL_REQUEST_TIMEOUT_SECS"),
            homeschool::config::CONNECT_TIMEOUT_VAR => option_env!("HOMESCHOOL_CONNECT_TIMEOUT_SECS"),
            homeschool::config::STUDENT_ID_VAR => option_env!("HOMESCHOOL_STUDENT_ID"),
            homeschool::config::SCHOOL_NAME_VAR => option_env!("HOMESCHOOL_SCHOOL_NAME"),
            _ => None,
        };
        value.map(str::to_owned)
    };
    ClientConfig::from_lookup(lookup).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid build-time configuration; using defaults");
        ClientConfig::default()
    })
}

/// Root application component.
///
/// Builds the single session store, provides it as [`SessionContext`], and
/// sets up client-side routing with every view except login behind the guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = build_config();
    let api = match ApiClient::new(&config) {
        Ok(api) => api,
        Err(err) => {
            tracing::error!(error = %err, "cannot build API client");
            let message = err.to_string();
            return view! {
                <Title text="Homeschool Interactive"/>
                <p class="text-danger">"Configuration error: " {message}</p>
            }
            .into_any();
        }
    };
    let store = SessionStore::new(api, ClientStorage::default());
    provide_context(SessionContext::new(store, config));

    view! {
        <Title text="Homeschool Interactive"/>

        <Router>
            <Layout>
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route path=StaticSegment("") view=LoginPage/>
                    <Route
                        path=StaticSegment("register")
                        view=|| view! { <ProtectedRoute route=AppRoute::Register><RegisterPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("student")
                        view=|| view! { <ProtectedRoute route=AppRoute::Student><StudentDashboard/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("teacher")
                        view=|| view! { <ProtectedRoute route=AppRoute::Teacher><TeacherDashboard/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <ProtectedRoute route=AppRoute::Admin><AdminDashboard/></ProtectedRoute> }
                    />
                </Routes>
            </Layout>
        </Router>
    }
    .into_any()
}
