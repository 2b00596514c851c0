use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer bg-light text-center">
            <div class="container p-4"></div>
        </footer>
    }
}
