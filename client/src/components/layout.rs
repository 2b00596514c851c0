use leptos::prelude::*;

use super::footer::Footer;
use super::header::Header;

/// Header, routed content, footer.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="app">
            <Header/>
            <main class="app-main">{children()}</main>
            <Footer/>
        </div>
    }
}
