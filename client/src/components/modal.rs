use leptos::prelude::*;

/// Dialog shown while `show` is true. Clicking the backdrop or the close
/// button runs `on_close`; action buttons come in through `children`.
#[component]
pub fn Modal(#[prop(into)] show: Signal<bool>, #[prop(into)] title: String, on_close: Callback<()>, children: ChildrenFn) -> impl IntoView {
    view! {
        <Show when=move || show.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())>
                <div class="modal-dialog" role="dialog" on:click=move |ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h5 class="modal-title">{title.clone()}</h5>
                        <button class="close" title="Close" on:click=move |_| on_close.run(())>
                            "✕"
                        </button>
                    </div>
                    <div class="modal-body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
