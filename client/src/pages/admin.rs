//! Admin dashboard: school name and the subject catalogue.
//!
//! Subjects are renamed inline and saved when the field loses focus. A
//! delete asks for confirmation first; when the server refuses because an
//! assignment still uses the subject, a second dialog explains why.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use homeschool::net::types::Subject;
use homeschool::state::admin::{DeleteOutcome, SUBJECT_IN_USE_MESSAGE, rename_subject};
use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::context::SessionContext;

/// Subject named in the delete confirmation, by id.
pub(crate) fn confirm_text(subjects: &[Subject], subject_id: i64) -> String {
    let name = subjects
        .iter()
        .find(|s| s.subject_id == subject_id)
        .map_or("this subject", Subject::display_name);
    format!("Delete \"{name}\"?")
}

#[component]
pub fn AdminDashboard() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let school_name = RwSignal::new(ctx.config().school_name);
    let editing_school = RwSignal::new(false);
    let subjects = RwSignal::new(Vec::<Subject>::new());
    let pending_delete = RwSignal::new(None::<i64>);
    let in_use = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let api = ctx.api();
        leptos::task::spawn_local(async move {
            match api.list_subjects().await {
                Ok(mut list) => {
                    homeschool::state::admin::sort_subjects(&mut list);
                    subjects.set(list);
                }
                Err(err) => ctx.report("load subjects", &err),
            }
        });
    }

    let on_add = move |_| {
        #[cfg(feature = "csr")]
        {
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                match api.create_subject(&homeschool::state::admin::new_subject()).await {
                    Ok(created) => subjects.update(|list| {
                        list.push(created);
                        homeschool::state::admin::sort_subjects(list);
                    }),
                    Err(err) => ctx.report("create subject", &err),
                }
            });
        }
    };

    let on_blur = move |subject_id: i64| {
        let Some(subject) = subjects.with_untracked(|list| list.iter().find(|s| s.subject_id == subject_id).cloned())
        else {
            return;
        };
        let body = homeschool::state::admin::normalized_for_save(&subject);

        #[cfg(feature = "csr")]
        {
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                if let Err(err) = api.update_subject(&body).await {
                    ctx.report("update subject", &err);
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = body;
    };

    let on_confirm_delete = move |_| {
        let Some(subject_id) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);

        #[cfg(feature = "csr")]
        {
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                let result = api.delete_subject(subject_id).await;
                match DeleteOutcome::from_result(&result) {
                    DeleteOutcome::Deleted => subjects.update(|list| {
                        homeschool::state::admin::remove_subject(list, subject_id);
                    }),
                    DeleteOutcome::InUse => in_use.set(true),
                    DeleteOutcome::Failed(_) => {
                        if let Err(err) = &result {
                            ctx.report("delete subject", err);
                        }
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = subject_id;
    };

    let close_confirm = Callback::new(move |()| pending_delete.set(None));
    let close_in_use = Callback::new(move |()| in_use.set(false));

    let rows = move || {
        subjects
            .get()
            .into_iter()
            .map(|subject| {
                let id = subject.subject_id;
                view! {
                    <li class="subject-row">
                        <input
                            class="form-control"
                            type="text"
                            prop:value=subject.name.clone().unwrap_or_default()
                            on:input=move |ev| {
                                let name = event_target_value(&ev);
                                subjects.update(|list| {
                                    rename_subject(list, id, &name);
                                });
                            }
                            on:blur=move |_| on_blur(id)
                        />
                        <button class="btn btn-danger" on:click=move |_| pending_delete.set(Some(id))>
                            "Delete"
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="container">
            <h1>"Admin Dashboard"</h1>
            <section class="school-info">
                <Show
                    when=move || editing_school.get()
                    fallback=move || {
                        view! {
                            <h2 on:click=move |_| editing_school.set(true)>{move || school_name.get()}</h2>
                        }
                    }
                >
                    <input
                        class="form-control"
                        type="text"
                        prop:value=move || school_name.get()
                        on:input=move |ev| school_name.set(event_target_value(&ev))
                        on:blur=move |_| editing_school.set(false)
                    />
                </Show>
            </section>

            <section class="subjects">
                <h3>"Subjects"</h3>
                <button class="btn btn-primary mb-1" on:click=on_add>
                    "New Subject"
                </button>
                <ul class="subject-list">{rows}</ul>
            </section>

            <Modal show=Signal::derive(move || pending_delete.with(Option::is_some)) title="Delete Subject" on_close=close_confirm>
                <p>
                    {move || {
                        pending_delete
                            .get()
                            .map(|id| subjects.with(|list| confirm_text(list, id)))
                            .unwrap_or_default()
                    }}
                </p>
                <div class="modal-footer">
                    <button class="btn btn-secondary" on:click=move |_| close_confirm.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn-danger" on:click=on_confirm_delete>
                        "Delete"
                    </button>
                </div>
            </Modal>

            <Modal show=in_use title="Subject In Use" on_close=close_in_use>
                <p>{SUBJECT_IN_USE_MESSAGE}</p>
                <div class="modal-footer">
                    <button class="btn btn-primary" on:click=move |_| close_in_use.run(())>
                        "OK"
                    </button>
                </div>
            </Modal>
        </div>
    }
}
