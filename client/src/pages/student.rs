//! Student dashboard: profile heading, live clock, assignment checklist.

#[cfg(test)]
#[path = "student_test.rs"]
mod student_test;

use chrono::Local;
use homeschool::net::types::{Assignment, AssignmentStatus, StudentProfile};
use homeschool::state::student::{grade_label, is_locked, row_checked, toggled_status};
use homeschool::util::dates::{format_clock, format_date};
use leptos::prelude::*;

use crate::context::SessionContext;

/// The signed-in user's own record, or the configured student when the
/// session carries no id.
pub(crate) fn student_id_for(user_id: Option<i64>, configured: i64) -> i64 {
    user_id.unwrap_or(configured)
}

pub(crate) fn row_class(status: AssignmentStatus) -> &'static str {
    if is_locked(status) { "greyed-out" } else { "" }
}

#[component]
pub fn StudentDashboard() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let config = ctx.config();
    let profile = RwSignal::new(StudentProfile::default());
    let assignments = RwSignal::new(Vec::<Assignment>::new());
    let now = RwSignal::new(Local::now());

    #[cfg(feature = "csr")]
    {
        let student_id = student_id_for(ctx.session.with_untracked(homeschool::Session::user_id), config.student_id);
        let api = ctx.api();
        leptos::task::spawn_local(async move {
            match api.get_student(student_id).await {
                Ok(loaded) => profile.set(loaded),
                Err(err) => ctx.report("load student", &err),
            }
            match api.list_assignments().await {
                Ok(mut list) => {
                    homeschool::state::student::sort_by_due_date(&mut list);
                    assignments.set(list);
                }
                Err(err) => ctx.report("load assignments", &err),
            }
        });

        let clock_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let clock_alive_task = clock_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                if !clock_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                now.set(Local::now());
            }
        });
        on_cleanup(move || clock_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    // The click's default is prevented, so the box only changes when the
    // list does, i.e. after the server confirmed the new status.
    let on_toggle = move |assignment_id: i64, status: AssignmentStatus| {
        let Some(next) = toggled_status(status) else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                let result = api.update_assignment_status(assignment_id, next).await;
                if let Err(err) = &result {
                    ctx.report("update assignment status", err);
                }
                assignments.update(|list| {
                    homeschool::state::student::settle_toggle(list, assignment_id, next, &result);
                });
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (assignment_id, next);
    };

    let rows = move || {
        assignments
            .get()
            .into_iter()
            .map(|assignment| {
                let id = assignment.assignment_id;
                let status = assignment.status;
                view! {
                    <tr class=row_class(status)>
                        <td class="checkbox-column">
                            <input
                                type="checkbox"
                                prop:checked=move || assignments.with(|list| row_checked(list, id))
                                disabled=is_locked(status)
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    on_toggle(id, status);
                                }
                            />
                        </td>
                        <td class="due-date-column">{format_date(&assignment.due_date)}</td>
                        <td>{assignment.subject_name().to_owned()}</td>
                        <td>{assignment.description.clone()}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="container">
            <div class="student-info text-center">
                <h1>{config.school_name.clone()}</h1>
                <h2>{move || profile.with(StudentProfile::full_name)}</h2>
                <h3>{move || profile.with(grade_label)}</h3>
                <p>"Current Time: " {move || format_clock(&now.get())}</p>
            </div>
            <table class="table">
                <thead>
                    <tr>
                        <th class="checkbox-column">"Complete"</th>
                        <th class="due-date-column">"Due Date"</th>
                        <th>"Subject"</th>
                        <th>"Assignment Description"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}
