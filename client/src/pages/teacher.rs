//! Teacher dashboard: student profile, date-filtered assignments, edit modal.
//!
//! DESIGN
//! ======
//! The selected [`DateRange`] is the single source for the table: filter
//! buttons and the From/To inputs only rewrite it, and one effect refetches
//! `GET /assignments/range` whenever it changes.

#[cfg(test)]
#[path = "teacher_test.rs"]
mod teacher_test;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use homeschool::net::types::{Assignment, AssignmentStatus, Subject};
use homeschool::state::teacher::{AssignmentDraft, GRADE_LEVELS, ProfileEditor, ProfileField};
use homeschool::util::dates::{DateFilter, DateRange, format_date, parse_date_input};
use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::context::SessionContext;

/// Calendar day of `instant` in `tz`, as a date input value.
pub(crate) fn day_input_value<Tz: TimeZone>(tz: &Tz, instant: DateTime<Utc>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_date(&instant.with_timezone(tz))
}

/// Move the range start to the beginning of `first`, keeping the end.
pub(crate) fn with_first_day<Tz: TimeZone>(tz: &Tz, range: DateRange, first: NaiveDate) -> DateRange {
    DateRange { start: DateRange::from_days(tz, first, first).start, end: range.end }
}

/// Move the range end to the last millisecond of `last`, keeping the start.
pub(crate) fn with_last_day<Tz: TimeZone>(tz: &Tz, range: DateRange, last: NaiveDate) -> DateRange {
    DateRange { start: range.start, end: DateRange::from_days(tz, last, last).end }
}

/// A range response is only shown while its range is still the selected one;
/// requests are not cancelled, so an older one can finish last.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub(crate) fn is_current_range(requested: DateRange, selected: DateRange) -> bool {
    requested == selected
}

type DraftSlot = Option<(Assignment, AssignmentDraft)>;

fn edit_draft(draft: RwSignal<DraftSlot>, apply: impl FnOnce(&mut AssignmentDraft)) {
    draft.update(|slot| {
        if let Some((_, form)) = slot {
            apply(form);
        }
    });
}

#[component]
pub fn TeacherDashboard() -> impl IntoView {
    let ctx = expect_context::<SessionContext>();
    let student_id = ctx.config().student_id;
    let editor = RwSignal::new(ProfileEditor::default());
    let subjects = RwSignal::new(Vec::<Subject>::new());
    let assignments = RwSignal::new(Vec::<Assignment>::new());
    let range = RwSignal::new(DateRange::through_end_of(&Local, Local::now().date_naive()));
    let draft = RwSignal::new(None::<(Assignment, AssignmentDraft)>);
    let draft_error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let api = ctx.api();
        leptos::task::spawn_local(async move {
            match api.get_student(student_id).await {
                Ok(profile) => editor.set(ProfileEditor::new(profile)),
                Err(err) => ctx.report("load student", &err),
            }
            match api.list_subjects().await {
                Ok(mut list) => {
                    homeschool::state::admin::sort_subjects(&mut list);
                    subjects.set(list);
                }
                Err(err) => ctx.report("load subjects", &err),
            }
        });

        Effect::new(move || {
            let selected = range.get();
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                let result = api.assignments_in_range(&selected).await;
                if !is_current_range(selected, range.get_untracked()) {
                    tracing::debug!("dropping assignments for a superseded range");
                    return;
                }
                match result {
                    Ok(mut list) => {
                        homeschool::state::student::sort_by_due_date(&mut list);
                        assignments.set(list);
                    }
                    Err(err) => ctx.report("load assignments", &err),
                }
            });
        });
    }

    let on_profile_blur = move |field: ProfileField| {
        let Some(body) = editor.with_untracked(|e| e.pending_save(field)) else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                match api.update_student(student_id, &body).await {
                    Ok(()) => editor.update(|e| e.mark_saved(body)),
                    Err(err) => ctx.report("update student", &err),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = (body, student_id);
    };

    let on_filter = move |filter: DateFilter| range.set(filter.range(&Local, Local::now().date_naive()));

    let on_save = move |_| {
        let Some((original, form)) = draft.get_untracked() else {
            return;
        };
        let updated = match subjects.with_untracked(|list| form.apply(&original, list)) {
            Ok(updated) => updated,
            Err(err) => {
                draft_error.set(Some(err.to_string()));
                return;
            }
        };
        draft_error.set(None);

        #[cfg(feature = "csr")]
        {
            let api = ctx.api();
            leptos::task::spawn_local(async move {
                match api.update_assignment(&updated).await {
                    Ok(()) => {
                        assignments.update(|list| {
                            homeschool::state::teacher::replace_assignment(list, updated);
                            homeschool::state::student::sort_by_due_date(list);
                        });
                        draft.set(None);
                    }
                    Err(err) => ctx.report("save assignment", &err),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        let _ = updated;
    };

    let close_modal = Callback::new(move |()| {
        draft.set(None);
        draft_error.set(None);
    });

    let profile_input = move |field: ProfileField, label: &'static str| {
        view! {
            <label class="form-label">{label}</label>
            <input
                class="form-control"
                type="text"
                prop:value=move || editor.with(|e| e.value(field))
                on:input=move |ev| editor.update(|e| e.set(field, &event_target_value(&ev)))
                on:blur=move |_| on_profile_blur(field)
            />
        }
    };

    let rows = move || {
        assignments
            .get()
            .into_iter()
            .map(|assignment| {
                let for_edit = assignment.clone();
                view! {
                    <tr>
                        <td>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| {
                                    draft.set(Some((for_edit.clone(), AssignmentDraft::from_assignment(&for_edit))));
                                }
                            >
                                "Edit"
                            </button>
                        </td>
                        <td>{format_date(&assignment.due_date)}</td>
                        <td>{assignment.subject_name().to_owned()}</td>
                        <td>{assignment.description.clone()}</td>
                        <td>{assignment.status.as_str()}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let draft_value = move |read: fn(&AssignmentDraft) -> String| {
        draft.with(|slot| slot.as_ref().map(|(_, form)| read(form)).unwrap_or_default())
    };

    view! {
        <div class="container">
            <h1>"Teacher Dashboard"</h1>
            <form class="student-form" on:submit=|ev| ev.prevent_default()>
                {profile_input(ProfileField::FirstName, "First Name")}
                {profile_input(ProfileField::LastName, "Last Name")}
                <label class="form-label">"Grade Level"</label>
                <select
                    class="form-control"
                    prop:value=move || editor.with(|e| e.value(ProfileField::GradeLevel))
                    on:change=move |ev| editor.update(|e| e.set(ProfileField::GradeLevel, &event_target_value(&ev)))
                    on:blur=move |_| on_profile_blur(ProfileField::GradeLevel)
                >
                    {GRADE_LEVELS
                        .map(|grade| view! { <option value=grade.to_string()>{grade.to_string()}</option> })
                        .collect_view()}
                </select>
            </form>

            <div class="btn-group mb-1">
                {DateFilter::ALL
                    .into_iter()
                    .map(|filter| view! { <button class="btn btn-primary" on:click=move |_| on_filter(filter)>{filter.label()}</button> })
                    .collect_view()}
            </div>

            <div class="row mb-3">
                <label class="form-label">"From"</label>
                <input
                    class="form-control"
                    type="date"
                    prop:value=move || day_input_value(&Local, range.get().start)
                    on:change=move |ev| {
                        if let Some(day) = parse_date_input(&event_target_value(&ev)) {
                            range.update(|r| *r = with_first_day(&Local, *r, day));
                        }
                    }
                />
                <label class="form-label">"To"</label>
                <input
                    class="form-control"
                    type="date"
                    prop:value=move || day_input_value(&Local, range.get().end)
                    on:change=move |ev| {
                        if let Some(day) = parse_date_input(&event_target_value(&ev)) {
                            range.update(|r| *r = with_last_day(&Local, *r, day));
                        }
                    }
                />
            </div>

            <table class="table table-striped table-bordered table-hover">
                <thead>
                    <tr>
                        <th>"Edit"</th>
                        <th>"Due Date"</th>
                        <th>"Subject"</th>
                        <th>"Assignment Description"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>

            <Modal show=Signal::derive(move || draft.with(Option::is_some)) title="Edit Assignment" on_close=close_modal>
                <form on:submit=|ev| ev.prevent_default()>
                    <label class="form-label">"Subject"</label>
                    <select
                        class="form-control"
                        prop:value=move || draft_value(|d| d.subject_id.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| {
                            let picked = event_target_value(&ev).parse::<i64>().ok();
                            edit_draft(draft, |d| d.subject_id = picked);
                        }
                    >
                        {move || {
                            subjects
                                .get()
                                .into_iter()
                                .map(|s| view! { <option value=s.subject_id.to_string()>{s.display_name().to_owned()}</option> })
                                .collect_view()
                        }}
                    </select>

                    <label class="form-label">"Description"</label>
                    <textarea
                        class="form-control"
                        rows="4"
                        prop:value=move || draft_value(|d| d.description.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            edit_draft(draft, |d| d.description = text);
                        }
                    ></textarea>

                    <label class="form-label">"Status"</label>
                    <select
                        class="form-control"
                        prop:value=move || draft_value(|d| d.status.as_str().to_owned())
                        on:change=move |ev| {
                            if let Ok(status) = event_target_value(&ev).parse::<AssignmentStatus>() {
                                edit_draft(draft, |d| d.status = status);
                            }
                        }
                    >
                        {AssignmentStatus::ALL
                            .into_iter()
                            .map(|s| view! { <option value=s.as_str()>{s.as_str()}</option> })
                            .collect_view()}
                    </select>

                    <label class="form-label">"Due Date"</label>
                    <input
                        class="form-control"
                        type="date"
                        prop:value=move || draft_value(|d| d.due_date.clone())
                        on:change=move |ev| {
                            let day = event_target_value(&ev);
                            edit_draft(draft, |d| d.due_date = day);
                        }
                    />

                    <label class="form-label">"Link"</label>
                    <input
                        class="form-control"
                        type="text"
                        prop:value=move || draft_value(|d| d.link.clone())
                        on:input=move |ev| {
                            let link = event_target_value(&ev);
                            edit_draft(draft, |d| d.link = link);
                        }
                    />
                </form>
                {move || draft_error.get().map(|message| view! { <p class="text-danger">{message}</p> })}
                <div class="modal-footer">
                    <button class="btn btn-secondary" on:click=move |_| close_modal.run(())>
                        "Close"
                    </button>
                    <button class="btn btn-primary" on:click=on_save>
                        "Save Changes"
                    </button>
                </div>
            </Modal>
        </div>
    }
}
