use chrono::NaiveDate;
use shared::{Vaccination, VaccinationStatus};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::status_badge::StatusBadge;
use crate::services::date_utils;

#[derive(Properties, PartialEq)]
pub struct VaccinationTableProps {
    pub vaccinations: Vec<Vaccination>,
    /// Reference date for status rendering, injected by the page
    pub today: NaiveDate,
    /// (id, optional completion-date override); None means "completed today"
    pub on_mark_complete: Callback<(String, Option<NaiveDate>)>,
    pub on_delete: Callback<String>,
}

/// Listing of all vaccination records.
///
/// Overdue rows get a date picker for the completion date (the shot may have
/// happened a while ago); everything else completes with a single click.
/// The picker toggle is the only per-row state: idle -> editing -> idle.
#[function_component(VaccinationTable)]
pub fn vaccination_table(props: &VaccinationTableProps) -> Html {
    let editing_row_id = use_state(|| Option::<String>::None);
    let editing_date = use_state(String::new);

    let on_editing_date_change = {
        let editing_date = editing_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            editing_date.set(input.value());
        })
    };

    let cancel_editing = {
        let editing_row_id = editing_row_id.clone();
        let editing_date = editing_date.clone();
        Callback::from(move |_: MouseEvent| {
            editing_row_id.set(None);
            editing_date.set(String::new());
        })
    };

    html! {
        <div class="table-container">
            <table class="vaccinations-table">
                <thead>
                    <tr>
                        <th>{"Vaccination"}</th>
                        <th>{"Status"}</th>
                        <th>{"Last Completed"}</th>
                        <th>{"Due Date"}</th>
                        <th>{"Action"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.vaccinations.iter().map(|vaccination| {
                        let status = VaccinationStatus::classify(vaccination.due_date, props.today);
                        let is_overdue = status == VaccinationStatus::OverDue;
                        let is_editing = editing_row_id.as_deref() == Some(vaccination.id.as_str());

                        let delete_button = {
                            let on_delete = props.on_delete.clone();
                            let id = vaccination.id.clone();
                            html! {
                                <button
                                    class="btn-icon delete"
                                    title="Delete"
                                    onclick={Callback::from(move |_| on_delete.emit(id.clone()))}
                                >
                                    {"\u{1F5D1}"}
                                </button>
                            }
                        };

                        let action_cell = if is_overdue && is_editing {
                            let confirm = {
                                let on_mark_complete = props.on_mark_complete.clone();
                                let editing_row_id = editing_row_id.clone();
                                let editing_date = editing_date.clone();
                                let id = vaccination.id.clone();
                                Callback::from(move |_: MouseEvent| {
                                    if let Some(date) = date_utils::parse_input_date(&editing_date) {
                                        on_mark_complete.emit((id.clone(), Some(date)));
                                        editing_row_id.set(None);
                                        editing_date.set(String::new());
                                    }
                                })
                            };

                            html! {
                                <>
                                    <input
                                        type="date"
                                        class="completion-date-input"
                                        value={(*editing_date).clone()}
                                        onchange={on_editing_date_change.clone()}
                                    />
                                    <button class="btn-icon cancel" title="Cancel" onclick={cancel_editing.clone()}>
                                        {"\u{2715}"}
                                    </button>
                                    {if !editing_date.is_empty() {
                                        html! {
                                            <button class="btn-icon confirm" title="Confirm" onclick={confirm}>
                                                {"\u{2713}"}
                                            </button>
                                        }
                                    } else { html! {} }}
                                    {delete_button}
                                </>
                            }
                        } else if is_overdue {
                            let start_editing = {
                                let editing_row_id = editing_row_id.clone();
                                let editing_date = editing_date.clone();
                                let id = vaccination.id.clone();
                                Callback::from(move |_: MouseEvent| {
                                    editing_row_id.set(Some(id.clone()));
                                    editing_date.set(String::new());
                                })
                            };

                            html! {
                                <>
                                    <button class="btn btn-complete" onclick={start_editing}>
                                        {"MARK COMPLETE"}
                                    </button>
                                    {delete_button}
                                </>
                            }
                        } else {
                            let complete_today = {
                                let on_mark_complete = props.on_mark_complete.clone();
                                let id = vaccination.id.clone();
                                Callback::from(move |_: MouseEvent| {
                                    on_mark_complete.emit((id.clone(), None));
                                })
                            };

                            html! {
                                <>
                                    <button
                                        class="btn btn-complete"
                                        onclick={complete_today}
                                        disabled={status == VaccinationStatus::Completed}
                                    >
                                        {"MARK COMPLETE"}
                                    </button>
                                    {delete_button}
                                </>
                            }
                        };

                        html! {
                            <tr key={vaccination.id.clone()}>
                                <td class="name">{&vaccination.name}</td>
                                <td><StatusBadge status={status} /></td>
                                <td class="date">
                                    {vaccination.last_completed
                                        .map(date_utils::format_display_date)
                                        .unwrap_or_else(|| "-".to_string())}
                                </td>
                                <td class="date">{date_utils::format_display_date(vaccination.due_date)}</td>
                                <td class="actions">{action_cell}</td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}
