use chrono::NaiveDate;
use shared::{StatusFilter, UpdateVaccinationRequest, Vaccination};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

mod components;
mod services;

use components::add_vaccination_form::AddVaccinationForm;
use components::pet_profile::PetProfile;
use components::vaccination_table::VaccinationTable;
use services::api::ApiClient;
use services::date_utils;

#[function_component(App)]
fn app() -> Html {
    let vaccinations = use_state(Vec::<Vaccination>::new);
    let loading = use_state(|| true);
    let status_filter = use_state(|| StatusFilter::All);
    let show_form = use_state(|| false);

    // Function to refresh the vaccination list
    let refresh_vaccinations = {
        let vaccinations = vaccinations.clone();
        let loading = loading.clone();

        Callback::from(move |_| {
            let vaccinations = vaccinations.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);

                match ApiClient::new().list_vaccinations().await {
                    Ok(list) => vaccinations.set(list),
                    Err(e) => {
                        gloo::console::error!("Failed to fetch vaccinations:", e);
                        vaccinations.set(Vec::new());
                    }
                }

                loading.set(false);
            });
        })
    };

    // Load initial data
    use_effect_with((), {
        let refresh_vaccinations = refresh_vaccinations.clone();
        move |_| {
            refresh_vaccinations.emit(());
            || ()
        }
    });

    let on_filter_change = {
        let status_filter = status_filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            status_filter.set(StatusFilter::from_label(&select.value()));
        })
    };

    let toggle_form = {
        let show_form = show_form.clone();
        Callback::from(move |_| show_form.set(!*show_form))
    };

    let on_added = {
        let show_form = show_form.clone();
        let refresh_vaccinations = refresh_vaccinations.clone();
        Callback::from(move |_| {
            show_form.set(false);
            refresh_vaccinations.emit(());
        })
    };

    // Mark-complete: compute the completion dates client-side, then PATCH
    let on_mark_complete = {
        let refresh_vaccinations = refresh_vaccinations.clone();
        Callback::from(move |(id, date_override): (String, Option<NaiveDate>)| {
            let refresh_vaccinations = refresh_vaccinations.clone();

            spawn_local(async move {
                let completed_on = date_override.unwrap_or_else(date_utils::today);
                let update = shared::mark_complete(completed_on);

                let request = UpdateVaccinationRequest {
                    id: Some(id),
                    last_completed: Some(update.last_completed.to_string()),
                    due_date: Some(update.due_date.to_string()),
                };

                if let Err(e) = ApiClient::new().mark_complete(request).await {
                    gloo::console::error!("Failed to update vaccination:", e);
                }

                refresh_vaccinations.emit(());
            });
        })
    };

    let on_delete = {
        let refresh_vaccinations = refresh_vaccinations.clone();
        Callback::from(move |id: String| {
            let refresh_vaccinations = refresh_vaccinations.clone();

            spawn_local(async move {
                if let Err(e) = ApiClient::new().delete_vaccination(id).await {
                    gloo::console::error!("Failed to delete vaccination:", e);
                }

                refresh_vaccinations.emit(());
            });
        })
    };

    // Status is derived from live due dates on every render, never cached
    let today = date_utils::today();
    let filtered: Vec<Vaccination> = vaccinations
        .iter()
        .filter(|v| status_filter.matches(v.due_date, today))
        .cloned()
        .collect();
    let result_word = if filtered.len() == 1 { "result" } else { "results" };

    html! {
        <div class="page">
            <div class="container">
                <PetProfile />

                <section class="vaccinations-section">
                    <div class="toolbar">
                        <div class="filter-group">
                            <label for="status-filter">{"Filter by status:"}</label>
                            <select id="status-filter" onchange={on_filter_change}>
                                {for StatusFilter::ALL.iter().map(|filter| html! {
                                    <option selected={*filter == *status_filter}>{filter.label()}</option>
                                })}
                            </select>
                            <span class="result-count">
                                {format!("{} {} shown", filtered.len(), result_word)}
                            </span>
                        </div>
                        <button class="btn btn-primary" onclick={toggle_form}>
                            {if *show_form { "Close" } else { "+ Add Vaccination" }}
                        </button>
                    </div>

                    {if *show_form {
                        html! { <AddVaccinationForm on_added={on_added} /> }
                    } else { html! {} }}

                    {if *loading {
                        html! { <div class="loading">{"Loading..."}</div> }
                    } else {
                        html! {
                            <VaccinationTable
                                vaccinations={filtered}
                                today={today}
                                on_mark_complete={on_mark_complete}
                                on_delete={on_delete}
                            />
                        }
                    }}
                </section>
            </div>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
