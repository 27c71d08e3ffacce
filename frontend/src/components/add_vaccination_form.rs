use shared::CreateVaccinationRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct AddVaccinationFormProps {
    /// Fired after a record is created so the page can refresh and collapse the form
    pub on_added: Callback<()>,
}

#[function_component(AddVaccinationForm)]
pub fn add_vaccination_form(props: &AddVaccinationFormProps) -> Html {
    let name = use_state(String::new);
    let due_date = use_state(String::new);
    let saving = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);

    let on_name_change = {
        let name = name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_due_date_change = {
        let due_date = due_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            due_date.set(input.value());
        })
    };

    let on_submit = {
        let name = name.clone();
        let due_date = due_date.clone();
        let saving = saving.clone();
        let form_error = form_error.clone();
        let on_added = props.on_added.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let name = name.clone();
            let due_date = due_date.clone();
            let saving = saving.clone();
            let form_error = form_error.clone();
            let on_added = on_added.clone();

            spawn_local(async move {
                saving.set(true);
                form_error.set(None);

                let request = CreateVaccinationRequest {
                    name: Some((*name).clone()),
                    due_date: Some((*due_date).clone()),
                };

                match ApiClient::new().create_vaccination(request).await {
                    Ok(_) => {
                        name.set(String::new());
                        due_date.set(String::new());
                        on_added.emit(());
                    }
                    Err(e) => {
                        gloo::console::error!("Failed to add vaccination:", e);
                        // The user sees one generic message regardless of cause
                        form_error.set(Some("Failed to add vaccination".to_string()));
                    }
                }

                saving.set(false);
            });
        })
    };

    html! {
        <form class="add-vaccination-form" onsubmit={on_submit}>
            <input
                type="text"
                placeholder="Vaccination Name"
                value={(*name).clone()}
                onchange={on_name_change}
                disabled={*saving}
                required={true}
            />
            <input
                type="date"
                value={(*due_date).clone()}
                onchange={on_due_date_change}
                disabled={*saving}
                required={true}
            />
            <button type="submit" class="btn btn-primary" disabled={*saving}>
                {if *saving { "Adding..." } else { "Add Vaccination" }}
            </button>
            {if let Some(error) = (*form_error).as_ref() {
                html! { <span class="form-error">{error}</span> }
            } else { html! {} }}
        </form>
    }
}
