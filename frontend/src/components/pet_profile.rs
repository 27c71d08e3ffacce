use yew::prelude::*;

/// Profile header for the single tracked pet
#[function_component(PetProfile)]
pub fn pet_profile() -> Html {
    html! {
        <div class="pet-profile">
            <h1>{"Bobby's vaccinations"}</h1>
            <p class="pet-details">{"Golden Retriever | 1 year old"}</p>
        </div>
    }
}
