use shared::VaccinationStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: VaccinationStatus,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    // CSS class per status: calm for completed, warn for due soon, alert for overdue
    let badge_class = match props.status {
        VaccinationStatus::Completed => "status-badge completed",
        VaccinationStatus::DueSoon => "status-badge due-soon",
        VaccinationStatus::OverDue => "status-badge over-due",
    };

    html! {
        <span class={badge_class}>{props.status.to_string()}</span>
    }
}
