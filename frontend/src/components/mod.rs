pub mod add_vaccination_form;
pub mod pet_profile;
pub mod status_badge;
pub mod vaccination_table;
