//! Patient profile handlers

use axum::{extract::State, response::Redirect, Form, Json};
use serde::Deserialize;
use validator::Validate;

use asthma_guard_core::logic::views;
use asthma_guard_core::{PatientProfile, ProfileUpdate};

use super::blocking;
use crate::{AppResult, AppState};

/// Profile form fields (urlencoded)
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 16))]
    pub age: Option<String>,
    #[validate(length(max = 32))]
    pub gender: Option<String>,
    #[validate(length(max = 64))]
    pub smoker: Option<String>,
    #[validate(length(max = 64))]
    pub allergy_present: Option<String>,
    #[validate(length(max = 64))]
    pub allergy_type: Option<String>,
    #[validate(length(max = 64))]
    pub occupation: Option<String>,
}

impl From<ProfileForm> for ProfileUpdate {
    fn from(form: ProfileForm) -> Self {
        ProfileUpdate {
            name: form.name,
            age: form.age,
            gender: form.gender,
            smoker: form.smoker,
            allergy_present: form.allergy_present,
            allergy_type: form.allergy_type,
            occupation: form.occupation,
        }
    }
}

pub async fn get(State(state): State<AppState>) -> AppResult<Json<PatientProfile>> {
    let patient = blocking(move || views::patient_profile(&state.store)).await?;
    Ok(Json(patient))
}

/// Merge the submitted form into the stored profile
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> AppResult<Redirect> {
    form.validate()?;
    let update = ProfileUpdate::from(form);

    blocking(move || views::update_profile(&state.store, update)).await??;

    Ok(Redirect::to("/patient_profile"))
}
