use chrono::Utc;
use gloo_console::{error, info};
use gloo_dialogs::{alert, confirm};
use gloo_utils::window;
use workout_tracker_lib::{
    workout::WorkoutDraft,
    workout_log::{LogError, SortKey, WorkoutLog},
};
use yew::prelude::*;

use crate::components::{
    map_component::{FocusRequest, MapComponent},
    workout_form::{FormMode, WorkoutForm},
    workout_list::WorkoutList,
};

mod components;
mod geolocation;
mod storage;

enum MainMsg {
    Located(f64, f64),
    LocationDenied,
    MapClicked(f64, f64),
    Submitted(WorkoutDraft),
    StartEdit(i64),
    Delete(i64),
    Focus(i64),
    SetSort(SortKey),
    ResetAll,
}

/// Root of the app: owns the workout log, the form mode and the map focus,
/// and is the only place that talks to storage.
struct Model {
    log: WorkoutLog,
    user_position: Option<(f64, f64)>,
    form: FormMode,
    focus: Option<FocusRequest>,
}

impl Model {
    fn persist(&self) {
        storage::save(self.log.workouts(), self.log.sort_by());
    }

    fn submit(&mut self, draft: WorkoutDraft) -> bool {
        match self.form.clone() {
            FormMode::Adding { latitude, longitude } => {
                match self.log.add(draft, latitude, longitude, Utc::now()) {
                    Ok(workout) => {
                        info!(format!("Added workout {}: {}", workout.id, workout.description));
                        self.form = FormMode::Hidden;
                        self.persist();
                        true
                    }
                    Err(_) => {
                        alert("inputs have to be positive numbers!");
                        false
                    }
                }
            }
            FormMode::Editing { workout } => match self.log.edit(workout.id, draft) {
                Ok(workout) => {
                    info!(format!("Updated workout {}", workout.id));
                    self.form = FormMode::Hidden;
                    self.persist();
                    true
                }
                Err(LogError::InvalidInput) => {
                    alert("inputs have to be positive numbers!");
                    false
                }
                Err(LogError::UnknownWorkout(id)) => {
                    error!(format!("Edited workout {} no longer exists", id));
                    self.form = FormMode::Hidden;
                    true
                }
            },
            FormMode::Hidden => false,
        }
    }

    fn reset_all(&self) {
        if !confirm("are you sure you want to reset the App ?") {
            return;
        }
        storage::clear();
        if let Err(err) = window().location().reload() {
            error!(format!("Failed to reload: {:?}", err));
        }
    }
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link();

        geolocation::locate(
            link.callback(|(latitude, longitude)| MainMsg::Located(latitude, longitude)),
            link.callback(|()| MainMsg::LocationDenied),
        );

        let log = match storage::load() {
            Some(state) => {
                info!(format!("Loaded {} stored workouts", state.workouts.len()));
                WorkoutLog::restore(state.workouts, state.sort_by)
            }
            None => WorkoutLog::new(),
        };

        Self {
            log,
            user_position: None,
            form: FormMode::Hidden,
            focus: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::Located(latitude, longitude) => {
                info!(format!("Located user at ({}, {})", latitude, longitude));
                self.user_position = Some((latitude, longitude));
                true
            }
            MainMsg::LocationDenied => {
                alert("could not get your position");
                false
            }
            MainMsg::MapClicked(latitude, longitude) => {
                if matches!(self.form, FormMode::Editing { .. }) {
                    return false;
                }
                self.form = FormMode::Adding { latitude, longitude };
                true
            }
            MainMsg::Submitted(draft) => self.submit(draft),
            MainMsg::StartEdit(id) => {
                if matches!(self.form, FormMode::Editing { .. }) {
                    return false;
                }
                let Some(workout) = self.log.get(id) else {
                    return false;
                };
                self.form = FormMode::Editing {
                    workout: workout.clone(),
                };
                true
            }
            MainMsg::Delete(id) => {
                let Some(removed) = self.log.delete(id) else {
                    return false;
                };
                info!(format!("Deleted workout {}", removed.id));
                self.persist();
                true
            }
            MainMsg::Focus(id) => {
                if self.user_position.is_none() {
                    return false;
                }
                let Some(workout) = self.log.get(id) else {
                    return false;
                };
                let serial = self.focus.as_ref().map_or(0, |focus| focus.serial + 1);
                self.focus = Some(FocusRequest {
                    latitude: workout.latitude(),
                    longitude: workout.longitude(),
                    serial,
                });
                true
            }
            MainMsg::SetSort(key) => {
                self.log.set_sort(key);
                self.persist();
                true
            }
            MainMsg::ResetAll => {
                self.reset_all();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        let editing = match &self.form {
            FormMode::Editing { workout } => Some(workout.id),
            _ => None,
        };

        html! {
            <div class="app">
                <div class="sidebar">
                    <h1 class="logo">{"Workout Tracker"}</h1>
                    <WorkoutForm
                        mode={self.form.clone()}
                        on_submit={link.callback(MainMsg::Submitted)}
                    />
                    <WorkoutList
                        workouts={self.log.workouts().to_vec()}
                        sort_by={self.log.sort_by()}
                        editing={editing}
                        on_sort={link.callback(MainMsg::SetSort)}
                        on_reset={link.callback(|()| MainMsg::ResetAll)}
                        on_edit={link.callback(MainMsg::StartEdit)}
                        on_delete={link.callback(MainMsg::Delete)}
                        on_focus={link.callback(MainMsg::Focus)}
                    />
                </div>
                <MapComponent
                    user_position={self.user_position}
                    workouts={self.log.workouts().to_vec()}
                    focus={self.focus.clone()}
                    on_click={link.callback(|(latitude, longitude)| MainMsg::MapClicked(latitude, longitude))}
                />
            </div>
        }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
