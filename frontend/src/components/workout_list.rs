use web_sys::HtmlSelectElement;
use workout_tracker_lib::{
    workout::{pace, speed, Workout, WorkoutKind},
    workout_log::SortKey,
};
use yew::prelude::*;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub workouts: Vec<Workout>,
    pub sort_by: SortKey,
    /// Id of the workout under edit; its entry is hidden until the edit ends.
    pub editing: Option<i64>,
    pub on_sort: Callback<SortKey>,
    pub on_reset: Callback<()>,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
    pub on_focus: Callback<i64>,
}

#[function_component]
pub fn WorkoutList(props: &Props) -> Html {
    let on_sort = props.on_sort.clone();
    let onchange = Callback::from(move |event: Event| {
        let select: HtmlSelectElement = event.target_unchecked_into();
        if let Some(key) = SortKey::from_value(&select.value()) {
            on_sort.emit(key);
        }
    });

    let on_reset = props.on_reset.clone();
    let onreset = Callback::from(move |_| on_reset.emit(()));

    html! {
        <>
            <div class="list-controls">
                <label class="sort-label" for="sort">{"Sort by"}</label>
                <select id="sort" class="sort-select" onchange={onchange}>
                    { for SortKey::ALL.iter().map(|key| html! {
                        <option value={key.value()} selected={*key == props.sort_by}>
                            {key.label()}
                        </option>
                    }) }
                </select>
                <button class="delete-all-btn" onclick={onreset}>{"Delete all"}</button>
            </div>
            <ul class="workouts">
                { for props.workouts.iter().rev()
                    .filter(|workout| props.editing != Some(workout.id))
                    .map(|workout| html! {
                        <WorkoutEntry
                            key={workout.id}
                            workout={workout.clone()}
                            on_edit={props.on_edit.clone()}
                            on_delete={props.on_delete.clone()}
                            on_focus={props.on_focus.clone()}
                        />
                    }) }
            </ul>
        </>
    }
}

#[derive(PartialEq, Properties, Clone)]
struct EntryProps {
    workout: Workout,
    on_edit: Callback<i64>,
    on_delete: Callback<i64>,
    on_focus: Callback<i64>,
}

#[function_component]
fn WorkoutEntry(props: &EntryProps) -> Html {
    let workout = &props.workout;
    let id = workout.id;

    let on_focus = props.on_focus.clone();
    let onclick = Callback::from(move |_| on_focus.emit(id));

    let on_edit = props.on_edit.clone();
    let onedit = Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        on_edit.emit(id);
    });

    let on_delete = props.on_delete.clone();
    let ondelete = Callback::from(move |event: MouseEvent| {
        event.stop_propagation();
        on_delete.emit(id);
    });

    html! {
        <li
            class={classes!("workout", format!("workout--{}", workout.kind.type_str()))}
            onclick={onclick}
        >
            <h2 class="workout__title">{format!("{}", workout.description)}</h2>
            <h2 class="delete-workout" onclick={ondelete}>{"✖"}</h2>
            <h2 class="edit-workout" onclick={onedit}>{"edit"}</h2>
            <div class="workout__details">
                <span class="workout__icon">{workout.kind.icon()}</span>
                <span class="workout__value">{format!("{}", workout.distance)}</span>
                <span class="workout__unit">{"km"}</span>
            </div>
            <div class="workout__details">
                <span class="workout__icon">{"⏱"}</span>
                <span class="workout__value">{format!("{}", workout.duration)}</span>
                <span class="workout__unit">{"min"}</span>
            </div>
            { metric_details(workout) }
        </li>
    }
}

/// The kind-specific pair of detail rows: pace and cadence for running,
/// speed and elevation gain for cycling.
fn metric_details(workout: &Workout) -> Html {
    match workout.kind {
        WorkoutKind::Running { cadence } => html! { <>
            <div class="workout__details">
                <span class="workout__icon">{"⚡️"}</span>
                <span class="workout__value">
                    {format!("{:.1}", pace(workout.distance, workout.duration))}
                </span>
                <span class="workout__unit">{"min/km"}</span>
            </div>
            <div class="workout__details">
                <span class="workout__icon">{"🦶🏼"}</span>
                <span class="workout__value">{format!("{}", cadence)}</span>
                <span class="workout__unit">{"spm"}</span>
            </div>
        </> },
        WorkoutKind::Cycling { elevation_gain } => html! { <>
            <div class="workout__details">
                <span class="workout__icon">{"⚡️"}</span>
                <span class="workout__value">
                    {format!("{:.1}", speed(workout.distance, workout.duration))}
                </span>
                <span class="workout__unit">{"km/h"}</span>
            </div>
            <div class="workout__details">
                <span class="workout__icon">{"⛰"}</span>
                <span class="workout__value">{format!("{}", elevation_gain)}</span>
                <span class="workout__unit">{"m"}</span>
            </div>
        </> },
    }
}
