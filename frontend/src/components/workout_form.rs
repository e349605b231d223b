use web_sys::{HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::workout::{Workout, WorkoutDraft, WorkoutKind};
use yew::prelude::*;

/// What the form is currently for. Owned by the root component; the form
/// itself only keeps the field text.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Hidden,
    /// Map click, bound to the clicked coordinates.
    Adding { latitude: f64, longitude: f64 },
    /// Edit affordance, bound to the record under edit.
    Editing { workout: Workout },
}

pub enum FormMsg {
    KindChanged(String),
    DistanceChanged(String),
    DurationChanged(String),
    CadenceChanged(String),
    ElevationChanged(String),
    Submitted,
}

pub struct WorkoutForm {
    kind: String,
    distance: String,
    duration: String,
    cadence: String,
    elevation_gain: String,
    kind_select: NodeRef,
    distance_input: NodeRef,
    pending_focus: bool,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub mode: FormMode,
    pub on_submit: Callback<WorkoutDraft>,
}

impl WorkoutForm {
    /// Reload the fields for a new mode: empty for a fresh add, populated
    /// from the record for an edit.
    fn apply_mode(&mut self, mode: &FormMode) {
        self.kind = "running".to_string();
        self.distance = String::new();
        self.duration = String::new();
        self.cadence = String::new();
        self.elevation_gain = String::new();

        if let FormMode::Editing { workout } = mode {
            self.kind = workout.kind.type_str().to_string();
            self.distance = workout.distance.to_string();
            self.duration = workout.duration.to_string();
            match workout.kind {
                WorkoutKind::Running { cadence } => self.cadence = cadence.to_string(),
                WorkoutKind::Cycling { elevation_gain } => {
                    self.elevation_gain = elevation_gain.to_string()
                }
            }
        }

        self.pending_focus = !matches!(mode, FormMode::Hidden);
    }

    fn draft(&self) -> WorkoutDraft {
        let kind = if self.kind == "cycling" {
            WorkoutKind::Cycling {
                elevation_gain: parse_field(&self.elevation_gain),
            }
        } else {
            WorkoutKind::Running {
                cadence: parse_field(&self.cadence),
            }
        };
        WorkoutDraft {
            distance: parse_field(&self.distance),
            duration: parse_field(&self.duration),
            kind,
        }
    }
}

impl Component for WorkoutForm {
    type Message = FormMsg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let mut form = Self {
            kind: String::new(),
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation_gain: String::new(),
            kind_select: NodeRef::default(),
            distance_input: NodeRef::default(),
            pending_focus: false,
        };
        form.apply_mode(&ctx.props().mode);
        form
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            FormMsg::KindChanged(kind) => self.kind = kind,
            FormMsg::DistanceChanged(value) => self.distance = value,
            FormMsg::DurationChanged(value) => self.duration = value,
            FormMsg::CadenceChanged(value) => self.cadence = value,
            FormMsg::ElevationChanged(value) => self.elevation_gain = value,
            FormMsg::Submitted => {
                ctx.props().on_submit.emit(self.draft());
                return false;
            }
        }
        true
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().mode != old_props.mode {
            self.apply_mode(&ctx.props().mode);
        }
        true
    }

    // The select element does not track its value attribute once rendered,
    // so the current kind is pushed into the DOM here. Focus follows the
    // form opening.
    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if !self.pending_focus {
            return;
        }
        self.pending_focus = false;

        if let Some(select) = self.kind_select.cast::<HtmlSelectElement>() {
            select.set_value(&self.kind);
        }
        if let Some(input) = self.distance_input.cast::<HtmlInputElement>() {
            let _ = input.focus();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let hidden = matches!(ctx.props().mode, FormMode::Hidden);
        let cycling = self.kind == "cycling";

        let onsubmit = link.callback(|event: SubmitEvent| {
            event.prevent_default();
            FormMsg::Submitted
        });
        let onchange = link.callback(|event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            FormMsg::KindChanged(select.value())
        });

        let input = |to_msg: fn(String) -> FormMsg| {
            link.callback(move |event: InputEvent| {
                let input: HtmlInputElement = event.target_unchecked_into();
                to_msg(input.value())
            })
        };

        html! {
            <form class={classes!("form", hidden.then_some("hidden"))} onsubmit={onsubmit}>
                <div class="form__row">
                    <label class="form__label">{"Type"}</label>
                    <select
                        ref={self.kind_select.clone()}
                        class="form__input form__input--type"
                        onchange={onchange}
                    >
                        <option value="running" selected={!cycling}>{"Running"}</option>
                        <option value="cycling" selected={cycling}>{"Cycling"}</option>
                    </select>
                </div>
                <div class="form__row">
                    <label class="form__label">{"Distance"}</label>
                    <input
                        ref={self.distance_input.clone()}
                        class="form__input form__input--distance"
                        placeholder="km"
                        value={self.distance.clone()}
                        oninput={input(FormMsg::DistanceChanged)}
                    />
                </div>
                <div class="form__row">
                    <label class="form__label">{"Duration"}</label>
                    <input
                        class="form__input form__input--duration"
                        placeholder="min"
                        value={self.duration.clone()}
                        oninput={input(FormMsg::DurationChanged)}
                    />
                </div>
                <div class={classes!("form__row", cycling.then_some("form__row--hidden"))}>
                    <label class="form__label">{"Cadence"}</label>
                    <input
                        class="form__input form__input--cadence"
                        placeholder="step/min"
                        value={self.cadence.clone()}
                        oninput={input(FormMsg::CadenceChanged)}
                    />
                </div>
                <div class={classes!("form__row", (!cycling).then_some("form__row--hidden"))}>
                    <label class="form__label">{"Elev Gain"}</label>
                    <input
                        class="form__input form__input--elevation"
                        placeholder="meters"
                        value={self.elevation_gain.clone()}
                        oninput={input(FormMsg::ElevationChanged)}
                    />
                </div>
                <button class="form__btn">{"OK"}</button>
            </form>
        }
    }
}

/// Unparseable or empty input becomes NaN, which validation rejects.
fn parse_field(value: &str) -> f64 {
    value.trim().parse().unwrap_or(f64::NAN)
}
