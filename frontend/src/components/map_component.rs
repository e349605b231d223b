use std::collections::HashMap;

use gloo_console::info;
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MarkerOptions, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};
use workout_tracker_lib::workout::Workout;
use yew::prelude::*;

const INITIAL_ZOOM: f64 = 11.5;
const FOCUS_ZOOM: f64 = 15.0;

/// A pan request targeting one workout. The serial keeps repeated requests
/// for the same workout distinguishable in the props diff.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub serial: u64,
}

pub struct MapComponent {
    map: Map,
    container: HtmlElement,
    markers: HashMap<i64, Marker>,
    view_initialized: bool,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    /// None until geolocation has answered; the map stays dormant without it.
    pub user_position: Option<(f64, f64)>,
    pub workouts: Vec<Workout>,
    pub focus: Option<FocusRequest>,
    pub on_click: Callback<(f64, f64)>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    /// First position fix brings the map to life: view, tiles, click
    /// handler, and one marker per already-loaded workout.
    fn ensure_view(&mut self, props: &Props) {
        if self.view_initialized {
            return;
        }
        let Some((latitude, longitude)) = props.user_position else {
            return;
        };

        self.map.set_view(&LatLng::new(latitude, longitude), INITIAL_ZOOM);
        add_tile_layer(&self.map);

        let on_click = props.on_click.clone();
        self.map.on_mouse_click(Box::new(move |event| {
            let latlng = event.lat_lng();
            on_click.emit((latlng.lat(), latlng.lng()));
        }));

        for workout in &props.workouts {
            let marker = place_marker(&self.map, workout);
            self.markers.insert(workout.id, marker);
        }

        self.view_initialized = true;
        info!(format!("Map initialized at ({}, {})", latitude, longitude));
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        let container: Element = document().create_element("div").unwrap();
        let container: HtmlElement = container.dyn_into().unwrap();
        container.set_class_name("map");

        let leaflet_map = Map::new_with_element(&container, &MapOptions::default());

        Self {
            map: leaflet_map,
            container,
            markers: HashMap::new(),
            view_initialized: false,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.ensure_view(ctx.props());
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        self.map.invalidate_size(false);
        let props = ctx.props();

        self.ensure_view(props);
        if !self.view_initialized {
            return true;
        }

        // Drop markers whose workout is gone, then add or rebuild the rest
        self.markers.retain(|id, marker| {
            let alive = props.workouts.iter().any(|workout| workout.id == *id);
            if !alive {
                marker.remove();
            }
            alive
        });

        for workout in &props.workouts {
            let unchanged = self.markers.contains_key(&workout.id)
                && old_props.workouts.iter().find(|old| old.id == workout.id) == Some(workout);
            if unchanged {
                continue;
            }
            if let Some(previous) = self.markers.remove(&workout.id) {
                previous.remove();
            }
            let marker = place_marker(&self.map, workout);
            self.markers.insert(workout.id, marker);
        }

        if props.focus != old_props.focus {
            if let Some(focus) = &props.focus {
                self.map
                    .fly_to(&LatLng::new(focus.latitude, focus.longitude), FOCUS_ZOOM);
            }
        }

        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="map">
                {self.render_map()}
            </div>
        }
    }
}

fn place_marker(map: &Map, workout: &Workout) -> Marker {
    let opts = MarkerOptions::new();
    opts.set_rise_on_hover(true);

    let position = LatLng::new(workout.latitude(), workout.longitude());
    let marker = Marker::new_with_options(&position, &opts);

    let popup_opts = PopupOptions::default();
    popup_opts.set_max_width(250.0);
    popup_opts.set_min_width(100.0);
    popup_opts.set_auto_close(false);
    popup_opts.set_close_on_click(false);
    popup_opts.set_class_name(format!("{}-popup", workout.kind.type_str()));

    let popup = Popup::new(&popup_opts, None);
    popup.set_content(&format!("{} {}", workout.kind.icon(), workout.description).into());

    marker.add_to(map);
    marker.bind_popup(&popup);
    marker.open_popup();
    marker
}

fn add_tile_layer(map: &Map) {
    let url = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
    let opts = TileLayerOptions::new();
    opts.set_max_zoom(19.0);
    opts.set_update_when_idle(true);
    opts.set_attribution(
        "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
    );
    TileLayer::new_options(url, &opts).add_to(map);
}
