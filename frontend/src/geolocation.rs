use gloo_console::error;
use gloo_utils::window;
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{Position, PositionError};
use yew::Callback;

/// One-shot browser position query. Reports (latitude, longitude) on
/// success, or fires `on_denied` once if the service is missing, blocked
/// or errors out. The callback closures are handed to the browser and
/// intentionally leaked; there is no retry.
pub fn locate(on_position: Callback<(f64, f64)>, on_denied: Callback<()>) {
    let geolocation = match window().navigator().geolocation() {
        Ok(geolocation) => geolocation,
        Err(err) => {
            error!(format!("Geolocation unavailable: {:?}", err));
            on_denied.emit(());
            return;
        }
    };

    let success = Closure::<dyn FnMut(Position)>::new(move |position: Position| {
        let coords = position.coords();
        on_position.emit((coords.latitude(), coords.longitude()));
    });

    let denied = on_denied.clone();
    let failure = Closure::<dyn FnMut(PositionError)>::new(move |err: PositionError| {
        error!(format!("Geolocation failed: {}", err.message()));
        denied.emit(());
    });

    if let Err(err) = geolocation.get_current_position_with_error_callback(
        success.as_ref().unchecked_ref(),
        Some(failure.as_ref().unchecked_ref()),
    ) {
        error!(format!("Geolocation request failed: {:?}", err));
        on_denied.emit(());
        return;
    }

    success.forget();
    failure.forget();
}
