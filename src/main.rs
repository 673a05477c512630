use howitworks::app::App;
use howitworks::config;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logger
    if let Err(err) = console_log::init_with_level(config::log_level()) {
        web_sys::console::error_1(&format!("error initializing log: {err}").into());
    }

    yew::Renderer::<App>::new().render();
}
