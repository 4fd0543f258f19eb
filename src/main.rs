mod components;
mod util;

use components::app::App;

fn main() {
    fractalix_rewards::logging::init("info");
    tracing::info!("fractalix rewards shell starting");
    yew::Renderer::<App>::new().render();
}
