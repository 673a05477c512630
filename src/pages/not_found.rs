use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="not-found">
            <h1>{"404"}</h1>
            <Link<Route> to={Route::Home}>{"Nazad na početnu"}</Link<Route>>
        </div>
    }
}
