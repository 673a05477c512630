use std::rc::Rc;

use log::error;
use yew::prelude::*;

use crate::catalog::Catalog;
use crate::components::how_it_works::HowItWorks;

#[function_component(Home)]
pub fn home() -> Html {
    let catalog = use_state(|| {
        Catalog::bundled().map(Rc::new).map_err(|err| {
            error!("failed to load step catalog: {}", err);
            err
        })
    });

    html! {
        <div class="home-page">
            <style>{PAGE_CSS}</style>
            <section class="intro">
                <h1>{"Novi i polovni telefoni, bez muke"}</h1>
                <p>{"Skroluj dole da vidiš kako funkcioniše kupovina."}</p>
            </section>
            {
                match &*catalog {
                    Ok(catalog) => html! { <HowItWorks catalog={catalog.clone()} /> },
                    Err(_) => html! {},
                }
            }
            <footer class="outro">
                <p>{"© Telefoni"}</p>
            </footer>
        </div>
    }
}

const PAGE_CSS: &str = r#"
    body {
        margin: 0;
        background: #0d0d1a;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    }
    .intro, .outro {
        min-height: 80vh;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        color: #fff;
        text-align: center;
        padding: 0 20px;
    }
    .intro h1 {
        font-size: 3rem;
        margin-bottom: 16px;
    }
    .outro {
        min-height: 60vh;
        color: rgba(255, 255, 255, 0.5);
    }
"#;
