use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use log::{error, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::catalog::{Catalog, Step};
use crate::config::SectionConfig;
use crate::error::BindingError;
use crate::machine::StepSnapshot;
use crate::presentation::{self, CardVisual, IndicatorVisual, NodeVisual};
use crate::section::ScrollSection;
use crate::visibility::IntersectionWatcher;

#[derive(Properties, PartialEq)]
pub struct HowItWorksProps {
    pub catalog: Rc<Catalog>,
}

/// Browser subscriptions for one mounted section. Dropping this releases the
/// observer and every listener.
struct SectionBindings {
    _watcher: IntersectionWatcher,
    _listeners: Vec<EventListener>,
}

impl SectionBindings {
    fn attach(
        target: &Element,
        section: Rc<RefCell<ScrollSection>>,
        publish: UseStateSetter<StepSnapshot>,
        config: &SectionConfig,
    ) -> Result<Self, BindingError> {
        let watcher = {
            let section = section.clone();
            let publish = publish.clone();
            IntersectionWatcher::observe(target, config, move |edge| {
                let snapshot = {
                    let mut section = section.borrow_mut();
                    section.on_visibility(edge);
                    section.snapshot()
                };
                publish.set(snapshot);
            })?
        };

        let blocking = EventListenerOptions {
            phase: EventListenerPhase::Bubble,
            passive: false,
        };
        let mut listeners = Vec::with_capacity(3);

        {
            let section = section.clone();
            let publish = publish.clone();
            listeners.push(EventListener::new_with_options(target, "wheel", blocking, move |event: &Event| {
                let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                let (disposition, snapshot) = {
                    let mut section = section.borrow_mut();
                    let disposition = section.on_wheel(wheel.delta_y(), now_ms());
                    (disposition, section.snapshot())
                };
                if disposition.is_consumed() {
                    event.prevent_default();
                }
                publish.set(snapshot);
            }));
        }

        {
            let section = section.clone();
            listeners.push(EventListener::new(target, "touchstart", move |event: &Event| {
                let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|touch| touch.touches().get(0))
                else {
                    return;
                };
                section.borrow_mut().on_touch_start(f64::from(touch.client_y()));
            }));
        }

        {
            let section = section.clone();
            listeners.push(EventListener::new_with_options(target, "touchmove", blocking, move |event: &Event| {
                let Some(touch) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|touch| touch.touches().get(0))
                else {
                    return;
                };
                if section.borrow().on_touch_move(f64::from(touch.client_y())).is_consumed() {
                    event.prevent_default();
                }
            }));
        }

        listeners.push(EventListener::new_with_options(target, "touchend", blocking, move |event: &Event| {
            let Some(touch) = event
                .dyn_ref::<TouchEvent>()
                .and_then(|touch| touch.changed_touches().get(0))
            else {
                return;
            };
            let (disposition, snapshot) = {
                let mut section = section.borrow_mut();
                let disposition = section.on_touch_end(f64::from(touch.client_y()));
                (disposition, section.snapshot())
            };
            if disposition.is_consumed() {
                event.prevent_default();
            }
            publish.set(snapshot);
        }));

        Ok(Self {
            _watcher: watcher,
            _listeners: listeners,
        })
    }
}

// Monotonic milliseconds, falling back to wall time if `performance` is
// unavailable.
fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now) as u64
}

#[function_component(HowItWorks)]
pub fn how_it_works(props: &HowItWorksProps) -> Html {
    let catalog = props.catalog.clone();
    let section_ref = use_node_ref();
    let section = {
        let count = catalog.len();
        let config = catalog.config.clone();
        use_mut_ref(move || ScrollSection::new(count, &config))
    };
    let snapshot = {
        let section = section.clone();
        use_state_eq(move || {
            let initial = section.borrow().snapshot();
            initial
        })
    };

    // Subscriptions live as long as the component is mounted with the same
    // step count and config; a catalog that changes either starts over.
    {
        let section = section.clone();
        let publish = snapshot.setter();
        let section_ref = section_ref.clone();
        use_effect_with_deps(
            move |(count, config): &(usize, SectionConfig)| {
                let fresh = {
                    let mut section = section.borrow_mut();
                    section.reset(*count, config);
                    section.snapshot()
                };
                publish.set(fresh);
                let bindings = section_ref
                    .cast::<Element>()
                    .ok_or(BindingError::NotMounted)
                    .and_then(|target| SectionBindings::attach(&target, section, publish, config));
                let bindings = match bindings {
                    Ok(bindings) => {
                        info!("how-it-works section attached");
                        Some(bindings)
                    }
                    Err(err) => {
                        error!("scroll capture disabled: {}", err);
                        None
                    }
                };
                move || drop(bindings)
            },
            (catalog.len(), catalog.config.clone()),
        );
    }

    let current = *snapshot;
    let accent = catalog
        .step(current.current)
        .map(|step| step.accent_color.clone())
        .unwrap_or_else(|| "transparent".to_string());
    let cards = presentation::card_visuals(&current);

    let on_select = {
        let section = section.clone();
        let publish = snapshot.setter();
        move |index: usize| {
            let section = section.clone();
            let publish = publish.clone();
            Callback::from(move |_: MouseEvent| {
                let snapshot = {
                    let mut section = section.borrow_mut();
                    section.select(index);
                    section.snapshot()
                };
                publish.set(snapshot);
            })
        }
    };

    html! {
        <section ref={section_ref} class="how-it-works-section" id="how-it-works">
            <style>{SECTION_CSS}</style>
            <div class="how-it-works-container">
                <div class="how-it-works-header">
                    <h2 class="how-it-works-title">{catalog.heading.clone()}</h2>
                    <p class="how-it-works-subtitle">{catalog.subtitle.clone()}</p>
                </div>

                <div class="how-it-works-content">
                    <div class="progress-line-container">
                        <div class="progress-line-background" />
                        <div class="progress-line" style={presentation::progress_fill_style(&current)} />
                        {
                            catalog.steps.iter().enumerate().map(|(index, step)| {
                                let node = NodeVisual::new(&current, index, &step.accent_color);
                                html! {
                                    <div key={index} class="progress-node" style={node.style()}>
                                        <div class="progress-node-inner" style={node.inner_style()}>
                                            {step.ordinal.to_string()}
                                        </div>
                                    </div>
                                }
                            }).collect::<Html>()
                        }
                    </div>

                    <div class="cards-stack">
                        {
                            catalog.steps.iter().zip(cards.iter()).enumerate().map(|(index, (step, visual))| {
                                render_card(index, step, visual, &catalog.step_label)
                            }).collect::<Html>()
                        }
                    </div>
                </div>

                <div class="step-indicators">
                    {
                        catalog.steps.iter().enumerate().map(|(index, step)| {
                            let indicator = IndicatorVisual::new(&current, index, &step.accent_color);
                            html! {
                                <div
                                    key={index}
                                    class={classes!("indicator", indicator.active.then_some("active"))}
                                    style={indicator.style()}
                                    onclick={on_select(index)}
                                />
                            }
                        }).collect::<Html>()
                    }
                </div>

                if presentation::show_scroll_hint(&current) {
                    <div class="scroll-hint">
                        <div class="scroll-hint-icon">{"↓"}</div>
                        <span>{catalog.scroll_hint.clone()}</span>
                    </div>
                }
            </div>

            <div class="bg-decoration">
                <div class="bg-circle" style={format!("background: {};", accent)} />
                <div class="bg-circle-2" style={format!("background: {};", accent)} />
            </div>
        </section>
    }
}

fn render_card(index: usize, step: &Step, visual: &CardVisual, step_label: &str) -> Html {
    let active = visual.interactive;
    html! {
        <div key={index} class={classes!("step-card", active.then_some("active"))} style={visual.style()}>
            <div class="card-glass">
                <div class="card-gradient" style={presentation::card_gradient(&step.accent_color)} />
                <div class={classes!("icon-container", active.then_some("pulsing"))}>
                    <div class="icon-glow" style={format!("background: {};", step.accent_color)} />
                    <div class="icon" style={format!("color: {};", step.accent_color)}>{step.icon.clone()}</div>
                </div>
                <div class="card-content">
                    <div class="step-number">{format!("{} {}", step_label, step.ordinal)}</div>
                    <h3 class="card-title">{step.title.clone()}</h3>
                    <p class="card-description">{step.description.clone()}</p>
                </div>
                <div class="card-border" style={presentation::card_border(&step.accent_color)} />
            </div>
        </div>
    }
}

const SECTION_CSS: &str = r#"
    .how-it-works-section {
        position: relative;
        min-height: 100vh;
        display: flex;
        align-items: center;
        overflow: hidden;
        padding: 80px 20px;
    }
    .how-it-works-container {
        position: relative;
        z-index: 2;
        max-width: 1100px;
        width: 100%;
        margin: 0 auto;
    }
    .how-it-works-header {
        text-align: center;
        margin-bottom: 60px;
        animation: fadeUp 0.6s ease-out both;
    }
    @keyframes fadeUp {
        from { opacity: 0; transform: translateY(30px); }
        to { opacity: 1; transform: translateY(0); }
    }
    .how-it-works-title {
        font-size: 2.8rem;
        color: #fff;
        margin: 0 0 12px;
    }
    .how-it-works-subtitle {
        color: rgba(255, 255, 255, 0.7);
        font-size: 1.1rem;
    }
    .how-it-works-content {
        display: flex;
        gap: 60px;
        align-items: stretch;
        min-height: 420px;
    }
    .progress-line-container {
        position: relative;
        width: 4px;
        margin: 20px 30px;
    }
    .progress-line-background {
        position: absolute;
        inset: 0;
        background: rgba(255, 255, 255, 0.1);
        border-radius: 2px;
    }
    .progress-line {
        position: absolute;
        top: 0;
        left: 0;
        width: 100%;
        background: linear-gradient(180deg, #667eea, #4facfe);
        border-radius: 2px;
    }
    .progress-node {
        position: absolute;
        left: 50%;
        margin: -18px 0 0 -18px;
    }
    .progress-node-inner {
        width: 36px;
        height: 36px;
        border-radius: 50%;
        display: flex;
        align-items: center;
        justify-content: center;
        color: #fff;
        font-weight: 700;
        transition: background 0.4s, box-shadow 0.4s;
    }
    .cards-stack {
        position: relative;
        flex: 1;
    }
    .step-card {
        position: absolute;
        inset: 0;
    }
    .card-glass {
        position: relative;
        height: 100%;
        padding: 48px;
        border-radius: 24px;
        background: rgba(255, 255, 255, 0.05);
        backdrop-filter: blur(20px);
        border: 1px solid rgba(255, 255, 255, 0.1);
        overflow: hidden;
    }
    .card-gradient, .card-border {
        position: absolute;
        inset: 0;
        pointer-events: none;
    }
    .card-border {
        opacity: 0.3;
        mask: linear-gradient(#000 0 0) content-box, linear-gradient(#000 0 0);
        mask-composite: exclude;
        padding: 1px;
        border-radius: 24px;
    }
    .icon-container {
        position: relative;
        width: 80px;
        height: 80px;
        margin-bottom: 32px;
    }
    .icon-container.pulsing {
        animation: iconPulse 2s ease-in-out infinite alternate;
    }
    @keyframes iconPulse {
        0% { transform: scale(1) rotate(0deg); }
        33% { transform: scale(1.1) rotate(5deg); }
        66% { transform: scale(1.05) rotate(-5deg); }
        100% { transform: scale(1) rotate(0deg); }
    }
    .icon-glow {
        position: absolute;
        inset: 0;
        border-radius: 50%;
        filter: blur(24px);
        opacity: 0.5;
    }
    .icon {
        position: relative;
        font-size: 3rem;
        display: flex;
        align-items: center;
        justify-content: center;
        height: 100%;
    }
    .step-number {
        color: rgba(255, 255, 255, 0.5);
        text-transform: uppercase;
        letter-spacing: 2px;
        font-size: 0.85rem;
        margin-bottom: 8px;
    }
    .card-title {
        color: #fff;
        font-size: 2rem;
        margin: 0 0 16px;
    }
    .card-description {
        color: rgba(255, 255, 255, 0.75);
        font-size: 1.1rem;
        line-height: 1.6;
    }
    .step-indicators {
        display: flex;
        justify-content: center;
        gap: 10px;
        margin-top: 48px;
    }
    .indicator {
        height: 12px;
        border-radius: 6px;
    }
    .scroll-hint {
        display: flex;
        flex-direction: column;
        align-items: center;
        gap: 6px;
        margin-top: 32px;
        color: rgba(255, 255, 255, 0.6);
        animation: hintPulse 2s ease-in-out infinite alternate;
    }
    @keyframes hintPulse {
        from { opacity: 0.5; }
        to { opacity: 1; }
    }
    .bg-decoration {
        position: absolute;
        inset: 0;
        z-index: 1;
        pointer-events: none;
    }
    .bg-circle, .bg-circle-2 {
        position: absolute;
        border-radius: 50%;
        filter: blur(120px);
        opacity: 0.15;
        transition: background 0.6s;
    }
    .bg-circle {
        width: 500px;
        height: 500px;
        top: -100px;
        right: -100px;
    }
    .bg-circle-2 {
        width: 400px;
        height: 400px;
        bottom: -100px;
        left: -100px;
    }
    @media (max-width: 768px) {
        .how-it-works-content { gap: 20px; }
        .progress-line-container { margin: 20px 10px; }
        .card-glass { padding: 28px; }
        .card-title { font-size: 1.5rem; }
    }
"#;
