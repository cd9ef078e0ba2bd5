//! Orbit Folio entry point
//!
//! On the web this drives the page: it injects the orbit keyframes, forwards
//! clicks and wheel events to the controller, and applies each frame's scene
//! to the DOM. The native build prints the generated stylesheet.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlElement, KeyboardEvent, MouseEvent, ScrollBehavior,
        ScrollIntoViewOptions, ScrollLogicalPosition, WheelEvent,
    };

    use orbit_folio::Settings;
    use orbit_folio::choreo::{
        CONTACT_LABEL, ChoreoInput, Controller, Directive, Scene, Section, Step, tick,
    };
    use orbit_folio::kinematics::{SolarSystem, ViewportTier};
    use orbit_folio::layout::{LayoutProbe, Rect};

    /// Longest frame step fed to the controller (ms); a background tab must not skip phases
    const MAX_FRAME_MS: f32 = 100.0;

    /// Reads placeholder and orbit geometry from the live page
    struct DomLayout {
        document: Document,
    }

    impl DomLayout {
        /// Top-left of the page container; every rect is reported relative to it
        fn origin(&self) -> Vec2 {
            self.document
                .get_element_by_id("page")
                .map(|el| {
                    let r = el.get_bounding_client_rect();
                    Vec2::new(r.x() as f32, r.y() as f32)
                })
                .unwrap_or(Vec2::ZERO)
        }

        fn rect_of(&self, el: &Element) -> Rect {
            let r = el.get_bounding_client_rect();
            let origin = self.origin();
            Rect::new(
                r.x() as f32 - origin.x,
                r.y() as f32 - origin.y,
                r.width() as f32,
                r.height() as f32,
            )
        }
    }

    impl LayoutProbe for DomLayout {
        fn placeholder(&self, section: Section) -> Option<Rect> {
            let selector = format!("#{} [data-planet-placeholder]", section.element_id());
            let el = self.document.query_selector(&selector).ok().flatten()?;
            let rect = self.rect_of(&el);
            // display:none reports an empty box
            (rect.size.x > 0.0 && rect.size.y > 0.0).then_some(rect)
        }

        fn orbit_center(&self) -> Vec2 {
            self.document
                .get_element_by_id("solar-system")
                .map(|el| self.rect_of(&el).center())
                .unwrap_or(Vec2::ZERO)
        }
    }

    /// Page instance holding all state
    struct App {
        controller: Controller,
        settings: Settings,
        layout: DomLayout,
        input: ChoreoInput,
        last_time: f64,
    }

    impl App {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) as f32).min(MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            let input = std::mem::take(&mut self.input);
            tick(&mut self.controller, &input, dt, &self.layout);

            for directive in self.controller.take_directives() {
                self.run_directive(directive);
            }
        }

        fn run_directive(&self, directive: Directive) {
            let id = match directive {
                Directive::ScrollToSection(section) => section.element_id(),
                Directive::ScrollToContact => "contact",
            };
            if let Some(el) = self.layout.document.get_element_by_id(id) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                el.scroll_into_view_with_scroll_into_view_options(&options);
            } else {
                log::warn!("Scroll target #{id} not found");
            }
        }

        fn render(&self) {
            let scene = Scene::capture(&self.controller, &self.layout);
            let document = &self.layout.document;

            for (section, shown) in scene.visibility.flags() {
                toggle_class(document, section.element_id(), "is-visible", shown);
                if let Ok(Some(el)) = document.query_selector(&format!(
                    "#{} [data-planet-placeholder]",
                    section.element_id()
                )) {
                    let _ = el.class_list().toggle_with_force(
                        "is-visible",
                        shown && scene.placeholder_visible,
                    );
                }
            }
            toggle_class(document, "hero-content", "is-hidden", !scene.hero_content_visible);
            toggle_class(document, "solar-system", "is-raised", scene.system_raised);
            toggle_class(document, "starfield", "is-elongated", scene.sky_elongated);
            toggle_class(document, "page", "intro-complete", scene.intro_complete);
            toggle_class(
                document,
                "page",
                "is-transitioning",
                self.controller.is_transitioning(),
            );

            self.render_planets(document, &scene);
            self.render_projection(document, &scene);

            if let Some(overlay) = html_element(document, "contact-overlay") {
                let style = overlay.style();
                match scene.contact_offset {
                    Some(offset) => {
                        let _ = style.set_property("display", "block");
                        let _ = style
                            .set_property("transform", &format!("translateY({}%)", offset * 100.0));
                    }
                    None => {
                        let _ = style.set_property("display", "none");
                    }
                }
            }
        }

        fn render_planets(&self, document: &Document, scene: &Scene) {
            let hidden_label = scene
                .original_hidden
                .and_then(|i| self.controller.system().get(i))
                .map(|b| b.label.as_str());
            if let Ok(planets) = document.query_selector_all("[data-hero-planet]") {
                for i in 0..planets.length() {
                    let Some(el) = planets.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                        continue;
                    };
                    let hide = el.get_attribute("data-label").as_deref() == hidden_label;
                    let _ = el.class_list().toggle_with_force("is-hidden", hide && hidden_label.is_some());
                }
            }

            let Some(focused_el) = html_element(document, "focused-planet") else {
                return;
            };
            let style = focused_el.style();
            match scene.focused {
                Some(focused) => {
                    let rect = focused.rect();
                    let label = self
                        .controller
                        .system()
                        .get(focused.body)
                        .map(|b| b.label.clone())
                        .unwrap_or_default();
                    let _ = focused_el.set_attribute("data-label", &label);
                    let _ = style.set_property("display", "block");
                    let _ = style.set_property("left", &format!("{}px", rect.origin.x));
                    let _ = style.set_property("top", &format!("{}px", rect.origin.y));
                    let _ = style.set_property("width", &format!("{}px", rect.size.x));
                    let _ = style.set_property("height", &format!("{}px", rect.size.y));
                    let _ = style.set_property("opacity", &focused.opacity.to_string());
                    let _ = focused_el
                        .class_list()
                        .toggle_with_force("is-pinned", focused.pinned);
                }
                None => {
                    let _ = style.set_property("display", "none");
                }
            }
        }

        fn render_projection(&self, document: &Document, scene: &Scene) {
            let projection = scene.projection.filter(|_| self.settings.show_projection);
            toggle_class(document, "projection-lines", "is-visible", projection.is_some());
            let Some(projection) = projection else {
                return;
            };
            let Ok(lines) = document.query_selector_all("#projection-lines line") else {
                return;
            };
            for (i, (from, to)) in projection.lines().into_iter().enumerate() {
                let Some(line) = lines
                    .get(i as u32)
                    .and_then(|n| n.dyn_into::<Element>().ok())
                else {
                    break;
                };
                let _ = line.set_attribute("x1", &from.x.to_string());
                let _ = line.set_attribute("y1", &from.y.to_string());
                let _ = line.set_attribute("x2", &to.x.to_string());
                let _ = line.set_attribute("y2", &to.y.to_string());
            }
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn toggle_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn viewport_tier() -> ViewportTier {
        let width = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        ViewportTier::from_width(width as f32)
    }

    fn prefers_reduced_motion() -> bool {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }

    /// Orbit keyframes plus the shared duration variables
    fn inject_stylesheet(document: &Document, system: &SolarSystem, settings: &Settings) {
        let css = format!(
            "{}\n{}",
            settings.effective_timings().css_variables(),
            system.stylesheet(settings.effective_keyframe_steps())
        );
        let Ok(style) = document.create_element("style") else {
            log::error!("Could not create style element");
            return;
        };
        style.set_id("orbit-keyframes");
        style.set_text_content(Some(&css));
        if let Some(head) = document.head() {
            if head.append_child(&style).is_err() {
                log::error!("Could not attach orbit keyframes");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Orbit Folio starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document; nothing to animate");
            return;
        };

        let mut settings = Settings::load();
        if prefers_reduced_motion() {
            settings.reduced_motion = true;
        }

        let system = SolarSystem::builtin();
        inject_stylesheet(&document, &system, &settings);

        let mut controller = Controller::new(system, settings.effective_timings())
            .with_perspective(settings.perspective);
        controller.set_viewport(viewport_tier());

        let app = Rc::new(RefCell::new(App {
            controller,
            settings,
            layout: DomLayout {
                document: document.clone(),
            },
            input: ChoreoInput::default(),
            last_time: 0.0,
        }));

        setup_input_handlers(&document, app.clone());
        setup_resize_handler(app.clone());

        request_animation_frame(app);

        log::info!("Orbit Folio running!");
    }

    fn setup_input_handlers(document: &Document, app: Rc<RefCell<App>>) {
        // Planet (and Contact) clicks
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                if let Ok(Some(planet)) = target.closest("[data-hero-planet], [data-contact-link]") {
                    let label = planet
                        .get_attribute("data-label")
                        .unwrap_or_else(|| CONTACT_LABEL.to_string());
                    event.prevent_default();
                    app.borrow_mut().input.select = Some(label);
                } else if let Ok(Some(_)) = target.closest("#back-button") {
                    app.borrow_mut().input.back = true;
                }
            });
            let _ =
                document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Scroll up closes the Contact overlay
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                if event.delta_y() < 0.0 {
                    app.borrow_mut().input.scroll_up = true;
                }
            });
            let _ =
                document.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Escape goes back, arrows walk the sections, G toggles the guide lines
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().as_str() {
                    "Escape" => app.input.back = true,
                    "ArrowRight" | "ArrowDown" => app.input.step = Some(Step::Next),
                    "ArrowLeft" | "ArrowUp" => app.input.step = Some(Step::Previous),
                    "g" | "G" => {
                        app.settings.show_projection = !app.settings.show_projection;
                        app.settings.save();
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut app = app.borrow_mut();
            app.input.resize = true;
            app.input.viewport = Some(viewport_tier());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            page_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn page_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orbit Folio (native) starting...");

    if let Err(err) = print_stylesheet(std::env::args().nth(1)) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Print the orbit keyframes for the built-in catalog, or for a JSON catalog file
#[cfg(not(target_arch = "wasm32"))]
fn print_stylesheet(catalog: Option<String>) -> orbit_folio::Result<()> {
    use orbit_folio::Settings;
    use orbit_folio::kinematics::SolarSystem;

    let system = match catalog {
        Some(path) => {
            log::info!("Loading catalog from {path}");
            SolarSystem::from_json(&std::fs::read_to_string(path)?)?
        }
        None => SolarSystem::builtin(),
    };
    let settings = Settings::load();

    println!("{}", settings.effective_timings().css_variables());
    println!("{}", system.stylesheet(settings.effective_keyframe_steps()));
    log::info!("Generated keyframes for {} bodies", system.len());
    Ok(())
}
