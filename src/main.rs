//! Wander entry point
//!
//! Browser host: wires DOM pointer events into the joystick, drives the
//! frame loop, and publishes simulation state to the page. Native builds
//! run a short scripted session instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Document, HtmlElement, MouseEvent, TouchEvent};

    use wander::consts::MAX_FRAME_DT;
    use wander::joystick::{JoystickSignal, PointerId, VirtualJoystick};
    use wander::platform::events::EventListener;
    use wander::platform::frame::FrameLoop;
    use wander::settings::Settings;
    use wander::sim::{SceneState, TickInput, demo_map, tick};

    /// DOM nodes the scene publishes into
    ///
    /// The page supplies: a `#field` element sized to the full map inside
    /// an overflow-hidden frame, `#character` and the `#joystick`/`#stick`
    /// widgets, and optionally `#fps`. The stylesheet anchors the
    /// character on its center.
    struct Dom {
        field: HtmlElement,
        character: HtmlElement,
        widget: HtmlElement,
        stick: HtmlElement,
        fps: Option<HtmlElement>,
    }

    impl Dom {
        fn lookup(document: &Document) -> Result<Self, JsValue> {
            let get = |id: &str| -> Result<HtmlElement, JsValue> {
                document
                    .get_element_by_id(id)
                    .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
                    .dyn_into::<HtmlElement>()
                    .map_err(|_| JsValue::from_str(&format!("#{id} is not an HtmlElement")))
            };
            Ok(Self {
                field: get("field")?,
                character: get("character")?,
                widget: get("joystick")?,
                stick: get("stick")?,
                fps: get("fps").ok(),
            })
        }

        /// Widget center in client coordinates, read at session start
        fn widget_center(&self) -> Vec2 {
            let rect = self.widget.get_bounding_client_rect();
            Vec2::new(
                (rect.left() + rect.width() / 2.0) as f32,
                (rect.top() + rect.height() / 2.0) as f32,
            )
        }
    }

    /// One mounted scene
    struct Scene {
        state: SceneState,
        joystick: VirtualJoystick,
        input: TickInput,
        last_time: f64,
        show_fps: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        dom: Dom,
    }

    impl Scene {
        /// Route a joystick signal into the shared tick input and move the
        /// on-screen knob
        fn apply(&mut self, signal: JoystickSignal) {
            self.input.direction = match signal {
                JoystickSignal::Move(direction) => direction,
                JoystickSignal::Stop => Vec2::ZERO,
            };
            let knob = self.joystick.knob_offset();
            let _ = self.dom.stick.style().set_property(
                "transform",
                &format!("translate({}px, {}px)", knob.x, knob.y),
            );
        }

        /// One scheduled frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            // One whole-vector read per tick; pointer handlers may rewrite
            // it any time between frames
            let input = self.input;
            tick(&mut self.state, &input, dt.min(MAX_FRAME_DT));

            self.track_fps(time);
            self.publish();
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Push the published state into the page
        fn publish(&self) {
            let map = self.state.map_size;
            let pos = self.state.character.pos;

            let style = self.dom.character.style();
            let _ = style.set_property("left", &format!("{}%", pos.x / map.x * 100.0));
            let _ = style.set_property("top", &format!("{}%", pos.y / map.y * 100.0));
            let _ = style.set_property(
                "transform",
                &format!(
                    "translate(-50%, -50%) rotate({}deg)",
                    self.state.character.facing
                ),
            );

            let offset = self.state.viewport.offset;
            let _ = self.dom.field.style().set_property(
                "transform",
                &format!(
                    "translate({}%, {}%)",
                    -offset.x / map.x * 100.0,
                    -offset.y / map.y * 100.0
                ),
            );

            if self.show_fps
                && let Some(fps_el) = &self.dom.fps
            {
                fps_el.set_text_content(Some(&self.fps.to_string()));
            }
        }
    }

    /// Paint the compiled obstacle set once at mount; obstacles never move
    fn spawn_obstacles(
        document: &Document,
        field: &HtmlElement,
        state: &SceneState,
    ) -> Result<(), JsValue> {
        let map = state.map_size;
        for obstacle in &state.obstacles {
            let node = document.create_element("div")?;
            node.set_class_name(&format!("obstacle {}", obstacle.kind.as_str()));
            node.set_id(&obstacle.id);
            let node: HtmlElement = node.unchecked_into();

            let corner = obstacle.pos - obstacle.size * 0.5;
            let style = node.style();
            let _ = style.set_property("left", &format!("{}%", corner.x / map.x * 100.0));
            let _ = style.set_property("top", &format!("{}%", corner.y / map.y * 100.0));
            let _ = style.set_property("width", &format!("{}%", obstacle.size.x / map.x * 100.0));
            let _ = style.set_property("height", &format!("{}%", obstacle.size.y / map.y * 100.0));
            let _ = style.set_property("z-index", &obstacle.priority.to_string());

            field.append_child(&node)?;
        }
        Ok(())
    }

    /// Everything one mounted scene owns. Dropping it is the teardown:
    /// the pending frame is canceled and every subscription released, so
    /// no state mutation can happen afterwards.
    pub struct SceneHandle {
        _listeners: Vec<EventListener>,
        _frame: FrameLoop,
        _scene: Rc<RefCell<Scene>>,
    }

    thread_local! {
        static ACTIVE: RefCell<Option<SceneHandle>> = const { RefCell::new(None) };
    }

    pub fn mount() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Wander starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let state = SceneState::new(&demo_map(seed));
        log::info!("Demo map seeded with {seed}");

        let dom = Dom::lookup(&document)?;
        size_widget(&dom, &settings);
        spawn_obstacles(&document, &dom.field, &state)?;

        let widget_el = dom.widget.clone();
        let scene = Rc::new(RefCell::new(Scene {
            state,
            joystick: VirtualJoystick::new(settings.joystick_size, settings.stick_size),
            input: TickInput::default(),
            last_time: 0.0,
            show_fps: settings.show_fps,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            dom,
        }));

        let mut listeners = Vec::new();
        let window_target: &web_sys::EventTarget = window.as_ref();

        // Sessions start on the widget; moves and releases are tracked
        // window-wide so dragging off the widget keeps working
        {
            let scene = scene.clone();
            listeners.push(EventListener::listen(
                widget_el.as_ref(),
                "mousedown",
                move |event| {
                    let event: MouseEvent = event.unchecked_into();
                    let mut s = scene.borrow_mut();
                    let center = s.dom.widget_center();
                    let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                    if let Some(signal) = s.joystick.pointer_down(PointerId::Mouse, center, pos) {
                        s.apply(signal);
                    }
                },
            )?);
        }
        {
            let scene = scene.clone();
            listeners.push(EventListener::listen(
                window_target,
                "mousemove",
                move |event| {
                    let event: MouseEvent = event.unchecked_into();
                    let mut s = scene.borrow_mut();
                    let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                    if let Some(signal) = s.joystick.pointer_move(PointerId::Mouse, pos) {
                        s.apply(signal);
                    }
                },
            )?);
        }
        {
            let scene = scene.clone();
            listeners.push(EventListener::listen(
                window_target,
                "mouseup",
                move |_event| {
                    let mut s = scene.borrow_mut();
                    if let Some(signal) = s.joystick.pointer_up(PointerId::Mouse) {
                        s.apply(signal);
                    }
                },
            )?);
        }
        {
            let scene = scene.clone();
            listeners.push(EventListener::listen(
                widget_el.as_ref(),
                "touchstart",
                move |event| {
                    let event: TouchEvent = event.unchecked_into();
                    event.prevent_default();
                    let mut s = scene.borrow_mut();
                    let center = s.dom.widget_center();
                    let touches = event.changed_touches();
                    for i in 0..touches.length() {
                        if let Some(touch) = touches.get(i) {
                            let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                            let id = PointerId::Touch(touch.identifier());
                            if let Some(signal) = s.joystick.pointer_down(id, center, pos) {
                                s.apply(signal);
                            }
                        }
                    }
                },
            )?);
        }
        {
            let scene = scene.clone();
            listeners.push(EventListener::listen(
                window_target,
                "touchmove",
                move |event| {
                    let event: TouchEvent = event.unchecked_into();
                    let mut s = scene.borrow_mut();
                    let touches = event.changed_touches();
                    for i in 0..touches.length() {
                        if let Some(touch) = touches.get(i) {
                            let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                            let id = PointerId::Touch(touch.identifier());
                            if let Some(signal) = s.joystick.pointer_move(id, pos) {
                                s.apply(signal);
                            }
                        }
                    }
                },
            )?);
        }
        for end_event in ["touchend", "touchcancel"] {
            let scene = scene.clone();
            listeners.push(EventListener::listen(window_target, end_event, move |event| {
                let event: TouchEvent = event.unchecked_into();
                let mut s = scene.borrow_mut();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        if let Some(signal) = s.joystick.pointer_up(PointerId::Touch(touch.identifier())) {
                            s.apply(signal);
                        }
                    }
                }
            })?);
        }
        {
            // Focus loss would otherwise leave the character walking forever
            let scene = scene.clone();
            listeners.push(EventListener::listen(window_target, "blur", move |_event| {
                let mut s = scene.borrow_mut();
                if let Some(signal) = s.joystick.force_release() {
                    log::info!("Pointer session force-released (window blur)");
                    s.apply(signal);
                }
            })?);
        }

        let frame = {
            let scene = scene.clone();
            FrameLoop::start(move |time| {
                scene.borrow_mut().frame(time);
            })?
        };

        ACTIVE.with(|active| {
            *active.borrow_mut() = Some(SceneHandle {
                _listeners: listeners,
                _frame: frame,
                _scene: scene,
            });
        });

        log::info!("Wander running");
        Ok(())
    }

    fn size_widget(dom: &Dom, settings: &Settings) {
        let widget = dom.widget.style();
        let _ = widget.set_property("width", &format!("{}px", settings.joystick_size));
        let _ = widget.set_property("height", &format!("{}px", settings.joystick_size));
        if settings.left_handed {
            let _ = widget.set_property("left", "24px");
            let _ = widget.set_property("right", "auto");
        }
        let stick = dom.stick.style();
        let _ = stick.set_property("width", &format!("{}px", settings.stick_size));
        let _ = stick.set_property("height", &format!("{}px", settings.stick_size));
    }

    /// Tear the scene down: cancel the pending tick and release every
    /// pointer subscription. Safe to call more than once.
    pub fn unmount() {
        ACTIVE.with(|active| {
            if active.borrow_mut().take().is_some() {
                log::info!("Scene unmounted");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_scene::mount() {
        log::error!("Mount failed: {err:?}");
    }
}

/// Page-routing hook: tear the scene down before navigating away
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn unmount() {
    wasm_scene::unmount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use wander::consts::REFERENCE_DT;
    use wander::joystick::{JoystickSignal, PointerId, VirtualJoystick};
    use wander::sim::{SceneState, TickInput, demo_map, tick};

    env_logger::init();
    log::info!("Wander (native) starting...");

    // Headless scripted session standing in for the browser host:
    // press north-east of the widget center, hold for two seconds, release.
    let mut state = SceneState::new(&demo_map(7));
    let mut joystick = VirtualJoystick::default();
    let mut input = TickInput::default();

    let center = Vec2::new(200.0, 200.0);
    if let Some(JoystickSignal::Move(direction)) =
        joystick.pointer_down(PointerId::Mouse, center, center + Vec2::new(53.0, -53.0))
    {
        input.direction = direction;
    }

    for frame in 0..120u32 {
        tick(&mut state, &input, REFERENCE_DT);
        if frame % 30 == 0 {
            log::info!(
                "frame {frame}: pos=({:.1}, {:.1}) facing={:.0}",
                state.character.pos.x,
                state.character.pos.y,
                state.character.facing
            );
        }
    }

    if let Some(JoystickSignal::Stop) = joystick.pointer_up(PointerId::Mouse) {
        input.direction = Vec2::ZERO;
    }
    tick(&mut state, &input, REFERENCE_DT);

    log::info!(
        "released: pos=({:.1}, {:.1}) viewport=({:.1}, {:.1})",
        state.character.pos.x,
        state.character.pos.y,
        state.viewport.offset.x,
        state.viewport.offset.y
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
