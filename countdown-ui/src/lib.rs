//! Thành phần giao diện đếm ngược cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod intl;
#[cfg(target_arch = "wasm32")]
mod view;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use countdown_core::{
        Attribute, ClockState, Countdown, CountdownConfig, Reaction, Start, TICK_INTERVAL_MS,
    };
    use gloo_timers::callback::Interval;
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, ShadowRoot, ShadowRootInit, ShadowRootMode, Window};

    use crate::intl::IntlLocalizer;
    use crate::view::CountdownView;

    struct WidgetState {
        document: Document,
        shadow: ShadowRoot,
        countdown: Countdown<Interval, IntlLocalizer>,
        view: Option<CountdownView>,
    }

    /// A countdown bound to a shadow root. Clones share the same widget.
    #[derive(Clone)]
    pub struct CountdownWidget {
        state: Rc<RefCell<WidgetState>>,
    }

    impl CountdownWidget {
        pub fn new(document: Document, shadow: ShadowRoot, config: CountdownConfig) -> Self {
            Self {
                state: Rc::new(RefCell::new(WidgetState {
                    document,
                    shadow,
                    countdown: Countdown::new(config, IntlLocalizer::default(), parse_end_ms),
                    view: None,
                })),
            }
        }

        /// Attach: build the shadow tree and start the clock.
        pub fn connect(&self) -> Result<(), JsValue> {
            self.state.borrow_mut().countdown.connect();
            render(&self.state)
        }

        /// Detach: cancel the timer. The shadow tree is kept for a later
        /// reconnect, which renders again.
        pub fn disconnect(&self) {
            self.state.borrow_mut().countdown.disconnect();
        }

        /// Template ids are read at render time and never trigger a render
        /// on their own.
        pub fn set_template(&self, template: Option<String>) {
            self.state.borrow_mut().countdown.set_template(template);
        }

        /// Rebuild the shadow tree if attached.
        pub fn rerender(&self) -> Result<(), JsValue> {
            if !self.state.borrow().countdown.is_connected() {
                return Ok(());
            }
            render(&self.state)
        }

        pub fn attribute_changed(
            &self,
            name: &str,
            old_value: Option<&str>,
            new_value: Option<&str>,
        ) -> Result<(), JsValue> {
            let reaction = self
                .state
                .borrow_mut()
                .countdown
                .attribute_changed(name, old_value, new_value);

            match reaction {
                Reaction::None => Ok(()),
                Reaction::Render => render(&self.state),
                Reaction::Restart => initialise_clock(&self.state),
            }
        }

        pub fn clock_state(&self) -> ClockState {
            self.state.borrow().countdown.clock_state()
        }

        fn option(&self, attr: Attribute) -> Option<String> {
            self.state
                .borrow()
                .countdown
                .config()
                .get(attr)
                .map(str::to_string)
        }
    }

    fn render(state: &Rc<RefCell<WidgetState>>) -> Result<(), JsValue> {
        {
            let mut guard = state.borrow_mut();
            let widget = &mut *guard;
            widget.view = Some(CountdownView::render(
                &widget.document,
                &widget.shadow,
                widget.countdown.config(),
            )?);
        }
        initialise_clock(state)
    }

    fn initialise_clock(state: &Rc<RefCell<WidgetState>>) -> Result<(), JsValue> {
        let mut guard = state.borrow_mut();
        let widget = &mut *guard;

        let Some(view) = widget.view.as_mut().filter(|view| view.has_clock()) else {
            widget.countdown.halt();
            return Ok(());
        };

        let (end_ms, items) = match widget.countdown.prepare(now_ms()) {
            Start::Schedule { end_ms, items } => (end_ms, items),
            Start::Invalid { items } => return view.populate(&items),
        };
        view.populate(&items)?;

        let weak = Rc::downgrade(state);
        let interval = Interval::new(TICK_INTERVAL_MS, move || {
            if let Some(state) = weak.upgrade() {
                tick(&state);
            }
        });
        widget.countdown.start(end_ms, interval);

        drop(guard);
        tick(state);
        Ok(())
    }

    fn tick(state: &Rc<RefCell<WidgetState>>) {
        let Ok(mut guard) = state.try_borrow_mut() else {
            log::debug!("countdown busy, tick skipped");
            return;
        };
        let widget = &mut *guard;

        if let Some(items) = widget.countdown.tick(now_ms()) {
            if let Some(view) = &widget.view {
                view.update(&items);
            }
        }
    }

    fn now_ms() -> i64 {
        js_sys::Date::now() as i64
    }

    /// Resolve `ends` with the host date parser.
    fn parse_end_ms(ends: &str) -> Option<i64> {
        let ms = js_sys::Date::parse(ends);
        ms.is_finite().then_some(ms as i64)
    }

    /// Handle returned by [`mount_countdown`]; dropping it on the JS side
    /// (`free()`) stops the clock.
    #[wasm_bindgen]
    pub struct MountedCountdown {
        widget: CountdownWidget,
    }

    #[wasm_bindgen]
    impl MountedCountdown {
        /// Change one configuration key, as an attribute change would.
        #[wasm_bindgen(js_name = setOption)]
        pub fn set_option(&self, name: &str, value: Option<String>) -> Result<(), JsValue> {
            if name == Attribute::Template.name() {
                self.widget.set_template(value);
                return self.widget.rerender();
            }

            let old_value = Attribute::from_name(name).and_then(|attr| self.widget.option(attr));
            self.widget
                .attribute_changed(name, old_value.as_deref(), value.as_deref())
        }

        pub fn unmount(&self) {
            self.widget.disconnect();
        }
    }

    /// Render a countdown into the shadow root of the element matched by
    /// `selector`, outside of the custom element.
    #[wasm_bindgen(js_name = mountCountdown)]
    pub fn mount_countdown(
        selector: &str,
        config: Option<JsValue>,
    ) -> Result<MountedCountdown, JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let target = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("no element matches the selector"))?;

        let config: CountdownConfig = match config {
            Some(value) => from_value(value)?,
            None => CountdownConfig::default(),
        };

        let shadow = match target.shadow_root() {
            Some(shadow) => shadow,
            None => target.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?,
        };

        let widget = CountdownWidget::new(document, shadow, config);
        widget.connect()?;
        Ok(MountedCountdown { widget })
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_countdown, CountdownWidget, MountedCountdown};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_countdown(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "countdown-ui only supports the wasm32 target",
    ))
}
