#![cfg(target_arch = "wasm32")]

use countdown_core::{Attribute, CountdownConfig, DEFAULT_LOCALE};
use countdown_ui::CountdownWidget;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, ShadowRoot};

type CreateCountdown = dyn FnMut(HtmlElement, ShadowRoot) -> JsValue;

// Custom elements must be ES classes extending HTMLElement, so the class is
// declared here and forwards its lifecycle callbacks to `CountdownElement`.
// Property setters only write the attribute; attributeChangedCallback is the
// single path that reacts to a change.
#[wasm_bindgen(inline_js = r#"
export function defineCountdownElement(tagName, observed, properties, defaultLocale, create) {
  if (customElements.get(tagName)) {
    return false;
  }

  class CountdownElement extends HTMLElement {
    static get observedAttributes() {
      return observed;
    }

    constructor() {
      super();
      this._countdown = create(this, this.attachShadow({ mode: "open" }));
    }

    connectedCallback() {
      this._countdown.connected();
    }

    disconnectedCallback() {
      this._countdown.disconnected();
    }

    attributeChangedCallback(name, oldValue, newValue) {
      this._countdown.attributeChanged(name, oldValue, newValue);
    }
  }

  for (const name of properties) {
    Object.defineProperty(CountdownElement.prototype, name, {
      get() {
        const value = this.getAttribute(name);
        return name === "locale" ? value || defaultLocale : value;
      },
      set(value) {
        this.setAttribute(name, value);
      },
    });
  }

  customElements.define(tagName, CountdownElement);
  return true;
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = defineCountdownElement, catch)]
    fn define_countdown_element(
        tag_name: &str,
        observed: &Array,
        properties: &Array,
        default_locale: &str,
        create: &Closure<CreateCountdown>,
    ) -> Result<bool, JsValue>;
}

/// Rust side of one `<count-down>` instance.
#[wasm_bindgen]
pub struct CountdownElement {
    host: HtmlElement,
    widget: CountdownWidget,
}

#[wasm_bindgen]
impl CountdownElement {
    pub fn connected(&self) {
        self.sync_template();
        report(self.widget.connect());
    }

    pub fn disconnected(&self) {
        self.widget.disconnect();
    }

    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(
        &self,
        name: &str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) {
        self.sync_template();
        report(
            self.widget
                .attribute_changed(name, old_value.as_deref(), new_value.as_deref()),
        );
    }

    #[wasm_bindgen(getter, js_name = clockState)]
    pub fn clock_state(&self) -> String {
        format!("{:?}", self.widget.clock_state()).to_lowercase()
    }
}

impl CountdownElement {
    fn new(host: HtmlElement, shadow: ShadowRoot) -> Self {
        let config = CountdownConfig::from_attributes(|name| host.get_attribute(name));
        let document = host
            .owner_document()
            .or_else(|| web_sys::window()?.document())
            .unwrap_or_else(|| wasm_bindgen::throw_str("countdown element has no document"));

        Self {
            widget: CountdownWidget::new(document, shadow, config),
            host,
        }
    }

    fn sync_template(&self) {
        self.widget
            .set_template(self.host.get_attribute(Attribute::Template.name()));
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::error!("countdown failed: {err:?}");
    }
}

pub fn define(tag_name: &str) -> Result<bool, JsValue> {
    let observed: Array = Attribute::OBSERVED
        .iter()
        .map(|attr| JsValue::from_str(attr.name()))
        .collect();
    let properties: Array = Attribute::ALL
        .iter()
        .map(|attr| JsValue::from_str(attr.name()))
        .collect();

    let create = Closure::<CreateCountdown>::new(|host: HtmlElement, shadow: ShadowRoot| {
        JsValue::from(CountdownElement::new(host, shadow))
    });

    let defined =
        define_countdown_element(tag_name, &observed, &properties, DEFAULT_LOCALE, &create)?;
    if defined {
        // The element class calls `create` for every instance from now on.
        create.forget();
        log::debug!("registered <{tag_name}>");
    } else {
        log::warn!("<{tag_name}> is already defined");
    }
    Ok(defined)
}
