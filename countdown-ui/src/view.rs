#![cfg(target_arch = "wasm32")]

use countdown_core::template::{self, CLOCK_SELECTOR, ITEM_CLASS, NUMBER_CLASS, UNIT_CLASS};
use countdown_core::{default_template, CountdownConfig, CountdownError, ItemView};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlTemplateElement, ShadowRoot};

struct ItemNodes {
    number: Element,
    unit: Element,
}

/// Shadow tree of one countdown and handles to its item nodes.
pub struct CountdownView {
    document: Document,
    clock: Option<Element>,
    items: Vec<ItemNodes>,
}

impl CountdownView {
    /// Replace the shadow content with the external template named in
    /// `config`, or with the built-in template when there is none.
    pub fn render(
        document: &Document,
        shadow: &ShadowRoot,
        config: &CountdownConfig,
    ) -> Result<Self, JsValue> {
        match external_template(document, config) {
            Some(template) => {
                let content = document.import_node_with_deep(&template.content(), true)?;
                shadow.set_inner_html("");
                shadow.append_child(&content)?;
            }
            None => shadow.set_inner_html(&default_template(
                config.breakpoint1.as_deref(),
                config.breakpoint2.as_deref(),
            )),
        }

        let clock = shadow.query_selector(CLOCK_SELECTOR)?;
        if clock.is_none() {
            log::warn!("countdown template has no <{CLOCK_SELECTOR}> element");
        }

        Ok(Self {
            document: document.clone(),
            clock,
            items: Vec::new(),
        })
    }

    pub fn has_clock(&self) -> bool {
        self.clock.is_some()
    }

    /// Bind the item nodes and fill them. Items already present in the
    /// template are reused positionally; otherwise the default ones are
    /// created.
    pub fn populate(&mut self, views: &[ItemView]) -> Result<(), JsValue> {
        let clock = self
            .clock
            .as_ref()
            .ok_or_else(|| JsValue::from_str(&CountdownError::MissingClockContainer.to_string()))?;

        if self.items.len() != views.len() {
            self.items = match existing_items(clock, views.len())? {
                Some(items) => items,
                None => {
                    clock.set_inner_html("");
                    views
                        .iter()
                        .map(|view| create_item(&self.document, clock, view))
                        .collect::<Result<_, _>>()?
                }
            };
        }

        self.update(views);
        Ok(())
    }

    pub fn update(&self, views: &[ItemView]) {
        for (item, view) in self.items.iter().zip(views) {
            item.number.set_text_content(Some(&view.number_text));
            item.unit.set_text_content(Some(&view.unit_text));
        }
    }
}

fn external_template(document: &Document, config: &CountdownConfig) -> Option<HtmlTemplateElement> {
    let id = config.template_id()?;
    let template = document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlTemplateElement>().ok());
    if template.is_none() {
        log::warn!("no <template id={id:?}>, using the built-in template");
    }
    template
}

fn existing_items(clock: &Element, count: usize) -> Result<Option<Vec<ItemNodes>>, JsValue> {
    let nodes = clock.query_selector_all(&format!(".{ITEM_CLASS}"))?;
    let mut found = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        match nodes
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        {
            Some(item) => found.push((
                item.query_selector(&format!(".{NUMBER_CLASS}"))?,
                item.query_selector(&format!(".{UNIT_CLASS}"))?,
            )),
            None => found.push((None, None)),
        }
    }

    Ok(template::bind_existing_items(found, count)
        .map(|pairs| pairs.into_iter().map(|(number, unit)| ItemNodes { number, unit }).collect()))
}

fn create_item(document: &Document, clock: &Element, view: &ItemView) -> Result<ItemNodes, JsValue> {
    let item = document.create_element("span")?;
    item.set_class_name(ITEM_CLASS);

    let number = document.create_element("span")?;
    number.set_class_name(&template::number_class(view.unit));

    let unit = document.create_element("span")?;
    unit.set_class_name(UNIT_CLASS);

    item.append_child(&number)?;
    item.append_child(&unit)?;
    clock.append_child(&item)?;

    Ok(ItemNodes { number, unit })
}
