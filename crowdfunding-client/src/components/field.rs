use dioxus::prelude::*;

/// Labelled number input reporting the raw text on every keystroke.
#[component]
pub fn Field(
    label: String,
    value: String,
    oninput: EventHandler<String>,
    #[props(default = false)] disabled: bool,
) -> Element {
    rsx! {
        label { class: "field",
            span { class: "field-label", "{label}" }
            input {
                class: "field-input",
                r#type: "number",
                value: "{value}",
                disabled: disabled,
                onclick: |evt| evt.stop_propagation(),
                oninput: move |evt| oninput.call(evt.value()),
            }
        }
    }
}
