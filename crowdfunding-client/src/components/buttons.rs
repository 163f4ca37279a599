use dioxus::prelude::*;

#[derive(Clone, PartialEq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
}

#[component]
pub fn Button(
    variant: ButtonVariant,
    onclick: EventHandler<MouseEvent>,
    children: Element,
    #[props(default = false)] disabled: bool,
) -> Element {
    let class_name = match (variant, disabled) {
        (_, true) => "button button-disabled",
        (ButtonVariant::Primary, false) => "button button-primary",
        (ButtonVariant::Secondary, false) => "button button-secondary",
    };

    rsx! {
        button {
            class: "{class_name}",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}
