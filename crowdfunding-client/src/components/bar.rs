use crowdfunding::{Accessor, BarModel, Goal, Status};
use dioxus::prelude::*;

/// Progress against the goals; `goals` are sorted by people target.
#[component]
pub fn Bar(
    goals: Vec<Goal>,
    status: Status,
    accessor: Accessor,
    formatter: fn(u64) -> String,
    #[props(default = false)] show_last: bool,
) -> Element {
    let model = BarModel::new(&goals, &status, accessor, show_last);
    let fill = model.fill_percent();
    let current = formatter(model.value);
    let markers: Vec<_> = model
        .markers
        .into_iter()
        .enumerate()
        .filter(|(_, marker)| marker.visible)
        .collect();

    rsx! {
        div { class: "bar", title: "{current}",
            div { class: "bar-fill", style: "width: {fill}%;" }
            for (goal_index, marker) in markers {
                {
                    let left = marker.position * 100.0;
                    let label = formatter(marker.value);
                    let description = marker.description.unwrap_or_default();
                    rsx! {
                        div {
                            key: "{goal_index}",
                            class: "bar-goal",
                            style: "left: {left}%;",
                            title: "{description}",
                            span { class: "bar-goal-label", "{label}" }
                        }
                    }
                }
            }
        }
    }
}
