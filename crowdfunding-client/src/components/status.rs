use std::time::Duration;

use crowdfunding::format::{chf_format, count_format};
use crowdfunding::progress::{binding_goal, goals_by_people};
use crowdfunding::{Accessor, Countdown, Segment, StatusCampaign};
use dioxus::prelude::*;

use crate::components::Bar;
use crate::hooks::{use_campaign_status, use_now, use_translator};

const CLOCK_PERIOD: Duration = Duration::from_secs(30);

/// Campaign status fed by the polling data source.
#[component]
pub fn LiveCampaignStatus(#[props(default = false)] compact: bool) -> Element {
    let campaign = use_campaign_status();

    rsx! {
        CampaignStatus { campaign: campaign(), compact }
    }
}

/// People and money raised against the binding goal, plus the time left.
#[component]
pub fn CampaignStatus(
    campaign: Option<StatusCampaign>,
    #[props(default = false)] compact: bool,
) -> Element {
    let t = use_translator();
    let now = use_now(CLOCK_PERIOD);
    let mut show_goal = use_signal(|| false);

    let Some(campaign) = campaign else {
        return rsx! {};
    };
    let Some(goal) = binding_goal(&campaign.goals) else {
        return rsx! {};
    };
    let goals = goals_by_people(&campaign.goals);
    let status = campaign.status;

    let people = count_format(status.people);
    let goal_people = count_format(goal.people);
    let people_label = t.elements("status/goal/people", &[], &["count"]);

    let label = rsx! {
        for segment in people_label {
            {
                match segment {
                    Segment::Text(text) => rsx! { "{text}" },
                    Segment::Slot(_) => rsx! {
                        a {
                            class: "hover-goal",
                            ontouchstart: move |evt: TouchEvent| {
                                evt.prevent_default();
                                show_goal.set(true);
                            },
                            ontouchend: move |_| show_goal.set(false),
                            onmouseover: move |_| show_goal.set(true),
                            onmouseout: move |_| show_goal.set(false),
                            "{goal_people}"
                        }
                    },
                }
            }
        }
    };

    if compact {
        return rsx! {
            div { class: "status status-compact",
                p {
                    span { class: "number-small", "{people}" }
                    span { class: "label", {label} }
                }
                Bar {
                    goals,
                    status,
                    accessor: Accessor::People,
                    formatter: count_format as fn(u64) -> String,
                    show_last: show_goal(),
                }
            }
        };
    }

    let money = chf_format(status.money);
    let goal_money = chf_format(goal.money);
    let money_label = t.t("status/goal/money", &[("formattedCHF", goal_money.as_str())]);

    let remaining = match Countdown::between(now(), campaign.end_date) {
        Countdown::Running {
            days,
            hours,
            minutes,
        } => [
            t.pluralize("status/time/days", days),
            t.pluralize("status/time/hours", hours),
            t.pluralize("status/time/minutes", minutes),
        ]
        .join(" "),
        Countdown::Ended => t.t("status/time/ended", &[]),
    };
    let time_label = t.t("status/time/label", &[]);

    rsx! {
        div { class: "status",
            p {
                span { class: "number-primary", "{people}" }
                span { class: "label", {label} }
            }
            Bar {
                goals: goals.clone(),
                status,
                accessor: Accessor::People,
                formatter: count_format as fn(u64) -> String,
                show_last: show_goal(),
            }
            p {
                span { class: "number-secondary", "{money}" }
                span { class: "label", "{money_label}" }
            }
            Bar {
                goals,
                status,
                accessor: Accessor::Money,
                formatter: chf_format as fn(u64) -> String,
            }
            p {
                span { class: "number-small", "{remaining}" }
                span { class: "label", "{time_label}" }
            }
        }
    }
}
