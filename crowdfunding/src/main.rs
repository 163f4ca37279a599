use std::pin::pin;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use crowdfunding::format::{chf_format, count_format};
use crowdfunding::http::ReqwestTransport;
use crowdfunding::progress::{binding_goal, goals_by_people};
use crowdfunding::source::poll_status;
use crowdfunding::{
    Accessor, BarModel, CampaignSource, Config, Countdown, GraphQlSource, QueryState,
    SelectionEvent, SelectionState, StatusCampaign, Translator,
};

/// Crowdfunding - terminal preview of the campaign widgets
#[derive(Parser, Debug)]
#[command(name = "crowdfunding")]
#[command(version, about, long_about = None)]
struct Args {
    /// GraphQL endpoint, overrides CROWDFUNDING_API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Campaign name, overrides CROWDFUNDING_NAME
    #[arg(long)]
    campaign: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the pledge packages with their prices
    Packages,
    /// Show progress and the countdown
    Status {
        /// People count and a single bar only
        #[arg(long, default_value_t = false)]
        compact: bool,
        /// Keep polling on the configured interval
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// Pick a package and print the parameters the selector would emit
    Select {
        /// Package name, e.g. ABO_GIVE
        package: String,
        /// Option quantity as OPTION_ID=N, repeatable
        #[arg(long = "quantity", value_parser = parse_quantity)]
        quantities: Vec<(String, String)>,
        /// Pledge total in francs
        #[arg(long)]
        amount: Option<String>,
    },
}

fn parse_quantity(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(id, quantity)| (id.to_string(), quantity.to_string()))
        .ok_or_else(|| format!("expected OPTION_ID=N, got {}", value))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::from_env();
    if let Some(api_url) = args.api_url {
        config.api_url = api_url;
    }
    if let Some(campaign) = args.campaign {
        config.campaign_name = campaign;
    }

    let translator = Translator::german()?;
    let client = reqwest::Client::builder().user_agent("crowdfunding").build()?;
    let source = GraphQlSource::new(ReqwestTransport::new(client, config.api_url.clone()));

    tracing::debug!("Using {} for {}", config.api_url, config.campaign_name);

    match args.command {
        Command::Packages => list_packages(&source, &config, &translator).await,
        Command::Status { compact, watch } => {
            show_status(&source, &config, &translator, compact, watch).await
        }
        Command::Select {
            package,
            quantities,
            amount,
        } => select_package(&source, &config, &translator, &package, quantities, amount).await,
    }
}

async fn list_packages(
    source: &impl CampaignSource,
    config: &Config,
    translator: &Translator,
) -> Result<()> {
    let campaign = source.fetch_packages(&config.campaign_name).await?;
    check_translations(config, translator, &campaign.packages)?;

    for package in &campaign.packages {
        let price = package.base_price();
        let title = translator.t(&format!("package/{}/title", package.name), &[]);
        if price > 0 {
            println!("{} ({}) {}", title, package.name, chf_format(price));
        } else {
            println!("{} ({})", title, package.name);
        }

        for option in package.configurable_options() {
            let label = option_label(translator, option.reward.as_ref().map(|r| r.name()));
            println!(
                "    {} [{}]: {} to {}, default {}, {} each",
                label,
                option.id,
                option.min_amount,
                option.max_amount,
                option.default_amount,
                chf_format(option.price)
            );
        }
    }
    Ok(())
}

async fn show_status(
    source: &impl CampaignSource,
    config: &Config,
    translator: &Translator,
    compact: bool,
    watch: bool,
) -> Result<()> {
    if !watch {
        if let Some(campaign) = source.fetch_status(&config.campaign_name).await? {
            print_status(translator, &campaign, compact);
        }
        return Ok(());
    }

    let mut updates = pin!(poll_status(
        source,
        &config.campaign_name,
        config.status_poll_interval,
        tokio::time::sleep,
    ));

    while let Some(state) = updates.next().await {
        match state {
            QueryState::Ready(Some(campaign)) => {
                print_status(translator, &campaign, compact);
                println!();
            }
            QueryState::Ready(None) | QueryState::Loading => {}
            // already logged by the poller
            QueryState::Error(_) => {}
        }
    }
    Ok(())
}

fn print_status(translator: &Translator, campaign: &StatusCampaign, compact: bool) {
    let Some(goal) = binding_goal(&campaign.goals) else {
        return;
    };
    let goals = goals_by_people(&campaign.goals);
    let status = &campaign.status;

    let goal_people = count_format(goal.people);
    println!(
        "{} {}",
        count_format(status.people),
        translator.t("status/goal/people", &[("count", goal_people.as_str())])
    );
    println!("{}", text_bar(&BarModel::new(&goals, status, Accessor::People, true)));
    if compact {
        return;
    }

    let goal_money = chf_format(goal.money);
    println!(
        "{} {}",
        chf_format(status.money),
        translator.t("status/goal/money", &[("formattedCHF", goal_money.as_str())])
    );
    println!("{}", text_bar(&BarModel::new(&goals, status, Accessor::Money, true)));

    let remaining = match Countdown::between(Utc::now(), campaign.end_date) {
        Countdown::Running {
            days,
            hours,
            minutes,
        } => [
            translator.pluralize("status/time/days", days),
            translator.pluralize("status/time/hours", hours),
            translator.pluralize("status/time/minutes", minutes),
        ]
        .join(" "),
        Countdown::Ended => translator.t("status/time/ended", &[]),
    };
    println!("{} {}", remaining, translator.t("status/time/label", &[]));
}

fn text_bar(bar: &BarModel) -> String {
    const WIDTH: usize = 40;
    let filled = (bar.fill * WIDTH as f64).round() as usize;
    let mut cells: Vec<char> = (0..WIDTH)
        .map(|i| if i < filled { '#' } else { '.' })
        .collect();

    for marker in bar.markers.iter().filter(|marker| marker.visible) {
        let at = ((marker.position * WIDTH as f64).round() as usize).min(WIDTH - 1);
        cells[at] = '|';
    }
    format!("[{}]", cells.into_iter().collect::<String>())
}

async fn select_package(
    source: &impl CampaignSource,
    config: &Config,
    translator: &Translator,
    name: &str,
    quantities: Vec<(String, String)>,
    amount: Option<String>,
) -> Result<()> {
    let campaign = source.fetch_packages(&config.campaign_name).await?;
    check_translations(config, translator, &campaign.packages)?;
    let packages = &campaign.packages;

    let index = packages
        .iter()
        .position(|package| package.name == name)
        .ok_or_else(|| anyhow!("No package named {}", name))?;

    let mut state = SelectionState::new(None);
    let mut emitted = state.apply(packages, SelectionEvent::Click { index });

    if emitted.is_none() {
        for (option_id, value) in quantities {
            let before = state.clone();
            state.apply(
                packages,
                SelectionEvent::QuantityChanged {
                    index,
                    option_id: option_id.clone(),
                    value: value.clone(),
                },
            );
            if state == before {
                tracing::warn!("Quantity {} for {} was not accepted", value, option_id);
            }
        }
        if let Some(value) = amount {
            state.apply(packages, SelectionEvent::AmountChanged { index, value });
        }
        emitted = state.apply(packages, SelectionEvent::Confirm { index });
    }

    let Some(params) = emitted else {
        let min = state.min_amount(packages).unwrap_or_default();
        bail!("Pledge total is below the minimum of {}", chf_format(min));
    };

    let json = serde_json::to_string_pretty(&params).context("Failed to serialize selection")?;
    println!("{}", json);
    Ok(())
}

fn option_label(translator: &Translator, reward: Option<&str>) -> String {
    match reward {
        Some(name) => translator.t_or(&format!("option/{}/label", name), name),
        None => String::new(),
    }
}

fn check_translations(
    config: &Config,
    translator: &Translator,
    packages: &[crowdfunding::Package],
) -> Result<()> {
    let missing = translator.missing_keys(packages);
    if config.strict_translations && !missing.is_empty() {
        bail!("Missing translations: {}", missing.join(", "));
    }
    Ok(())
}
