//! Menu-driven dashboard.
//!
//! Shows the page for the current state, city and date, then lets the
//! user change one of them. Every pick re-runs the full cycle, reloading
//! the data files and state boundaries.

use chrono::NaiveDate;
use dialoguer::Select;
use housing_map_cli_utils::MultiProgress;
use housing_map_dashboard::run_cycle;
use housing_map_dashboard_models::config::DashboardConfig;
use housing_map_dashboard_models::{Interaction, USA};

use crate::{load_dataset, report};

/// Label of the city menu entry that clears the city.
const ALL_CITIES: &str = "(all cities)";

enum Action {
    State,
    City,
    Date,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[Self::State, Self::City, Self::Date, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::State => "Change state",
            Self::City => "Change city",
            Self::Date => "Change date",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits.
///
/// # Errors
///
/// Returns an error if a cycle fails or a prompt cannot be shown.
pub async fn run(
    multi: &MultiProgress,
    config: &DashboardConfig,
    client: &reqwest::Client,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = USA.to_string();
    let mut city: Option<String> = None;
    let mut date: Option<NaiveDate> = None;

    loop {
        let dataset = load_dataset(multi, config, client).await?;
        let view = run_cycle(
            &dataset,
            config,
            &Interaction::None,
            Some(state.as_str()),
            city.as_deref(),
            date,
        )?;

        println!();
        print!("{}", report::format_view(&view));
        println!();

        let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::State => {
                let picked = Select::new()
                    .with_prompt("State")
                    .items(&view.filters.states)
                    .default(view.filters.selected_state)
                    .interact()?;
                state.clone_from(&view.filters.states[picked]);
                city = None;
            }
            Action::City => {
                if state == USA {
                    println!("Pick a state first.");
                    continue;
                }
                let mut cities: Vec<&str> = dataset
                    .cities
                    .in_state(&state)
                    .map(|r| r.region_name.as_str())
                    .collect();
                cities.sort_unstable();
                cities.dedup();
                cities.insert(0, ALL_CITIES);

                let current = city
                    .as_deref()
                    .and_then(|c| cities.iter().position(|x| *x == c))
                    .unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("City")
                    .items(&cities)
                    .default(current)
                    .interact()?;
                city = (picked > 0).then(|| cities[picked].to_string());
            }
            Action::Date => {
                let labels: Vec<String> =
                    view.filters.dates.iter().map(ToString::to_string).collect();
                let picked = Select::new()
                    .with_prompt("Date")
                    .items(&labels)
                    .default(view.filters.selected_date)
                    .interact()?;
                date = view.filters.dates.get(picked).copied();
            }
            Action::Quit => return Ok(()),
        }

        log::debug!("Next cycle: state={state} city={city:?} date={date:?}");
    }
}
