//! Interactive browse session.
//!
//! Shows the selected product, then loops on an action menu. Every change
//! goes through `Browser`, which re-filters and reconciles the selection.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use strum::IntoEnumIterator;
use vitrine_core::{Browser, Direction, ProductSource, ProductStore, SortMode};

use crate::cli::{FilterArgs, GlobalOpts, check_price, check_rating};
use crate::error::CliError;
use crate::output;

use super::products::product_detail;
use super::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    Pick,
    Search,
    Sort,
    ToggleCategory,
    PriceRange,
    MinRating,
    Reset,
    Quit,
}

const ACTIONS: [Action; 10] = [
    Action::Next,
    Action::Previous,
    Action::Pick,
    Action::Search,
    Action::Sort,
    Action::ToggleCategory,
    Action::PriceRange,
    Action::MinRating,
    Action::Reset,
    Action::Quit,
];

impl Action {
    fn label(self) -> &'static str {
        match self {
            Self::Next => "Next product",
            Self::Previous => "Previous product",
            Self::Pick => "Pick a product",
            Self::Search => "Search",
            Self::Sort => "Sort",
            Self::ToggleCategory => "Toggle category",
            Self::PriceRange => "Price range",
            Self::MinRating => "Minimum rating",
            Self::Reset => "Reset filters",
            Self::Quit => "Quit",
        }
    }
}

// ── View ────────────────────────────────────────────────────────────

/// One line summarizing position and active criteria.
fn status_line(browser: &Browser) -> String {
    let criteria = browser.criteria();
    let mut parts = vec![match browser.position() {
        Some((index, total)) => format!("{index} of {total}"),
        None => format!("no matches ({} in catalog)", browser.products().len()),
    }];

    parts.push(format!("sort: {}", criteria.sort.label()));
    let query = criteria.query.trim();
    if !query.is_empty() {
        parts.push(format!("search: \"{query}\""));
    }
    let selected: Vec<&str> = criteria.categories.selected().collect();
    if !selected.is_empty() {
        parts.push(format!("categories: {}", selected.join(", ")));
    }
    parts.push(format!(
        "price: {} – {}",
        util::money(criteria.min_price),
        util::money(criteria.max_price)
    ));
    if criteria.min_rating > 0.0 {
        parts.push(format!("rating ≥ {:.1}", criteria.min_rating));
    }
    parts.join(" · ")
}

fn render_view(browser: &Browser, color: bool) -> String {
    let body = browser.selected().map_or_else(
        || "No products match the current filters.".to_owned(),
        |p| product_detail(p, color),
    );
    format!("{}\n\n{body}\n", status_line(browser))
}

// ── Prompts ─────────────────────────────────────────────────────────

fn pick(browser: &mut Browser, theme: &ColorfulTheme) -> Result<(), CliError> {
    if browser.filtered().is_empty() {
        return Ok(());
    }
    let items: Vec<String> = browser
        .filtered()
        .iter()
        .map(|p| format!("{} ({})", util::truncate(&p.title, 60), util::money(p.price)))
        .collect();
    let current = browser.position().map_or(0, |(index, _)| index - 1);

    let choice = Select::with_theme(theme)
        .with_prompt("Product")
        .items(&items)
        .default(current)
        .interact_opt()
        .map_err(util::prompt_err)?;
    if let Some(id) = choice.and_then(|i| browser.filtered().get(i)).map(|p| p.id) {
        browser.select(id);
    }
    Ok(())
}

fn search(browser: &mut Browser, theme: &ColorfulTheme) -> Result<(), CliError> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search (empty clears)")
        .with_initial_text(browser.criteria().query.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(util::prompt_err)?;
    browser.update_criteria(|c| c.query = query);
    Ok(())
}

fn sort(browser: &mut Browser, theme: &ColorfulTheme) -> Result<(), CliError> {
    let modes: Vec<SortMode> = SortMode::iter().collect();
    let labels: Vec<&str> = modes.iter().map(|m| m.label()).collect();
    let current = modes
        .iter()
        .position(|m| *m == browser.criteria().sort)
        .unwrap_or(0);

    let choice = Select::with_theme(theme)
        .with_prompt("Sort by")
        .items(&labels)
        .default(current)
        .interact_opt()
        .map_err(util::prompt_err)?;
    if let Some(mode) = choice.and_then(|i| modes.get(i)).copied() {
        browser.update_criteria(|c| c.sort = mode);
    }
    Ok(())
}

fn toggle_category(browser: &mut Browser, theme: &ColorfulTheme) -> Result<(), CliError> {
    let facets = browser.categories();
    let items: Vec<String> = facets
        .iter()
        .map(|f| {
            let mark = if browser.criteria().categories.is_selected(&f.name) { "x" } else { " " };
            format!("[{mark}] {} ({})", f.name, f.count)
        })
        .collect();

    let choice = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(util::prompt_err)?;
    if let Some(facet) = choice.and_then(|i| facets.get(i)) {
        browser.update_criteria(|c| c.categories.toggle(&facet.name));
    }
    Ok(())
}

fn price_range(browser: &mut Browser, theme: &ColorfulTheme) -> Result<(), CliError> {
    let criteria = browser.criteria();
    let (current_min, current_max) = (criteria.min_price, criteria.max_price);

    let min: f64 = Input::with_theme(theme)
        .with_prompt("Lowest price")
        .default(current_min)
        .validate_with(|v: &f64| check_price(*v).map(|_| ()))
        .interact_text()
        .map_err(util::prompt_err)?;
    let max: f64 = Input::with_theme(theme)
        .with_prompt("Highest price")
        .default(current_max.max(min))
        .validate_with(|v: &f64| {
            check_price(*v)?;
            if *v < min {
                return Err(format!("must be at least {}", util::money(min)));
            }
            Ok(())
        })
        .interact_text()
        .map_err(util::prompt_err)?;

    set_price_range(browser, min, max);
    Ok(())
}

fn min_rating(browser: &mut Browser, theme: &ColorfulTheme) -> Result<(), CliError> {
    let rating: f64 = Input::with_theme(theme)
        .with_prompt("Minimum rating (0-5, steps of 0.5)")
        .default(browser.criteria().min_rating)
        .validate_with(|v: &f64| check_rating(*v).map(|_| ()))
        .interact_text()
        .map_err(util::prompt_err)?;
    set_min_rating(browser, rating);
    Ok(())
}

fn set_price_range(browser: &mut Browser, min: f64, max: f64) {
    browser.update_criteria(|c| {
        c.min_price = min;
        c.max_price = max;
    });
}

/// Snapped to the nearest half star, as the rating control moves.
fn set_min_rating(browser: &mut Browser, rating: f64) {
    let snapped = (rating * 2.0).round() / 2.0;
    browser.update_criteria(|c| c.min_rating = snapped);
}

// ── Handler ─────────────────────────────────────────────────────────

fn run_session(mut browser: Browser, color: bool) -> Result<(), CliError> {
    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = ACTIONS.iter().map(|a| a.label()).collect();

    loop {
        println!("{}", render_view(&browser, color));

        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(util::prompt_err)?;
        let action = choice
            .and_then(|i| ACTIONS.get(i).copied())
            .unwrap_or(Action::Quit);

        match action {
            Action::Next => {
                browser.navigate(Direction::Next);
            }
            Action::Previous => {
                browser.navigate(Direction::Prev);
            }
            Action::Pick => pick(&mut browser, &theme)?,
            Action::Search => search(&mut browser, &theme)?,
            Action::Sort => sort(&mut browser, &theme)?,
            Action::ToggleCategory => toggle_category(&mut browser, &theme)?,
            Action::PriceRange => price_range(&mut browser, &theme)?,
            Action::MinRating => min_rating(&mut browser, &theme)?,
            Action::Reset => browser.reset_criteria(),
            Action::Quit => return Ok(()),
        }
    }
}

pub async fn handle<S: ProductSource>(
    store: &ProductStore<S>,
    args: &FilterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if !(std::io::stdin().is_terminal() && std::io::stdout().is_terminal()) {
        return Err(CliError::NotInteractive {
            command: "browse".into(),
        });
    }

    let catalog = util::load_catalog(store, global).await;
    let criteria = util::criteria_from_args(args, &catalog.products);
    let browser = Browser::with_criteria(catalog.products, criteria);
    run_session(browser, output::should_color(global.color_mode()))
}
