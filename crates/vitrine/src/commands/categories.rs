//! Category overview handler.

use serde::Serialize;
use tabled::Tabled;
use vitrine_core::{CategoryFacet, PriceBounds, ProductSource, ProductStore, facets};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Products")]
    count: usize,
}

#[derive(Debug, Serialize)]
struct CategoryReport {
    categories: Vec<CategoryFacet>,
    price_range: Option<PriceBounds>,
}

fn report_detail(report: &CategoryReport) -> String {
    let rows: Vec<CategoryRow> = report
        .categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            count: c.count,
        })
        .collect();
    let mut out = output::render_table(&rows);
    if let Some(range) = report.price_range {
        out.push_str(&format!(
            "\nPrice range: {} – {}",
            util::money(range.min),
            util::money(range.max)
        ));
    }
    out
}

pub async fn handle<S: ProductSource>(
    store: &ProductStore<S>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let catalog = util::load_catalog(store, global).await;
    let report = CategoryReport {
        categories: facets::categories(&catalog.products),
        price_range: facets::price_bounds(&catalog.products),
    };

    let out = output::render_single(global.output_format(), &report, report_detail, |r| {
        r.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
