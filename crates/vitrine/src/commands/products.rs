//! Product command handlers.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::Tabled;
use vitrine_core::{Product, ProductSource, ProductStore, filter};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&Arc<Product>> for ProductRow {
    fn from(p: &Arc<Product>) -> Self {
        let rating = p.rating_or_default();
        Self {
            id: p.id.to_string(),
            title: util::truncate(&p.title, 40),
            category: p.category.clone(),
            price: util::money(p.price),
            rating: format!("{} ({})", util::stars(rating), rating.count),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

/// Multi-line detail card, shared with `browse`.
pub fn product_detail(p: &Product, color: bool) -> String {
    let rating = p.rating_or_default();
    let stars = util::stars(rating);
    let price = util::money(p.price);

    let (title, price, stars) = if color {
        (
            p.title.bold().to_string(),
            price.green().to_string(),
            stars.yellow().to_string(),
        )
    } else {
        (p.title.clone(), price, stars)
    };

    [
        format!("ID:          {}", p.id),
        format!("Title:       {title}"),
        format!("Price:       {price}"),
        format!("Rating:      {stars} {:.1}/5 ({} reviews)", rating.rate, rating.count),
        format!("Category:    {}", or_dash(&p.category)),
        format!("Image:       {}", or_dash(&p.image)),
        format!("Description: {}", or_dash(&p.description)),
    ]
    .join("\n")
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle<S: ProductSource>(
    store: &ProductStore<S>,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let catalog = util::load_catalog(store, global).await;

    match args.command {
        ProductsCommand::List(filter_args) => {
            let criteria = util::criteria_from_args(&filter_args, &catalog.products);
            let visible = filter::apply(&catalog.products, &criteria);
            let out = output::render_list(
                global.output_format(),
                &visible,
                |p| ProductRow::from(p),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product = catalog.find(id)?;
            let color = output::should_color(global.color_mode());
            let out = output::render_single(
                global.output_format(),
                product,
                |p| product_detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::{ProductId, Rating};

    fn backpack() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Fjallraven Foldsack No. 1 Backpack".into(),
            description: "Your perfect pack".into(),
            category: "men's clothing".into(),
            price: 109.95,
            image: String::new(),
            rating: Some(Rating {
                rate: 3.9,
                count: 120,
            }),
        }
    }

    #[test]
    fn detail_shows_price_stars_and_reviews() {
        let detail = product_detail(&backpack(), false);
        assert!(detail.contains("Price:       $109.95"));
        assert!(detail.contains("★★★★☆ 3.9/5 (120 reviews)"));
        assert!(detail.contains("Image:       -"));
    }

    #[test]
    fn unrated_product_shows_zero() {
        let mut product = backpack();
        product.rating = None;
        assert!(product_detail(&product, false).contains("☆☆☆☆☆ 0.0/5 (0 reviews)"));
    }

    #[test]
    fn row_truncates_long_titles() {
        let mut product = backpack();
        product.title = "x".repeat(60);
        let row = ProductRow::from(&Arc::new(product));
        assert_eq!(row.title.chars().count(), 40);
        assert_eq!(row.rating, "★★★★☆ (120)");
    }
}
