//! Terminal output.
//!
//! All stdout printing lives here so command modules stay free of formatting.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use shopeasy_core::cart::{CartState, OrderSummary};
use shopeasy_core::{Product, format_usd};
use shopeasy_storefront::AppError;
use shopeasy_storefront::models::{Order, Session};
use shopeasy_storefront::services::FieldErrors;

pub fn products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found. Try adjusting your search or filter.");
        return;
    }
    for product in products {
        println!(
            "{:>4}  {:>10}  {:<4}  {}",
            product.id,
            product.price.display(),
            product
                .rating
                .map_or_else(|| "-".to_string(), |r| format!("{:.1}", r.rate)),
            product.title
        );
    }
    let plural = if products.len() == 1 { "" } else { "s" };
    println!("{} product{plural} found", products.len());
}

pub fn product(product: &Product) {
    println!("{}", product.title);
    println!("  id:       {}", product.id);
    println!("  price:    {}", product.price.display());
    println!("  category: {}", product.category);
    if let Some(rating) = product.rating {
        println!("  rating:   {:.1} ({} reviews)", rating.rate, rating.count);
    }
    if !product.image.is_empty() {
        println!("  image:    {}", product.image);
    }
    println!();
    println!("{}", product.description);
}

pub fn categories(categories: &[String]) {
    for category in categories {
        println!("{category}");
    }
}

pub fn cart(cart: &CartState, summary: &OrderSummary) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }
    for item in cart.items() {
        println!(
            "{:>4}  {:>3} x {:>10}  {:>10}  {}",
            item.id,
            item.quantity,
            item.price.display(),
            format_usd(item.line_total()),
            item.title
        );
    }
    println!("{} item(s)", cart.item_count());
    println!();
    summary_lines(summary);
}

fn summary_lines(summary: &OrderSummary) {
    for (label, value) in summary.lines() {
        println!("{label:<10} {value:>10}");
    }
}

pub fn cart_changed(cart: &CartState) {
    println!(
        "Cart: {} item(s), total {}",
        cart.item_count(),
        format_usd(cart.total())
    );
}

pub fn wishlist(items: &[Product]) {
    if items.is_empty() {
        println!("Your wishlist is empty");
        return;
    }
    for product in items {
        println!("{:>4}  {:>10}  {}", product.id, product.price.display(), product.title);
    }
}

pub fn message(text: &str) {
    println!("{text}");
}

pub fn session(session: &Session) {
    println!("Logged in as {} <{}>", session.user.name, session.user.email);
}

pub fn order(order: &Order) {
    println!("{}", order.confirmation());
    println!("  order:    {}", order.id);
    println!("  placed:   {}", order.placed_at.format("%Y-%m-%d %H:%M UTC"));
    println!(
        "  ship to:  {} {}, {}, {} {} {}",
        order.customer.first_name,
        order.customer.last_name,
        order.customer.city,
        order.customer.state,
        order.customer.zip,
        order.customer.country
    );
    println!("  card:     **** {}", order.payment.last4);
    println!();
    summary_lines(&order.summary);
}

fn field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}

/// Explain a failed command to the user.
pub fn error(err: &AppError) {
    eprintln!("Error: {}", err.user_message());
    match err {
        AppError::Checkout(shopeasy_storefront::services::CheckoutError::Invalid(errors)) => {
            field_errors(errors);
        }
        AppError::Auth(auth) => {
            if let Some(errors) = auth.field_errors() {
                field_errors(errors);
            }
        }
        _ => {}
    }
}
