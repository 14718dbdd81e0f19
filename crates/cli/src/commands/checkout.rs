//! Checkout command.

use clap::Args;
use secrecy::SecretString;
use shopeasy_core::cart::PromoCode;
use shopeasy_storefront::services::{CheckoutForm, DEFAULT_COUNTRY};
use shopeasy_storefront::{AppState, FileStorage, Result};

use crate::render;

/// Shipping and payment details for `shopeasy checkout`.
///
/// Fields default to empty so that validation reports every missing field
/// at once instead of clap stopping at the first.
#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    /// Defaults to the logged-in user's email
    #[arg(long)]
    email: Option<String>,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    state: String,
    #[arg(long, default_value = "")]
    zip: String,
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,
    #[arg(long, default_value = "")]
    card_name: String,
    /// 16 digits, spaces allowed
    #[arg(long, default_value = "")]
    card_number: String,
    /// MM/YY
    #[arg(long, default_value = "")]
    exp_date: String,
    #[arg(long, default_value = "")]
    cvv: String,
    /// Promo code
    #[arg(long)]
    promo: Option<String>,
}

pub fn run(app: &mut AppState<FileStorage>, args: CheckoutArgs) -> Result<()> {
    let promo = args.promo.as_deref().map(PromoCode::parse).transpose()?;
    let email = args.email.unwrap_or_else(|| {
        app.auth()
            .current()
            .map(|session| session.user.email.to_string())
            .unwrap_or_default()
    });

    let form = CheckoutForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email,
        address: args.address,
        city: args.city,
        state: args.state,
        zip: args.zip,
        country: args.country,
        card_name: args.card_name,
        card_number: SecretString::from(args.card_number),
        exp_date: args.exp_date,
        cvv: SecretString::from(args.cvv),
    };

    let order = app.checkout(&form, promo)?;
    render::order(&order);
    Ok(())
}
