use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use techmarket_seed::domain::products::models::Product;

pub(crate) fn products_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "no products found".to_string();
    }

    let mut builder = Builder::default();

    builder.push_record(["Name", "Price", "Description", "PayPal Button"]);

    for product in products {
        builder.push_record([
            product.name.clone(),
            product.price.to_string(),
            product.description.clone(),
            product.paypal_button_id.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..2), Alignment::right());

    table.to_string()
}
