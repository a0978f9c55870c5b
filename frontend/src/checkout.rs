use percent_encoding::utf8_percent_encode;

use crate::backend::URI_COMPONENT;
use crate::cart::CartLine;
use crate::catalog::Product;
use crate::money::Money;

pub fn cart_message(lines: &[CartLine], total: Money) -> String {
    let mut message = String::from("Hi! I'd like to place an order:\n\n");
    for line in lines {
        message.push_str(&format!(
            "*{}*\nQuantity: {}\nUnit price: {}\nSubtotal: {}\n\n",
            line.name,
            line.quantity,
            line.unit_price,
            line.subtotal()
        ));
    }
    message.push_str(&format!("*Total: {}*\n\n", total));
    message.push_str("Could you confirm availability and payment options?");
    message
}

pub fn buy_now_message(product: &Product) -> String {
    let mut message = format!(
        "Hi! I'm interested in *{}*.\nPrice: {}",
        product.name, product.price
    );
    if !product.description.trim().is_empty() {
        message.push_str(&format!("\n\n{}", product.description.trim()));
    }
    message
}

/// `https://wa.me/<phone>?text=<message>`; `catalog` links the shop's
/// WhatsApp catalog (`wa.me/c/<phone>`) instead of a direct chat.
/// Cart checkout and buy-now open the direct chat (`catalog = false`).
pub fn whatsapp_url(phone: &str, message: &str, catalog: bool) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    let path = if catalog {
        format!("c/{}", digits)
    } else {
        digits
    };
    format!(
        "https://wa.me/{}?text={}",
        path,
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartStore;
    use crate::catalog::sample_product;

    #[test]
    fn cart_message_lists_every_line_and_the_total() {
        let mut cart = CartStore::new();
        cart.add_item(&sample_product("a", "Headphones", 29_999, "Audio"), 2);
        cart.add_item(&sample_product("b", "Cable", 1_990, "Audio"), 1);
        let message = cart_message(cart.lines(), cart.total_price());

        assert!(message.contains("*Headphones*\nQuantity: 2\nUnit price: R$ 299,99\nSubtotal: R$ 599,98"));
        assert!(message.contains("*Cable*\nQuantity: 1"));
        assert!(message.contains("*Total: R$ 619,88*"));
        assert!(message.find("Headphones") < message.find("Cable"));
    }

    #[test]
    fn buy_now_message_includes_price_and_description() {
        let product = sample_product("a", "Smartwatch", 59_999, "Wearables");
        let message = buy_now_message(&product);
        assert!(message.starts_with("Hi! I'm interested in *Smartwatch*."));
        assert!(message.contains("Price: R$ 599,99"));
        assert!(message.ends_with("Smartwatch description"));
    }

    #[test]
    fn url_encodes_like_encode_uri_component() {
        let url = whatsapp_url("+55 (11) 95280-1212", "Total: R$ 1,00\n*ok* (yes)!", false);
        assert_eq!(
            url,
            "https://wa.me/5511952801212?text=Total%3A%20R%24%201%2C00%0A*ok*%20(yes)!"
        );
    }

    #[test]
    fn catalog_links_use_the_c_path() {
        assert_eq!(
            whatsapp_url("5511952801212", "é", true),
            "https://wa.me/c/5511952801212?text=%C3%A9"
        );
    }
}
