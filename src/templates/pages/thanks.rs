// templates/pages/thanks.rs

use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn thanks_page() -> Markup {
    desktop_layout(
        "Thank You",
        html! {
            main class="container" {
                h1 { "Thanks for reaching out" }
                p { "We received your details and an agent will be in touch shortly." }
                p { a href="/" { "Back to the home page" } }
            }
        },
    )
}
