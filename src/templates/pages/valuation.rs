// templates/pages/valuation.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn valuation_page() -> Markup {
    desktop_layout(
        "Home Valuation",
        html! {
            main class="container" {
                h1 { "What is your home worth?" }
                p { "An agent will prepare a comparative market analysis and email it to you." }

                (card("Request a valuation", html! {
                    form action="/leads/valuation" method="post" class="stack" {
                        label { "Name"
                            input type="text" name="name" required;
                        }
                        label { "Email"
                            input type="email" name="email" required;
                        }
                        label { "Phone"
                            input type="tel" name="phone";
                        }
                        label { "Property address"
                            input type="text" name="property_address" required;
                        }
                        label { "Anything we should know?"
                            textarea name="message" rows="3" placeholder="Recent renovations, timeline, ..." {}
                        }
                        button type="submit" { "Request valuation" }
                    }
                }))
            }
        },
    )
}
