// templates/pages/home.rs

use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                section class="hero" {
                    h1 { "Find your next home on the harbor" }
                    p { "Browse our listings, or tell us what you're looking for and an agent will reach out." }
                }

                (card("Get in touch", html! {
                    form action="/leads/contact" method="post" class="stack" {
                        label { "Name"
                            input type="text" name="name" required;
                        }
                        label { "Email"
                            input type="email" name="email" required;
                        }
                        label { "Phone"
                            input type="tel" name="phone";
                        }
                        label { "Property of interest"
                            input type="text" name="property_address" placeholder="e.g. 12 Maple St";
                        }
                        label { "Message"
                            textarea name="message" rows="4" placeholder="Tell us what you're looking for" {}
                        }
                        button type="submit" { "Send" }
                    }
                }))

                (card("Prefer a call?", html! {
                    p { "Leave your number and we'll call you back within one business day." }
                    form action="/leads/callback" method="post" class="stack" {
                        label { "Name"
                            input type="text" name="name" required;
                        }
                        label { "Email"
                            input type="email" name="email" required;
                        }
                        label { "Phone"
                            input type="tel" name="phone" required;
                        }
                        button type="submit" { "Request callback" }
                    }
                }))
            }
        },
    )
}
