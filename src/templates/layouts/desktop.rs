use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Harborview Realty" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#0f766e"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                    {
                        path d="M3 21h18" {}
                        path d="M5 21v-12l7 -5l7 5v12" {}
                        path d="M10 21v-6a2 2 0 0 1 2 -2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Harborview Realty" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/valuation" { "Home Valuation" } }
                            li { a href="/admin/leads" { "Leads" } }
                        }
                    }
                }
                (content)
                footer class="px-6 py-4 text-sm" {
                    p { "Harborview Realty · 400 Shoreline Ave · (555) 010-4400" }
                }
            }
        }
    }
}
