use hopper_core::Mapping;
use maud::{html, Markup, DOCTYPE};

/// Renders the landing page: a shorten form plus every in-memory mapping.
///
/// maud escapes every interpolated value, stored URLs included.
pub fn render_home(mappings: &[Mapping], base_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Hopper" }
            }
            body {
                h1 { "Hopper" }
                form method="post" action="/shorten" {
                    input type="text" name="url" placeholder="https://example.com";
                    button type="submit" { "Shorten" }
                }
                @if mappings.is_empty() {
                    p { "No links yet." }
                } @else {
                    table {
                        tr {
                            th { "Short link" }
                            th { "Original URL" }
                        }
                        @for mapping in mappings {
                            @let link = mapping.code.to_url(base_url);
                            tr {
                                td { a href=(link) { (link) } }
                                td { (mapping.url) }
                            }
                        }
                    }
                }
            }
        }
    }
}
