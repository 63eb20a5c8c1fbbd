use maud::{html, Markup};

use crate::{
    templates::layouts::{base, PageConfig},
    RangeFilter, ReferenceWindow,
};

/// Every JSON route with a one-line description, in the order shown on the index page
pub const API_ROUTES: &[(&str, &str)] = &[
    (
        "/api/v1.0/precipitation",
        "View the precipitation recorded on each date of the last year",
    ),
    (
        "/api/v1.0/stations",
        "View the reporting weather stations and their locations",
    ),
    (
        "/api/v1.0/tobs",
        "View the temperature observations of the most active station for the last recorded year",
    ),
    (
        "/api/v1.0/start",
        "View the minimum, average and maximum temperatures recorded from a start date",
    ),
    (
        "/api/v1.0/start/end",
        "View the minimum, average and maximum temperatures recorded between a start and end date",
    ),
];

pub fn home_page(api_base: &str, window: ReferenceWindow, range_filter: RangeFilter) -> Markup {
    let config = PageConfig {
        title: "Hawaii Climate API",
        api_base,
    };

    base(&config, content(window, range_filter))
}

fn content(window: ReferenceWindow, range_filter: RangeFilter) -> Markup {
    html! {
        div class="content" {
            h2 class="subtitle" { "Welcome to Honolulu, Hawaii!" }
            p { "Please select one of the available routes below for more info:" }

            table class="table is-fullwidth is-striped" {
                thead {
                    tr {
                        th { "Route" }
                        th { "Description" }
                    }
                }
                tbody {
                    @for (path, description) in API_ROUTES {
                        tr {
                            td { strong { code { (path) } } }
                            td { (description) }
                        }
                    }
                }
            }

            p {
                "Data covers the year from "
                strong { (window.one_year_prior_date) }
                " to "
                strong { (window.most_recent_date) }
                "."
            }

            @match range_filter {
                RangeFilter::ReferenceWindow => {
                    p class="help" {
                        "Start and end dates are accepted in the path but summaries always cover the year above."
                    }
                }
                RangeFilter::Requested => {
                    p class="help" {
                        "Start and end dates use the YYYY-MM-DD format and are inclusive."
                    }
                }
            }
        }
    }
}
