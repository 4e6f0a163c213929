use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AdminView, HomeView, ResultsView, TestView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/test", TestView)] Test {},
        #[route("/results/:id", ResultsView)] Results { id: String },
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { to: Route::Home {}, class: "brand", "IELTS Mock Test" }
                nav { class: "topnav",
                    Link { to: Route::Admin {}, "Admin" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
