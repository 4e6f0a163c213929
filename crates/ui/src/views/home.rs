use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let minutes = ctx.test_sessions().settings().duration_secs().div_ceil(60);

    rsx! {
        div { class: "page home",
            h1 { "IELTS Mock Test Platform" }
            p { class: "lead",
                "Practice with a timed multiple-choice test and get instant feedback on your English skills."
            }
            section { class: "card",
                h2 { "Take Mock Test" }
                ul { class: "features",
                    li { "Timed Test ({minutes} min)" }
                    li { "Multiple Choice" }
                    li { "Instant Results" }
                }
                Link { to: Route::Test {}, class: "button primary", "Start Test" }
            }
            section { class: "card",
                h2 { "Admin Panel" }
                ul { class: "features",
                    li { "Add Questions" }
                    li { "Edit Content" }
                    li { "Search the Bank" }
                }
                Link { to: Route::Admin {}, class: "button", "Admin Access" }
            }
        }
    }
}
