use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::GoalsView;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", GoalsView)] Goals {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Progress" }
            ul {
                li { Link { to: Route::Goals {}, "Goals" } }
            }
        }
    }
}
