use dioxus::prelude::*;
use dioxus_router::Router;
use goals_core::model::StudentId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

/// Window title naming the student whose goals are on screen.
#[must_use]
pub fn window_title(student: StudentId) -> String {
    format!("Goals (student {student})")
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let title = window_title(ctx.student_id());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{title}" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "{ViewError::Unknown.message()}" }
                        details {
                            summary { "Details" }
                            pre { "{errors:?}" }
                        }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
