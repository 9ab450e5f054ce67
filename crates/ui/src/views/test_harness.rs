use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use goals_core::model::StudentId;
use services::{GoalSource, GoalsService};

use crate::context::{UiApp, build_app_context};
use crate::views::goals::GoalsTestHandles;
use crate::views::{GoalsIntent, GoalsView};

pub const TEST_STUDENT: StudentId = StudentId::new(1);

#[derive(Clone)]
struct TestApp {
    goals: Arc<GoalsService>,
}

impl UiApp for TestApp {
    fn student_id(&self) -> StudentId {
        TEST_STUDENT
    }

    fn goals_service(&self) -> Arc<GoalsService> {
        Arc::clone(&self.goals)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: GoalsTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { GoalsView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub goals: Arc<GoalsService>,
    pub handles: GoalsTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Build, then let the pending reads resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    /// Fire a user action through the view and let its effects settle.
    pub async fn dispatch(&mut self, intent: GoalsIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_goals_harness(source: Arc<dyn GoalSource>) -> ViewHarness {
    setup_goals_harness_with_service(Arc::new(GoalsService::new(source)))
}

/// Mount a fresh view over an existing service, keeping its cache.
pub fn setup_goals_harness_with_service(goals: Arc<GoalsService>) -> ViewHarness {
    let app = Arc::new(TestApp {
        goals: Arc::clone(&goals),
    });
    let handles = GoalsTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness {
        dom,
        goals,
        handles,
    }
}
