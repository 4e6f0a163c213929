use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router, use_navigator};
use mock_core::model::{AnswerSlate, GradedResult, Question, QuestionDraft};
use mock_core::time::fixed_now;
use services::{
    AppServices, Clock, QuestionAdminService, ResultsService, TestSessionService, TestSettings,
};
use storage::repository::{
    InMemoryRepository, QuestionSource, ScoringService, Storage, StorageError,
};

use crate::context::{UiApp, build_app_context};
use crate::views::admin::AdminTestHandles;
use crate::views::{AdminView, HomeView, ResultsView, TestView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn test_sessions(&self) -> Arc<TestSessionService> {
        self.services.test_sessions()
    }

    fn results(&self) -> Arc<ResultsService> {
        self.services.results()
    }

    fn admin(&self) -> Arc<QuestionAdminService> {
        self.services.admin()
    }
}

/// Scores every slate as all wrong, or fails when asked to.
pub struct StubScoring {
    pub fail: bool,
}

#[async_trait]
impl ScoringService for StubScoring {
    async fn submit_answers(&self, slate: &AnswerSlate) -> Result<GradedResult, StorageError> {
        if self.fail {
            return Err(StorageError::Connection("offline".into()));
        }
        let total = u32::try_from(slate.len()).unwrap_or(u32::MAX);
        GradedResult::new(0, total, 0.0, Vec::new(), slate.clone(), None)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Question source whose backend is unreachable.
pub struct OfflineSource;

#[async_trait]
impl QuestionSource for OfflineSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("connection refused".into()))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Test,
    Results(String),
    Admin,
}

/// Text the harness shows once a view has navigated back to the home route.
pub const HOME_MARKER: &str = "harness: home route";

#[derive(Clone, Default)]
struct EntryFlag(Rc<Cell<bool>>);

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    admin_handles: Option<AdminTestHandles>,
    entry: EntryFlag,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.entry.clone());
    if let Some(handles) = props.admin_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Landing {},
    #[route("/view")]
    Root {},
}

/// Stands in for the app's home route. The first visit forwards to the view
/// under test; a later one means that view navigated home.
#[component]
fn Landing() -> Element {
    let entry = use_context::<EntryFlag>();
    let navigator = use_navigator();
    let first_visit = use_hook(|| !entry.0.replace(true));
    use_effect(move || {
        if first_visit {
            let _ = navigator.replace(TestRoute::Root {});
        }
    });
    if first_visit {
        return rsx! {};
    }
    rsx! { p { id: "harness-home", "{HOME_MARKER}" } }
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Test => rsx! { TestView {} },
        ViewKind::Results(id) => rsx! { ResultsView { id } },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub admin_handles: Option<AdminTestHandles>,
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Rebuild, then give routing, resources and effects a few rounds to land.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_rounds(6).await;
    }

    pub async fn drive_rounds(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.drive_async().await;
        }
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over an in-memory bank holding `questions` four-option questions.
pub async fn seeded_services(questions: usize, scoring: StubScoring) -> AppServices {
    let storage = Storage::in_memory(Arc::new(scoring));
    let services = AppServices::from_storage(
        &storage,
        TestSettings::default(),
        Clock::fixed(fixed_now()),
    );
    for n in 1..=questions {
        services
            .admin()
            .create_question(QuestionDraft {
                text: format!("Which word completes sentence {n}?"),
                options: vec!["their".into(), "there".into(), "they're".into(), "thier".into()],
                correct_answer: 1,
            })
            .await
            .expect("seed question");
    }
    services
}

/// Services whose question source is offline.
pub fn offline_services() -> AppServices {
    let storage = Storage {
        questions: Arc::new(OfflineSource),
        scoring: Arc::new(StubScoring { fail: false }),
        admin: Arc::new(InMemoryRepository::new()),
    };
    AppServices::from_storage(&storage, TestSettings::default(), Clock::fixed(fixed_now()))
}

pub fn setup_view_harness(view: ViewKind, services: AppServices) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let admin_handles = (view == ViewKind::Admin).then(AdminTestHandles::default);
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            admin_handles: admin_handles.clone(),
            entry: EntryFlag::default(),
        },
    );
    ViewHarness {
        dom,
        services,
        admin_handles,
    }
}
