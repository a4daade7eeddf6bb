use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::time::fixed_now;
use services::{Clock, QuizConfig, QuizLoopService};
use storage::{DatasetCatalog, DatasetEntry, DatasetLoader, InMemorySource};

use crate::context::{UiApp, build_app_context};
use crate::views::{DatasetsView, QuizView};

pub const PARKS_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {"nazwa": "Tatra"},
         "geometry": {"type": "Polygon", "coordinates": [[[19.8, 49.1], [20.2, 49.1], [20.2, 49.3], [19.8, 49.3], [19.8, 49.1]]]}},
        {"type": "Feature", "properties": {"nazwa": "Biebrza"},
         "geometry": {"type": "Polygon", "coordinates": [[[22.5, 53.4], [22.9, 53.4], [22.9, 53.7], [22.5, 53.7], [22.5, 53.4]]]}},
        {"type": "Feature", "properties": {"nazwa": "Wolin"},
         "geometry": {"type": "Polygon", "coordinates": [[[14.4, 53.8], [14.6, 53.8], [14.6, 54.0], [14.4, 54.0], [14.4, 53.8]]]}}
    ]
}"#;

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    Datasets,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
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
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Datasets => rsx! { DatasetsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
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
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over a catalog with the parks dataset and one broken entry.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let source = InMemorySource::new()
        .with_document("parki_narodowe.geojson", PARKS_GEOJSON)
        .with_document("broken.geojson", "not json");
    let catalog = DatasetCatalog::new(vec![
        DatasetEntry::new("parki_narodowe.geojson", "Parki Narodowe").expect("entry"),
        DatasetEntry::new("broken.geojson", "Broken").expect("entry"),
    ])
    .expect("catalog");
    let quiz_loop = QuizLoopService::new(
        DatasetLoader::new(Arc::new(source)),
        catalog,
        QuizConfig::default(),
    )
    .with_clock(Clock::fixed(fixed_now()));

    let app = Arc::new(TestApp {
        quiz_loop: Arc::new(quiz_loop),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
