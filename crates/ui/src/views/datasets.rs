use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct DatasetRow {
    name: String,
    file: String,
    status: String,
}

#[component]
pub fn DatasetsView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let resource = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        async move {
            let mut rows = Vec::new();
            for entry in quiz_loop.catalog().entries() {
                let status = match quiz_loop.load(entry).await {
                    Ok(dataset) => format!("{} places", dataset.len()),
                    Err(err) => err.user_message(),
                };
                rows.push(DatasetRow {
                    name: entry.display_name().to_string(),
                    file: entry.file().to_string(),
                    status,
                });
            }
            Ok::<_, ViewError>(rows)
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Datasets" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    table { class: "datasets",
                        tr {
                            th { "Name" }
                            th { "File" }
                            th { "Places" }
                        }
                        for row in rows {
                            tr { key: "{row.file}",
                                td { "{row.name}" }
                                td { "{row.file}" }
                                td { "{row.status}" }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
