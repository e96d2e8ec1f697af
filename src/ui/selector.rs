/// Region / project dropdown with a "Recently Used" group

use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::catalog::{self, Category, RECENT_LABEL};
use crate::config::{AppConfig, ErrorCode};
use crate::query::PROJECTS_URL;
use crate::recent::RecentSelectionStore;
use crate::selection::{PartitionedView, SelectionItem};
use crate::storage::PopupStore;
use crate::ui::bridge;

#[derive(Properties, PartialEq)]
pub struct RecentSelectorProps {
    pub category: Category,
    pub on_select: Callback<String>,
}

#[function_component(RecentSelector)]
pub fn recent_selector(props: &RecentSelectorProps) -> Html {
    let config = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let store = use_memo((), |_| RecentSelectionStore::new(PopupStore::open()));
    let view = use_state(|| None::<PartitionedView>);

    // Load the catalog once on mount
    {
        let view = view.clone();
        let store = store.clone();
        let category = props.category;

        use_effect_with((), move |_| {
            spawn_local(async move {
                let catalog = load_catalog(category, &config).await;
                view.set(Some(store.partition(category.storage_key(), &catalog)));
            });
            || ()
        });
    }

    let on_change = {
        let view = view.clone();
        let store = store.clone();
        let category = props.category;
        let on_select = props.on_select.clone();

        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let id = select.value();
            if id.is_empty() {
                return;
            }

            let name = (*view)
                .as_ref()
                .and_then(|v| v.name_of(&id))
                .map(str::to_string);
            let item = SelectionItem::with_fallback_name(id.clone(), name);

            if let Err(e) = store.record_selection(category.storage_key(), item) {
                log::warn!("Recent {} not saved: {}", category.element_id(), e);
            }
            on_select.emit(id);
        })
    };

    let Some(view) = (*view).clone() else {
        return html! {
            <div class="selector-loading">{props.category.loading_message()}</div>
        };
    };

    html! {
        <select id={props.category.element_id()} class="selector" onchange={on_change}>
            <option value="" disabled={true} selected={true}>{props.category.placeholder()}</option>
            if !view.recent.is_empty() {
                <optgroup label={RECENT_LABEL}>
                    {for view.recent.iter().map(render_option)}
                </optgroup>
            }
            if !view.others.is_empty() {
                <optgroup label={props.category.others_label()}>
                    {for view.others.iter().map(render_option)}
                </optgroup>
            }
        </select>
    }
}

fn render_option(item: &SelectionItem) -> Html {
    html! {
        <option key={item.id.clone()} value={item.id.clone()}>{&item.name}</option>
    }
}

// Helper functions

/// Fetch the full catalog for a category, never failing
async fn load_catalog(category: Category, config: &AppConfig) -> Vec<SelectionItem> {
    match category {
        Category::AwsRegions => load_aws_regions(config).await,
        Category::GcpProjects => load_gcp_projects().await,
    }
}

async fn load_aws_regions(config: &AppConfig) -> Vec<SelectionItem> {
    let fetched = bridge::aws_describe_regions(&config.aws.default_region, &config.aws.ec2_api_version)
        .await
        .and_then(|json| catalog::aws_regions_from_response(config, &json).map_err(|e| e.to_string()));

    match fetched {
        Ok(regions) => regions,
        Err(e) => {
            log::warn!("Error loading regions from AWS, using built-in list: {}", e);
            catalog::aws_fallback_regions(config)
        }
    }
}

async fn load_gcp_projects() -> Vec<SelectionItem> {
    let fetched = match bridge::gcp_auth_token().await {
        Ok(token) => bridge::fetch_json(PROJECTS_URL, &token)
            .await
            .and_then(|json| catalog::gcp_projects_from_response(&json).map_err(|e| e.to_string())),
        Err(e) => Err(e),
    };

    fetched.unwrap_or_else(|e| {
        log::warn!("{}: {}", ErrorCode::GcpProject.message(), e);
        Vec::new()
    })
}
