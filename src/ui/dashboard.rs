/// Cost dashboard shown once a region is selected

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{AppConfig, ErrorCode};
use crate::dashboard::{self, CostSummary, DashboardData};
use crate::ui::bridge;
use crate::ui::components::MetricCard;

#[derive(Properties, PartialEq)]
pub struct CostDashboardProps {
    /// Region the figures are for; a change triggers a reload
    pub region: AttrValue,
}

#[function_component(CostDashboard)]
pub fn cost_dashboard(props: &CostDashboardProps) -> Html {
    let config = use_context::<Rc<AppConfig>>().unwrap_or_default();
    let data = use_state(|| None::<DashboardData>);

    // Fetch now, then on every refresh interval until unmounted
    {
        let data = data.clone();
        let config = config.clone();

        use_effect_with(props.region.clone(), move |region| {
            log::debug!("Loading dashboard for {}", region);
            let interval = i32::try_from(config.dashboard.refresh_interval_ms).unwrap_or(i32::MAX);

            let refresh = move || {
                let data = data.clone();
                let config = config.clone();
                spawn_local(async move {
                    data.set(Some(fetch_dashboard_data(&config).await));
                });
            };
            refresh();

            let tick = Closure::wrap(Box::new(refresh) as Box<dyn FnMut()>);
            let handle = web_sys::window().and_then(|window| {
                window
                    .set_interval_with_callback_and_timeout_and_arguments_0(tick.as_ref().unchecked_ref(), interval)
                    .ok()
            });

            move || {
                if let (Some(window), Some(handle)) = (web_sys::window(), handle) {
                    window.clear_interval_with_handle(handle);
                }
                drop(tick);
            }
        });
    }

    let Some(data) = (*data).clone() else {
        return html! {
            <div class="loading-text-center">{"Loading dashboard data..."}</div>
        };
    };

    html! {
        <div class="dashboard">
            <MetricCard
                title="Monthly Cost"
                value={dashboard::format_cost(data.cost.current_cost, config.dashboard.cost_decimal_places)}
                subtitle="Current month"
                trend={Some(data.cost.cost_change)}
            />
            <MetricCard
                title="Active Resources"
                value={data.active_resources.to_string()}
                subtitle="Running instances"
            />
        </div>
    }
}

// Helper functions

/// Both figures are fetched concurrently; a failure zeroes only that figure
async fn fetch_dashboard_data(config: &AppConfig) -> DashboardData {
    let now = js_sys::Date::new_0();
    let (start, end) = dashboard::cost_period(now.get_full_year() as i32, now.get_month() + 1, now.get_date());

    let cost = async {
        bridge::aws_get_cost_and_usage(&start, &end, &config.aws.cost_explorer_api_version)
            .await
            .and_then(|json| CostSummary::from_cost_and_usage(&json).map_err(|e| e.to_string()))
            .unwrap_or_else(|e| {
                log::warn!("{}: {}", ErrorCode::CostData.message(), e);
                CostSummary::default()
            })
    };

    let active_resources = async {
        bridge::aws_describe_instances(&config.aws.ec2_api_version)
            .await
            .and_then(|json| dashboard::running_instance_count(&json).map_err(|e| e.to_string()))
            .unwrap_or_else(|e| {
                log::warn!("Resource data fetch error: {}", e);
                0
            })
    };

    dashboard::gather(cost, active_resources).await
}
