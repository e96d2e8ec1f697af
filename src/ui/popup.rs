/// Popup UI for Cloud Scout

use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use patternfly_yew::prelude::*;

use crate::catalog::Category;
use crate::config::{AppConfig, ErrorCode};
use crate::error::QueryError;
use crate::logs::{self, LogsAction};
use crate::query::{self, Capability, Provider};
use crate::ui::bridge;
use crate::ui::components::{MessageKind, ResultMessage};
use crate::ui::dashboard::CostDashboard;
use crate::ui::selector::RecentSelector;

#[derive(Clone, PartialEq)]
enum AppState {
    Idle,
    Loading(String),
}

#[derive(Clone, PartialEq)]
struct Message {
    kind: MessageKind,
    text: String,
}

impl Message {
    fn success(text: impl Into<String>) -> Self {
        Message {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Message {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::default());
    let state = use_state(|| AppState::Idle);
    let message = use_state(|| None::<Message>);
    let active_provider = use_state(|| Provider::Aws);

    let access_key = use_state(String::new);
    let secret_key = use_state(String::new);
    let aws_connected = use_state(|| false);
    let selected_region = use_state(|| None::<String>);
    let aws_question = use_state(String::new);
    let logs_text = use_state(String::new);

    let gcp_connected = use_state(|| false);
    let selected_project = use_state(|| None::<String>);
    let gcp_question = use_state(String::new);

    // Hand the request settings to the SDK once
    {
        let config = config.clone();
        use_effect_with((), move |_| {
            if let Err(e) = bridge::aws_configure(&config.aws.default_region, &config.aws.request) {
                log::warn!("AWS SDK configuration failed: {}", e);
            }
            || ()
        });
    }

    let bind_input = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                handle.set(input.value());
            }
        })
    };

    let bind_textarea = |handle: &UseStateHandle<String>| {
        let handle = handle.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                handle.set(area.value());
            }
        })
    };

    // AWS connect handler
    let on_aws_connect = {
        let config = config.clone();
        let state = state.clone();
        let message = message.clone();
        let access_key = access_key.clone();
        let secret_key = secret_key.clone();
        let aws_connected = aws_connected.clone();

        Callback::from(move |_| {
            let access = access_key.trim().to_string();
            let secret = secret_key.trim().to_string();
            if access.is_empty() || secret.is_empty() {
                message.set(Some(Message::error(ErrorCode::AwsAuthentication.message())));
                return;
            }

            let config = config.clone();
            let state = state.clone();
            let message = message.clone();
            let aws_connected = aws_connected.clone();

            state.set(AppState::Loading("Connecting to AWS...".to_string()));
            log::debug!("Attempting AWS connection...");

            spawn_local(async move {
                match bridge::aws_verify_credentials(&access, &secret, &config.aws.default_region).await {
                    Ok(_) => {
                        aws_connected.set(true);
                        message.set(Some(Message::success("Connected successfully! Please select a region.")));
                    }
                    Err(e) => {
                        message.set(Some(Message::error(format!(
                            "{}: {}",
                            ErrorCode::AwsConnection.message(),
                            e
                        ))));
                    }
                }
                state.set(AppState::Idle);
            });
        })
    };

    // Region selected in the dropdown
    let on_region_select = {
        let selected_region = selected_region.clone();
        let message = message.clone();

        Callback::from(move |region: String| {
            log::info!("Region selected: {}", region);
            match bridge::aws_set_region(&region) {
                Ok(_) => selected_region.set(Some(region)),
                Err(e) => message.set(Some(Message::error(format!("Region selection error: {}", e)))),
            }
        })
    };

    // AWS analyze handler
    let on_aws_analyze = {
        let config = config.clone();
        let state = state.clone();
        let message = message.clone();
        let aws_connected = aws_connected.clone();
        let selected_region = selected_region.clone();
        let aws_question = aws_question.clone();

        Callback::from(move |_| {
            let question = match prepare_analysis(Provider::Aws, *aws_connected && selected_region.is_some(), &aws_question) {
                Ok(question) => question,
                Err(e) => {
                    message.set(Some(Message::error(e.to_string())));
                    return;
                }
            };

            let config = config.clone();
            let state = state.clone();
            let message = message.clone();

            state.set(AppState::Loading("Analyzing...".to_string()));

            spawn_local(async move {
                match run_aws_analysis(&config, &question).await {
                    Ok(report) => message.set(Some(Message::success(report))),
                    Err(e) => message.set(Some(Message::error(format!("Analysis error: {}", e)))),
                }
                state.set(AppState::Idle);
            });
        })
    };

    // Show Logs handler
    let on_show_logs = {
        let config = config.clone();
        let state = state.clone();
        let message = message.clone();
        let logs_text = logs_text.clone();

        Callback::from(move |_| {
            let config = config.clone();
            let state = state.clone();
            let message = message.clone();
            let logs_text = logs_text.clone();

            state.set(AppState::Loading("Loading logs...".to_string()));

            spawn_local(async move {
                match fetch_log_groups(&config).await {
                    Ok(text) => logs_text.set(text),
                    Err(e) => message.set(Some(Message::error(e))),
                }
                state.set(AppState::Idle);
            });
        })
    };

    // Summarize Logs handler
    let on_summarize_logs = {
        let config = config.clone();
        let state = state.clone();
        let message = message.clone();
        let logs_text = logs_text.clone();

        Callback::from(move |_| {
            let config = config.clone();
            let state = state.clone();
            let message = message.clone();
            let text = (*logs_text).clone();

            state.set(AppState::Loading("Checking log access...".to_string()));

            spawn_local(async move {
                match summarize_log_groups(&config, &text).await {
                    Ok(summary) => message.set(Some(Message::success(summary))),
                    Err(e) => message.set(Some(Message::error(e))),
                }
                state.set(AppState::Idle);
            });
        })
    };

    // GCP connect handler
    let on_gcp_connect = {
        let state = state.clone();
        let message = message.clone();
        let gcp_connected = gcp_connected.clone();

        Callback::from(move |_| {
            let state = state.clone();
            let message = message.clone();
            let gcp_connected = gcp_connected.clone();

            state.set(AppState::Loading("Connecting to Google Cloud...".to_string()));

            spawn_local(async move {
                match bridge::gcp_auth_token().await {
                    Ok(_) => {
                        gcp_connected.set(true);
                        message.set(Some(Message::success("Connected to GCP successfully! Please select a project.")));
                    }
                    Err(e) => {
                        message.set(Some(Message::error(format!(
                            "{}: {}",
                            ErrorCode::GcpConnection.message(),
                            e
                        ))));
                    }
                }
                state.set(AppState::Idle);
            });
        })
    };

    let on_project_select = {
        let selected_project = selected_project.clone();

        Callback::from(move |project: String| {
            log::info!("Project selected: {}", project);
            selected_project.set(Some(project));
        })
    };

    // GCP analyze handler
    let on_gcp_analyze = {
        let state = state.clone();
        let message = message.clone();
        let gcp_connected = gcp_connected.clone();
        let selected_project = selected_project.clone();
        let gcp_question = gcp_question.clone();

        Callback::from(move |_| {
            let ready = *gcp_connected && selected_project.is_some();
            let question = match prepare_analysis(Provider::Gcp, ready, &gcp_question) {
                Ok(question) => question,
                Err(e) => {
                    message.set(Some(Message::error(e.to_string())));
                    return;
                }
            };
            let Some(project) = (*selected_project).clone() else {
                return;
            };

            let state = state.clone();
            let message = message.clone();

            state.set(AppState::Loading("Analyzing...".to_string()));

            spawn_local(async move {
                match run_gcp_analysis(&project, &question).await {
                    Ok(report) => message.set(Some(Message::success(report))),
                    Err(e) => message.set(Some(Message::error(format!("Analysis error: {}", e)))),
                }
                state.set(AppState::Idle);
            });
        })
    };

    // Provider tab switching clears the result area
    let on_tab_click = {
        let active_provider = active_provider.clone();
        let message = message.clone();
        move |provider: Provider| {
            let active_provider = active_provider.clone();
            let message = message.clone();
            Callback::from(move |_| {
                active_provider.set(provider);
                message.set(None);
            })
        }
    };

    let tab_class = |provider: Provider| {
        if *active_provider == provider {
            "pf-v5-c-tabs__item pf-m-current"
        } else {
            "pf-v5-c-tabs__item"
        }
    };

    let is_busy = !matches!(*state, AppState::Idle);

    html! {
        <ContextProvider<Rc<AppConfig>> context={config.clone()}>
            <div class="padding-20">
                <h1 class="popup-title">{"Cloud Scout"}</h1>

                // Provider tabs
                <div class="pf-v5-c-tabs tabs-nav">
                    <ul class="pf-v5-c-tabs__list">
                        <li class={tab_class(Provider::Aws)}>
                            <button class="pf-v5-c-tabs__link" onclick={on_tab_click(Provider::Aws)}>
                                <span class="pf-v5-c-tabs__item-text">{"AWS"}</span>
                            </button>
                        </li>
                        <li class={tab_class(Provider::Gcp)}>
                            <button class="pf-v5-c-tabs__link" onclick={on_tab_click(Provider::Gcp)}>
                                <span class="pf-v5-c-tabs__item-text">{"Google Cloud"}</span>
                            </button>
                        </li>
                    </ul>
                </div>

                if let AppState::Loading(msg) = &*state {
                    <div class="loading-text-center">
                        <Spinner />
                        <p class="loading-text">{msg}</p>
                    </div>
                }

                <div class="tab-pane-content">
                    {match *active_provider {
                        Provider::Aws => html! {
                            <div id="aws-content" class="flex-column-gap">
                                <input
                                    id="accessKey"
                                    type="text"
                                    placeholder="AWS Access Key"
                                    value={(*access_key).clone()}
                                    oninput={bind_input(&access_key)}
                                />
                                <input
                                    id="secretKey"
                                    type="password"
                                    placeholder="AWS Secret Key"
                                    value={(*secret_key).clone()}
                                    oninput={bind_input(&secret_key)}
                                />
                                <Button onclick={on_aws_connect} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                                    {"Connect"}
                                </Button>

                                if *aws_connected {
                                    <div class="region-section">
                                        <RecentSelector category={Category::AwsRegions} on_select={on_region_select} />
                                    </div>
                                }

                                if let Some(region) = (*selected_region).clone() {
                                    <>
                                    <div id="dashboardContainer">
                                        <CostDashboard region={region} />
                                    </div>
                                    <div id="querySection" class="flex-column-gap">
                                        <textarea
                                            id="question"
                                            placeholder="Ask about your EC2 instances, S3 buckets or RDS databases"
                                            value={(*aws_question).clone()}
                                            oninput={bind_textarea(&aws_question)}
                                        />
                                        <Button onclick={on_aws_analyze} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                            {"Ask"}
                                        </Button>
                                    </div>
                                    <div id="logsSection" class="flex-column-gap">
                                        <Button onclick={on_show_logs} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                            {"Show Logs"}
                                        </Button>
                                        if !logs_text.is_empty() {
                                            <>
                                            <textarea id="logsArea" readonly={true} value={(*logs_text).clone()} />
                                            <Button onclick={on_summarize_logs} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                                {"Summarize Logs"}
                                            </Button>
                                            </>
                                        }
                                    </div>
                                    </>
                                }
                            </div>
                        },
                        Provider::Gcp => html! {
                            <div id="gcp-content" class="flex-column-gap">
                                <Button onclick={on_gcp_connect} disabled={is_busy} variant={ButtonVariant::Primary} block={true}>
                                    {"Connect Google Cloud"}
                                </Button>

                                if *gcp_connected {
                                    <div class="project-section">
                                        <RecentSelector category={Category::GcpProjects} on_select={on_project_select} />
                                    </div>
                                }

                                if selected_project.is_some() {
                                    <div id="gcpQuerySection" class="flex-column-gap">
                                        <textarea
                                            id="questionGcp"
                                            placeholder="Ask about your Compute Engine VMs"
                                            value={(*gcp_question).clone()}
                                            oninput={bind_textarea(&gcp_question)}
                                        />
                                        <Button onclick={on_gcp_analyze} disabled={is_busy} variant={ButtonVariant::Secondary} block={true}>
                                            {"Ask"}
                                        </Button>
                                    </div>
                                }
                            </div>
                        },
                    }}
                </div>

                if let Some(msg) = (*message).clone() {
                    <ResultMessage message={msg.text} kind={msg.kind} />
                }

                <p class="footer-popup">
                    {format!("Cloud Scout v{}", config.env.version)}
                </p>
            </div>
        </ContextProvider<Rc<AppConfig>>>
    }
}

// Helper functions

/// Check readiness and the question text before any API call is made
fn prepare_analysis(provider: Provider, ready: bool, question: &str) -> Result<String, QueryError> {
    if !ready {
        return Err(QueryError::NotReady(provider));
    }
    query::validate_question(question).map(str::to_string)
}

async fn run_aws_analysis(config: &AppConfig, question: &str) -> Result<String, String> {
    let mut report = Provider::Aws.report_header().to_string();

    for capability in query::match_capabilities(Provider::Aws, question) {
        let section = match capability {
            Capability::Ec2Instances => {
                let json = bridge::aws_describe_instances(&config.aws.ec2_api_version).await?;
                query::format_ec2_report(&json)
            }
            Capability::S3Buckets => {
                let json = bridge::aws_list_buckets().await?;
                match query::parse_buckets(&json) {
                    Ok(buckets) => {
                        let mut with_regions = Vec::with_capacity(buckets.len());
                        for bucket in buckets {
                            let region = match bridge::aws_get_bucket_location(&bucket.name).await {
                                Ok(location) => query::bucket_region(&location),
                                Err(_) => query::UNKNOWN_REGION.to_string(),
                            };
                            with_regions.push((bucket.name, region));
                        }
                        Ok(query::format_s3_report(&with_regions))
                    }
                    Err(e) => Err(e),
                }
            }
            Capability::RdsDatabases => {
                let json = bridge::aws_describe_db_instances().await?;
                query::format_rds_report(&json)
            }
            Capability::ComputeInstances => continue,
        };

        report.push_str(&section.map_err(|e| e.to_string())?);
    }

    Ok(report)
}

async fn run_gcp_analysis(project: &str, question: &str) -> Result<String, String> {
    let mut report = Provider::Gcp.report_header().to_string();
    let token = bridge::gcp_auth_token()
        .await
        .map_err(|e| format!("{}: {}", ErrorCode::GcpAuthentication.message(), e))?;

    for capability in query::match_capabilities(Provider::Gcp, question) {
        if capability != Capability::ComputeInstances {
            continue;
        }
        let url = query::compute_instances_url(project).map_err(|e| e.to_string())?;
        let json = bridge::fetch_json(url.as_str(), &token).await?;
        report.push_str(&query::format_compute_report(&json).map_err(|e| e.to_string())?);
    }

    Ok(report)
}

/// Check access with a one-item listing first so a permission problem gets its own message
async fn fetch_log_groups(config: &AppConfig) -> Result<String, String> {
    let api_version = &config.aws.cloudwatch_api_version;
    if let Err(e) = bridge::aws_describe_log_groups(api_version, Some(1)).await {
        logs::check_access(LogsAction::Show, e.code.as_deref()).map_err(|e| e.to_string())?;
    }

    let json = bridge::aws_describe_log_groups(api_version, None)
        .await
        .map_err(|e| format!("Error accessing logs: {}", e))?;
    logs::format_log_groups(&json, locale_timestamp).map_err(|e| format!("Error accessing logs: {}", e))
}

async fn summarize_log_groups(config: &AppConfig, logs_text: &str) -> Result<&'static str, String> {
    if let Err(e) = bridge::aws_describe_log_groups(&config.aws.cloudwatch_api_version, Some(1)).await {
        logs::check_access(LogsAction::Summarize, e.code.as_deref()).map_err(|e| e.to_string())?;
    }
    logs::summarize(logs_text).map_err(|e| e.to_string())
}

fn locale_timestamp(ms: f64) -> String {
    js_sys::Date::new(&JsValue::from_f64(ms))
        .to_locale_string("default", &JsValue::UNDEFINED)
        .into()
}
