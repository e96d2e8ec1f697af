/// Reusable UI components

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MetricCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub subtitle: AttrValue,
    #[prop_or_default]
    pub trend: Option<f64>,
}

#[function_component(MetricCard)]
pub fn metric_card(props: &MetricCardProps) -> Html {
    html! {
        <div class="metric-card">
            <div class="metric-title">{&props.title}</div>
            <div class="metric-value">{&props.value}</div>
            if let Some(change) = props.trend {
                <div class={crate::dashboard::trend_class(change)}>
                    {crate::dashboard::format_trend(change)}
                </div>
            }
            <div class="metric-subtitle">{&props.subtitle}</div>
        </div>
    }
}

#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub enum MessageKind {
    #[default]
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "result success",
            MessageKind::Error => "result error",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultMessageProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub kind: MessageKind,
}

/// Multi-line result area below the provider panels
#[function_component(ResultMessage)]
pub fn result_message(props: &ResultMessageProps) -> Html {
    html! {
        <pre id="result" class={props.kind.class()}>{&props.message}</pre>
    }
}
