/// Reusable UI components for the options page

use crate::session::{SiteRow, StatusKind, StatusMessage};
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

const URL_PLACEHOLDER: &str = "https://example.com, file:///path/to/file, or chrome-extension://id/page.html";

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    #[prop_or_default]
    pub status: Option<StatusMessage>,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    let Some(status) = &props.status else {
        return html! {};
    };

    let alert_type = match status.kind {
        StatusKind::Success => AlertType::Success,
        StatusKind::Info => AlertType::Info,
        StatusKind::Error => AlertType::Danger,
    };

    html! {
        <div class="message-top-margin">
            <Alert r#type={alert_type} title={status.text.clone()} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SiteRowItemProps {
    pub row: SiteRow,
    #[prop_or(false)]
    pub is_drag_over: bool,
    pub on_toggle: Callback<String>,
    /// (site id, raw input text)
    pub on_commit: Callback<(String, String)>,
    pub on_open: Callback<String>,
    pub on_remove: Callback<String>,
    pub on_drag_start: Callback<String>,
    pub on_drag_over: Callback<String>,
    pub on_drop: Callback<String>,
    pub on_drag_end: Callback<()>,
}

#[function_component(SiteRowItem)]
pub fn site_row_item(props: &SiteRowItemProps) -> Html {
    let row = &props.row;

    let on_change = {
        let on_toggle = props.on_toggle.clone();
        let site_id = row.id.clone();
        Callback::from(move |_: Event| on_toggle.emit(site_id.clone()))
    };

    // Save URL on Cmd/Ctrl+Enter
    let on_keydown = {
        let on_commit = props.on_commit.clone();
        let site_id = row.id.clone();
        Callback::from(move |e: KeyboardEvent| {
            if (e.meta_key() || e.ctrl_key()) && e.key() == "Enter" {
                e.prevent_default();
                if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                    on_commit.emit((site_id.clone(), input.value()));
                }
            }
        })
    };

    let on_drag_start = {
        let on_drag_start = props.on_drag_start.clone();
        let site_id = row.id.clone();
        Callback::from(move |e: DragEvent| {
            if let Some(transfer) = e.data_transfer() {
                transfer.set_effect_allowed("move");
                let _ = transfer.set_data("text/plain", &site_id);
            }
            on_drag_start.emit(site_id.clone());
        })
    };

    let on_drag_over = {
        let on_drag_over = props.on_drag_over.clone();
        let site_id = row.id.clone();
        Callback::from(move |e: DragEvent| {
            // Required to allow dropping
            e.prevent_default();
            if let Some(transfer) = e.data_transfer() {
                transfer.set_drop_effect("move");
            }
            on_drag_over.emit(site_id.clone());
        })
    };

    let on_drop = {
        let on_drop = props.on_drop.clone();
        let site_id = row.id.clone();
        Callback::from(move |e: DragEvent| {
            e.prevent_default();
            e.stop_propagation();
            on_drop.emit(site_id.clone());
        })
    };

    let on_drag_end = props.on_drag_end.reform(|_: DragEvent| ());
    let on_open = props.on_open.reform({
        let site_id = row.id.clone();
        move |_: MouseEvent| site_id.clone()
    });
    let on_remove = props.on_remove.reform({
        let site_id = row.id.clone();
        move |_: MouseEvent| site_id.clone()
    });

    let class = if props.is_drag_over { "list-item drag-over-item" } else { "list-item" };

    html! {
        <div
            class={class}
            draggable="true"
            ondragstart={on_drag_start}
            ondragover={on_drag_over}
            ondrop={on_drop}
            ondragend={on_drag_end}
        >
            <span class="drag-handle">{"☰"}</span>
            <div class="list-item-select-cell">
                <input
                    type="checkbox"
                    class="website-checkbox"
                    checked={row.selected}
                    onchange={on_change}
                />
            </div>
            <input
                type="text"
                class="website-url-input"
                value={row.url.clone()}
                placeholder={URL_PLACEHOLDER}
                onkeydown={on_keydown}
            />
            <div class="actions-container">
                <span title={row.open_title.clone()}>
                    <Button onclick={on_open} disabled={!row.can_open} variant={ButtonVariant::Secondary}>
                        {"Open"}
                    </Button>
                </span>
                <Button onclick={on_remove} variant={ButtonVariant::Danger}>
                    {"Remove"}
                </Button>
            </div>
        </div>
    }
}
