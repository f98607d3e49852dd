/// Options page: manage the site list

use crate::chrome::{ChromeStorage, ChromeTabs};
use crate::config::LauncherConfig;
use crate::session::{EMPTY_LIST_HINT, ManagementSession, SiteRow, StatusMessage};
use crate::ui::components::{SiteRowItem, StatusBanner};
use futures::lock::Mutex;
use patternfly_yew::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct OptionsProps {
    #[prop_or_default]
    pub config: LauncherConfig,
}

/// User intents, applied to the session one at a time
enum Intent {
    Load,
    BulkAdd(String),
    Edit(String, String),
    Toggle(String),
    Remove(String),
    Reorder(String, String),
    Open(String),
}

/// Everything an intent needs to run and re-render
#[derive(Clone)]
struct PageHandles {
    session: Rc<Mutex<ManagementSession<ChromeStorage>>>,
    rows: UseStateHandle<Vec<SiteRow>>,
    status: UseStateHandle<Option<StatusMessage>>,
    status_generation: Rc<RefCell<u32>>,
}

impl PageHandles {
    fn apply(&self, intent: Intent) {
        let handles = self.clone();
        spawn_local(async move {
            let mut session = handles.session.lock().await;
            let message = match intent {
                Intent::Load => session.open().await,
                Intent::BulkAdd(text) => Some(session.bulk_add(&text).await),
                Intent::Edit(site_id, text) => Some(session.edit_url(&site_id, &text).await),
                Intent::Toggle(site_id) => Some(session.toggle(&site_id).await),
                Intent::Remove(site_id) => Some(session.remove(&site_id).await),
                Intent::Reorder(moved_id, target_id) => session.reorder(&moved_id, &target_id).await,
                Intent::Open(site_id) => session.open_site(&site_id, &ChromeTabs),
            };
            handles.rows.set(session.rows());
            drop(session);

            if let Some(message) = message {
                handles.show_status(message);
            }
        });
    }

    /// Show a message, then hide it unless a newer one replaced it
    fn show_status(&self, message: StatusMessage) {
        let generation = {
            let mut current = self.status_generation.borrow_mut();
            *current += 1;
            *current
        };
        let timeout_ms = message.timeout_ms;
        self.status.set(Some(message));

        let status = self.status.clone();
        let status_generation = self.status_generation.clone();
        spawn_local(async move {
            sleep(timeout_ms).await;
            if *status_generation.borrow() == generation {
                status.set(None);
            }
        });
    }
}

#[function_component(OptionsPage)]
pub fn options_page(props: &OptionsProps) -> Html {
    let session = {
        let config = props.config.clone();
        use_memo((), move |_| {
            Mutex::new(ManagementSession::new(ChromeStorage::new(&config.storage_key), &config))
        })
    };
    let rows = use_state(Vec::<SiteRow>::new);
    let status = use_state(|| None::<StatusMessage>);
    let status_generation = use_mut_ref(|| 0u32);
    let bulk_text = use_state(String::new);
    let dragged = use_state(|| None::<String>);
    let drag_over = use_state(|| None::<String>);

    let handles = PageHandles {
        session: session.clone(),
        rows: rows.clone(),
        status: status.clone(),
        status_generation,
    };

    // Load the list on mount
    {
        let handles = handles.clone();
        use_effect_with((), move |_| {
            handles.apply(Intent::Load);
            || ()
        });
    }

    let submit_bulk = {
        let handles = handles.clone();
        let bulk_text = bulk_text.clone();
        Callback::from(move |_: ()| {
            let text = (*bulk_text).clone();
            bulk_text.set(String::new());
            handles.apply(Intent::BulkAdd(text));
        })
    };

    let on_bulk_input = {
        let bulk_text = bulk_text.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlTextAreaElement>() {
                bulk_text.set(input.value());
            }
        })
    };

    let on_bulk_keydown = {
        let submit_bulk = submit_bulk.clone();
        Callback::from(move |e: KeyboardEvent| {
            if (e.meta_key() || e.ctrl_key()) && e.key() == "Enter" {
                e.prevent_default();
                submit_bulk.emit(());
            }
        })
    };

    let on_bulk_click = submit_bulk.reform(|_: MouseEvent| ());

    let on_toggle = {
        let handles = handles.clone();
        Callback::from(move |site_id: String| handles.apply(Intent::Toggle(site_id)))
    };

    let on_commit = {
        let handles = handles.clone();
        Callback::from(move |(site_id, text): (String, String)| handles.apply(Intent::Edit(site_id, text)))
    };

    let on_open = {
        let handles = handles.clone();
        Callback::from(move |site_id: String| handles.apply(Intent::Open(site_id)))
    };

    let on_remove = {
        let handles = handles.clone();
        let rows = rows.clone();
        Callback::from(move |site_id: String| {
            let label = rows
                .iter()
                .find(|row| row.id == site_id)
                .map(|row| row.url.clone())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| "this empty entry".to_string());

            if confirm(&format!("Are you sure you want to remove \"{}\"?", label)) {
                handles.apply(Intent::Remove(site_id));
            }
        })
    };

    let on_drag_start = {
        let dragged = dragged.clone();
        Callback::from(move |site_id: String| dragged.set(Some(site_id)))
    };

    let on_drag_over = {
        let dragged = dragged.clone();
        let drag_over = drag_over.clone();
        Callback::from(move |site_id: String| {
            if dragged.as_deref() != Some(site_id.as_str()) {
                drag_over.set(Some(site_id));
            }
        })
    };

    let on_drop = {
        let handles = handles.clone();
        let dragged = dragged.clone();
        let drag_over = drag_over.clone();
        Callback::from(move |target_id: String| {
            drag_over.set(None);
            if let Some(moved_id) = (*dragged).clone() {
                if moved_id != target_id {
                    handles.apply(Intent::Reorder(moved_id, target_id));
                }
            }
        })
    };

    let on_drag_end = {
        let dragged = dragged.clone();
        let drag_over = drag_over.clone();
        Callback::from(move |_: ()| {
            dragged.set(None);
            drag_over.set(None);
        })
    };

    html! {
        <div class="padding-20">
            <h1 class="options-title">{"Quick Launch"}</h1>

            <div class="bulk-add">
                <textarea
                    id="bulk-urls-input"
                    rows="4"
                    placeholder="Enter URLs separated by commas, spaces or new lines"
                    value={(*bulk_text).clone()}
                    oninput={on_bulk_input}
                    onkeydown={on_bulk_keydown}
                />
                <Button onclick={on_bulk_click} variant={ButtonVariant::Primary}>
                    {"Bulk Add"}
                </Button>
            </div>

            <StatusBanner status={(*status).clone()} />

            <div id="website-list">
                if rows.is_empty() {
                    <div class="empty-list-hint">{EMPTY_LIST_HINT}</div>
                } else {
                    {for rows.iter().map(|row| html! {
                        <SiteRowItem
                            key={row.id.clone()}
                            row={row.clone()}
                            is_drag_over={drag_over.as_deref() == Some(row.id.as_str())}
                            on_toggle={on_toggle.clone()}
                            on_commit={on_commit.clone()}
                            on_open={on_open.clone()}
                            on_remove={on_remove.clone()}
                            on_drag_start={on_drag_start.clone()}
                            on_drag_over={on_drag_over.clone()}
                            on_drop={on_drop.clone()}
                            on_drag_end={on_drag_end.clone()}
                        />
                    })}
                }
            </div>
        </div>
    }
}

// Helper functions

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// setTimeout takes an i32 delay; longer ones are capped
fn timeout_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

async fn sleep(ms: u32) {
    let timeout = timeout_delay(ms);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout);
        }
    });
    let _ = JsFuture::from(promise).await;
}
