//! View model of the watch page.
//!
//! Everything the template prints is computed here so the rendering rules can
//! be tested without HTML.

use serde::Serialize;
use url::form_urlencoded;

use crate::domain::entities::{
    ButtonKind, CounterConfig, FloatingButton, PostBundle, RedirectBehavior, ScriptConfig,
    ScriptPosition,
};
use crate::player::storage::{MARKER_COOKIE, RETURN_TRIP_KEY, TIMESTAMP_KEY};

const COUNTER_ENDPOINT: &str = "//whos.amung.us/pingjs/";
const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";

/// A floating button ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub id: String,
    pub kind: &'static str,
    pub title: &'static str,
    pub href: String,
    pub color: &'static str,
    pub icon: &'static str,
    pub is_share: bool,
}

/// Injected scripts grouped by where they go.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScriptPlan {
    pub head: Vec<String>,
    pub body_start: Vec<String>,
    pub body_end: Vec<String>,
}

/// Data the page script reads on startup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Bootstrap<'a> {
    post_id: i64,
    video_url: &'a str,
    is_hls: bool,
    events_url: &'a str,
    share_fallback: &'a str,
    title: &'a str,
    /// Open a blank tab synchronously on the play click; `behind` tab effects
    /// reuse it.
    preopen_tab: bool,
    storage_keys: StorageKeys,
}

#[derive(Debug, Serialize)]
struct StorageKeys {
    cookie: [&'static str; 1],
    durable: [&'static str; 1],
    session: [&'static str; 1],
}

/// Everything the watch template prints.
#[derive(Debug, Clone)]
pub struct WatchPage {
    pub post_id: i64,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub is_hls: bool,
    pub buttons: Vec<ButtonView>,
    pub counter_pixel: Option<String>,
    pub scripts: ScriptPlan,
    pub bootstrap: String,
}

impl WatchPage {
    /// Builds the page for `bundle` served at `page_url`.
    pub fn build(bundle: &PostBundle, page_url: &str) -> Self {
        let post = &bundle.post;
        let settings = &bundle.settings;
        let title = post.display_title().to_string();
        let share_fallback = facebook_share_url(page_url);

        let preopen_tab = settings.redirect.behavior == RedirectBehavior::Behind
            && settings.redirect.target().is_some();

        let bootstrap = Bootstrap {
            post_id: post.id,
            video_url: &post.video_url,
            is_hls: post.is_hls,
            events_url: "/api/player/events",
            share_fallback: &share_fallback,
            title: &title,
            preopen_tab,
            storage_keys: StorageKeys {
                cookie: [MARKER_COOKIE],
                durable: [TIMESTAMP_KEY],
                session: [RETURN_TRIP_KEY],
            },
        };

        Self {
            post_id: post.id,
            video_url: post.video_url.clone(),
            thumbnail_url: post.thumbnail_url.clone(),
            is_hls: post.is_hls,
            buttons: floating_buttons(&settings.floating_buttons),
            counter_pixel: counter_pixel_url(&settings.counter, &title, page_url),
            scripts: script_plan(&settings.scripts),
            bootstrap: script_safe_json(&bootstrap),
            title,
        }
    }
}

/// Enabled buttons in display order: telegram, whatsapp, facebook, share.
pub fn floating_buttons(buttons: &[FloatingButton]) -> Vec<ButtonView> {
    let mut enabled: Vec<&FloatingButton> = buttons.iter().filter(|b| b.enabled).collect();
    enabled.sort_by_key(|b| b.kind.rank());

    enabled
        .into_iter()
        .map(|b| {
            let is_share = b.kind == ButtonKind::Share;
            let href = if is_share || b.url.trim().is_empty() {
                "#".to_string()
            } else {
                b.url.clone()
            };
            let (title, color, icon) = button_style(b.kind);

            ButtonView {
                id: b.id.clone(),
                kind: b.kind.as_str(),
                title,
                href,
                color,
                icon,
                is_share,
            }
        })
        .collect()
}

fn button_style(kind: ButtonKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        ButtonKind::Telegram => ("Telegram", "#0088cc", TELEGRAM_ICON),
        ButtonKind::Whatsapp => ("Whatsapp", "#25D366", WHATSAPP_ICON),
        ButtonKind::Facebook => ("Facebook", "#1877F2", FACEBOOK_ICON),
        ButtonKind::Share => ("Compartir", "#0088cc", SHARE_ICON),
    }
}

/// whos.amung.us pixel URL, or `None` when the counter is off or has no key.
///
/// The page URL is reported without its query string.
pub fn counter_pixel_url(counter: &CounterConfig, title: &str, page_url: &str) -> Option<String> {
    let key = counter.counter_key.trim();
    if !counter.enabled || key.is_empty() {
        return None;
    }

    let title = if title.trim().is_empty() { "Video" } else { title };
    let without_query = page_url.split(['?', '#']).next().unwrap_or(page_url);

    Some(format!(
        "{COUNTER_ENDPOINT}?k={};&t={}&u={}",
        encode(key),
        encode(title),
        encode(without_query)
    ))
}

/// Facebook sharer link used when the Web Share API is unavailable or fails.
pub fn facebook_share_url(page_url: &str) -> String {
    format!("{FACEBOOK_SHARER}?u={}", encode(page_url))
}

/// Splits enabled, non-empty scripts by position.
///
/// Content containing a `<script` tag is inserted as written; plain code is
/// wrapped in a `<script id="custom-script-<id>">` element.
pub fn script_plan(scripts: &[ScriptConfig]) -> ScriptPlan {
    let mut plan = ScriptPlan::default();

    for script in scripts.iter().filter(|s| s.enabled) {
        let content = script.content.trim();
        if content.is_empty() {
            continue;
        }

        let html = if content.contains("<script") {
            content.to_string()
        } else {
            format!(
                "<script id=\"custom-script-{}\">{}</script>",
                attr_safe(&script.id),
                content.replace("</script", "<\\/script")
            )
        };

        match script.position {
            ScriptPosition::Head => plan.head.push(html),
            ScriptPosition::BodyStart => plan.body_start.push(html),
            ScriptPosition::BodyEnd => plan.body_end.push(html),
        }
    }

    plan
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn attr_safe(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

/// JSON that can sit inside a `<script>` element.
fn script_safe_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
}

const TELEGRAM_ICON: &str = "M11.944 0A12 12 0 0 0 0 12a12 12 0 0 0 12 12 12 12 0 0 0 12-12A12 12 0 0 0 12 0a12 12 0 0 0-.056 0zm4.962 7.224c.1-.002.321.023.465.14a.506.506 0 0 1 .171.325c.016.093.036.306.02.472-.18 1.898-.962 6.502-1.36 8.627-.168.9-.499 1.201-.82 1.23-.696.065-1.225-.46-1.9-.902-1.056-.693-1.653-1.124-2.678-1.8-1.185-.78-.417-1.21.258-1.91.177-.184 3.247-2.977 3.307-3.23.007-.032.014-.15-.056-.212s-.174-.041-.249-.024c-.106.024-1.793 1.14-5.061 3.345-.48.33-.913.49-1.302.48-.428-.008-1.252-.241-1.865-.44-.752-.245-1.349-.374-1.297-.789.027-.216.325-.437.893-.663 3.498-1.524 5.83-2.529 6.998-3.014 3.332-1.386 4.025-1.627 4.476-1.635z";
const WHATSAPP_ICON: &str = "M17.472 14.382c-.297-.149-1.758-.867-2.03-.967-.273-.099-.471-.148-.67.15-.197.297-.767.966-.94 1.164-.173.199-.347.223-.644.075-.297-.15-1.255-.463-2.39-1.475-.883-.788-1.48-1.761-1.653-2.059-.173-.297-.018-.458.13-.606.134-.133.298-.347.446-.52.149-.174.198-.298.298-.497.099-.198.05-.371-.025-.52-.075-.149-.669-1.612-.916-2.207-.242-.579-.487-.5-.669-.51-.173-.008-.371-.01-.57-.01-.198 0-.52.074-.792.372-.272.297-1.04 1.016-1.04 2.479 0 1.462 1.065 2.875 1.213 3.074.149.198 2.096 3.2 5.077 4.487.709.306 1.262.489 1.694.625.712.227 1.36.195 1.871.118.571-.085 1.758-.719 2.006-1.413.248-.694.248-1.289.173-1.413-.074-.124-.272-.198-.57-.347m-5.421 7.403h-.004a9.87 9.87 0 01-5.031-1.378l-.361-.214-3.741.982.998-3.648-.235-.374a9.86 9.86 0 01-1.51-5.26c.001-5.45 4.436-9.884 9.888-9.884 2.64 0 5.122 1.03 6.988 2.898a9.825 9.825 0 012.893 6.994c-.003 5.45-4.437 9.884-9.885 9.884m8.413-18.297A11.815 11.815 0 0012.05 0C5.495 0 .16 5.335.157 11.892c0 2.096.547 4.142 1.588 5.945L.057 24l6.305-1.654a11.882 11.882 0 005.683 1.448h.005c6.554 0 11.89-5.335 11.893-11.893a11.821 11.821 0 00-3.48-8.413z";
const FACEBOOK_ICON: &str = "M24 12.073c0-6.627-5.373-12-12-12s-12 5.373-12 12c0 5.99 4.388 10.954 10.125 11.854v-8.385H7.078v-3.47h3.047V9.43c0-3.007 1.792-4.669 4.533-4.669 1.312 0 2.686.235 2.686.235v2.953H15.83c-1.491 0-1.956.925-1.956 1.874v2.25h3.328l-.532 3.47h-2.796v8.385C19.612 23.027 24 18.062 24 12.073z";
const SHARE_ICON: &str = "M18 16.08c-.76 0-1.44.3-1.96.77L8.91 12.7c.05-.23.09-.46.09-.7s-.04-.47-.09-.7l7.05-4.11c.54.5 1.25.81 2.04.81 1.66 0 3-1.34 3-3s-1.34-3-3-3-3 1.34-3 3c0 .24.04.47.09.7L8.04 9.81C7.5 9.31 6.79 9 6 9c-1.66 0-3 1.34-3 3s1.34 3 3 3c.79 0 1.5-.31 2.04-.81l7.12 4.16c-.05.21-.08.43-.08.65 0 1.61 1.31 2.92 2.92 2.92s2.92-1.31 2.92-2.92-1.31-2.92-2.92-2.92z";
