//! 文档根元素上的 `data-theme` 属性

use maxi_client::controller::Theme;
use tracing::warn;

const THEME_ATTR: &str = "data-theme";

fn root() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.document_element()
}

/// 当前生效的主题
pub fn current() -> Theme {
    let value = root().and_then(|el| el.get_attribute(THEME_ATTR));
    Theme::parse(value.as_deref())
}

pub fn apply(theme: Theme) {
    let Some(root) = root() else {
        return;
    };
    if let Err(e) = root.set_attribute(THEME_ATTR, theme.as_str()) {
        warn!(error = ?e, "failed to set theme");
    }
}
