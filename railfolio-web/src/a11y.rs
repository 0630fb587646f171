/// Element id of the polite live region announcements are written to.
pub const STATUS_REGION_ID: &str = "journey-status";

/// Focus ring and `.sr-only` rules, inlined at the top of the page.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #EC1B2D;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Replace the live region text; silently skipped before the page mounts.
pub fn set_status(text: &str) {
    if let Some(region) = crate::dom::element_by_id(STATUS_REGION_ID) {
        region.set_text_content(Some(text));
    }
}
