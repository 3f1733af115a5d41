//! HTML markup for cards, skeletons and pagination.

use std::fmt::Write;

use coursegrid_sdk::types::{Item, ListingResponse, PageCursor};

use super::pager::{WINDOW_SIZE, count_line, page_window};
use super::{Frame, GridRenderer, ViewState};

/// Shown in place of cards when nothing matched.
pub const NO_RESULTS: &str = "No courses found.";

/// Prefix of the error message.
pub const ERROR_PREFIX: &str = "Unable to load courses.";

/// Renders the grid as HTML strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGridRenderer;

impl HtmlGridRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Skeleton placeholders, hidden from assistive technology.
    pub fn skeletons(&self, count: u32) -> String {
        let mut html = String::new();
        for _ in 0..count {
            html.push_str(concat!(
                r#"<article class="grid-card grid-skeleton" aria-hidden="true">"#,
                r#"<div class="grid-thumb"><div class="grid-skel-rect"></div></div>"#,
                r#"<div class="grid-card-body">"#,
                r#"<div class="grid-skel-line short"></div>"#,
                r#"<div class="grid-skel-line"></div>"#,
                r#"<div class="grid-skel-line"></div>"#,
                "</div></article>",
            ));
        }
        html
    }

    /// One course card.
    pub fn card(&self, item: &Item) -> String {
        let title = escape_html(&item.title);
        let thumb = match &item.thumbnail {
            Some(src) => format!(
                r#"<img src="{}" alt="{title}" loading="lazy">"#,
                escape_html(src)
            ),
            None => r#"<div class="grid-thumb-empty"></div>"#.to_string(),
        };
        let badges = item
            .categories
            .iter()
            .map(|c| format!(r#"<span class="grid-badge">{}</span>"#, escape_html(c)))
            .collect::<Vec<_>>()
            .join(" ");
        let excerpt = if item.excerpt.is_empty() {
            String::new()
        } else {
            format!(r#"<p class="grid-excerpt">{}</p>"#, escape_html(&item.excerpt))
        };

        format!(
            concat!(
                r#"<article class="grid-card" aria-labelledby="course-{id}-title">"#,
                r#"<a class="grid-card-link" href="{href}">"#,
                r#"<div class="grid-thumb">{thumb}</div>"#,
                r#"<div class="grid-card-body">"#,
                r#"<h3 id="course-{id}-title" class="grid-card-title">{title}</h3>"#,
                r#"<div class="grid-meta">{badges}</div>"#,
                "{excerpt}",
                r#"<div class="grid-card-footer"><span class="grid-cta">View Course &rarr;</span></div>"#,
                "</div></a></article>",
            ),
            id = item.id,
            href = escape_html(&item.permalink),
            thumb = thumb,
            title = title,
            badges = badges,
            excerpt = excerpt,
        )
    }

    /// Previous, page-number window and next buttons; empty for one page.
    pub fn pagination(&self, page: u32, pages: u32) -> String {
        if pages <= 1 {
            return String::new();
        }
        // An echoed page past the end still marks a button inside the window.
        let page = page.clamp(1, pages);
        let mut html = String::new();

        let prev = page.saturating_sub(1).clamp(1, pages);
        let _ = write!(
            html,
            r#"<button type="button" class="grid-page-btn grid-prev" data-page="{prev}" aria-label="Previous page"{}>&lsaquo; Prev</button>"#,
            disabled(page <= 1)
        );

        for n in page_window(page, pages, WINDOW_SIZE) {
            if n == page {
                let _ = write!(
                    html,
                    r#"<button type="button" class="grid-page-btn active" data-page="{n}" aria-current="page">{n}</button>"#
                );
            } else {
                let _ = write!(
                    html,
                    r#"<button type="button" class="grid-page-btn" data-page="{n}">{n}</button>"#
                );
            }
        }

        let next = page.saturating_add(1).clamp(1, pages);
        let _ = write!(
            html,
            r#"<button type="button" class="grid-page-btn grid-next" data-page="{next}" aria-label="Next page"{}>Next &rsaquo;</button>"#,
            disabled(page >= pages)
        );
        html
    }

    fn loaded(&self, response: &ListingResponse, requested: PageCursor) -> Frame {
        let per_page = if response.per_page == 0 {
            requested.per_page
        } else {
            response.per_page
        };
        let page = if response.page == 0 {
            requested.page
        } else {
            response.page
        };

        let grid = if response.items.is_empty() {
            format!(r#"<div class="grid-no-results">{NO_RESULTS}</div>"#)
        } else {
            response.items.iter().map(|item| self.card(item)).collect()
        };

        Frame {
            grid: Some(grid),
            count: Some(count_line(response.total, per_page, page)),
            pagination: Some(self.pagination(page, response.pages)),
        }
    }
}

fn disabled(yes: bool) -> &'static str {
    if yes { " disabled" } else { "" }
}

impl GridRenderer for HtmlGridRenderer {
    fn render(&self, state: &ViewState) -> Frame {
        match state {
            ViewState::Loading { count } => Frame {
                grid: Some(self.skeletons(*count)),
                count: None,
                pagination: None,
            },
            ViewState::Loaded {
                response,
                requested,
            } => self.loaded(response, *requested),
            ViewState::Failed { message } => Frame {
                grid: Some(format!(
                    r#"<div class="grid-error" role="alert">{ERROR_PREFIX} {}</div>"#,
                    escape_html(message)
                )),
                count: Some(String::new()),
                pagination: Some(String::new()),
            },
        }
    }
}

/// Escape text for HTML content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
