//! Page-number strip, range label and page-size selector.

use leptos::prelude::*;
use records::paging::{PageItem, PageSize};

use crate::state::notifications::PageView;

fn range_label(page: &PageView) -> String {
    match page.range {
        Some((first, last)) => format!("{first}\u{2013}{last} of {}", page.filtered_total),
        None => "0 of 0".to_owned(),
    }
}

#[component]
pub fn PaginationBar(
    page: Memo<PageView>,
    on_page: Callback<usize>,
    on_size: Callback<PageSize>,
    page_size: Signal<PageSize>,
) -> impl IntoView {
    let on_size_change = move |ev: leptos::ev::Event| {
        let raw = event_target_value(&ev);
        if let Some(size) = raw.parse::<usize>().ok().and_then(PageSize::from_count) {
            on_size.run(size);
        }
    };

    view! {
        <div class="pagination-bar">
            <span class="pagination-bar__range">{move || range_label(&page.get())}</span>
            <div class="pagination-bar__pages">
                <button
                    class="btn pagination-bar__prev"
                    disabled=move || !page.get().has_prev
                    on:click=move |_| on_page.run(page.get_untracked().page.saturating_sub(1))
                >
                    "Previous"
                </button>
                {move || {
                    let current = page.get().page;
                    page.get()
                        .items
                        .into_iter()
                        .map(|item| match item {
                            PageItem::Page(p) => {
                                let is_current = p == current;
                                view! {
                                    <button
                                        class="btn pagination-bar__page"
                                        class:pagination-bar__page--current=is_current
                                        on:click=move |_| on_page.run(p)
                                    >
                                        {p}
                                    </button>
                                }
                                    .into_any()
                            }
                            PageItem::Ellipsis => {
                                view! { <span class="pagination-bar__ellipsis">"..."</span> }.into_any()
                            }
                        })
                        .collect::<Vec<_>>()
                }}
                <button
                    class="btn pagination-bar__next"
                    disabled=move || !page.get().has_next
                    on:click=move |_| on_page.run(page.get_untracked().page + 1)
                >
                    "Next"
                </button>
            </div>
            <select class="pagination-bar__size" on:change=on_size_change>
                {PageSize::ALL
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value=size.get().to_string() selected=move || page_size.get() == size>
                                {size.get()}
                                " / page"
                            </option>
                        }
                    })
                    .collect::<Vec<_>>()}
            </select>
        </div>
    }
}
