//! Windowed page-button controller.
//!
//! A fixed-size group of page buttons slides over the page range. The
//! controller owns the position; callers only feed it clicks and new totals
//! and receive the offset to fetch through the `on_page_change` callback.

use serde::Serialize;

use crate::DEFAULT_GROUP_SIZE;
use crate::services::listing::total_pages;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    pub limit: usize,
    pub offset: usize,
    /// 1-based active page.
    pub current_index: usize,
    /// First page button of the visible group.
    pub window_start: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupDirection {
    Prev,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Side {
    Left,
    Right,
}

/// One button of the rendered control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PageControl {
    PrevPage { enabled: bool },
    PrevGroup { enabled: bool },
    Ellipsis { side: Side },
    Page { index: usize, active: bool },
    NextGroup { enabled: bool },
    NextPage { enabled: bool },
}

impl PageControl {
    /// Element id the click handler dispatches on.
    pub fn id(&self) -> String {
        match self {
            PageControl::PrevPage { .. } => "prev-page".to_string(),
            PageControl::PrevGroup { .. } => "prev-group".to_string(),
            PageControl::Ellipsis { side: Side::Left } => "ellipsis-left".to_string(),
            PageControl::Ellipsis { side: Side::Right } => "ellipsis-right".to_string(),
            PageControl::Page { index, .. } => format!("page-{index}"),
            PageControl::NextGroup { .. } => "next-group".to_string(),
            PageControl::NextPage { .. } => "next-page".to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            PageControl::PrevPage { .. } => "Prev".to_string(),
            PageControl::PrevGroup { .. } => "‹".to_string(),
            PageControl::Ellipsis { .. } => "…".to_string(),
            PageControl::Page { index, .. } => index.to_string(),
            PageControl::NextGroup { .. } => "›".to_string(),
            PageControl::NextPage { .. } => "Next".to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        match self {
            PageControl::PrevPage { enabled }
            | PageControl::PrevGroup { enabled }
            | PageControl::NextGroup { enabled }
            | PageControl::NextPage { enabled } => *enabled,
            PageControl::Ellipsis { .. } | PageControl::Page { .. } => true,
        }
    }
}

pub struct Paginator {
    limit: usize,
    total_count: usize,
    total_pages: usize,
    group_size: usize,
    current_index: usize,
    window_start: usize,
    on_page_change: Box<dyn FnMut(usize)>,
}

impl Paginator {
    pub fn new<F>(total_count: usize, limit: usize, on_page_change: F) -> Self
    where
        F: FnMut(usize) + 'static,
    {
        let limit = limit.max(1);
        Self {
            limit,
            total_count,
            total_pages: total_pages(total_count, limit),
            group_size: DEFAULT_GROUP_SIZE,
            current_index: 1,
            window_start: 1,
            on_page_change: Box::new(on_page_change),
        }
    }

    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size.max(1);
        self.anchor_window();
        self
    }

    pub fn state(&self) -> PaginationState {
        PaginationState {
            limit: self.limit,
            offset: self.offset(),
            current_index: self.current_index,
            window_start: self.window_start,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    pub fn offset(&self) -> usize {
        (self.current_index - 1) * self.limit
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    fn window_end(&self) -> usize {
        self.window_start + self.group_size - 1
    }

    /// Moves the window the minimum distance needed to show the current page.
    fn anchor_window(&mut self) {
        if self.current_index < self.window_start {
            self.window_start = self.current_index;
        } else if self.current_index > self.window_end() {
            self.window_start = self.current_index + 1 - self.group_size;
        }
    }

    fn notify(&mut self) {
        let offset = self.offset();
        (self.on_page_change)(offset);
    }

    /// Activates page `index`. Returns whether anything changed.
    pub fn select_page(&mut self, index: usize) -> bool {
        if index < 1 || index > self.total_pages || index == self.current_index {
            return false;
        }
        self.current_index = index;
        self.anchor_window();
        self.notify();
        true
    }

    /// Shifts the window by a whole group and activates its first page.
    pub fn shift_group(&mut self, direction: GroupDirection) -> bool {
        let window_start = match direction {
            GroupDirection::Next => {
                if self.window_start + self.group_size > self.total_pages {
                    return false;
                }
                self.window_start + self.group_size
            }
            GroupDirection::Prev => self.window_start.saturating_sub(self.group_size).max(1),
        };
        if window_start == self.window_start && self.current_index == window_start {
            return false;
        }
        self.window_start = window_start;
        self.current_index = window_start;
        self.notify();
        true
    }

    pub fn prev_page(&mut self) -> bool {
        self.select_page(self.current_index.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.select_page(self.current_index + 1)
    }

    /// Dispatches a click on the control with the given element id.
    pub fn handle_click(&mut self, id: &str) -> bool {
        match id {
            "prev-page" => self.prev_page(),
            "next-page" => self.next_page(),
            "prev-group" | "ellipsis-left" => self.shift_group(GroupDirection::Prev),
            "next-group" | "ellipsis-right" => self.shift_group(GroupDirection::Next),
            other => match other.strip_prefix("page-").and_then(|n| n.parse().ok()) {
                Some(index) => self.select_page(index),
                None => {
                    log::debug!("Ignoring click on unknown pagination control {other:?}");
                    false
                }
            },
        }
    }

    /// Applies a new total after a re-fetch, keeping the current page when it
    /// still exists. Does not fire the callback.
    pub fn set_total_count(&mut self, total_count: usize) {
        self.total_count = total_count;
        self.total_pages = total_pages(total_count, self.limit);
        self.current_index = self.current_index.clamp(1, self.total_pages);
        // Keep a full group visible when the page set shrinks.
        let last_full_window = self.total_pages.saturating_sub(self.group_size) + 1;
        self.window_start = self.window_start.min(last_full_window).max(1);
        self.anchor_window();
    }

    /// Returns to the first page for a new result set. Does not fire the
    /// callback.
    pub fn reset(&mut self, total_count: usize) {
        self.current_index = 1;
        self.window_start = 1;
        self.set_total_count(total_count);
    }

    pub fn render(&self) -> Vec<PageControl> {
        let mut controls = vec![
            PageControl::PrevPage {
                enabled: self.current_index > 1,
            },
            PageControl::PrevGroup {
                enabled: self.window_start > 1,
            },
        ];
        if self.window_start > 1 {
            controls.push(PageControl::Ellipsis { side: Side::Left });
        }
        let last_visible = self.window_end().min(self.total_pages);
        controls.extend((self.window_start..=last_visible).map(|index| PageControl::Page {
            index,
            active: index == self.current_index,
        }));
        if self.window_end() < self.total_pages {
            controls.push(PageControl::Ellipsis { side: Side::Right });
        }
        controls.push(PageControl::NextGroup {
            enabled: self.window_start + self.group_size <= self.total_pages,
        });
        controls.push(PageControl::NextPage {
            enabled: self.current_index < self.total_pages,
        });
        controls
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn paginator(total_count: usize, limit: usize) -> (Paginator, Rc<RefCell<Vec<usize>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let paginator = Paginator::new(total_count, limit, move |offset| sink.borrow_mut().push(offset));
        (paginator, calls)
    }

    fn visible_pages(p: &Paginator) -> Vec<usize> {
        p.render()
            .into_iter()
            .filter_map(|c| match c {
                PageControl::Page { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    fn assert_invariants(p: &Paginator) {
        let s = p.state();
        assert!(s.total_pages >= 1);
        assert!(s.current_index >= 1 && s.current_index <= s.total_pages);
        assert!(s.window_start >= 1 && s.window_start <= s.total_pages);
        assert!(s.window_start <= s.current_index);
        assert!(s.current_index <= s.window_start + p.group_size() - 1);
        assert_eq!(s.offset, (s.current_index - 1) * s.limit);
    }

    #[test]
    fn selecting_the_last_page_sets_offset() {
        let (mut p, calls) = paginator(37, 10);
        assert_eq!(p.state().total_pages, 4);
        assert!(p.select_page(4));
        assert_eq!(p.offset(), 30);
        assert_eq!(*calls.borrow(), vec![30]);
    }

    #[test]
    fn next_group_moves_window_and_page() {
        let (mut p, calls) = paginator(100, 10);
        assert_eq!(visible_pages(&p), vec![1, 2, 3, 4]);
        assert!(p.shift_group(GroupDirection::Next));
        assert_eq!(visible_pages(&p), vec![5, 6, 7, 8]);
        assert_eq!(p.state().current_index, 5);
        assert_eq!(*calls.borrow(), vec![40]);
    }

    #[test]
    fn next_group_past_the_end_is_a_no_op() {
        let (mut p, calls) = paginator(100, 10);
        p.shift_group(GroupDirection::Next);
        p.shift_group(GroupDirection::Next);
        assert_eq!(visible_pages(&p), vec![9, 10]);
        assert!(!p.shift_group(GroupDirection::Next));
        assert_eq!(p.state().window_start, 9);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn prev_group_clamps_to_first_page() {
        let (mut p, calls) = paginator(100, 10);
        p.select_page(3);
        assert!(p.shift_group(GroupDirection::Prev));
        assert_eq!(p.state().current_index, 1);
        assert!(!p.shift_group(GroupDirection::Prev));
        assert_eq!(*calls.borrow(), vec![20, 0]);
    }

    #[test]
    fn stepping_outside_the_window_slides_it() {
        let (mut p, _) = paginator(100, 10);
        for _ in 0..4 {
            p.next_page();
        }
        assert_eq!(p.state().current_index, 5);
        assert_eq!(visible_pages(&p), vec![2, 3, 4, 5]);
        p.shift_group(GroupDirection::Next);
        assert_eq!(visible_pages(&p), vec![6, 7, 8, 9]);
        p.prev_page();
        assert_eq!(p.state().current_index, 5);
        assert_eq!(p.state().window_start, 5);
    }

    #[test]
    fn ellipses_render_only_when_pages_are_hidden() {
        let (mut p, _) = paginator(100, 10);
        let ids: Vec<String> = p.render().iter().map(PageControl::id).collect();
        assert!(!ids.contains(&"ellipsis-left".to_string()));
        assert!(ids.contains(&"ellipsis-right".to_string()));

        assert!(p.handle_click("ellipsis-right"));
        let ids: Vec<String> = p.render().iter().map(PageControl::id).collect();
        assert!(ids.contains(&"ellipsis-left".to_string()));
        assert!(ids.contains(&"ellipsis-right".to_string()));

        assert!(p.handle_click("ellipsis-left"));
        assert_eq!(p.state().window_start, 1);
    }

    #[test]
    fn empty_dataset_has_a_single_page() {
        let (mut p, calls) = paginator(0, 10);
        let s = p.state();
        assert_eq!((s.total_pages, s.current_index, s.offset), (1, 1, 0));
        assert_eq!(
            p.render(),
            vec![
                PageControl::PrevPage { enabled: false },
                PageControl::PrevGroup { enabled: false },
                PageControl::Page { index: 1, active: true },
                PageControl::NextGroup { enabled: false },
                PageControl::NextPage { enabled: false },
            ]
        );
        assert!(!p.next_page());
        assert!(!p.handle_click("page-2"));
        assert!(!p.handle_click("bogus"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn shrinking_total_clamps_current_page() {
        let (mut p, calls) = paginator(100, 10);
        p.select_page(4);
        p.shift_group(GroupDirection::Next);
        p.select_page(8);
        p.set_total_count(25);
        assert_invariants(&p);
        assert_eq!(p.state().current_index, 3);
        assert_eq!(visible_pages(&p), vec![1, 2, 3]);
        assert!(p.render().iter().all(|c| *c != PageControl::Ellipsis { side: Side::Left }));
        assert_eq!(calls.borrow().len(), 3);

        p.reset(100);
        assert_eq!(p.state().current_index, 1);
        assert_eq!(visible_pages(&p), vec![1, 2, 3, 4]);
    }

    #[test]
    fn shrinking_total_keeps_a_full_window() {
        let (mut p, _) = paginator(200, 10);
        p.select_page(20);
        assert_eq!(visible_pages(&p), vec![17, 18, 19, 20]);
        p.set_total_count(60);
        assert_eq!(p.state().current_index, 6);
        assert_eq!(visible_pages(&p), vec![3, 4, 5, 6]);
        p.set_total_count(95);
        assert_eq!(visible_pages(&p), vec![3, 4, 5, 6]);
    }

    #[test]
    fn invariants_hold_for_every_reachable_state() {
        let clicks = [
            "next-page",
            "next-group",
            "page-3",
            "prev-page",
            "ellipsis-right",
            "prev-group",
            "page-11",
            "next-page",
            "ellipsis-left",
            "page-1",
        ];
        for total_count in [0, 1, 9, 10, 11, 40, 41, 95, 120] {
            for group_size in 1..=5 {
                let (p, _) = paginator(total_count, 10);
                let mut p = p.with_group_size(group_size);
                assert_invariants(&p);
                for round in 0..30 {
                    p.handle_click(clicks[(round * 7 + group_size) % clicks.len()]);
                    assert_invariants(&p);
                }
            }
        }
    }
}
