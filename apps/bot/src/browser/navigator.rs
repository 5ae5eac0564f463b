//! Navigation stack and page cursor
//!
//! All operations here are pure and in-memory. Invalid requests (paging
//! past the bounds, popping an empty stack, a title that matches nothing)
//! degrade to a no-op or a `None`/`false` return; no operation fails with
//! an error, so the stack is always in a valid, inspectable state.

use tracing::debug;

use super::frame::{BrowseMode, Frame, Titled};

/// Page position applied to whatever frame is current
///
/// One cursor per stack, not per frame: any frame change resets the page
/// to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_number: usize,
    page_size: usize,
}

impl PageCursor {
    /// Create a cursor at page 1; a zero page size is clamped to 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.max(1),
        }
    }

    /// Current page number (1-based)
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `total` items
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Advance one page; rejected past the last page
    pub fn advance(&mut self, total: usize) -> bool {
        if self.page_number < self.page_count(total) {
            self.page_number += 1;
            true
        } else {
            false
        }
    }

    /// Retreat one page; rejected below page 1
    pub fn retreat(&mut self) -> bool {
        if self.page_number > 1 {
            self.page_number -= 1;
            true
        } else {
            false
        }
    }

    /// Back to page 1, unconditionally
    pub fn reset(&mut self) {
        self.page_number = 1;
    }

    /// The slice of `items` visible on the current page
    ///
    /// Returns the trailing partial page at the end, and an empty slice
    /// when the page number is stale and out of range; no validation here.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page_number - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// The browsing stack: push/pop history of frames plus the page cursor
/// and the mode slot
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Frame>,
    cursor: PageCursor,
    mode: BrowseMode,
}

impl Navigator {
    /// Create an empty navigator with the given page size
    pub fn new(page_size: usize) -> Self {
        Self {
            stack: Vec::new(),
            cursor: PageCursor::new(page_size),
            mode: BrowseMode::Idle,
        }
    }

    /// Push a frame, making it current and resetting the page to 1
    ///
    /// Pushing a frame value-equal to the current top is a no-op, so a
    /// duplicated inbound event cannot stack the same screen twice.
    /// Always succeeds.
    pub fn push(&mut self, frame: Frame) {
        if self.stack.last() == Some(&frame) {
            debug!(kind = frame.kind(), "ignoring idempotent push");
            return;
        }
        debug!(kind = frame.kind(), depth = self.stack.len() + 1, "push frame");
        self.stack.push(frame);
        self.cursor.reset();
    }

    /// Remove and return the current frame
    ///
    /// Returns `None` on an empty stack without error. The previous
    /// frame's page is not restored; the cursor resets to page 1.
    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.stack.pop();
        if let Some(frame) = &frame {
            debug!(kind = frame.kind(), depth = self.stack.len(), "pop frame");
        }
        self.cursor.reset();
        frame
    }

    /// The current frame, if any
    pub fn current(&self) -> Option<&Frame> {
        self.stack.last()
    }

    /// Number of frames on the stack
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether nothing is being browsed
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Clear the stack, reset the page, and return to idle
    pub fn clear(&mut self) {
        self.stack.clear();
        self.cursor.reset();
        self.mode = BrowseMode::Idle;
    }

    /// Advance the page over a frame of `total_items` items
    ///
    /// Returns `false` on an empty stack or when already on the last page.
    pub fn page_forward(&mut self, total_items: usize) -> bool {
        if self.stack.is_empty() {
            return false;
        }
        self.cursor.advance(total_items)
    }

    /// Retreat the page; `false` when already on page 1
    pub fn page_back(&mut self) -> bool {
        self.cursor.retreat()
    }

    /// Back to page 1, unconditionally
    pub fn reset_page(&mut self) {
        self.cursor.reset();
    }

    /// The page cursor
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Store how the current frame was reached
    pub fn set_mode(&mut self, mode: BrowseMode) {
        self.mode = mode;
    }

    /// How the current frame was reached
    pub fn mode(&self) -> BrowseMode {
        self.mode
    }
}

/// First exact (case-sensitive) title match in `items`
///
/// `None` is the normal "nothing matched" outcome, not an error. Titles
/// are assumed unique within a page; a duplicate resolves to the first
/// match.
pub fn find_by_title<'a, T: Titled>(items: &'a [T], title: &str) -> Option<&'a T> {
    items.iter().find(|item| item.title() == title)
}
