// Headless display for tests: scripted events, recorded frames.

use crate::display::{Display, DisplayEvent};
use crate::error::Error;
use crate::memory::TextureMemory;
use crate::types::FrameBuffer;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub type DropLog = Rc<RefCell<Vec<&'static str>>>;

pub struct HeadlessDisplay {
    events: VecDeque<DisplayEvent>,
    frames: Vec<FrameBuffer>,
    /// Report `CloseRequested` once this many frames were presented.
    close_after: Option<usize>,
    memory: TextureMemory,
    fail_present: bool,
    drop_log: Option<DropLog>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            frames: Vec::new(),
            close_after: None,
            memory: TextureMemory::unbounded(),
            fail_present: false,
            drop_log: None,
        }
    }

    pub fn close_after(mut self, presents: usize) -> Self {
        self.close_after = Some(presents);
        self
    }

    pub fn with_memory(mut self, memory: TextureMemory) -> Self {
        self.memory = memory;
        self
    }

    pub fn failing_present(mut self) -> Self {
        self.fail_present = true;
        self
    }

    pub fn log_drop_to(mut self, log: DropLog) -> Self {
        self.drop_log = Some(log);
        self
    }

    pub fn push_event(&mut self, event: DisplayEvent) {
        self.events.push_back(event);
    }

    pub fn frames(&self) -> &[FrameBuffer] {
        &self.frames
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for HeadlessDisplay {
    fn poll_event(&mut self) -> Option<DisplayEvent> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }
        match self.close_after {
            Some(limit) if self.frames.len() >= limit => Some(DisplayEvent::CloseRequested),
            _ => None,
        }
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Error> {
        if self.fail_present {
            return Err(Error::WindowUpdate("headless surface lost".into()));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn texture_memory(&self) -> TextureMemory {
        self.memory
    }
}

impl Drop for HeadlessDisplay {
    fn drop(&mut self) {
        if let Some(log) = &self.drop_log {
            log.borrow_mut().push("display");
        }
    }
}
