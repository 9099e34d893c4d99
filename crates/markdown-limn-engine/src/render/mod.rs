//! Serial render queue for expensive widget content (diagrams, block math).
//!
//! Rendering runs cooperatively: `request` enqueues work and hands back a
//! handle, and the host calls `pump` once per idle slice to process exactly
//! one job. Results are cached by exact source text, failures included, so
//! retyping the same block never re-renders. A handle whose widget left the
//! view is detached; its job is dropped unrendered and a late result is
//! never applied to it.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use log::{debug, warn};

/// Turns widget source text into host-displayable output (SVG markup,
/// MathML, or whatever the host embeds).
pub trait Renderer {
    fn render(&mut self, source: &str) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid source: {0}")]
    InvalidSource(String),
    #[error("renderer unavailable: {0}")]
    Unavailable(String),
}

/// Lifecycle of a single render request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Pending,
    Rendered(String),
    Failed(String),
}

#[derive(Debug)]
struct RenderSlot {
    state: RenderState,
    attached: bool,
}

/// The requester's view of one render job. Cloning shares the slot.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    slot: Rc<RefCell<RenderSlot>>,
}

impl RenderHandle {
    fn new(state: RenderState) -> Self {
        Self {
            slot: Rc::new(RefCell::new(RenderSlot {
                state,
                attached: true,
            })),
        }
    }

    pub fn state(&self) -> RenderState {
        self.slot.borrow().state.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.slot.borrow().attached
    }

    /// Marks the requesting widget as gone. A pending job for a detached
    /// handle is skipped by the queue.
    pub fn detach(&self) {
        self.slot.borrow_mut().attached = false;
    }
}

struct Job {
    source: String,
    slot: Rc<RefCell<RenderSlot>>,
}

/// One renderer plus its queue and cache. The engine keeps one service per
/// renderer kind (diagrams, math).
pub struct RenderService {
    renderer: Box<dyn Renderer>,
    cache: HashMap<String, Result<String, String>>,
    queue: VecDeque<Job>,
}

impl RenderService {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer,
            cache: HashMap::new(),
            queue: VecDeque::new(),
        }
    }

    /// Requests a render of `source`. A cache hit resolves the handle
    /// immediately without touching the queue.
    pub fn request(&mut self, source: &str) -> RenderHandle {
        if let Some(cached) = self.cache.get(source) {
            return RenderHandle::new(state_from_cache(cached));
        }

        let handle = RenderHandle::new(RenderState::Pending);
        self.queue.push_back(Job {
            source: source.to_string(),
            slot: Rc::clone(&handle.slot),
        });
        handle
    }

    /// Processes at most one queued job. Returns `true` if work remains.
    pub fn pump(&mut self) -> bool {
        while let Some(job) = self.queue.pop_front() {
            if !job.slot.borrow().attached {
                debug!("dropping render job for detached widget");
                continue;
            }

            // A duplicate request may have been resolved since this job was
            // queued.
            let result = match self.cache.get(&job.source) {
                Some(cached) => cached.clone(),
                None => {
                    let result = self
                        .renderer
                        .render(&job.source)
                        .map_err(|e| e.to_string());
                    if let Err(msg) = &result {
                        warn!("render failed: {msg}");
                    }
                    self.cache.insert(job.source.clone(), result.clone());
                    result
                }
            };

            let mut slot = job.slot.borrow_mut();
            if slot.attached {
                slot.state = state_from_cache(&result);
            }
            break;
        }
        !self.queue.is_empty()
    }

    /// Pumps until the queue is empty.
    pub fn drain(&mut self) {
        while self.pump() {}
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Forgets all cached results, e.g. after the host swapped renderers.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn state_from_cache(cached: &Result<String, String>) -> RenderState {
    match cached {
        Ok(output) => RenderState::Rendered(output.clone()),
        Err(msg) => RenderState::Failed(msg.clone()),
    }
}
